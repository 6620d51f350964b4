//! Human-readable summaries of panel state.

use axisdeck_core::{
    AxisTag, Catalog, CssParam, FontConfig, FontFormat, Param, Persist, Surface, preview::number,
};

use crate::session::CliPanel;

/// Full panel summary: font, preferences, every parameter, preview style and download name.
pub fn describe(panel: &CliPanel) -> String {
    let state = panel.state();
    let font = panel.font();
    let mut lines = vec![
        format!("Font:       {} ({})", font.name, font.id),
        format!("Theme:      {}", state.prefs.theme),
        format!("Auto opsz:  {}", on_off(state.prefs.opsz_auto)),
        format!("Text:       {}", state.prefs.preview_text),
        String::new(),
        "Axes:".to_string(),
    ];

    for (tag, range) in &font.axes {
        let value = state.axes.get(tag).copied().unwrap_or(range.default);
        let locked = panel.surface().pair(*tag).is_some_and(|pair| !pair.input.enabled);
        lines.push(format!(
            "  {:4}  {:>8}  ({:>6} .. {:>6}, default {:>6}){}",
            tag.to_string(),
            number(value),
            number(range.min),
            number(range.max),
            number(range.default),
            if locked { "  [auto]" } else { "" },
        ));
    }

    lines.push(String::new());
    lines.push("CSS:".to_string());
    lines.extend(CssParam::ALL.into_iter().map(|css| {
        let range = css.range();
        format!(
            "  {:14}  {:>6}  ({} .. {}, default {})",
            css.id(),
            number(state.css.get(css)),
            number(range.min),
            number(range.max),
            number(range.default),
        )
    }));

    if !state.features.is_empty() {
        let features: Vec<String> =
            state.features.iter().map(|(tag, on)| format!("{tag} {}", on_off(*on))).collect();
        lines.push(String::new());
        lines.push(format!("Features:   {}", features.join(", ")));
    }

    lines.push(String::new());
    lines.push("Preview style:".to_string());
    lines.extend(panel.preview().to_css().lines().map(|line| format!("  {line}")));

    lines.push(String::new());
    lines.push(format!("Download:   {}", panel.download_name(FontFormat::Ttf)));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// One line per catalog font, marking the active one.
pub fn list_fonts(catalog: &Catalog, active: &str) -> String {
    catalog
        .iter()
        .map(|font| {
            format!(
                "{} {:14} {:16} {:>2} axes  {}",
                if font.id == active { "*" } else { " " },
                font.id,
                font.name,
                font.axes.len(),
                font.filename,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Axis table of a font derived from its `fvar`, like `fonttools` prints it.
pub fn axis_table(font: &FontConfig) -> String {
    let mut out = String::from("Variable font axes:\n");
    for (tag, range) in &font.axes {
        out.push_str(&format!(
            "  {:4}  {:6.0} .. {:6.0} (default: {:6.0})\n",
            tag.to_string(),
            range.min,
            range.max,
            range.default,
        ));
    }
    out
}

/// Message printed after a parameter change.
pub fn value_line<S: Surface, P: Persist>(
    panel: &axisdeck_core::Panel<S, P>,
    param: Param,
) -> String {
    match panel.state().value(param) {
        Some(value) => format!("{param} = {}", number(value)),
        None => format!("{param} is not set"),
    }
}

/// Whether `tag` is locked by auto optical size on the active font.
pub fn opsz_locked(panel: &CliPanel, tag: AxisTag) -> bool {
    tag == AxisTag::OPSZ && panel.state().prefs.opsz_auto && panel.font().has_axis(tag)
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}
