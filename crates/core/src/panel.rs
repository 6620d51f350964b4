//! The settings controller.
//!
//! A [`Panel`] owns the state, mirrors it into a [`Surface`] and hands it to a
//! [`Persist`] sink after every mutation. UI events arrive through
//! [`Panel::dispatch`]; each handler runs to completion before the next one.

use std::{error, str::FromStr};

use indexmap::IndexMap;
use log::{debug, warn};

use crate::{
    AxisRange, AxisTag, AxisValues, Catalog, CssParam, CssParams, Error, FeatureFlags,
    FeatureTag, FontConfig, Param, Result, State, Theme,
    config::{DEFAULT_KEY_STEP, MODIFIER_MULTIPLIER, OPSZ_AUTO_MAX, OPSZ_AUTO_MIN},
    preview::PreviewStyle,
    request::{self, FontFormat, GenerateRequest},
    surface::{ControlKind, Surface},
};

pub type PersistError = Box<dyn error::Error + Send + Sync>;

/// Destination of the full state after every mutation.
pub trait Persist {
    fn save(&mut self, state: &State) -> std::result::Result<(), PersistError>;
}

/// Discards every save. For sessions that must not touch storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPersist;

impl Persist for NoPersist {
    fn save(&mut self, _state: &State) -> std::result::Result<(), PersistError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
}

impl FromStr for ArrowKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "arrowup" => Ok(ArrowKey::Up),
            "down" | "arrowdown" => Ok(ArrowKey::Down),
            _ => Err(Error::UnknownParam(s.to_string())),
        }
    }
}

/// A UI event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Slider { param: Param, value: f64 },
    Input { param: Param, value: f64 },
    /// Arrow key on a focused number input; `modifier` multiplies the step.
    Key { param: Param, key: ArrowKey, modifier: bool },
    Reset(Param),
    ResetAll,
    Theme(Theme),
    SelectFont(String),
    OpszAuto(bool),
    Feature { tag: FeatureTag, enabled: bool },
    PreviewText(String),
}

/// Whether an event changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The target control is missing or disabled, or the value was not a number.
    Ignored,
}

pub struct Panel<S, P> {
    catalog: Catalog,
    font: FontConfig,
    state: State,
    surface: S,
    persist: P,
    preview: PreviewStyle,
    key_step: f64,
}

impl<S: Surface, P: Persist> Panel<S, P> {
    /// Builds the panel from loaded state, mirrors it into `surface` and saves once.
    ///
    /// An unknown persisted font falls back to the first catalog entry; the
    /// persisted axis values go through the same merge as a font switch.
    pub fn new(catalog: Catalog, loaded: State, surface: S, persist: P) -> Self {
        let font = catalog.get(&loaded.prefs.font).unwrap_or_else(|_| catalog.first()).clone();
        if font.id != loaded.prefs.font {
            debug!("Persisted font {:?} unavailable, using {}", loaded.prefs.font, font.id);
        }

        let state = State {
            axes: merge_axes(&font, Some(&loaded.axes)),
            css: sanitize_css(loaded.css),
            features: merge_features(&font, &loaded.features),
            prefs: crate::Preferences { font: font.id.clone(), ..loaded.prefs },
        };

        let mut panel = Self {
            catalog,
            font,
            state,
            surface,
            persist,
            preview: PreviewStyle::default(),
            key_step: DEFAULT_KEY_STEP,
        };
        panel.initialize();
        panel
    }

    /// Step applied by arrow keys on number inputs (before the modifier).
    pub fn with_key_step(mut self, step: f64) -> Self {
        if step.is_finite() && step > 0.0 {
            self.key_step = step;
        }
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn font(&self) -> &FontConfig {
        &self.font
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn persist(&self) -> &P {
        &self.persist
    }

    pub fn preview(&self) -> &PreviewStyle {
        &self.preview
    }

    /// Payload for the generation server at the current axes.
    pub fn generate_request(&self) -> GenerateRequest {
        GenerateRequest::new(&self.font, &self.state)
    }

    pub fn download_name(&self, format: FontFormat) -> String {
        request::download_name(&self.font, &self.state, format)
    }

    pub fn into_parts(self) -> (State, S, P) {
        (self.state, self.surface, self.persist)
    }

    /// Runs one event handler to completion and persists if it changed state.
    pub fn dispatch(&mut self, event: Event) -> Result<Outcome> {
        debug!("Dispatching {event:?}");
        let outcome = match event {
            Event::Slider { param, value } => self.on_value(param, ControlKind::Slider, value)?,
            Event::Input { param, value } => self.on_value(param, ControlKind::Input, value)?,
            Event::Key { param, key, modifier } => self.on_key(param, key, modifier)?,
            Event::Reset(param) => self.reset(param)?,
            Event::ResetAll => self.reset_all(),
            Event::Theme(theme) => self.set_theme(theme),
            Event::SelectFont(id) => self.apply_switch(&id, None)?,
            Event::OpszAuto(enabled) => self.set_opsz_auto(enabled),
            Event::Feature { tag, enabled } => self.set_feature(tag, enabled)?,
            Event::PreviewText(text) => self.set_preview_text(text),
        };
        if outcome == Outcome::Applied {
            self.commit();
        }
        Ok(outcome)
    }

    /// Activates `font_id`, rebuilding axis values from its defaults with
    /// `saved` layered on top, reconfigures every axis control and persists.
    pub fn switch_font(&mut self, font_id: &str, saved: Option<&AxisValues>) -> Result<Outcome> {
        let outcome = self.apply_switch(font_id, saved)?;
        self.commit();
        Ok(outcome)
    }

    fn apply_switch(&mut self, font_id: &str, saved: Option<&AxisValues>) -> Result<Outcome> {
        let font = self.catalog.get(font_id)?.clone();
        debug!("Switching font {} -> {}", self.font.id, font.id);

        self.state.axes = merge_axes(&font, saved);
        self.state.features = merge_features(&font, &self.state.features);
        self.state.prefs.font = font.id.clone();
        self.font = font;

        self.surface.show_font(&self.font);
        self.configure_axis_controls();
        self.show_features();
        self.apply_opsz_auto();
        self.update_font_features();
        Ok(Outcome::Applied)
    }

    fn initialize(&mut self) {
        self.surface.show_theme(self.state.prefs.theme);
        self.surface.show_font(&self.font);
        self.surface.show_preview_text(&self.state.prefs.preview_text);
        self.surface.show_opsz_auto(self.state.prefs.opsz_auto);
        for css in CssParam::ALL {
            self.mirror(Param::Css(css), self.state.css.get(css));
        }
        self.configure_axis_controls();
        self.show_features();

        self.update_css_properties();
        self.update_font_features();
        self.apply_opsz_auto();
        self.commit();
    }

    fn range(&self, param: Param) -> Result<AxisRange> {
        match param {
            Param::Css(css) => Ok(css.range()),
            Param::Axis(tag) => self.font.axis(tag).copied().ok_or_else(|| Error::AxisNotInFont {
                tag: tag.to_string(),
                font: self.font.id.clone(),
            }),
        }
    }

    fn control_enabled(&mut self, param: Param, kind: ControlKind) -> Option<bool> {
        self.surface.control(&param, kind).map(|c| c.is_enabled())
    }

    fn on_value(&mut self, param: Param, kind: ControlKind, value: f64) -> Result<Outcome> {
        let range = self.range(param)?;
        if self.control_enabled(param, kind) != Some(true) {
            debug!("Ignoring {kind:?} event for {param}: control missing or disabled");
            return Ok(Outcome::Ignored);
        }
        if !value.is_finite() {
            debug!("Ignoring non-numeric value for {param}");
            return Ok(Outcome::Ignored);
        }

        let value = match param {
            Param::Css(css) if css.is_integral() => value.trunc(),
            _ => value,
        };
        self.set_value(param, range.clamp(value));
        Ok(Outcome::Applied)
    }

    fn on_key(&mut self, param: Param, key: ArrowKey, modifier: bool) -> Result<Outcome> {
        let range = self.range(param)?;
        let Some(input) = self.surface.control(&param, ControlKind::Input) else {
            return Ok(Outcome::Ignored);
        };
        if !input.is_enabled() {
            return Ok(Outcome::Ignored);
        }

        let current = Some(input.value()).filter(|v| v.is_finite()).unwrap_or(0.0);
        let step = if modifier { self.key_step * MODIFIER_MULTIPLIER } else { self.key_step };
        let stepped = match key {
            ArrowKey::Up => (current + step).min(range.max),
            ArrowKey::Down => (current - step).max(range.min),
        };
        input.set_value(stepped);
        self.on_value(param, ControlKind::Input, stepped)
    }

    /// Stores `value`, mirrors it into both controls and recomputes the preview.
    fn set_value(&mut self, param: Param, value: f64) {
        match param {
            Param::Axis(tag) => {
                self.state.axes.insert(tag, value);
                self.mirror(param, value);
                self.update_font_variations();
            }
            Param::Css(css) => {
                self.state.css.set(css, value);
                self.mirror(param, value);
                self.update_css_properties();
                if css == CssParam::Size && self.state.prefs.opsz_auto {
                    self.apply_opsz_auto();
                }
            }
        }
    }

    fn reset(&mut self, param: Param) -> Result<Outcome> {
        let range = self.range(param)?;
        if param == Param::Axis(AxisTag::OPSZ) && self.state.prefs.opsz_auto {
            self.apply_opsz_auto();
        } else {
            self.set_value(param, range.default);
        }
        Ok(Outcome::Applied)
    }

    fn reset_all(&mut self) -> Outcome {
        self.state.axes = self.font.default_axis_values();
        for (tag, value) in self.state.axes.clone() {
            self.mirror(Param::Axis(tag), value);
        }

        self.state.css = CssParams::default();
        for css in CssParam::ALL {
            self.mirror(Param::Css(css), self.state.css.get(css));
        }

        self.state.prefs.opsz_auto = false;
        self.surface.show_opsz_auto(false);

        self.update_css_properties();
        self.apply_opsz_auto();
        Outcome::Applied
    }

    fn set_theme(&mut self, theme: Theme) -> Outcome {
        self.state.prefs.theme = theme;
        self.surface.show_theme(theme);
        Outcome::Applied
    }

    fn set_opsz_auto(&mut self, enabled: bool) -> Outcome {
        self.state.prefs.opsz_auto = enabled;
        self.surface.show_opsz_auto(enabled);
        self.apply_opsz_auto();
        Outcome::Applied
    }

    fn set_feature(&mut self, tag: FeatureTag, enabled: bool) -> Result<Outcome> {
        let Some(flag) = self.state.features.get_mut(&tag) else {
            return Err(Error::UnknownParam(tag.to_string()));
        };
        *flag = enabled;
        self.surface.show_feature(tag, enabled);
        self.update_font_features();
        Ok(Outcome::Applied)
    }

    fn set_preview_text(&mut self, text: String) -> Outcome {
        self.surface.show_preview_text(&text);
        self.state.prefs.preview_text = text;
        Outcome::Applied
    }

    /// Couples optical size to the font size while auto mode is on.
    /// No-op for fonts without an `opsz` axis.
    fn apply_opsz_auto(&mut self) {
        if let Some(range) = self.font.axis(AxisTag::OPSZ).copied() {
            let param = Param::Axis(AxisTag::OPSZ);
            let auto = self.state.prefs.opsz_auto;

            if auto {
                let value = range.clamp(self.state.css.size.clamp(OPSZ_AUTO_MIN, OPSZ_AUTO_MAX));
                self.state.axes.insert(AxisTag::OPSZ, value);
                self.mirror(param, value);
            }
            for kind in [ControlKind::Slider, ControlKind::Input] {
                if let Some(control) = self.surface.control(&param, kind) {
                    control.set_enabled(!auto);
                }
            }
        }
        self.update_font_variations();
    }

    /// Shows, ranges and fills the pair of every axis in the active font and
    /// hides every other axis pair.
    fn configure_axis_controls(&mut self) {
        for tag in self.catalog.all_axes() {
            let param = Param::Axis(tag);
            let range = self.font.axis(tag).copied();
            let value = self.state.axes.get(&tag).copied();
            for kind in [ControlKind::Slider, ControlKind::Input] {
                let Some(control) = self.surface.control(&param, kind) else {
                    continue;
                };
                match (range, value) {
                    (Some(range), Some(value)) => {
                        control.set_visible(true);
                        control.set_enabled(true);
                        control.set_range(&range);
                        control.set_value(value);
                    }
                    _ => control.set_visible(false),
                }
            }
        }
    }

    fn show_features(&mut self) {
        for (tag, enabled) in &self.state.features {
            self.surface.show_feature(*tag, *enabled);
        }
    }

    fn mirror(&mut self, param: Param, value: f64) {
        for kind in [ControlKind::Slider, ControlKind::Input] {
            if let Some(control) = self.surface.control(&param, kind) {
                control.set_value(value);
            }
        }
    }

    fn update_font_variations(&mut self) {
        self.preview.apply_variations(&self.font, &self.state.axes);
        self.surface.apply_preview(&self.preview);
    }

    fn update_font_features(&mut self) {
        self.preview.apply_features(&self.state.features);
        self.surface.apply_preview(&self.preview);
    }

    fn update_css_properties(&mut self) {
        self.preview.apply_css(&self.state.css);
        self.surface.apply_preview(&self.preview);
    }

    fn commit(&mut self) {
        if let Err(e) = self.persist.save(&self.state) {
            warn!("Failed to persist settings: {e}");
        }
    }
}

/// Declared defaults of `font` with `saved` values layered on top.
///
/// Saved axes outside the font's table are dropped, saved values are clamped,
/// and non-finite saved values fall back to the default.
pub fn merge_axes(font: &FontConfig, saved: Option<&AxisValues>) -> AxisValues {
    font.axes
        .iter()
        .map(|(tag, range)| {
            let value = saved
                .and_then(|s| s.get(tag))
                .copied()
                .filter(|v| v.is_finite())
                .map(|v| range.clamp(v))
                .unwrap_or(range.default);
            (*tag, value)
        })
        .collect()
}

/// The font's feature panel with any previous states for shared tags.
pub fn merge_features(font: &FontConfig, previous: &FeatureFlags) -> FeatureFlags {
    font.features
        .iter()
        .map(|(tag, default)| (*tag, previous.get(tag).copied().unwrap_or(*default)))
        .collect::<IndexMap<_, _>>()
}

fn sanitize_css(css: CssParams) -> CssParams {
    let mut clean = CssParams::default();
    for param in CssParam::ALL {
        let value = css.get(param);
        if value.is_finite() {
            clean.set(param, param.range().clamp(value));
        }
    }
    clean
}
