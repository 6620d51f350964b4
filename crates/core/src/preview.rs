//! Live preview styling.
//!
//! Translates axis values, feature flags and CSS-only parameters into the
//! inline style properties of the preview element. Nothing here is sent to
//! the font-generation server.

use crate::{AxisValues, CssParams, FeatureFlags, FontConfig, State};

/// Inline style properties applied to the preview element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewStyle {
    pub font_family: String,
    pub variation_settings: String,
    pub feature_settings: String,
    pub font_size: String,
    pub letter_spacing: String,
    pub line_height: String,
}

impl PreviewStyle {
    pub fn render(font: &FontConfig, state: &State) -> Self {
        let mut style = Self { font_family: font.family.clone(), ..Self::default() };
        style.apply_variations(font, &state.axes);
        style.apply_features(&state.features);
        style.apply_css(&state.css);
        style
    }

    pub fn apply_variations(&mut self, font: &FontConfig, axes: &AxisValues) {
        self.font_family = font.family.clone();
        self.variation_settings = variation_settings(font, axes);
    }

    pub fn apply_features(&mut self, features: &FeatureFlags) {
        self.feature_settings = feature_settings(features);
    }

    pub fn apply_css(&mut self, css: &CssParams) {
        self.font_size = format!("{}px", number(css.size));
        self.letter_spacing = format!("{}em", number(css.letter_spacing / 100.0));
        self.line_height = number(css.line_height / 100.0);
    }

    /// Renders the properties as a CSS declaration block.
    pub fn to_css(&self) -> String {
        [
            ("font-family", format!("\"{}\"", self.font_family)),
            ("font-variation-settings", self.variation_settings.clone()),
            ("font-feature-settings", self.feature_settings.clone()),
            ("font-size", self.font_size.clone()),
            ("letter-spacing", self.letter_spacing.clone()),
            ("line-height", self.line_height.clone()),
        ]
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(prop, value)| format!("{prop}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// `'tag' value` pairs for every axis in the font's table, in table order.
pub fn variation_settings(font: &FontConfig, axes: &AxisValues) -> String {
    font.axes
        .keys()
        .filter_map(|tag| axes.get(tag).map(|value| format!("'{tag}' {}", number(*value))))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Enabled feature tags, or `normal` when none are enabled.
pub fn feature_settings(features: &FeatureFlags) -> String {
    let enabled: Vec<String> = features
        .iter()
        .filter(|(_, enabled)| **enabled)
        .map(|(tag, _)| format!("'{tag}'"))
        .collect();
    if enabled.is_empty() { "normal".to_string() } else { enabled.join(", ") }
}

/// Shortest decimal form: `700`, `0.05`, `-203`.
pub fn number(value: f64) -> String {
    if value == 0.0 { "0".to_string() } else { format!("{value}") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AxisTag, Catalog, FeatureTag};

    fn roboto() -> FontConfig {
        Catalog::builtin().get("roboto-flex").unwrap().clone()
    }

    #[test]
    fn variation_settings_follow_table_order() {
        let font = roboto();
        let mut axes = AxisValues::new();
        axes.insert(AxisTag::new(b"wght"), 700.0);
        axes.insert(AxisTag::new(b"opsz"), 14.0);
        assert_eq!(variation_settings(&font, &axes), "'opsz' 14, 'wght' 700");
    }

    #[test]
    fn variation_settings_skip_foreign_axes() {
        let font = roboto();
        let mut axes = AxisValues::new();
        axes.insert(AxisTag::new(b"CASL"), 1.0);
        axes.insert(AxisTag::new(b"YTDE"), -203.0);
        assert_eq!(variation_settings(&font, &axes), "'YTDE' -203");
    }

    #[test]
    fn feature_settings_lists_enabled_tags() {
        let mut features = FeatureFlags::new();
        features.insert(FeatureTag::new(b"liga"), true);
        features.insert(FeatureTag::new(b"pnum"), false);
        features.insert(FeatureTag::new(b"rvrn"), true);
        assert_eq!(feature_settings(&features), "'liga', 'rvrn'");
    }

    #[test]
    fn feature_settings_default_to_normal() {
        let mut features = FeatureFlags::new();
        assert_eq!(feature_settings(&features), "normal");
        features.insert(FeatureTag::new(b"liga"), false);
        assert_eq!(feature_settings(&features), "normal");
    }

    #[test]
    fn css_units() {
        let mut style = PreviewStyle::default();
        style.apply_css(&CssParams { size: 40.0, letter_spacing: 5.0, line_height: 120.0 });
        assert_eq!(style.font_size, "40px");
        assert_eq!(style.letter_spacing, "0.05em");
        assert_eq!(style.line_height, "1.2");
    }

    #[test]
    fn zero_letter_spacing() {
        let mut style = PreviewStyle::default();
        style.apply_css(&CssParams::default());
        assert_eq!(style.letter_spacing, "0em");
    }

    #[test]
    fn css_block_contains_all_properties() {
        let font = roboto();
        let state = crate::State::defaults_for(&font);
        let css = PreviewStyle::render(&font, &state).to_css();
        assert!(css.contains("font-family: \"Roboto Flex\";"));
        assert!(css.contains("font-feature-settings: 'liga', 'rvrn';"));
        assert!(css.contains("font-size: 22px;"));
        assert!(css.contains("line-height: 1.2;"));
    }
}
