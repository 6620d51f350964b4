//! Payload sent to the font-generation server.

use std::fmt;

use serde::Serialize;

use crate::{
    AxisValues, FeatureFlags, FontConfig, State,
    config::{GENERATE_TTF_PATH, GENERATE_WOFF2_PATH},
    filename,
};

/// Output format of a generated instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    Ttf,
    Woff2,
}

impl FontFormat {
    pub const fn endpoint(self) -> &'static str {
        match self {
            FontFormat::Ttf => GENERATE_TTF_PATH,
            FontFormat::Woff2 => GENERATE_WOFF2_PATH,
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            FontFormat::Ttf => "ttf",
            FontFormat::Woff2 => "woff2",
        }
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FontFormat::Ttf => "TTF",
            FontFormat::Woff2 => "WOFF2",
        })
    }
}

/// Axes plus either the feature panel or nothing, and the font file name.
/// CSS-only parameters have no field here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub axes: AxisValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureFlags>,
    pub font: String,
}

impl GenerateRequest {
    pub fn new(font: &FontConfig, state: &State) -> Self {
        let axes = font
            .axes
            .keys()
            .filter_map(|tag| state.axes.get(tag).map(|value| (*tag, *value)))
            .collect();
        let features = font.has_feature_panel().then(|| state.features.clone());
        Self { axes, features, font: font.filename.clone() }
    }
}

/// Save-as name for an instance of `font` at the current axes.
pub fn download_name(font: &FontConfig, state: &State, format: FontFormat) -> String {
    let name = filename::generate(font, &state.axes);
    match format {
        FontFormat::Ttf => name,
        FontFormat::Woff2 => filename::woff2(&name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AxisTag, Catalog};

    #[test]
    fn payload_excludes_css_params() {
        let catalog = Catalog::builtin();
        let font = catalog.get("roboto-flex").unwrap();
        let mut state = State::defaults_for(font);
        state.css.size = 90.0;
        state.axes.insert(AxisTag::new(b"wght"), 700.0);

        let json = serde_json::to_value(GenerateRequest::new(font, &state)).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(json["axes"]["wght"], 700.0);
        assert_eq!(json["font"], "Roboto-Flex-Variable.ttf");
        assert_eq!(json["features"]["liga"], true);
        assert!(!json.to_string().contains("size"));
    }

    #[test]
    fn fonts_without_feature_panel_omit_features() {
        let catalog = Catalog::builtin();
        let font = catalog.get("recursive").unwrap();
        let state = State::defaults_for(font);
        let json = serde_json::to_value(GenerateRequest::new(font, &state)).unwrap();
        assert!(json.get("features").is_none());
        assert_eq!(json["axes"].as_object().unwrap().len(), 5);
    }

    #[test]
    fn download_name_per_format() {
        let catalog = Catalog::builtin();
        let font = catalog.get("roboto-flex").unwrap();
        let state = State::defaults_for(font);
        assert_eq!(download_name(font, &state, FontFormat::Ttf), "RobotoFlex-Custom.ttf");
        assert_eq!(download_name(font, &state, FontFormat::Woff2), "RobotoFlex-Custom.woff2");
    }
}
