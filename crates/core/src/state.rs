//! Mutable panel state: axis values, CSS-only parameters, features and preferences.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    AxisRange, AxisTag, Error, FeatureTag, FontConfig, Result,
    config::DEFAULT_PREVIEW_TEXT,
};

/// Current value of every axis of the active font.
pub type AxisValues = IndexMap<AxisTag, f64>;

/// Enabled state of every feature on the active font's panel.
pub type FeatureFlags = IndexMap<FeatureTag, bool>;

/// Presentation-only parameters. Never embedded in the generated font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CssParam {
    Size,
    LetterSpacing,
    LineHeight,
}

impl CssParam {
    pub const ALL: [CssParam; 3] = [CssParam::Size, CssParam::LetterSpacing, CssParam::LineHeight];

    /// Control id used by the surface (`letter-spacing`).
    pub const fn id(self) -> &'static str {
        match self {
            CssParam::Size => "size",
            CssParam::LetterSpacing => "letter-spacing",
            CssParam::LineHeight => "line-height",
        }
    }

    pub const fn range(self) -> AxisRange {
        match self {
            CssParam::Size => AxisRange::new(8.0, 200.0, 22.0, 1.0),
            CssParam::LetterSpacing => AxisRange::new(-20.0, 100.0, 0.0, 1.0),
            CssParam::LineHeight => AxisRange::new(80.0, 250.0, 120.0, 1.0),
        }
    }

    /// Integral parameters drop any fractional part of incoming values.
    pub const fn is_integral(self) -> bool {
        matches!(self, CssParam::Size | CssParam::LineHeight)
    }
}

impl FromStr for CssParam {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "size" => Ok(CssParam::Size),
            "letter-spacing" | "letterSpacing" => Ok(CssParam::LetterSpacing),
            "line-height" | "lineHeight" => Ok(CssParam::LineHeight),
            _ => Err(Error::UnknownParam(s.to_string())),
        }
    }
}

impl fmt::Display for CssParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Size in px, letter spacing in hundredths of an em, line height in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssParams {
    pub size: f64,
    pub letter_spacing: f64,
    pub line_height: f64,
}

impl CssParams {
    pub fn get(&self, param: CssParam) -> f64 {
        match param {
            CssParam::Size => self.size,
            CssParam::LetterSpacing => self.letter_spacing,
            CssParam::LineHeight => self.line_height,
        }
    }

    pub fn set(&mut self, param: CssParam, value: f64) {
        match param {
            CssParam::Size => self.size = value,
            CssParam::LetterSpacing => self.letter_spacing = value,
            CssParam::LineHeight => self.line_height = value,
        }
    }
}

impl Default for CssParams {
    fn default() -> Self {
        Self {
            size: CssParam::Size.range().default,
            letter_spacing: CssParam::LetterSpacing.range().default,
            line_height: CssParam::LineHeight.range().default,
        }
    }
}

/// A numeric parameter bound to a slider/input pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    Axis(AxisTag),
    Css(CssParam),
}

impl Param {
    /// Control id used by the surface: the axis tag or the CSS parameter id.
    pub fn id(&self) -> String {
        match self {
            Param::Axis(tag) => tag.to_string(),
            Param::Css(css) => css.id().to_string(),
        }
    }
}

impl FromStr for Param {
    type Err = Error;

    /// CSS parameter names win over axis tags.
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(css) = s.parse::<CssParam>() {
            return Ok(Param::Css(css));
        }
        s.parse::<AxisTag>()
            .map(Param::Axis)
            .map_err(|_| Error::UnknownParam(s.to_string()))
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl From<CssParam> for Param {
    fn from(css: CssParam) -> Self {
        Param::Css(css)
    }
}

impl From<AxisTag> for Param {
    fn from(tag: AxisTag) -> Self {
        Param::Axis(tag)
    }
}

/// Color scheme of the panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

    pub const fn id(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Theme::ALL
            .into_iter()
            .find(|t| t.id() == s)
            .ok_or_else(|| Error::UnknownTheme(s.to_string()))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub theme: Theme,
    pub preview_text: String,
    pub opsz_auto: bool,
    pub font: String,
}

impl Preferences {
    pub fn with_font(font: &str) -> Self {
        Self {
            theme: Theme::default(),
            preview_text: DEFAULT_PREVIEW_TEXT.to_string(),
            opsz_auto: true,
            font: font.to_string(),
        }
    }
}

/// Everything the panel mutates and persists.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub axes: AxisValues,
    pub css: CssParams,
    pub features: FeatureFlags,
    pub prefs: Preferences,
}

impl State {
    /// Defaults for `font`: declared axis defaults, default CSS and feature panel.
    pub fn defaults_for(font: &FontConfig) -> Self {
        Self {
            axes: font.default_axis_values(),
            css: CssParams::default(),
            features: font.features.clone(),
            prefs: Preferences::with_font(&font.id),
        }
    }

    /// Current value of a numeric parameter.
    pub fn value(&self, param: Param) -> Option<f64> {
        match param {
            Param::Axis(tag) => self.axes.get(&tag).copied(),
            Param::Css(css) => Some(self.css.get(css)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    #[test]
    fn css_params_serialize_camel_case() {
        let json = serde_json::to_string(&CssParams::default()).unwrap();
        assert_eq!(json, r#"{"size":22.0,"letterSpacing":0.0,"lineHeight":120.0}"#);
    }

    #[test]
    fn css_param_accepts_both_spellings() {
        assert_eq!("letter-spacing".parse::<CssParam>().unwrap(), CssParam::LetterSpacing);
        assert_eq!("lineHeight".parse::<CssParam>().unwrap(), CssParam::LineHeight);
    }

    #[test]
    fn param_parsing_prefers_css_names() {
        assert_eq!("size".parse::<Param>().unwrap(), Param::Css(CssParam::Size));
        assert_eq!("wght".parse::<Param>().unwrap(), Param::Axis(AxisTag::new(b"wght")));
        assert!("font-weight".parse::<Param>().is_err());
    }

    #[test]
    fn theme_ids() {
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("solarized".parse::<Theme>().is_err());
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn defaults_follow_font() {
        let catalog = Catalog::builtin();
        let state = State::defaults_for(catalog.get("recursive").unwrap());
        assert_eq!(state.axes.len(), 5);
        assert!(state.features.is_empty());
        assert!(state.prefs.opsz_auto);
        assert_eq!(state.value(Param::Css(CssParam::Size)), Some(22.0));
    }
}
