//! Capability interface between the panel and whatever renders it.
//!
//! The panel never touches concrete widgets. It talks to a [`Surface`] that
//! hands out [`Control`]s by parameter, which lets a real UI and the
//! [`HeadlessSurface`] share every handler.

use indexmap::IndexMap;

use crate::{AxisRange, Catalog, CssParam, FeatureTag, FontConfig, Param, Theme, preview::PreviewStyle};

/// A single numeric control: a slider or a number input.
pub trait Control {
    fn value(&self) -> f64;
    fn set_value(&mut self, value: f64);
    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
    fn set_range(&mut self, range: &AxisRange);
    fn set_visible(&mut self, visible: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Slider,
    Input,
}

/// The page the panel drives. Optional widgets default to no-ops.
pub trait Surface {
    /// Control of `kind` bound to `param`, if the page has one.
    fn control(&mut self, param: &Param, kind: ControlKind) -> Option<&mut dyn Control>;

    fn apply_preview(&mut self, style: &PreviewStyle);

    fn show_theme(&mut self, theme: Theme);

    fn show_font(&mut self, _font: &FontConfig) {}

    fn show_opsz_auto(&mut self, _checked: bool) {}

    fn show_feature(&mut self, _tag: FeatureTag, _enabled: bool) {}

    fn show_preview_text(&mut self, _text: &str) {}
}

/// In-memory widget state.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub value: f64,
    pub enabled: bool,
    pub visible: bool,
    pub range: AxisRange,
}

impl ControlState {
    pub fn new(range: AxisRange) -> Self {
        Self { value: range.default, enabled: true, visible: true, range }
    }
}

impl Control for ControlState {
    fn value(&self) -> f64 {
        self.value
    }

    fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn set_range(&mut self, range: &AxisRange) {
        self.range = *range;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlPair {
    pub slider: ControlState,
    pub input: ControlState,
}

impl ControlPair {
    pub fn new(range: AxisRange) -> Self {
        Self { slider: ControlState::new(range), input: ControlState::new(range) }
    }

    /// Whether both controls show `value` with the same enabled state.
    pub fn shows(&self, value: f64) -> bool {
        self.slider.value == value
            && self.input.value == value
            && self.slider.enabled == self.input.enabled
    }
}

/// Surface without a rendering environment, used by the CLI and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessSurface {
    pub pairs: IndexMap<Param, ControlPair>,
    pub preview: PreviewStyle,
    pub theme: Option<Theme>,
    pub font: Option<String>,
    /// `None` when the page has no auto optical size checkbox.
    pub opsz_auto: Option<bool>,
    pub features: IndexMap<FeatureTag, bool>,
    pub preview_text: String,
}

impl HeadlessSurface {
    /// A page with a control pair for every CSS parameter and every axis in the catalog.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        let mut pairs = IndexMap::new();
        for css in CssParam::ALL {
            pairs.insert(Param::Css(css), ControlPair::new(css.range()));
        }
        for font in catalog.iter() {
            for (tag, range) in &font.axes {
                pairs.entry(Param::Axis(*tag)).or_insert_with(|| ControlPair::new(*range));
            }
        }
        Self { pairs, opsz_auto: Some(false), ..Self::default() }
    }

    /// Removes the pair for `param`, as on a page that lacks those controls.
    pub fn without(mut self, param: Param) -> Self {
        self.pairs.shift_remove(&param);
        self
    }

    /// Removes the auto optical size checkbox.
    pub fn without_opsz_checkbox(mut self) -> Self {
        self.opsz_auto = None;
        self
    }

    pub fn pair(&self, param: impl Into<Param>) -> Option<&ControlPair> {
        self.pairs.get(&param.into())
    }
}

impl Surface for HeadlessSurface {
    fn control(&mut self, param: &Param, kind: ControlKind) -> Option<&mut dyn Control> {
        let pair = self.pairs.get_mut(param)?;
        Some(match kind {
            ControlKind::Slider => &mut pair.slider,
            ControlKind::Input => &mut pair.input,
        })
    }

    fn apply_preview(&mut self, style: &PreviewStyle) {
        self.preview = style.clone();
    }

    fn show_theme(&mut self, theme: Theme) {
        self.theme = Some(theme);
    }

    fn show_font(&mut self, font: &FontConfig) {
        self.font = Some(font.id.clone());
    }

    fn show_opsz_auto(&mut self, checked: bool) {
        if let Some(state) = self.opsz_auto.as_mut() {
            *state = checked;
        }
    }

    fn show_feature(&mut self, tag: FeatureTag, enabled: bool) {
        self.features.insert(tag, enabled);
    }

    fn show_preview_text(&mut self, text: &str) {
        self.preview_text = text.to_string();
    }
}
