//! Static font configuration: per-font axis tables and the font catalog.

use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use skrifa::MetadataProvider;

use crate::{AxisTag, Error, FeatureTag, Result};

/// Declared range of one adjustable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64, default: f64, step: f64) -> Self {
        Self { min, max, default, step }
    }

    /// Restricts `value` to `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    fn validate(&self, name: &str) -> Result<()> {
        let finite = [self.min, self.max, self.default, self.step].iter().all(|v| v.is_finite());
        if !finite || self.min > self.max || !self.contains(self.default) || self.step <= 0.0 {
            return Err(Error::InvalidRange {
                name: name.to_string(),
                min: self.min,
                default: self.default,
                max: self.max,
                step: self.step,
            });
        }
        Ok(())
    }
}

/// One supported font family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    pub id: String,
    pub name: String,
    /// CSS `font-family` value used by the preview.
    pub family: String,
    /// Variable font file name sent to the generation server.
    pub filename: String,
    /// Prefix of generated download names.
    pub base_name: String,
    pub axes: IndexMap<AxisTag, AxisRange>,
    /// Feature panel with default states. Empty when the font has none.
    #[serde(default)]
    pub features: IndexMap<FeatureTag, bool>,
}

impl FontConfig {
    pub fn axis(&self, tag: AxisTag) -> Option<&AxisRange> {
        self.axes.get(&tag)
    }

    pub fn has_axis(&self, tag: AxisTag) -> bool {
        self.axes.contains_key(&tag)
    }

    pub fn has_feature_panel(&self) -> bool {
        !self.features.is_empty()
    }

    /// Declared default of every axis, in table order.
    pub fn default_axis_values(&self) -> IndexMap<AxisTag, f64> {
        self.axes.iter().map(|(tag, range)| (*tag, range.default)).collect()
    }

    /// Derives a configuration from the `fvar` table of a variable font.
    pub fn from_font_data(id: &str, filename: &str, data: &[u8]) -> Result<Self> {
        let font = skrifa::FontRef::new(data)?;
        let axes = font.axes();
        if axes.is_empty() {
            return Err(Error::NotVariableFont);
        }

        let axes = axes
            .iter()
            .map(|axis| {
                let (min, max) = (axis.min_value() as f64, axis.max_value() as f64);
                let step = if max - min <= 1.0 { 0.01 } else { 1.0 };
                let range = AxisRange::new(min, max, axis.default_value() as f64, step);
                (AxisTag::from(axis.tag()), range)
            })
            .collect();

        let base_name = Path::new(filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| id.to_string());

        let config = Self {
            id: id.to_string(),
            name: id.to_string(),
            family: id.to_string(),
            filename: filename.to_string(),
            base_name,
            axes,
            features: IndexMap::new(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (tag, range) in &self.axes {
            range.validate(&format!("{}:{tag}", self.id))?;
        }
        Ok(())
    }
}

/// The set of fonts a panel can switch between, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    fonts: Vec<FontConfig>,
}

impl Catalog {
    pub fn new(fonts: Vec<FontConfig>) -> Result<Self> {
        if fonts.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        for (i, font) in fonts.iter().enumerate() {
            font.validate()?;
            if fonts[..i].iter().any(|f| f.id == font.id) {
                return Err(Error::DuplicateFont(font.id.clone()));
            }
        }
        Ok(Self { fonts })
    }

    /// Parses a JSON array of font configurations.
    pub fn from_json(json: &str) -> Result<Self> {
        let fonts: Vec<FontConfig> = serde_json::from_str(json)?;
        debug!("Loaded {} fonts from catalog JSON", fonts.len());
        Self::new(fonts)
    }

    pub fn builtin() -> Self {
        Self { fonts: vec![roboto_flex(), recursive()] }
    }

    pub fn get(&self, id: &str) -> Result<&FontConfig> {
        self.fonts.iter().find(|f| f.id == id).ok_or_else(|| Error::UnknownFont(id.to_string()))
    }

    /// The font selected when nothing has been persisted.
    pub fn first(&self) -> &FontConfig {
        &self.fonts[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &FontConfig> {
        self.fonts.iter()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Union of all axis tags across the catalog, first-seen order.
    pub fn all_axes(&self) -> Vec<AxisTag> {
        let mut tags: Vec<AxisTag> = Vec::new();
        for tag in self.fonts.iter().flat_map(|f| f.axes.keys()) {
            if !tags.contains(tag) {
                tags.push(*tag);
            }
        }
        tags
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn axes(table: &[(&[u8; 4], AxisRange)]) -> IndexMap<AxisTag, AxisRange> {
    table.iter().map(|(tag, range)| (AxisTag::new(tag), *range)).collect()
}

fn roboto_flex() -> FontConfig {
    FontConfig {
        id: "roboto-flex".to_string(),
        name: "Roboto Flex".to_string(),
        family: "Roboto Flex".to_string(),
        filename: "Roboto-Flex-Variable.ttf".to_string(),
        base_name: "RobotoFlex".to_string(),
        axes: axes(&[
            (b"opsz", AxisRange::new(8.0, 144.0, 14.0, 1.0)),
            (b"wght", AxisRange::new(100.0, 1000.0, 400.0, 1.0)),
            (b"GRAD", AxisRange::new(-200.0, 150.0, 0.0, 1.0)),
            (b"wdth", AxisRange::new(25.0, 151.0, 100.0, 1.0)),
            (b"slnt", AxisRange::new(-10.0, 0.0, 0.0, 1.0)),
            (b"XOPQ", AxisRange::new(27.0, 175.0, 96.0, 1.0)),
            (b"YOPQ", AxisRange::new(25.0, 135.0, 79.0, 1.0)),
            (b"XTRA", AxisRange::new(323.0, 603.0, 468.0, 1.0)),
            (b"YTUC", AxisRange::new(528.0, 760.0, 712.0, 1.0)),
            (b"YTLC", AxisRange::new(416.0, 570.0, 514.0, 1.0)),
            (b"YTAS", AxisRange::new(649.0, 854.0, 750.0, 1.0)),
            (b"YTDE", AxisRange::new(-305.0, -98.0, -203.0, 1.0)),
            (b"YTFI", AxisRange::new(560.0, 788.0, 738.0, 1.0)),
        ]),
        features: [(b"liga", true), (b"locl", false), (b"pnum", false), (b"rvrn", true)]
            .into_iter()
            .map(|(tag, on)| (FeatureTag::new(tag), on))
            .collect(),
    }
}

fn recursive() -> FontConfig {
    FontConfig {
        id: "recursive".to_string(),
        name: "Recursive".to_string(),
        family: "Recursive".to_string(),
        filename: "Recursive_VF_1.085.ttf".to_string(),
        base_name: "Recursive".to_string(),
        axes: axes(&[
            (b"MONO", AxisRange::new(0.0, 1.0, 0.0, 0.01)),
            (b"CASL", AxisRange::new(0.0, 1.0, 0.0, 0.01)),
            (b"wght", AxisRange::new(300.0, 1000.0, 300.0, 1.0)),
            (b"slnt", AxisRange::new(-15.0, 0.0, 0.0, 1.0)),
            (b"CRSV", AxisRange::new(0.0, 1.0, 0.5, 0.01)),
        ]),
        features: IndexMap::new(),
    }
}
