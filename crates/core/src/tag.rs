//! OpenType tags used as axis and feature keys.

use std::{fmt, str::FromStr};

use font_types::Tag;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// A four-byte OpenType tag that serializes as its string form (`"wght"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OtTag(Tag);

/// Variation axis tag (`wght`, `opsz`, `YTUC`, ...).
pub type AxisTag = OtTag;

/// Layout feature tag (`liga`, `pnum`, ...).
pub type FeatureTag = OtTag;

impl OtTag {
    /// Optical size, the axis coupled to the font size in auto mode.
    pub const OPSZ: OtTag = OtTag(Tag::new(b"opsz"));

    /// Builds a tag from exactly four bytes known at compile time.
    pub const fn new(bytes: &[u8; 4]) -> Self {
        Self(Tag::new(bytes))
    }

    /// The tag text without trailing padding.
    pub fn as_string(&self) -> String {
        self.0.to_string().trim_end().to_string()
    }
}

impl From<Tag> for OtTag {
    fn from(tag: Tag) -> Self {
        Self(tag)
    }
}

impl FromStr for OtTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let valid = (1..=4).contains(&s.len())
            && s.bytes().all(|b| b.is_ascii_graphic())
            && !s.starts_with(' ');
        if !valid {
            return Err(Error::InvalidTag(s.to_string()));
        }
        Tag::from_str(s).map(Self).map_err(|_| Error::InvalidTag(s.to_string()))
    }
}

impl fmt::Display for OtTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl Serialize for OtTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

impl<'de> Deserialize<'de> for OtTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
