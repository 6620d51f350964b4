//! Error types for the panel core.

use std::result;

use skrifa::raw::ReadError;

/// Result type for panel core operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while building catalogs or handling panel events.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Tag text is empty, too long or not printable ASCII.
    #[error("invalid OpenType tag: {0:?}")]
    InvalidTag(String),

    /// Font id not present in the catalog.
    #[error("unknown font: {0}")]
    UnknownFont(String),

    /// Parameter, feature or key name not recognized.
    #[error("unknown parameter: {0}")]
    UnknownParam(String),

    /// Axis event for an axis the active font does not declare.
    #[error("axis {tag} is not part of font {font}")]
    AxisNotInFont { tag: String, font: String },

    /// Axis range with min > max, a default outside it or a non-positive step.
    #[error("invalid range for {name}: min {min}, default {default}, max {max}, step {step}")]
    InvalidRange { name: String, min: f64, default: f64, max: f64, step: f64 },

    /// Two catalog entries share an id.
    #[error("duplicate font id in catalog: {0}")]
    DuplicateFont(String),

    /// Catalog without any fonts.
    #[error("catalog is empty")]
    EmptyCatalog,

    /// Theme name other than dark or light.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    /// Font data could not be parsed.
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    /// Font has no `fvar` axes.
    #[error("not a variable font (no fvar axes)")]
    NotVariableFont,

    /// Catalog JSON could not be decoded.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}
