//! Configuration constants for the axisdeck control panel.

/// Font-generation server used when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Endpoint producing a static TTF instance.
pub const GENERATE_TTF_PATH: &str = "/generate-font";

/// Endpoint producing a static WOFF2 instance.
pub const GENERATE_WOFF2_PATH: &str = "/generate-font-woff2";

/// Health probe on the font-generation server.
pub const HEALTH_PATH: &str = "/health";

/// Lower bound of the optical size derived from the font size in auto mode.
pub const OPSZ_AUTO_MIN: f64 = 8.0;

/// Upper bound of the optical size derived from the font size in auto mode.
pub const OPSZ_AUTO_MAX: f64 = 144.0;

/// Arrow-key step on a focused number input.
pub const DEFAULT_KEY_STEP: f64 = 1.0;

/// Multiplier applied to the key step while the modifier key is held.
pub const MODIFIER_MULTIPLIER: f64 = 10.0;

/// Preview text shown before the user types anything.
pub const DEFAULT_PREVIEW_TEXT: &str = "The quick brown fox jumps over the lazy dog";

/// Settings file name inside the per-user config directory.
pub const STORE_FILENAME: &str = "settings.json";

/// Persisted record keys.
pub mod keys {
    pub const AXES: &str = "fontAxes";
    pub const CSS: &str = "fontCSS";
    pub const FEATURES: &str = "fontFeatures";
    pub const THEME: &str = "theme";
    pub const PREVIEW_TEXT: &str = "previewText";
    pub const OPSZ_AUTO: &str = "opszAuto";
    pub const SELECTED_FONT: &str = "selectedFont";

    /// Every record written by a save, in write order.
    pub const ALL: &[&str] =
        &[AXES, CSS, FEATURES, THEME, PREVIEW_TEXT, OPSZ_AUTO, SELECTED_FONT];
}
