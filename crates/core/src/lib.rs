//! axisdeck core - headless state binding for a variable font control panel.
//!
//! Axis values, CSS-only presentation parameters and feature flags live in a
//! single [`State`] owned by a [`Panel`], which mirrors them into a
//! [`Surface`] and persists them after every event.

pub mod catalog;
pub mod config;
pub mod error;
pub mod filename;
pub mod panel;
pub mod preview;
pub mod request;
pub mod state;
pub mod surface;
pub mod tag;

pub use catalog::{AxisRange, Catalog, FontConfig};
pub use error::{Error, Result};
pub use panel::{ArrowKey, Event, NoPersist, Outcome, Panel, Persist, PersistError};
pub use preview::PreviewStyle;
pub use request::{FontFormat, GenerateRequest};
pub use state::{AxisValues, CssParam, CssParams, FeatureFlags, Param, Preferences, State, Theme};
pub use surface::{Control, ControlKind, ControlPair, ControlState, HeadlessSurface, Surface};
pub use tag::{AxisTag, FeatureTag, OtTag};
