//! Downloads of static font instances from the font-generation server.
//!
//! Only axis values, the feature panel and the font file name are sent. The
//! CSS-only preview parameters never leave the panel.

pub mod error;
pub mod orchestrate;
pub mod transport;

pub use error::{Error, Result};
pub use orchestrate::{
    Button, ButtonState, DirectoryTarget, DownloadOutcome, Downloader, Notifier, SaveTarget,
};
pub use transport::{HttpTransport, Transport};
