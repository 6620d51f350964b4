//! Settings persistence for the axisdeck panel.
//!
//! Records live in a [`KeyValueStore`]: a [`MemoryStore`] for throwaway
//! sessions or a [`FileStore`] that survives across runs.

pub mod error;
pub mod kv;
pub mod settings;

pub use error::{Error, Result};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use settings::{Persistence, clear, load, save};
