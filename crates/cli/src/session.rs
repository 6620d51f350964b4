//! One CLI invocation as one panel session.

use std::{fs::read_to_string, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use axisdeck_core::{
    Catalog, HeadlessSurface, Panel,
    config::{DEFAULT_SERVER_URL, STORE_FILENAME},
};
use axisdeck_download::HttpTransport;
use axisdeck_store::{FileStore, KeyValueStore, MemoryStore, Persistence};
use log::debug;

pub type Store = Box<dyn KeyValueStore>;
pub type CliPanel = Panel<HeadlessSurface, Persistence<Store>>;

#[derive(Debug, Clone, clap::Args)]
pub struct SessionArgs {
    /// Settings file (default: <config dir>/axisdeck/settings.json)
    #[arg(long, env = "AXISDECK_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Keep settings in memory for this invocation only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Font catalog JSON replacing the built-in fonts
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Font-generation server
    #[arg(long, env = "AXISDECK_SERVER", default_value = DEFAULT_SERVER_URL, global = true)]
    pub server: String,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

impl SessionArgs {
    pub fn catalog(&self) -> Result<Catalog> {
        let Some(path) = &self.catalog else {
            return Ok(Catalog::builtin());
        };
        let json = read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        Catalog::from_json(&json).with_context(|| format!("Invalid catalog: {}", path.display()))
    }

    pub fn store_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.store {
            return Ok(path.clone());
        }
        let dir = dirs::config_dir().context("No per-user config directory; pass --store")?;
        Ok(dir.join("axisdeck").join(STORE_FILENAME))
    }

    pub fn open_store(&self) -> Result<Store> {
        if self.ephemeral {
            return Ok(Box::new(MemoryStore::new()));
        }
        let path = self.store_path()?;
        debug!("Using settings file {}", path.display());
        let store = FileStore::open(&path)
            .with_context(|| format!("Failed to open settings: {}", path.display()))?;
        Ok(Box::new(store))
    }

    /// Loads persisted state and starts a panel on a headless surface.
    pub fn open_panel(&self) -> Result<CliPanel> {
        let catalog = self.catalog()?;
        let persistence = Persistence::new(self.open_store()?);
        let loaded = persistence.load(&catalog);
        let surface = HeadlessSurface::for_catalog(&catalog);
        Ok(Panel::new(catalog, loaded, surface, persistence))
    }

    pub fn transport(&self) -> Result<HttpTransport> {
        let timeout = self.timeout.map(Duration::from_secs);
        HttpTransport::new(&self.server, timeout)
            .with_context(|| format!("Failed to create client for {}", self.server))
    }
}
