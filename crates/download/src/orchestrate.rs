//! Download button handling.
//!
//! One click issues one blocking request on the calling thread. The button is
//! disabled and busy for its duration and returns to idle however it settles.
//! Failures are logged and surfaced through the notifier; nothing is retried.
//!
//! [`Downloader::click_for`] borrows the panel until the request returns, so no
//! other event can be dispatched meanwhile. A front end that must stay
//! interactive takes a [`GenerateRequest`] snapshot with
//! [`Panel::generate_request`] and runs [`Downloader::click`] on a worker,
//! sharing the button; a click that finds the button disabled is
//! [`DownloadOutcome::Skipped`]. The CLI handles one event per run and blocks.

use std::{
    fs::{create_dir_all, write},
    path::PathBuf,
};

use axisdeck_core::{FontFormat, GenerateRequest, Panel, Persist, Surface};
use log::{error, info};

use crate::{Error, Result, Transport};

/// Capability interface of a download button.
pub trait Button {
    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
    fn set_busy(&mut self, busy: bool);
}

/// In-memory button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    pub enabled: bool,
    pub busy: bool,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self { enabled: true, busy: false }
    }
}

impl ButtonState {
    pub fn is_idle(&self) -> bool {
        self.enabled && !self.busy
    }
}

impl Button for ButtonState {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }
}

/// Blocking user-facing alerts.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Collects alerts instead of showing them.
impl Notifier for Vec<String> {
    fn alert(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Receives the generated font under its save-as name.
pub trait SaveTarget {
    fn save(&mut self, filename: &str, data: &[u8]) -> Result<PathBuf>;
}

/// Writes downloads into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SaveTarget for DirectoryTarget {
    fn save(&mut self, filename: &str, data: &[u8]) -> Result<PathBuf> {
        create_dir_all(&self.dir).map_err(|source| Error::Io { path: self.dir.clone(), source })?;
        let path = self.dir.join(filename);
        write(&path, data).map_err(|source| Error::Io { path: path.clone(), source })?;
        Ok(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved(PathBuf),
    Failed,
    /// The button was already disabled, so the click never happened.
    Skipped,
}

pub struct Downloader<T> {
    transport: T,
}

impl<T: Transport> Downloader<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Handles a click on the download button for `format`.
    pub fn click(
        &self,
        format: FontFormat,
        request: &GenerateRequest,
        filename: &str,
        button: &mut impl Button,
        target: &mut impl SaveTarget,
        notifier: &mut impl Notifier,
    ) -> DownloadOutcome {
        if !button.is_enabled() {
            return DownloadOutcome::Skipped;
        }
        button.set_enabled(false);
        button.set_busy(true);

        let result = self
            .transport
            .generate(format, request)
            .and_then(|data| target.save(filename, &data));

        button.set_busy(false);
        button.set_enabled(true);

        match result {
            Ok(path) => {
                info!("Saved {format} instance to {}", path.display());
                DownloadOutcome::Saved(path)
            }
            Err(e) => {
                error!("Error generating {format}: {e}");
                notifier.alert(&format!(
                    "Error generating {format}. Make sure the server is running at {}.",
                    self.transport.location()
                ));
                DownloadOutcome::Failed
            }
        }
    }

    /// Clicks for the panel's active font and axes.
    pub fn click_for<S: Surface, P: Persist>(
        &self,
        panel: &Panel<S, P>,
        format: FontFormat,
        button: &mut impl Button,
        target: &mut impl SaveTarget,
        notifier: &mut impl Notifier,
    ) -> DownloadOutcome {
        let request = panel.generate_request();
        let filename = panel.download_name(format);
        self.click(format, &request, &filename, button, target, notifier)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use axisdeck_core::{Catalog, State};

    use super::*;

    struct Scripted {
        reply: RefCell<Option<Result<Vec<u8>>>>,
        calls: RefCell<Vec<(FontFormat, GenerateRequest)>>,
    }

    impl Scripted {
        fn new(reply: Result<Vec<u8>>) -> Self {
            Self { reply: RefCell::new(Some(reply)), calls: RefCell::new(Vec::new()) }
        }
    }

    impl Transport for Scripted {
        fn generate(&self, format: FontFormat, request: &GenerateRequest) -> Result<Vec<u8>> {
            self.calls.borrow_mut().push((format, request.clone()));
            self.reply.borrow_mut().take().unwrap_or(Ok(Vec::new()))
        }
    }

    #[derive(Default)]
    struct Memory(Vec<(String, Vec<u8>)>);

    impl SaveTarget for Memory {
        fn save(&mut self, filename: &str, data: &[u8]) -> Result<PathBuf> {
            self.0.push((filename.to_string(), data.to_vec()));
            Ok(PathBuf::from(filename))
        }
    }

    fn request() -> GenerateRequest {
        let catalog = Catalog::builtin();
        GenerateRequest::new(catalog.first(), &State::defaults_for(catalog.first()))
    }

    #[test]
    fn success_saves_and_restores_button() {
        let downloader = Downloader::new(Scripted::new(Ok(b"font".to_vec())));
        let mut button = ButtonState::default();
        let mut target = Memory::default();
        let mut alerts: Vec<String> = Vec::new();

        let outcome = downloader.click(
            FontFormat::Ttf,
            &request(),
            "RobotoFlex-Custom.ttf",
            &mut button,
            &mut target,
            &mut alerts,
        );

        assert_eq!(outcome, DownloadOutcome::Saved(PathBuf::from("RobotoFlex-Custom.ttf")));
        assert_eq!(target.0, vec![("RobotoFlex-Custom.ttf".to_string(), b"font".to_vec())]);
        assert!(button.is_idle());
        assert!(alerts.is_empty());
    }

    #[test]
    fn failure_alerts_and_restores_button() {
        let status = Error::Status {
            url: "http://localhost:8000/generate-font".to_string(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        let downloader = Downloader::new(Scripted::new(Err(status)));
        let mut button = ButtonState::default();
        let mut target = Memory::default();
        let mut alerts: Vec<String> = Vec::new();

        let outcome =
            downloader.click(FontFormat::Woff2, &request(), "x.woff2", &mut button, &mut target, &mut alerts);

        assert_eq!(outcome, DownloadOutcome::Failed);
        assert!(button.is_idle());
        assert!(target.0.is_empty());
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].starts_with("Error generating WOFF2."));
    }

    #[test]
    fn disabled_button_skips_request() {
        let downloader = Downloader::new(Scripted::new(Ok(Vec::new())));
        let mut button = ButtonState { enabled: false, busy: true };
        let outcome = downloader.click(
            FontFormat::Ttf,
            &request(),
            "x.ttf",
            &mut button,
            &mut Memory::default(),
            &mut Vec::<String>::new(),
        );
        assert_eq!(outcome, DownloadOutcome::Skipped);
        assert!(downloader.transport().calls.borrow().is_empty());
    }

    #[test]
    fn directory_target_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut target = DirectoryTarget::new(dir.path().join("out"));
        let path = target.save("a.ttf", b"abc").unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"abc");
    }
}
