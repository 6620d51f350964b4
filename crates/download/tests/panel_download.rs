//! Downloads driven from a live panel.

use std::{cell::RefCell, path::PathBuf};

use axisdeck_core::{
    AxisTag, Catalog, CssParam, Event, FontFormat, GenerateRequest, HeadlessSurface, Panel, Param,
};
use axisdeck_download::{
    ButtonState, DirectoryTarget, DownloadOutcome, Downloader, Error, Result, Transport,
};
use axisdeck_store::{MemoryStore, Persistence};

#[derive(Default)]
struct Recording {
    fail: bool,
    bodies: RefCell<Vec<(FontFormat, serde_json::Value)>>,
}

impl Transport for Recording {
    fn generate(&self, format: FontFormat, request: &GenerateRequest) -> Result<Vec<u8>> {
        let body = serde_json::to_value(request).unwrap();
        self.bodies.borrow_mut().push((format, body));
        if self.fail {
            return Err(Error::Status {
                url: format!("http://localhost:8000{}", format.endpoint()),
                status: reqwest::StatusCode::NOT_FOUND,
            });
        }
        Ok(vec![0, 1, 0, 0])
    }

    fn location(&self) -> String {
        "http://localhost:8000".to_string()
    }
}

fn panel() -> Panel<HeadlessSurface, Persistence<MemoryStore>> {
    let catalog = Catalog::builtin();
    let persistence = Persistence::new(MemoryStore::new());
    let loaded = persistence.load(&catalog);
    let surface = HeadlessSurface::for_catalog(&catalog);
    Panel::new(catalog, loaded, surface, persistence)
}

#[test]
fn woff2_download_uses_generated_name() {
    let mut panel = panel();
    panel.dispatch(Event::OpszAuto(false)).unwrap();
    panel.dispatch(Event::Input { param: Param::Axis(AxisTag::new(b"wght")), value: 700.0 }).unwrap();
    panel.dispatch(Event::Input { param: Param::Css(CssParam::Size), value: 64.0 }).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let downloader = Downloader::new(Recording::default());
    let mut button = ButtonState::default();
    let mut target = DirectoryTarget::new(dir.path());
    let mut alerts: Vec<String> = Vec::new();

    let outcome =
        downloader.click_for(&panel, FontFormat::Woff2, &mut button, &mut target, &mut alerts);

    let expected = dir.path().join("RobotoFlex-o22-wt700.woff2");
    assert_eq!(outcome, DownloadOutcome::Saved(expected.clone()));
    assert_eq!(std::fs::read(expected).unwrap(), vec![0, 1, 0, 0]);

    let bodies = downloader.transport().bodies.borrow();
    let (format, body) = &bodies[0];
    assert_eq!(*format, FontFormat::Woff2);
    assert_eq!(body["axes"]["wght"], 700.0);
    assert_eq!(body["font"], "Roboto-Flex-Variable.ttf");
    assert!(body.get("css").is_none());
    assert!(body.get("size").is_none());
}

#[test]
fn failed_download_leaves_state_and_store_untouched() {
    let mut panel = panel();
    panel.dispatch(Event::Input { param: Param::Axis(AxisTag::new(b"GRAD")), value: 50.0 }).unwrap();
    let state_before = panel.state().clone();
    let store_before = panel.persist().store().clone();

    let downloader = Downloader::new(Recording { fail: true, ..Recording::default() });
    let mut button = ButtonState::default();
    let mut target = DirectoryTarget::new(PathBuf::from("unused"));
    let mut alerts: Vec<String> = Vec::new();

    let outcome = downloader.click_for(&panel, FontFormat::Ttf, &mut button, &mut target, &mut alerts);

    assert_eq!(outcome, DownloadOutcome::Failed);
    assert!(button.enabled && !button.busy);
    assert_eq!(
        alerts,
        vec!["Error generating TTF. Make sure the server is running at http://localhost:8000."]
    );
    assert_eq!(panel.state(), &state_before);
    assert_eq!(panel.persist().store(), &store_before);
}
