//! Persist -> reload across simulated sessions.

use axisdeck_core::{
    AxisTag, Catalog, CssParam, Event, FeatureTag, HeadlessSurface, Panel, Param, Theme,
};
use axisdeck_store::{FileStore, MemoryStore, Persistence};

fn session<K: axisdeck_store::KeyValueStore>(
    store: K,
) -> Panel<HeadlessSurface, Persistence<K>> {
    let catalog = Catalog::builtin();
    let persistence = Persistence::new(store);
    let loaded = persistence.load(&catalog);
    let surface = HeadlessSurface::for_catalog(&catalog);
    Panel::new(catalog, loaded, surface, persistence)
}

#[test]
fn full_state_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut first = session(FileStore::open(&path).unwrap());
    let events = [
        Event::OpszAuto(false),
        Event::Input { param: Param::Axis(AxisTag::new(b"wght")), value: 720.0 },
        Event::Slider { param: Param::Axis(AxisTag::new(b"YTDE")), value: -250.0 },
        Event::Input { param: Param::Axis(AxisTag::OPSZ), value: 72.0 },
        Event::Input { param: Param::Css(CssParam::Size), value: 48.0 },
        Event::Input { param: Param::Css(CssParam::LetterSpacing), value: 3.5 },
        Event::Input { param: Param::Css(CssParam::LineHeight), value: 150.0 },
        Event::Feature { tag: FeatureTag::new(b"pnum"), enabled: true },
        Event::Feature { tag: FeatureTag::new(b"liga"), enabled: false },
        Event::Theme(Theme::Light),
        Event::PreviewText("Sphinx of black quartz".to_string()),
    ];
    for event in events {
        first.dispatch(event).unwrap();
    }
    let expected = first.state().clone();
    drop(first);

    let second = session(FileStore::open(&path).unwrap());
    assert_eq!(second.state(), &expected);
    assert!(second.surface().pair(AxisTag::new(b"wght")).unwrap().shows(720.0));
    assert_eq!(second.surface().theme, Some(Theme::Light));
    assert_eq!(second.surface().preview_text, "Sphinx of black quartz");
}

#[test]
fn selected_font_and_axes_survive_reload() {
    let mut first = session(MemoryStore::new());
    first.dispatch(Event::SelectFont("recursive".to_string())).unwrap();
    first
        .dispatch(Event::Slider { param: Param::Axis(AxisTag::new(b"CASL")), value: 0.75 })
        .unwrap();
    let expected = first.state().clone();
    let (_, _, persistence) = first.into_parts();

    let second = session(persistence.into_inner());
    assert_eq!(second.font().id, "recursive");
    assert_eq!(second.state(), &expected);
}

#[test]
fn opsz_auto_state_survives_reload() {
    let mut first = session(MemoryStore::new());
    first.dispatch(Event::OpszAuto(true)).unwrap();
    first.dispatch(Event::Input { param: Param::Css(CssParam::Size), value: 40.0 }).unwrap();
    let (_, _, persistence) = first.into_parts();

    let second = session(persistence.into_inner());
    assert!(second.state().prefs.opsz_auto);
    assert_eq!(second.state().axes[&AxisTag::OPSZ], 40.0);
    assert!(!second.surface().pair(AxisTag::OPSZ).unwrap().slider.enabled);
}

#[test]
fn direct_font_switch_is_saved() {
    let mut panel = session(MemoryStore::new());
    let mut saved = axisdeck_core::AxisValues::new();
    saved.insert(AxisTag::new(b"wght"), 650.0);
    panel.switch_font("recursive", Some(&saved)).unwrap();

    let (state, _, persistence) = panel.into_parts();
    let stored = persistence.load(&Catalog::builtin());
    assert_eq!(stored.prefs.font, "recursive");
    assert_eq!(stored.axes, state.axes);
    assert_eq!(stored.axes[&AxisTag::new(b"wght")], 650.0);
    assert_eq!(stored.axes.len(), 5);
}
