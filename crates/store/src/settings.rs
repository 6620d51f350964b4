//! Loading and saving the panel state as independent records.
//!
//! Every field is read on its own and falls back to its built-in default when
//! absent or unparsable, without affecting the other fields.

use axisdeck_core::{
    AxisValues, Catalog, CssParams, FeatureFlags, Persist, PersistError, Preferences, State,
    Theme,
    config::{DEFAULT_PREVIEW_TEXT, keys},
};
use log::debug;
use serde_json::from_str;

use crate::{KeyValueStore, Result};

/// Reads the persisted state, field by field.
///
/// Axis values are returned as stored; the panel validates them against the
/// selected font when it starts.
pub fn load(store: &impl KeyValueStore, catalog: &Catalog) -> State {
    let font = store
        .get(keys::SELECTED_FONT)
        .and_then(|id| catalog.get(&id).ok())
        .unwrap_or_else(|| catalog.first());

    let axes = json_field::<AxisValues>(store, keys::AXES).unwrap_or_else(|| font.default_axis_values());
    let css = json_field::<CssParams>(store, keys::CSS).unwrap_or_default();
    let features =
        json_field::<FeatureFlags>(store, keys::FEATURES).unwrap_or_else(|| font.features.clone());

    let theme = store
        .get(keys::THEME)
        .and_then(|t| t.parse::<Theme>().map_err(|e| debug!("{e}, using default theme")).ok())
        .unwrap_or_default();
    let preview_text = store
        .get(keys::PREVIEW_TEXT)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| DEFAULT_PREVIEW_TEXT.to_string());
    let opsz_auto = match store.get(keys::OPSZ_AUTO).as_deref() {
        Some("false") => false,
        Some("true") | None => true,
        Some(other) => {
            debug!("Unparsable {} value {other:?}, using default", keys::OPSZ_AUTO);
            true
        }
    };

    State {
        axes,
        css,
        features,
        prefs: Preferences { theme, preview_text, opsz_auto, font: font.id.clone() },
    }
}

/// Overwrites every record with the current state.
pub fn save(store: &mut impl KeyValueStore, state: &State) -> Result<()> {
    store.set(keys::AXES, &serde_json::to_string(&state.axes)?)?;
    store.set(keys::CSS, &serde_json::to_string(&state.css)?)?;
    store.set(keys::FEATURES, &serde_json::to_string(&state.features)?)?;
    store.set(keys::THEME, state.prefs.theme.id())?;
    store.set(keys::PREVIEW_TEXT, &state.prefs.preview_text)?;
    store.set(keys::OPSZ_AUTO, if state.prefs.opsz_auto { "true" } else { "false" })?;
    store.set(keys::SELECTED_FONT, &state.prefs.font)?;
    Ok(())
}

/// Removes every record written by [`save`].
pub fn clear(store: &mut impl KeyValueStore) -> Result<()> {
    for key in keys::ALL {
        store.remove(key)?;
    }
    Ok(())
}

fn json_field<T: serde::de::DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    from_str(&raw).map_err(|e| debug!("Unparsable {key}: {e}, using default")).ok()
}

/// [`Persist`] sink writing into a key-value store.
#[derive(Debug)]
pub struct Persistence<K> {
    store: K,
}

impl<K: KeyValueStore> Persistence<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub fn load(&self, catalog: &Catalog) -> State {
        load(&self.store, catalog)
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn into_inner(self) -> K {
        self.store
    }
}

impl<K: KeyValueStore> Persist for Persistence<K> {
    fn save(&mut self, state: &State) -> std::result::Result<(), PersistError> {
        save(&mut self.store, state).map_err(Into::into)
    }
}
