//! Preference controller for the display-settings panel.
//!
//! Every setter follows the same sequence: update the owned
//! [`PresentationState`], push the derived mutations to the document,
//! persist the raw value, then force a repaint so scripts reading computed
//! styles see the new values immediately.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort. A rejected write (quota, private mode) is
//! logged and the in-page change still applies.

#[cfg(test)]
#[path = "preferences_test.rs"]
mod preferences_test;

use std::cell::RefCell;

use crate::config::{PortalConfig, StorageKeys};
use crate::state::preferences::{Preferences, ThemeMode};
use crate::state::presentation::{
    self, Anchors, PresentationState, StyleMutation, StyleTarget, font_size_mutations,
    light_palette_mutations, mode_mutations, primary_color_mutations, text_color_mutations,
};
use crate::util::color::normalize_hex_color;
use crate::util::storage::KeyValueStore;

pub struct PreferenceController<S, D> {
    state: RefCell<PresentationState>,
    store: S,
    target: D,
    keys: StorageKeys,
    defaults: Preferences,
    anchors: Anchors,
}

impl<S: KeyValueStore, D: StyleTarget> PreferenceController<S, D> {
    /// Controller starting from the configured defaults; call
    /// [`restore_preferences`](Self::restore_preferences) to load stored values.
    pub fn new(config: &PortalConfig, store: S, target: D) -> Self {
        Self {
            state: RefCell::new(PresentationState::new(config.defaults.clone())),
            store,
            target,
            keys: config.storage_keys.clone(),
            defaults: config.defaults.clone(),
            anchors: Anchors::from(config),
        }
    }

    /// Snapshot of the current preferences.
    pub fn preferences(&self) -> Preferences {
        self.state.borrow().preferences.clone()
    }

    /// Load stored preferences (or defaults) and apply all of them,
    /// including the values shown by the settings controls.
    pub fn restore_preferences(&self) {
        let preferences = Preferences::load(&self.store, &self.keys, &self.defaults);
        log::debug!(
            "restored preferences: primary={} text={} size={}px mode={}",
            preferences.primary_color,
            preferences.text_color,
            preferences.font_size_px,
            preferences.theme_mode().as_str()
        );
        *self.state.borrow_mut() = PresentationState::new(preferences);
        self.reapply();
    }

    /// Push the full current state to the document again. Used after page
    /// content is swapped so new elements pick up the inline text color.
    pub fn reapply(&self) {
        let mutations = presentation::apply(&self.state.borrow(), &self.anchors);
        self.target.apply_all(&mutations);
    }

    pub fn set_primary_color(&self, color: &str) {
        let Some(color) = accept_color(color) else {
            return;
        };
        self.state.borrow_mut().preferences.primary_color.clone_from(&color);
        self.commit(&primary_color_mutations(&color), &self.keys.primary_color, &color);
    }

    /// Sets the text color variables and re-applies the color inline to the
    /// elements whose own rules would otherwise win.
    pub fn set_text_color(&self, color: &str) {
        let Some(color) = accept_color(color) else {
            return;
        };
        self.state.borrow_mut().preferences.text_color.clone_from(&color);
        self.commit(&text_color_mutations(&color), &self.keys.text_color, &color);
    }

    pub fn set_font_size(&self, px: u32) {
        if px == 0 {
            log::warn!("ignoring font size of 0px");
            return;
        }
        self.state.borrow_mut().preferences.font_size_px = px;
        self.commit(&font_size_mutations(px), &self.keys.font_size, &px.to_string());
    }

    /// Flip dark mode and return the new setting.
    pub fn toggle_dark_mode(&self) -> bool {
        let (dark, primary_color) = {
            let mut state = self.state.borrow_mut();
            state.preferences.dark_mode = !state.preferences.dark_mode;
            (state.preferences.dark_mode, state.preferences.primary_color.clone())
        };
        let mut mutations = mode_mutations(dark, &self.anchors);
        if !dark {
            mutations.extend(light_palette_mutations(&primary_color));
        }
        self.commit(&mutations, &self.keys.theme_mode, ThemeMode::from_dark(dark).as_str());
        dark
    }

    pub fn force_repaint(&self) {
        self.target.apply(&StyleMutation::Repaint);
    }

    fn commit(&self, mutations: &[StyleMutation], key: &str, stored: &str) {
        self.target.apply_all(mutations);
        self.persist(key, stored);
        self.force_repaint();
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            log::warn!("preference `{key}` not saved: {err}");
        }
    }
}

fn accept_color(raw: &str) -> Option<String> {
    let color = normalize_hex_color(raw);
    if color.is_none() {
        log::warn!("ignoring invalid color value {raw:?}");
    }
    color
}
