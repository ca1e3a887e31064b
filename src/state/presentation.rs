//! Presentation state and the pure mapping from preferences to DOM changes.
//!
//! DESIGN
//! ======
//! Handlers never style elements directly. They compute a list of
//! [`StyleMutation`]s from the current [`PresentationState`] and hand it to a
//! [`StyleTarget`], which is the only code that knows about the document.
//!
//! The dark-mode stylesheet overrides several palette variables outside the
//! custom-property system, so leaving dark mode writes the light palette back
//! explicitly instead of relying on class removal alone.

#[cfg(test)]
#[path = "presentation_test.rs"]
mod presentation_test;

use crate::config::{ControlIds, PortalConfig};
use crate::state::preferences::{Preferences, font_size_css};

pub const VAR_PRIMARY_COLOR: &str = "--primary-color";
pub const VAR_NAVBAR_BG: &str = "--navbar-bg";
pub const VAR_TEXT_COLOR: &str = "--text-color";
pub const VAR_BODY_COLOR: &str = "--body-color";
pub const VAR_FONT_SIZE: &str = "--font-size";
pub const VAR_BS_BODY_FONT_SIZE: &str = "--bs-body-font-size";

/// Elements whose own color rules would otherwise win over `--text-color`.
pub const TEXT_COLOR_SELECTORS: &str = ".nav-tabs .nav-link, body, .card, .table th, .table td, \
     .form-control, .form-select, .nav-link, .navbar-text, .dropdown-item";

pub const DARK_MODE_CLASS: &str = "dark-mode";
pub const ICON_SUN: &str = r#"<i class="fas fa-sun"></i>"#;
pub const ICON_MOON: &str = r#"<i class="fas fa-moon"></i>"#;

/// Palette written back when leaving dark mode. `--navbar-bg` is reset
/// separately to the current primary color.
pub const LIGHT_PALETTE: [(&str, &str); 8] = [
    ("--body-bg", "#f8f9fa"),
    ("--footer-bg", "#2c3e50"),
    ("--link-color", "#212529"),
    ("--link-hover", "#d4d4d4"),
    ("--card-bg", "#ffffff"),
    ("--card-hover-bg", "#f1f1f1"),
    ("--chat-bg", "#ffffff"),
    ("--chat-hover-bg", "#f1f1f1"),
];

/// One change to the live document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleMutation {
    /// Set a CSS custom property on the root element.
    SetVariable { name: &'static str, value: String },
    /// Assign an inline `color` to every element matching `selector`.
    SetInlineColor { selector: &'static str, color: String },
    /// Add (`enabled`) or remove `class` on the first element matching `selector`.
    SetClass { selector: String, class: &'static str, enabled: bool },
    /// Replace the markup inside the element with `element_id`.
    SetInnerHtml { element_id: String, html: &'static str },
    /// Set the displayed value of the input with `control_id`.
    SetControlValue { control_id: String, value: String },
    /// Force a synchronous style recalculation.
    Repaint,
}

/// Applies [`StyleMutation`]s to a document.
pub trait StyleTarget {
    fn apply(&self, mutation: &StyleMutation);

    fn apply_all(&self, mutations: &[StyleMutation]) {
        for mutation in mutations {
            self.apply(mutation);
        }
    }
}

impl<T: StyleTarget + ?Sized> StyleTarget for &T {
    fn apply(&self, mutation: &StyleMutation) {
        (**self).apply(mutation);
    }
}

/// Document anchors the mutations refer to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchors {
    pub controls: ControlIds,
    /// Selector of the element carrying the dark-mode class.
    pub mode_target: String,
}

impl From<&PortalConfig> for Anchors {
    fn from(config: &PortalConfig) -> Self {
        Self {
            controls: config.controls.clone(),
            mode_target: config.mode_target.clone(),
        }
    }
}

/// Everything the document's appearance is derived from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresentationState {
    pub preferences: Preferences,
}

impl PresentationState {
    pub fn new(preferences: Preferences) -> Self {
        Self { preferences }
    }
}

/// Full set of mutations that brings a document in line with `state`,
/// including the control values shown in the settings panel.
pub fn apply(state: &PresentationState, anchors: &Anchors) -> Vec<StyleMutation> {
    let prefs = &state.preferences;
    let mut mutations = primary_color_mutations(&prefs.primary_color);
    mutations.extend(text_color_mutations(&prefs.text_color));
    mutations.extend(font_size_mutations(prefs.font_size_px));
    mutations.extend(mode_mutations(prefs.dark_mode, anchors));
    mutations.extend(control_mutations(prefs, &anchors.controls));
    mutations
}

pub fn primary_color_mutations(color: &str) -> Vec<StyleMutation> {
    vec![
        set_variable(VAR_PRIMARY_COLOR, color),
        set_variable(VAR_NAVBAR_BG, color),
    ]
}

pub fn text_color_mutations(color: &str) -> Vec<StyleMutation> {
    vec![
        set_variable(VAR_TEXT_COLOR, color),
        set_variable(VAR_BODY_COLOR, color),
        StyleMutation::SetInlineColor {
            selector: TEXT_COLOR_SELECTORS,
            color: color.to_owned(),
        },
    ]
}

pub fn font_size_mutations(px: u32) -> Vec<StyleMutation> {
    let size = font_size_css(px);
    vec![
        set_variable(VAR_FONT_SIZE, &size),
        set_variable(VAR_BS_BODY_FONT_SIZE, &size),
    ]
}

/// Mode class and icon glyph for `dark`.
pub fn mode_mutations(dark: bool, anchors: &Anchors) -> Vec<StyleMutation> {
    vec![
        StyleMutation::SetClass {
            selector: anchors.mode_target.clone(),
            class: DARK_MODE_CLASS,
            enabled: dark,
        },
        StyleMutation::SetInnerHtml {
            element_id: anchors.controls.mode_icon.clone(),
            html: if dark { ICON_SUN } else { ICON_MOON },
        },
    ]
}

/// Light palette plus `--navbar-bg` restored to `primary_color`.
pub fn light_palette_mutations(primary_color: &str) -> Vec<StyleMutation> {
    std::iter::once(set_variable(VAR_NAVBAR_BG, primary_color))
        .chain(LIGHT_PALETTE.iter().map(|&(name, value)| set_variable(name, value)))
        .collect()
}

fn control_mutations(prefs: &Preferences, controls: &ControlIds) -> Vec<StyleMutation> {
    [
        (&controls.primary_color, prefs.primary_color.clone()),
        (&controls.text_color, prefs.text_color.clone()),
        (&controls.font_size, prefs.font_size_px.to_string()),
    ]
    .into_iter()
    .map(|(control_id, value)| StyleMutation::SetControlValue {
        control_id: control_id.clone(),
        value,
    })
    .collect()
}

fn set_variable(name: &'static str, value: &str) -> StyleMutation {
    StyleMutation::SetVariable { name, value: value.to_owned() }
}
