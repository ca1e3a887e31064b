//! The user's display preferences and their storage encoding.
//!
//! Each field is stored under its own key as a plain string so the values
//! stay readable from devtools and from older page scripts that share the
//! same keys.

#[cfg(test)]
#[path = "preferences_test.rs"]
mod preferences_test;

use serde::Deserialize;

use crate::config::StorageKeys;
use crate::util::color::normalize_hex_color;
use crate::util::storage::KeyValueStore;

pub const DEFAULT_PRIMARY_COLOR: &str = "#c0392b";
pub const DEFAULT_TEXT_COLOR: &str = "#212529";
pub const DEFAULT_FONT_SIZE_PX: u32 = 16;

/// Light/dark display mode as persisted under the theme-mode key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    /// Stored representation: `"dark"` or `"light"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Only an exact `"dark"` selects dark mode; anything else is light.
    pub fn parse(raw: &str) -> Self {
        if raw == "dark" { Self::Dark } else { Self::Light }
    }
}

/// Preference record restored at page load and overwritten by the controls.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub primary_color: String,
    pub text_color: String,
    pub font_size_px: u32,
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_COLOR.to_owned(),
            text_color: DEFAULT_TEXT_COLOR.to_owned(),
            font_size_px: DEFAULT_FONT_SIZE_PX,
            dark_mode: false,
        }
    }
}

impl Preferences {
    /// Read every preference from `store`, falling back per field to `defaults`
    /// when the key is absent or its value does not parse.
    pub fn load(store: &impl KeyValueStore, keys: &StorageKeys, defaults: &Preferences) -> Self {
        let primary_color = store
            .get(&keys.primary_color)
            .and_then(|raw| normalize_hex_color(&raw))
            .unwrap_or_else(|| defaults.primary_color.clone());
        let text_color = store
            .get(&keys.text_color)
            .and_then(|raw| normalize_hex_color(&raw))
            .unwrap_or_else(|| defaults.text_color.clone());
        let font_size_px = store
            .get(&keys.font_size)
            .and_then(|raw| parse_font_size(&raw))
            .unwrap_or(defaults.font_size_px);
        let dark_mode = store
            .get(&keys.theme_mode)
            .map_or(defaults.dark_mode, |raw| ThemeMode::parse(&raw) == ThemeMode::Dark);

        Self { primary_color, text_color, font_size_px, dark_mode }
    }

    pub fn theme_mode(&self) -> ThemeMode {
        ThemeMode::from_dark(self.dark_mode)
    }
}

/// Parse a font-size control value (`"16"`, also tolerating `"16px"`).
///
/// Zero and non-numeric input are rejected.
pub fn parse_font_size(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    match digits.parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(px) => Some(px),
    }
}

/// CSS length for a pixel font size.
pub fn font_size_css(px: u32) -> String {
    format!("{px}px")
}
