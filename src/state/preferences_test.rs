use super::*;
use crate::testing::MemoryStore;

fn load(store: &MemoryStore) -> Preferences {
    Preferences::load(store, &StorageKeys::default(), &Preferences::default())
}

#[test]
fn empty_store_yields_defaults() {
    let prefs = load(&MemoryStore::default());
    assert_eq!(prefs.primary_color, "#c0392b");
    assert_eq!(prefs.text_color, "#212529");
    assert_eq!(prefs.font_size_px, 16);
    assert!(!prefs.dark_mode);
}

#[test]
fn stored_values_are_used() {
    let store = MemoryStore::with(&[
        ("themeColor", "#2980b9"),
        ("fontColor", "#FFFFFF"),
        ("fontSize", "18"),
        ("themeMode", "dark"),
    ]);
    let prefs = load(&store);
    assert_eq!(prefs.primary_color, "#2980b9");
    assert_eq!(prefs.text_color, "#ffffff");
    assert_eq!(prefs.font_size_px, 18);
    assert!(prefs.dark_mode);
}

#[test]
fn unparsable_values_fall_back_per_field() {
    let store = MemoryStore::with(&[
        ("themeColor", "tomato"),
        ("fontColor", "#010203"),
        ("fontSize", "huge"),
        ("themeMode", "DARK"),
    ]);
    let prefs = load(&store);
    assert_eq!(prefs.primary_color, "#c0392b");
    assert_eq!(prefs.text_color, "#010203");
    assert_eq!(prefs.font_size_px, 16);
    assert!(!prefs.dark_mode);
}

#[test]
fn configured_defaults_replace_builtin_ones() {
    let defaults = Preferences {
        primary_color: "#000000".to_owned(),
        text_color: "#eeeeee".to_owned(),
        font_size_px: 14,
        dark_mode: true,
    };
    let prefs = Preferences::load(&MemoryStore::default(), &StorageKeys::default(), &defaults);
    assert_eq!(prefs, defaults);
}

#[test]
fn light_stored_mode_overrides_dark_default() {
    let defaults = Preferences { dark_mode: true, ..Preferences::default() };
    let store = MemoryStore::with(&[("themeMode", "light")]);
    let prefs = Preferences::load(&store, &StorageKeys::default(), &defaults);
    assert!(!prefs.dark_mode);
}

#[test]
fn parse_font_size_accepts_plain_and_px() {
    assert_eq!(parse_font_size("16"), Some(16));
    assert_eq!(parse_font_size(" 22px "), Some(22));
    assert_eq!(parse_font_size("0"), None);
    assert_eq!(parse_font_size("-4"), None);
    assert_eq!(parse_font_size("12.5"), None);
    assert_eq!(parse_font_size(""), None);
}

#[test]
fn theme_mode_round_trips_through_storage_string() {
    assert_eq!(ThemeMode::parse(ThemeMode::Dark.as_str()), ThemeMode::Dark);
    assert_eq!(ThemeMode::parse(ThemeMode::Light.as_str()), ThemeMode::Light);
    assert_eq!(ThemeMode::parse(""), ThemeMode::Light);
    assert_eq!(ThemeMode::from_dark(true), ThemeMode::Dark);
}

#[test]
fn font_size_css_appends_px() {
    assert_eq!(font_size_css(16), "16px");
}
