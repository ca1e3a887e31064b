use super::*;

#[test]
fn parse_hex_rgb_supports_short_and_long_forms() {
    assert_eq!(parse_hex_rgb("#ABC"), Some((170, 187, 204)));
    assert_eq!(parse_hex_rgb("  #c0392B "), Some((192, 57, 43)));
}

#[test]
fn parse_hex_rgb_rejects_invalid_inputs() {
    assert_eq!(parse_hex_rgb("c0392b"), None);
    assert_eq!(parse_hex_rgb("#12"), None);
    assert_eq!(parse_hex_rgb("#abcd"), None);
    assert_eq!(parse_hex_rgb("#12GG34"), None);
    assert_eq!(parse_hex_rgb("#ééé"), None);
    assert_eq!(parse_hex_rgb("red"), None);
}

#[test]
fn normalize_hex_color_uses_canonical_lowercase() {
    assert_eq!(normalize_hex_color("#ABC").as_deref(), Some("#aabbcc"));
    assert_eq!(normalize_hex_color("#212529").as_deref(), Some("#212529"));
    assert_eq!(normalize_hex_color("#C0392B").as_deref(), Some("#c0392b"));
}

#[test]
fn normalize_hex_color_rejects_named_colors() {
    assert_eq!(normalize_hex_color("blue"), None);
    assert_eq!(normalize_hex_color(""), None);
}

#[test]
fn sign_prefixed_digits_are_not_hex() {
    assert_eq!(parse_hex_rgb("#+f+f+f"), None);
    assert_eq!(normalize_hex_color("#+f+f+f"), None);
    assert_eq!(normalize_hex_color("#+ff"), None);
}
