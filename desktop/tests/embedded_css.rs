#![cfg(test)]
//! The desktop build inlines `ui/assets/theme/main.css` plus the muscle map
//! stylesheet. A broken path or truncated file only shows up at runtime, so
//! guard both here.

const EMBEDDED_THEME: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const MUSCLE_MAP_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/styling/muscle_map.css"
));

#[test]
fn embedded_stylesheets_are_not_empty() {
    assert!(!EMBEDDED_THEME.trim().is_empty(), "theme stylesheet is empty");
    assert!(!MUSCLE_MAP_CSS.trim().is_empty(), "muscle map stylesheet is empty");
}

#[test]
fn embedded_theme_contains_expected_tokens() {
    for token in ["--color-bg", "body {", ".button--primary", ".card {"] {
        assert!(
            EMBEDDED_THEME.contains(token),
            "expected token `{token}` missing from embedded theme"
        );
    }
}

#[test]
fn region_default_matches_neutral_gray() {
    // Regions render neutral gray until a fill rule is installed.
    assert!(MUSCLE_MAP_CSS.contains("fill: rgba(171, 171, 171, 0.8);"));
}
