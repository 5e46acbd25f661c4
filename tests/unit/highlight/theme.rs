use super::*;

#[test]
fn unknown_names_fall_back_to_dark() {
    assert_eq!(ThemeName::parse_lossy("solarized"), ThemeName::Dark);
    assert_eq!(ThemeName::parse_lossy(""), ThemeName::Dark);
    assert_eq!(Theme::by_name("neon"), Theme::DARK);
}

#[test]
fn names_are_case_insensitive() {
    assert_eq!(ThemeName::parse_lossy(" Light "), ThemeName::Light);
    assert_eq!(ThemeName::parse_lossy("DARK"), ThemeName::Dark);
}

#[test]
fn builtin_shares_function_color() {
    for theme in [Theme::DARK, Theme::LIGHT] {
        assert_eq!(
            theme.color_for(TokenKind::Builtin),
            theme.color_for(TokenKind::Function)
        );
        assert_eq!(theme.color_for(TokenKind::Default), theme.default_text);
    }
}

#[test]
fn palettes_match_editor_colors() {
    assert_eq!(Theme::DARK.background.to_hex(), "#1e1e1e");
    assert_eq!(Theme::DARK.keyword.to_hex(), "#569cd6");
    assert_eq!(Theme::LIGHT.string.to_hex(), "#a31515");
    assert_eq!(Theme::LIGHT.decorator.to_hex(), "#af00db");
    assert_ne!(Theme::DARK.border, Theme::LIGHT.border);
}

#[test]
fn theme_names_round_trip_through_serde() {
    let v: ThemeName = serde_json::from_str("\"light\"").unwrap();
    assert_eq!(v, ThemeName::Light);
    assert_eq!(serde_json::to_string(&ThemeName::Dark).unwrap(), "\"dark\"");
    assert_eq!(ThemeName::Light.title(), "Light");
}
