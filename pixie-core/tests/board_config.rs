//! Decoding of the shipped board description
//!
//! Run with `cargo test -p pixie-core --features serde`.

#![cfg(feature = "serde")]

use pixie_core::config::{BoardConfig, ConfigError};
use pixie_core::flush::PixelFormat;
use pixie_core::keys::{KeyCode, KeyMapError};
use pixie_core::traits::Orientation;

const BOARD_TOML: &str = include_str!("../../pixie-firmware/board.toml");

#[test]
fn shipped_board_matches_defaults() {
    let config: BoardConfig = toml::from_str(BOARD_TOML).unwrap();
    assert_eq!(config.validate(), Ok(()));
    assert_eq!(config, BoardConfig::default());
}

#[test]
fn shipped_board_key_order() {
    let config: BoardConfig = toml::from_str(BOARD_TOML).unwrap();
    let map = config.key_map().unwrap();
    assert_eq!(map.bindings()[0].line, 2);
    assert_eq!(map.bindings()[0].key, KeyCode::Up);
    assert_eq!(map.key_for(17), Some(KeyCode::Esc));
}

#[test]
fn minimal_board_uses_defaults() {
    let text = r#"
        [display]
        width = 160
        height = 80
        orientation = "vertical"
        brightness = 80

        [scheduler]
        tick_period_ms = 10

        [[keys]]
        line = 16
        key = "left"

        [[keys]]
        line = 20
        key = "right"
    "#;

    let config: BoardConfig = toml::from_str(text).unwrap();
    assert_eq!(config.display.orientation, Orientation::Vertical);
    assert_eq!(config.display.pixel_format, PixelFormat::Rgb565);
    assert!(!config.scheduler.carry_remainder);
    assert!(config.splash.enabled);
    assert_eq!(config.keys.len(), 2);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn duplicate_line_fails_validation() {
    let text = r#"
        [display]
        width = 160
        height = 80
        orientation = "horizontal"
        brightness = 50

        [scheduler]
        tick_period_ms = 5

        [[keys]]
        line = 2
        key = "up"

        [[keys]]
        line = 2
        key = "enter"
    "#;

    let config: BoardConfig = toml::from_str(text).unwrap();
    assert_eq!(
        config.validate(),
        Err(ConfigError::Keys(KeyMapError::DuplicateLine(2)))
    );
}

#[test]
fn unknown_key_name_rejected() {
    let text = r#"
        [display]
        width = 160
        height = 80
        orientation = "horizontal"
        brightness = 50

        [scheduler]
        tick_period_ms = 5

        [[keys]]
        line = 2
        key = "jump"
    "#;

    assert!(toml::from_str::<BoardConfig>(text).is_err());
}
