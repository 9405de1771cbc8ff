//! Key state model
//!
//! Maps physical button lines to logical key codes and keeps the single
//! "last key / is pressed" state shared by both input devices.

pub mod map;
pub mod state;

pub use map::{KeyBinding, KeyCode, KeyMap, KeyMapError, MAX_KEYS};
pub use state::{KeyScanner, KeySnapshot, KeyState};
