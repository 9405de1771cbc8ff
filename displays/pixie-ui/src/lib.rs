//! Reference UI engine
//!
//! A small retained-mode engine that plugs into the Pixie tick scheduler
//! through [`pixie_core::traits::GraphicsEngine`]. It shows a column of
//! counter buttons, moves focus with the encoder and clicks the focused
//! button with the keypad's Enter key.
//!
//! ```text
//! +------------------------------+
//! | [ Button: 3 ]                |  <- focused (outlined)
//! | [ Button    ]                |
//! |                              |
//! +------------------------------+
//! ```
//!
//! Rendering goes through [`canvas::Canvas`], an `embedded-graphics`
//! draw target over the engine's RGB565 draw buffer. Only the damaged
//! region is redrawn and flushed.

#![no_std]
#![deny(unsafe_code)]

pub mod canvas;
pub mod engine;
pub mod widgets;

pub use canvas::Canvas;
pub use engine::{EngineStats, FocusEngine, INPUT_PERIOD_MS, REFRESH_PERIOD_MS};
pub use widgets::{Button, Theme};
