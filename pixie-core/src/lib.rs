//! Board-agnostic core of the Pixie UI runtime
//!
//! This crate contains all runtime logic that does not depend on
//! specific hardware implementations:
//!
//! - Key mapping table and shared key state (polled scan)
//! - Keypad and encoder input devices layered on the key state
//! - Periodic tick scheduler driving a graphics engine
//! - Display flush bridge between the engine and a panel driver
//! - One-shot startup splash renderer
//! - Board configuration types
//! - Engine and panel boundary traits

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod flush;
pub mod input;
pub mod keys;
pub mod scheduler;
pub mod splash;
pub mod traits;
