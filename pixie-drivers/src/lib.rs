//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in pixie-core and pixie-hal:
//!
//! - ST7735S panel driver (SPI, 0.96" 160x80 module)
//! - Backlight control over PWM
//! - Push-button bank over GPIO inputs

#![no_std]
#![deny(unsafe_code)]

pub mod buttons;
pub mod display;

pub use buttons::ButtonBank;
pub use display::{Backlight, NoBacklight, PwmBacklight, St7735, St7735Error};
