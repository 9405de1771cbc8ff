//! Pixie Platform Abstraction Layer
//!
//! This crate defines the few platform services the UI runtime consumes,
//! so the same core logic runs on the RP2040 board and in host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pixie-core (scheduler, keys, flush)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pixie-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ pixie-drivers │       │ pixie-firmware│
//! │ (button bank) │       │ (embassy time)│
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::LineReader`] - Digital line levels addressed by line id
//! - [`time::MonotonicClock`] - Free-running microsecond clock

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod time;

// Re-export key traits at crate root for convenience
pub use gpio::{Level, LineId, LineReader};
pub use time::MonotonicClock;
