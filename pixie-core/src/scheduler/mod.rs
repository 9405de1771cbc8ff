//! Periodic tick scheduler
//!
//! Drives the UI engine from a fixed-period timer and keeps the engine's
//! logical clock in step with hardware time.

pub mod clock;
pub mod executor;
pub mod guard;

pub use clock::{RemainderPolicy, TickClock};
pub use executor::{TickReport, UiScheduler};
pub use guard::{SchedulerState, TickError, TickGuard, TickToken};
