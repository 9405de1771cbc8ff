//! Embassy async tasks

pub mod tick;

pub use tick::{ui_tick_task, Ui};
