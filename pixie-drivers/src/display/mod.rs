//! Display drivers

pub mod backlight;
pub mod st7735;

pub use backlight::{Backlight, NoBacklight, PwmBacklight};
pub use st7735::{St7735, St7735Error};
