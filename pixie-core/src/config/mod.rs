//! Board configuration types
//!
//! Describes one board: panel geometry and pixel format, tick period,
//! splash behaviour and the button wiring. The firmware build parses
//! `board.toml` into [`BoardConfig`], validates it and embeds it as
//! postcard binary data.

use heapless::Vec;

use crate::flush::PixelFormat;
use crate::keys::{KeyBinding, KeyMap, KeyMapError, MAX_KEYS};
use crate::keys::map::DEFAULT_BINDINGS;
use crate::scheduler::RemainderPolicy;
use crate::traits::display::Orientation;

/// Shortest accepted tick period
pub const MIN_TICK_PERIOD_MS: u32 = 1;

/// Longest accepted tick period
pub const MAX_TICK_PERIOD_MS: u32 = 50;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick period outside MIN..=MAX
    TickPeriod(u32),
    /// Brightness above 100 %
    Brightness(u8),
    /// Zero width or height
    DisplaySize,
    /// Key map rejected
    Keys(KeyMapError),
}

impl From<KeyMapError> for ConfigError {
    fn from(e: KeyMapError) -> Self {
        ConfigError::Keys(e)
    }
}

/// Panel settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayConfig {
    /// Width in pixels for the configured orientation
    pub width: u16,
    /// Height in pixels for the configured orientation
    pub height: u16,
    pub orientation: Orientation,
    /// Backlight level (0-100 %)
    pub brightness: u8,
    /// Layout of the engine's draw buffer
    #[cfg_attr(feature = "serde", serde(default))]
    pub pixel_format: PixelFormat,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 160,
            height: 80,
            orientation: Orientation::Horizontal,
            brightness: 50,
            pixel_format: PixelFormat::Rgb565,
        }
    }
}

/// Tick scheduler settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulerConfig {
    /// Timer period in milliseconds
    pub tick_period_ms: u32,
    /// Carry sub-millisecond remainders into the next tick
    #[cfg_attr(feature = "serde", serde(default))]
    pub carry_remainder: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 5,
            carry_remainder: false,
        }
    }
}

impl SchedulerConfig {
    pub fn remainder_policy(&self) -> RemainderPolicy {
        if self.carry_remainder {
            RemainderPolicy::Carry
        } else {
            RemainderPolicy::Truncate
        }
    }
}

/// Startup splash settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplashConfig {
    pub enabled: bool,
    /// How long the splash stays up (ms)
    pub dwell_ms: u32,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dwell_ms: 3000,
        }
    }
}

/// Complete board description
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardConfig {
    pub display: DisplayConfig,
    pub scheduler: SchedulerConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub splash: SplashConfig,
    /// Button wiring in scan order
    pub keys: Vec<KeyBinding, MAX_KEYS>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            scheduler: SchedulerConfig::default(),
            splash: SplashConfig::default(),
            keys: Vec::from_slice(&DEFAULT_BINDINGS).unwrap_or_default(),
        }
    }
}

impl BoardConfig {
    /// Check every field and the key map
    pub fn validate(&self) -> Result<(), ConfigError> {
        let period = self.scheduler.tick_period_ms;
        if !(MIN_TICK_PERIOD_MS..=MAX_TICK_PERIOD_MS).contains(&period) {
            return Err(ConfigError::TickPeriod(period));
        }
        if self.display.brightness > 100 {
            return Err(ConfigError::Brightness(self.display.brightness));
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::DisplaySize);
        }
        KeyMap::new(&self.keys)?;
        Ok(())
    }

    /// Build the key map described by this config
    pub fn key_map(&self) -> Result<KeyMap, ConfigError> {
        Ok(KeyMap::new(&self.keys)?)
    }
}
