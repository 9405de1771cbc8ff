//! Push-button bank
//!
//! Owns the board's button inputs and serves them by GPIO number. Each
//! pin must already be configured as an input with its pull-up enabled.

use embedded_hal::digital::InputPin;
use heapless::Vec;
use pixie_hal::{Level, LineId, LineReader};

/// Bank of button inputs addressed by line id
pub struct ButtonBank<P, const N: usize> {
    pins: Vec<(LineId, P), N>,
}

impl<P: InputPin, const N: usize> ButtonBank<P, N> {
    pub const fn new() -> Self {
        Self { pins: Vec::new() }
    }

    /// Add a pin under `line`
    ///
    /// Returns the pin back if the bank is full or the line is taken.
    pub fn add(&mut self, line: LineId, pin: P) -> Result<(), P> {
        if self.pins.iter().any(|(id, _)| *id == line) {
            return Err(pin);
        }
        self.pins.push((line, pin)).map_err(|(_, pin)| pin)
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Line ids in insertion order
    pub fn lines(&self) -> impl Iterator<Item = LineId> + '_ {
        self.pins.iter().map(|(id, _)| *id)
    }
}

impl<P: InputPin, const N: usize> Default for ButtonBank<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: InputPin, const N: usize> LineReader for ButtonBank<P, N> {
    fn read(&mut self, line: LineId) -> Level {
        let Some((_, pin)) = self.pins.iter_mut().find(|(id, _)| *id == line) else {
            return Level::High;
        };
        // A failed read counts as released
        match pin.is_low() {
            Ok(true) => Level::Low,
            _ => Level::High,
        }
    }
}
