//! Button pin allocation by GPIO number
//!
//! Button lines come from board.toml, so their pins are looked up by
//! number at boot instead of being named in code.

use embassy_rp::gpio::{AnyPin, Input, Pull};
use embassy_rp::Peri;

/// Number of GPIO pins on the RP2040
pub const GPIO_COUNT: usize = 30;

/// Take a pin by number from peripherals
///
/// Usage:
/// ```ignore
/// let up = take_pin!(p, 2); // Takes p.PIN_2 as Peri<AnyPin>
/// ```
#[macro_export]
macro_rules! take_pin {
    ($p:expr, 0) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_0) };
    ($p:expr, 1) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_1) };
    ($p:expr, 2) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_2) };
    ($p:expr, 3) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_3) };
    ($p:expr, 4) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_4) };
    ($p:expr, 5) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_5) };
    ($p:expr, 6) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_6) };
    ($p:expr, 7) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_7) };
    ($p:expr, 14) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_14) };
    ($p:expr, 15) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_15) };
    ($p:expr, 16) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_16) };
    ($p:expr, 17) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_17) };
    ($p:expr, 18) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_18) };
    ($p:expr, 19) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_19) };
    ($p:expr, 20) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_20) };
    ($p:expr, 21) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_21) };
    ($p:expr, 22) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_22) };
    ($p:expr, 26) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_26) };
    ($p:expr, 27) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_27) };
    ($p:expr, 28) => { embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_28) };
}

/// Move the listed pins into a bank
///
/// ```ignore
/// free_pins!(bank, p, 2, 3, 15);
/// ```
#[macro_export]
macro_rules! free_pins {
    ($bank:expr, $p:expr, $($num:tt),+ $(,)?) => {
        $( $bank.insert($num, $crate::take_pin!($p, $num)); )+
    };
}

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin(u8),
    /// Pin already taken, or owned by the LCD
    Unavailable(u8),
}

/// Pins not claimed by fixed board wiring, addressable by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    /// Create an empty bank
    pub fn new() -> Self {
        Self {
            pins: [const { None }; GPIO_COUNT],
        }
    }

    /// Put a pin in the bank under its GPIO number
    pub fn insert(&mut self, pin_num: u8, pin: Peri<'static, AnyPin>) {
        if let Some(slot) = self.pins.get_mut(pin_num as usize) {
            *slot = Some(pin);
        }
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins
            .get_mut(pin_num as usize)
            .ok_or(PinError::InvalidPin(pin_num))?
            .take()
            .ok_or(PinError::Unavailable(pin_num))
    }

    /// Take a pin as a button input: pull-up enabled, pressed reads low
    pub fn take_button(&mut self, pin_num: u8) -> Result<Input<'static>, PinError> {
        self.take(pin_num).map(|pin| Input::new(pin, Pull::Up))
    }
}

impl Default for PinBank {
    fn default() -> Self {
        Self::new()
    }
}
