//! Keypad and encoder views over the key state
//!
//! Both devices read the same [`KeySnapshot`]. The keypad forwards every
//! mapped key; the encoder only forwards left/right so those two keys can
//! drive focus traversal while action keys stay out of it.

use crate::keys::{KeyCode, KeySnapshot};

/// Press state reported to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressState {
    Released,
    Pressed,
}

impl PressState {
    pub fn is_pressed(self) -> bool {
        self == PressState::Pressed
    }
}

impl From<bool> for PressState {
    fn from(pressed: bool) -> Self {
        if pressed {
            PressState::Pressed
        } else {
            PressState::Released
        }
    }
}

/// Kind tag used when registering a device with the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceKind {
    /// Reports any mapped key
    Keypad,
    /// Directional encoder driven by the left/right keys
    Encoder,
}

/// One observation of an input device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputReading {
    pub key: KeyCode,
    pub state: PressState,
}

/// Capability shared by both input devices
pub trait InputSource {
    /// The kind this device registers as
    fn kind(&self) -> DeviceKind;

    /// Turn the current key snapshot into this device's reading
    fn poll(&mut self, snapshot: KeySnapshot) -> InputReading;
}

/// Keypad view: mirrors the key state unconditionally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeypadInput;

impl InputSource for KeypadInput {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Keypad
    }

    fn poll(&mut self, snapshot: KeySnapshot) -> InputReading {
        InputReading {
            key: snapshot.key,
            state: snapshot.pressed.into(),
        }
    }
}

/// Encoder view: forwards only left/right
///
/// The key field is sticky. A snapshot with any other key leaves it as it
/// was and reports released, so the encoder can never press a key it does
/// not forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderInput {
    key: KeyCode,
}

impl Default for EncoderInput {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderInput {
    /// Key reported before left or right has ever been seen
    ///
    /// Enter is what the engine expects from an encoder push; it is only
    /// ever reported released here.
    pub const IDLE_KEY: KeyCode = KeyCode::Enter;

    pub fn new() -> Self {
        Self {
            key: Self::IDLE_KEY,
        }
    }

    /// Last key forwarded
    pub fn key(&self) -> KeyCode {
        self.key
    }
}

impl InputSource for EncoderInput {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Encoder
    }

    fn poll(&mut self, snapshot: KeySnapshot) -> InputReading {
        let forwarded = snapshot.key.is_horizontal();
        if forwarded {
            self.key = snapshot.key;
        }

        InputReading {
            key: self.key,
            state: (forwarded && snapshot.pressed).into(),
        }
    }
}

/// A registered input device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDevice {
    Keypad(KeypadInput),
    Encoder(EncoderInput),
}

impl InputDevice {
    /// Create a fresh device of the given kind
    pub fn of_kind(kind: DeviceKind) -> Self {
        match kind {
            DeviceKind::Keypad => InputDevice::Keypad(KeypadInput),
            DeviceKind::Encoder => InputDevice::Encoder(EncoderInput::new()),
        }
    }
}

impl InputSource for InputDevice {
    fn kind(&self) -> DeviceKind {
        match self {
            InputDevice::Keypad(dev) => dev.kind(),
            InputDevice::Encoder(dev) => dev.kind(),
        }
    }

    fn poll(&mut self, snapshot: KeySnapshot) -> InputReading {
        match self {
            InputDevice::Keypad(dev) => dev.poll(snapshot),
            InputDevice::Encoder(dev) => dev.poll(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(key: KeyCode, pressed: bool) -> KeySnapshot {
        KeySnapshot { key, pressed }
    }

    #[test]
    fn test_keypad_mirrors_state() {
        let mut keypad = KeypadInput;

        let reading = keypad.poll(snap(KeyCode::Enter, true));
        assert_eq!(reading.key, KeyCode::Enter);
        assert_eq!(reading.state, PressState::Pressed);

        let reading = keypad.poll(snap(KeyCode::Enter, false));
        assert_eq!(reading.key, KeyCode::Enter);
        assert_eq!(reading.state, PressState::Released);
    }

    #[test]
    fn test_keypad_reports_direction_keys() {
        let mut keypad = KeypadInput;
        let reading = keypad.poll(snap(KeyCode::Left, true));
        assert_eq!(reading.key, KeyCode::Left);
        assert!(reading.state.is_pressed());
    }

    #[test]
    fn test_encoder_forwards_left_right() {
        let mut encoder = EncoderInput::new();

        let reading = encoder.poll(snap(KeyCode::Right, true));
        assert_eq!(reading.key, KeyCode::Right);
        assert_eq!(reading.state, PressState::Pressed);

        let reading = encoder.poll(snap(KeyCode::Left, true));
        assert_eq!(reading.key, KeyCode::Left);
        assert_eq!(reading.state, PressState::Pressed);
    }

    #[test]
    fn test_encoder_ignores_other_keys() {
        let mut encoder = EncoderInput::new();
        encoder.poll(snap(KeyCode::Right, true));

        for key in [KeyCode::Up, KeyCode::Down, KeyCode::Enter, KeyCode::Esc, KeyCode::Home] {
            let reading = encoder.poll(snap(key, true));
            assert_eq!(reading.state, PressState::Released);
            assert_eq!(reading.key, KeyCode::Right);
        }
    }

    #[test]
    fn test_encoder_release_keeps_key() {
        let mut encoder = EncoderInput::new();
        encoder.poll(snap(KeyCode::Left, true));

        let reading = encoder.poll(snap(KeyCode::Left, false));
        assert_eq!(reading.key, KeyCode::Left);
        assert_eq!(reading.state, PressState::Released);
    }

    #[test]
    fn test_encoder_initial_key_untouched() {
        let mut encoder = EncoderInput::new();
        let reading = encoder.poll(snap(KeyCode::Up, true));
        assert_eq!(reading.key, EncoderInput::IDLE_KEY);
        assert_eq!(reading.state, PressState::Released);
    }

    #[test]
    fn test_device_enum_dispatch() {
        let mut keypad = InputDevice::of_kind(DeviceKind::Keypad);
        let mut encoder = InputDevice::of_kind(DeviceKind::Encoder);
        assert_eq!(keypad.kind(), DeviceKind::Keypad);
        assert_eq!(encoder.kind(), DeviceKind::Encoder);

        let s = snap(KeyCode::Down, true);
        assert!(keypad.poll(s).state.is_pressed());
        assert!(!encoder.poll(s).state.is_pressed());
    }
}
