//! Key mapping table
//!
//! An ordered list of (physical line, logical key) pairs. The declared
//! order is also the scan priority: when several lines are active at
//! once the earliest binding wins.

use heapless::Vec;
use pixie_hal::LineId;

/// Maximum number of bindings in a key map
pub const MAX_KEYS: usize = 16;

/// Logical key codes understood by the UI engine
///
/// The discriminants are the control-character codes the engine uses for
/// navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum KeyCode {
    Up = 17,
    Down = 18,
    Right = 19,
    Left = 20,
    Esc = 27,
    Del = 127,
    Backspace = 8,
    Enter = 10,
    Next = 9,
    Prev = 11,
    Home = 2,
    End = 3,
}

impl KeyCode {
    /// Numeric code as seen by the engine
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Parse a key from its numeric code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            17 => Some(KeyCode::Up),
            18 => Some(KeyCode::Down),
            19 => Some(KeyCode::Right),
            20 => Some(KeyCode::Left),
            27 => Some(KeyCode::Esc),
            127 => Some(KeyCode::Del),
            8 => Some(KeyCode::Backspace),
            10 => Some(KeyCode::Enter),
            9 => Some(KeyCode::Next),
            11 => Some(KeyCode::Prev),
            2 => Some(KeyCode::Home),
            3 => Some(KeyCode::End),
            _ => None,
        }
    }

    /// Returns true for the two keys the encoder forwards
    pub fn is_horizontal(self) -> bool {
        matches!(self, KeyCode::Left | KeyCode::Right)
    }
}

/// One entry of the key map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyBinding {
    /// GPIO line the button is wired to
    pub line: LineId,
    /// Key reported while the line is active
    pub key: KeyCode,
}

impl KeyBinding {
    pub const fn new(line: LineId, key: KeyCode) -> Self {
        Self { line, key }
    }
}

/// Errors building a key map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyMapError {
    /// The same line is bound twice
    DuplicateLine(LineId),
    /// More than [`MAX_KEYS`] bindings
    TooManyKeys,
    /// No bindings at all
    Empty,
}

/// Bindings of the Pico-LCD-0.96 board
///
/// Joystick up/down/left/right, joystick press (ctrl) and the A/B buttons.
pub const DEFAULT_BINDINGS: [KeyBinding; 7] = [
    KeyBinding::new(2, KeyCode::Up),
    KeyBinding::new(18, KeyCode::Down),
    KeyBinding::new(16, KeyCode::Left),
    KeyBinding::new(20, KeyCode::Right),
    KeyBinding::new(15, KeyCode::Enter),
    KeyBinding::new(17, KeyCode::Esc),
    KeyBinding::new(3, KeyCode::Home),
];

/// Ordered, read-only key mapping table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: Vec<KeyBinding, MAX_KEYS>,
}

impl Default for KeyMap {
    fn default() -> Self {
        // DEFAULT_BINDINGS is well under MAX_KEYS and has unique lines
        Self {
            bindings: Vec::from_slice(&DEFAULT_BINDINGS).unwrap_or_default(),
        }
    }
}

impl KeyMap {
    /// Build a key map, rejecting duplicate lines
    pub fn new(bindings: &[KeyBinding]) -> Result<Self, KeyMapError> {
        if bindings.is_empty() {
            return Err(KeyMapError::Empty);
        }
        if bindings.len() > MAX_KEYS {
            return Err(KeyMapError::TooManyKeys);
        }

        let mut map = Vec::new();
        for binding in bindings {
            if map.iter().any(|b: &KeyBinding| b.line == binding.line) {
                return Err(KeyMapError::DuplicateLine(binding.line));
            }
            map.push(*binding).map_err(|_| KeyMapError::TooManyKeys)?;
        }

        Ok(Self { bindings: map })
    }

    /// Bindings in scan order
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Lines referenced by the map, in scan order
    pub fn lines(&self) -> impl Iterator<Item = LineId> + '_ {
        self.bindings.iter().map(|b| b.line)
    }

    /// Look up the key bound to a line
    pub fn key_for(&self, line: LineId) -> Option<KeyCode> {
        self.bindings
            .iter()
            .find(|b| b.line == line)
            .map(|b| b.key)
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if the map has no bindings
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_matches_board() {
        let map = KeyMap::default();
        assert_eq!(map.len(), 7);
        assert_eq!(map.key_for(2), Some(KeyCode::Up));
        assert_eq!(map.key_for(18), Some(KeyCode::Down));
        assert_eq!(map.key_for(15), Some(KeyCode::Enter));
        assert_eq!(map.key_for(3), Some(KeyCode::Home));
        assert_eq!(map.key_for(4), None);
    }

    #[test]
    fn test_default_map_keeps_table_order() {
        let map = KeyMap::default();
        let lines: heapless::Vec<u8, MAX_KEYS> = map.lines().collect();
        let expected: heapless::Vec<u8, MAX_KEYS> =
            DEFAULT_BINDINGS.iter().map(|b| b.line).collect();
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_duplicate_line_rejected() {
        let bindings = [
            KeyBinding::new(2, KeyCode::Up),
            KeyBinding::new(2, KeyCode::Down),
        ];
        assert_eq!(KeyMap::new(&bindings), Err(KeyMapError::DuplicateLine(2)));
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(KeyMap::new(&[]), Err(KeyMapError::Empty));
    }

    #[test]
    fn test_too_many_keys() {
        let mut bindings = [KeyBinding::new(0, KeyCode::Up); MAX_KEYS + 1];
        for (i, b) in bindings.iter_mut().enumerate() {
            b.line = i as u8;
        }
        assert_eq!(KeyMap::new(&bindings), Err(KeyMapError::TooManyKeys));
    }

    #[test]
    fn test_order_preserved() {
        let bindings = [
            KeyBinding::new(20, KeyCode::Right),
            KeyBinding::new(2, KeyCode::Up),
            KeyBinding::new(16, KeyCode::Left),
        ];
        let map = KeyMap::new(&bindings).unwrap();
        let lines: heapless::Vec<u8, 4> = map.lines().collect();
        assert_eq!(lines.as_slice(), &[20, 2, 16]);
    }

    #[test]
    fn test_code_roundtrip() {
        for binding in DEFAULT_BINDINGS {
            assert_eq!(KeyCode::from_code(binding.key.code()), Some(binding.key));
        }
        assert_eq!(KeyCode::from_code(0), None);
    }

    #[test]
    fn test_horizontal_keys() {
        assert!(KeyCode::Left.is_horizontal());
        assert!(KeyCode::Right.is_horizontal());
        assert!(!KeyCode::Up.is_horizontal());
        assert!(!KeyCode::Enter.is_horizontal());
    }
}
