//! Shared key state and the polling scan

use pixie_hal::LineReader;

use super::map::{KeyCode, KeyMap};

/// Key reported before any button has been pressed
pub const INITIAL_KEY: KeyCode = KeyCode::Up;

/// The one piece of state shared by both input devices
///
/// Written only by [`KeyScanner::scan`]. `last_key` survives release so a
/// key-up still carries the identity of the key that went up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyState {
    pub last_key: KeyCode,
    pub is_pressed: bool,
}

impl Default for KeyState {
    fn default() -> Self {
        Self {
            last_key: INITIAL_KEY,
            is_pressed: false,
        }
    }
}

/// Result of one scan, copied out to the input devices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySnapshot {
    pub key: KeyCode,
    pub pressed: bool,
}

impl From<KeyState> for KeySnapshot {
    fn from(state: KeyState) -> Self {
        Self {
            key: state.last_key,
            pressed: state.is_pressed,
        }
    }
}

/// Owns the key map and the key state
///
/// Lives for the lifetime of the scheduler and is only touched from the
/// tick context, so no locking is involved.
#[derive(Debug, Clone)]
pub struct KeyScanner {
    map: KeyMap,
    state: KeyState,
}

impl KeyScanner {
    /// Create a scanner with the initial key state
    pub fn new(map: KeyMap) -> Self {
        Self {
            map,
            state: KeyState::default(),
        }
    }

    /// Poll the lines in map order
    ///
    /// The first active line wins and ends the scan, so at most one key is
    /// reported per scan. With no active line `is_pressed` drops and
    /// `last_key` is kept.
    pub fn scan<L: LineReader + ?Sized>(&mut self, lines: &mut L) -> KeySnapshot {
        let hit = self
            .map
            .bindings()
            .iter()
            .find(|binding| lines.is_active(binding.line));

        match hit {
            Some(binding) => {
                self.state.last_key = binding.key;
                self.state.is_pressed = true;
            }
            None => self.state.is_pressed = false,
        }

        self.state.into()
    }

    /// Current state without scanning
    pub fn state(&self) -> KeyState {
        self.state
    }

    /// The key map being scanned
    pub fn map(&self) -> &KeyMap {
        &self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;
    use crate::keys::map::{KeyBinding, DEFAULT_BINDINGS};
    use pixie_hal::{Level, LineId};
    use proptest::prelude::*;

    /// Mock line bank: a bit set of active (low) lines
    struct MockLines {
        active: u32,
        reads: usize,
    }

    impl MockLines {
        fn new(active: &[LineId]) -> Self {
            let mut mask = 0;
            for line in active {
                mask |= 1 << line;
            }
            Self {
                active: mask,
                reads: 0,
            }
        }
    }

    impl LineReader for MockLines {
        fn read(&mut self, line: LineId) -> Level {
            self.reads += 1;
            if self.active & (1 << line) != 0 {
                Level::Low
            } else {
                Level::High
            }
        }
    }

    fn board_scanner() -> KeyScanner {
        KeyScanner::new(KeyMap::default())
    }

    #[test]
    fn test_initial_state() {
        let scanner = board_scanner();
        assert_eq!(scanner.state().last_key, KeyCode::Up);
        assert!(!scanner.state().is_pressed);
    }

    #[test]
    fn test_single_press() {
        let mut scanner = board_scanner();
        let snap = scanner.scan(&mut MockLines::new(&[20]));
        assert_eq!(snap.key, KeyCode::Right);
        assert!(snap.pressed);
    }

    #[test]
    fn test_release_keeps_last_key() {
        let mut scanner = board_scanner();
        scanner.scan(&mut MockLines::new(&[15]));

        let snap = scanner.scan(&mut MockLines::new(&[]));
        assert_eq!(snap.key, KeyCode::Enter);
        assert!(!snap.pressed);
    }

    #[test]
    fn test_first_binding_wins() {
        // Up (line 2) is declared before Down (line 18)
        let mut scanner = board_scanner();
        let snap = scanner.scan(&mut MockLines::new(&[18, 2]));
        assert_eq!(snap.key, KeyCode::Up);
    }

    #[test]
    fn test_scan_stops_at_first_hit() {
        let mut scanner = board_scanner();
        let mut lines = MockLines::new(&[2]);
        scanner.scan(&mut lines);
        assert_eq!(lines.reads, 1);

        let mut idle = MockLines::new(&[]);
        scanner.scan(&mut idle);
        assert_eq!(idle.reads, DEFAULT_BINDINGS.len());
    }

    #[test]
    fn test_unmapped_line_ignored() {
        let mut scanner = board_scanner();
        let snap = scanner.scan(&mut MockLines::new(&[5]));
        assert!(!snap.pressed);
        assert_eq!(snap.key, KeyCode::Up);
    }

    fn board_lines() -> impl Strategy<Value = Vec<LineId>> {
        proptest::sample::subsequence(DEFAULT_BINDINGS.iter().map(|b| b.line).collect::<Vec<_>>(), 0..=7)
    }

    proptest! {
        #[test]
        fn prop_no_active_line_keeps_last_key(history in proptest::collection::vec(board_lines(), 0..8)) {
            let mut scanner = board_scanner();
            for active in &history {
                scanner.scan(&mut MockLines::new(active));
            }
            let before = scanner.state().last_key;

            let snap = scanner.scan(&mut MockLines::new(&[]));
            prop_assert!(!snap.pressed);
            prop_assert_eq!(snap.key, before);
        }

        #[test]
        fn prop_single_line_reports_its_key(index in 0usize..DEFAULT_BINDINGS.len()) {
            let binding = DEFAULT_BINDINGS[index];
            let mut scanner = board_scanner();
            let snap = scanner.scan(&mut MockLines::new(&[binding.line]));
            prop_assert!(snap.pressed);
            prop_assert_eq!(snap.key, binding.key);
        }

        #[test]
        fn prop_earliest_binding_wins(active in board_lines()) {
            prop_assume!(!active.is_empty());
            let mut scanner = board_scanner();
            let snap = scanner.scan(&mut MockLines::new(&active));

            let expected: KeyBinding = *DEFAULT_BINDINGS
                .iter()
                .find(|b| active.contains(&b.line))
                .unwrap();
            prop_assert!(snap.pressed);
            prop_assert_eq!(snap.key, expected.key);
        }
    }
}
