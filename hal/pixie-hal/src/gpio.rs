//! Digital line abstractions
//!
//! Buttons are wired between a GPIO line and ground with the internal
//! pull-up enabled, so a pressed button reads low.

/// Physical line identifier (GPIO number on the RP2040)
pub type LineId = u8;

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if this is the active (pressed) level of a pulled-up button line
    pub fn is_active(self) -> bool {
        self == Level::Low
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// A set of digital input lines addressed by line id
///
/// Lines are configured as pulled-up inputs before they are handed to an
/// implementation; reading never changes their configuration.
pub trait LineReader {
    /// Read the current level of a line
    ///
    /// Unknown lines read [`Level::High`] (inactive).
    fn read(&mut self, line: LineId) -> Level;

    /// Check if a line is at its active (low) level
    fn is_active(&mut self, line: LineId) -> bool {
        self.read(line).is_active()
    }
}

impl<T: LineReader + ?Sized> LineReader for &mut T {
    fn read(&mut self, line: LineId) -> Level {
        (**self).read(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AllLow;

    impl LineReader for AllLow {
        fn read(&mut self, _line: LineId) -> Level {
            Level::Low
        }
    }

    #[test]
    fn test_low_is_active() {
        assert!(Level::Low.is_active());
        assert!(!Level::High.is_active());
    }

    #[test]
    fn test_level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
    }

    #[test]
    fn test_reader_through_reference() {
        let mut lines = AllLow;
        let mut by_ref = &mut lines;
        assert!(by_ref.is_active(2));
    }
}
