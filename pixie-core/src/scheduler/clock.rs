//! Engine clock bookkeeping
//!
//! Converts hardware microsecond readings into the millisecond advances
//! fed to the engine.

/// What happens to the sub-millisecond part of each tick's delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemainderPolicy {
    /// Drop the remainder (integer division per tick).
    ///
    /// The engine clock runs slow by up to 1 ms per tick over long uptimes.
    #[default]
    Truncate,
    /// Carry the remainder into the next tick; no long-run drift
    Carry,
}

/// Tracks the last hardware time seen and the total fed to the engine
#[derive(Debug, Clone)]
pub struct TickClock {
    last_us: u64,
    carry_us: u64,
    elapsed_ms: u64,
    policy: RemainderPolicy,
}

impl TickClock {
    /// Start counting from hardware time `start_us`
    pub fn new(start_us: u64, policy: RemainderPolicy) -> Self {
        Self {
            last_us: start_us,
            carry_us: 0,
            elapsed_ms: 0,
            policy,
        }
    }

    /// Record a firing at `now_us` and return the milliseconds to advance
    ///
    /// The delta is measured from the previous call (or from the start
    /// time), so consecutive calls never overlap or leave gaps. A reading
    /// earlier than the last one counts as zero elapsed time.
    pub fn advance(&mut self, now_us: u64) -> u32 {
        let delta_us = now_us.saturating_sub(self.last_us);
        self.last_us = self.last_us.max(now_us);

        let total_us = match self.policy {
            RemainderPolicy::Truncate => delta_us,
            RemainderPolicy::Carry => delta_us + self.carry_us,
        };

        let ms = total_us / 1000;
        if self.policy == RemainderPolicy::Carry {
            self.carry_us = total_us % 1000;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(ms);
        ms.min(u32::MAX as u64) as u32
    }

    /// Hardware time of the last firing
    pub fn last_us(&self) -> u64 {
        self.last_us
    }

    /// Total milliseconds fed to the engine so far
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn policy(&self) -> RemainderPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(policy: RemainderPolicy, deltas: &[u64]) -> TickClock {
        let mut clock = TickClock::new(0, policy);
        let mut now = 0;
        for d in deltas {
            now += d;
            clock.advance(now);
        }
        clock
    }

    #[test]
    fn test_truncation_per_tick() {
        let clock = run(RemainderPolicy::Truncate, &[4999, 5001, 5000]);
        assert_eq!(clock.elapsed_ms(), 4 + 5 + 5);
    }

    #[test]
    fn test_carry_keeps_remainder() {
        let clock = run(RemainderPolicy::Carry, &[4999, 5001, 5000]);
        assert_eq!(clock.elapsed_ms(), 15);
    }

    #[test]
    fn test_first_tick_measured_from_start() {
        let mut clock = TickClock::new(1_000_000, RemainderPolicy::Truncate);
        assert_eq!(clock.advance(1_005_000), 5);
        assert_eq!(clock.last_us(), 1_005_000);
    }

    #[test]
    fn test_backwards_reading_is_zero() {
        let mut clock = TickClock::new(10_000, RemainderPolicy::Truncate);
        assert_eq!(clock.advance(9_000), 0);
        // The next delta is still measured from the later reading
        assert_eq!(clock.advance(15_000), 5);
    }

    #[test]
    fn test_sub_millisecond_ticks() {
        let truncated = run(RemainderPolicy::Truncate, &[999; 10]);
        assert_eq!(truncated.elapsed_ms(), 0);

        let carried = run(RemainderPolicy::Carry, &[999; 10]);
        assert_eq!(carried.elapsed_ms(), 9);
    }

    proptest! {
        #[test]
        fn prop_truncate_sums_per_tick(deltas in proptest::collection::vec(0u64..20_000, 1..64)) {
            let clock = run(RemainderPolicy::Truncate, &deltas);
            let expected: u64 = deltas.iter().map(|d| d / 1000).sum();
            prop_assert_eq!(clock.elapsed_ms(), expected);
        }

        #[test]
        fn prop_carry_matches_wall_time(deltas in proptest::collection::vec(0u64..20_000, 1..64)) {
            let clock = run(RemainderPolicy::Carry, &deltas);
            let total: u64 = deltas.iter().sum();
            prop_assert_eq!(clock.elapsed_ms(), total / 1000);
        }
    }
}
