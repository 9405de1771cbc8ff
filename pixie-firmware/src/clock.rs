//! Hardware time source for the tick scheduler

use embassy_time::Instant;
use pixie_hal::MonotonicClock;

/// Microsecond clock backed by the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MonotonicClock for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
