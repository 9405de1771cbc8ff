//! Time source abstractions

/// Monotonic free-running clock with microsecond resolution
///
/// Readings never decrease while the device is powered.
pub trait MonotonicClock {
    /// Microseconds since an arbitrary fixed origin (usually boot)
    fn now_us(&self) -> u64;
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
