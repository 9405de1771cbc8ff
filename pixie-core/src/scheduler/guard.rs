//! At-most-one-tick-in-flight guard

use portable_atomic::{AtomicBool, Ordering};

/// Scheduler state as seen from outside a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerState {
    /// Waiting for the next firing
    Idle,
    /// A processing step is in progress
    Running,
}

/// Tick errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickError {
    /// A tick was requested while another was still running
    Reentrant,
}

/// Flag that admits one tick at a time
///
/// Lives at the timer boundary, usually in a `static`, so every context
/// that can fire a tick shares it. The scheduler itself is reached through
/// `&mut` and holds no guard.
#[derive(Debug)]
pub struct TickGuard {
    running: AtomicBool,
}

impl Default for TickGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl TickGuard {
    pub const fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
        }
    }

    /// Enter a tick, or `None` if one is already running
    ///
    /// The tick ends when the returned token is dropped.
    pub fn try_enter(&self) -> Option<TickToken<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| TickToken { guard: self })
    }

    /// Run `tick` if no other tick is in flight
    ///
    /// A refused entry returns [`TickError::Reentrant`] without calling
    /// `tick`.
    pub fn run<R>(&self, tick: impl FnOnce() -> R) -> Result<R, TickError> {
        let _token = self.try_enter().ok_or(TickError::Reentrant)?;
        Ok(tick())
    }

    pub fn state(&self) -> SchedulerState {
        if self.running.load(Ordering::Acquire) {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }
}

/// Proof that the holder owns the current tick
#[must_use]
#[derive(Debug)]
pub struct TickToken<'a> {
    guard: &'a TickGuard,
}

impl Drop for TickToken<'_> {
    fn drop(&mut self) {
        self.guard.running.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_entry() {
        let guard = TickGuard::new();
        assert_eq!(guard.state(), SchedulerState::Idle);

        let token = guard.try_enter();
        assert!(token.is_some());
        assert_eq!(guard.state(), SchedulerState::Running);

        // Nested entry refused while the first is held
        assert!(guard.try_enter().is_none());

        drop(token);
        assert_eq!(guard.state(), SchedulerState::Idle);
        assert!(guard.try_enter().is_some());
    }

    #[test]
    fn test_run_refuses_nested_tick() {
        let guard = TickGuard::new();
        let mut inner_ran = false;

        let outer = guard.run(|| {
            assert_eq!(guard.state(), SchedulerState::Running);
            guard.run(|| inner_ran = true)
        });

        assert_eq!(outer, Ok(Err(TickError::Reentrant)));
        assert!(!inner_ran);
        assert_eq!(guard.state(), SchedulerState::Idle);
        assert_eq!(guard.run(|| 7), Ok(7));
    }

    #[test]
    fn test_static_guard() {
        static GUARD: TickGuard = TickGuard::new();
        let _token = GUARD.try_enter().unwrap();
        assert!(GUARD.try_enter().is_none());
    }
}
