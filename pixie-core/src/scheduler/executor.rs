//! Tick scheduler
//!
//! Owns the engine and everything it reaches during a processing step.
//! The platform calls [`UiScheduler::tick`] from a fixed-period timer,
//! through a [`TickGuard`](super::TickGuard) when more than one context
//! can fire it.

use pixie_hal::{LineReader, MonotonicClock};

use super::clock::{RemainderPolicy, TickClock};
use crate::flush::{FlushBridge, FlushStats};
use crate::input::InputDevices;
use crate::keys::{KeyMap, KeyScanner, KeyState};
use crate::traits::display::Panel;
use crate::traits::engine::{EngineIo, GraphicsEngine};

/// Summary of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Milliseconds the engine clock advanced
    pub elapsed_ms: u32,
    /// Whether the engine read input (and so the lines were scanned)
    pub scanned: bool,
    /// Ticks completed since start, this one included
    pub ticks: u32,
}

/// Fixed-period driver of a [`GraphicsEngine`]
pub struct UiScheduler<E, L, P> {
    engine: E,
    scanner: KeyScanner,
    lines: L,
    inputs: InputDevices,
    display: FlushBridge<P>,
    clock: TickClock,
    ticks: u32,
}

impl<E, L, P> UiScheduler<E, L, P>
where
    E: GraphicsEngine,
    L: LineReader,
    P: Panel,
{
    /// Assemble a scheduler
    ///
    /// `start_us` is the hardware time the first tick is measured from.
    pub fn new(
        engine: E,
        map: KeyMap,
        lines: L,
        inputs: InputDevices,
        display: FlushBridge<P>,
        start_us: u64,
        policy: RemainderPolicy,
    ) -> Self {
        Self {
            engine,
            scanner: KeyScanner::new(map),
            lines,
            inputs,
            display,
            clock: TickClock::new(start_us, policy),
            ticks: 0,
        }
    }

    /// Run one firing at hardware time `now_us`
    ///
    /// Measures the delta since the previous firing, runs the engine's
    /// processing step, then advances the engine clock by the delta in
    /// whole milliseconds.
    pub fn tick(&mut self, now_us: u64) -> TickReport {
        let elapsed_ms = self.clock.advance(now_us);

        let mut io = EngineIo::new(
            &mut self.scanner,
            &mut self.lines,
            &mut self.inputs,
            &mut self.display,
        );
        self.engine.process(&mut io);
        let scanned = io.scanned();

        self.engine.tick_inc(elapsed_ms);
        self.ticks = self.ticks.wrapping_add(1);

        TickReport {
            elapsed_ms,
            scanned,
            ticks: self.ticks,
        }
    }

    /// Run one firing at the clock's current time
    pub fn tick_now<C: MonotonicClock + ?Sized>(&mut self, clock: &C) -> TickReport {
        self.tick(clock.now_us())
    }

    /// Total milliseconds fed to the engine
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.elapsed_ms()
    }

    pub fn key_state(&self) -> KeyState {
        self.scanner.state()
    }

    pub fn flush_stats(&self) -> FlushStats {
        self.display.stats()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn display_mut(&mut self) -> &mut FlushBridge<P> {
        &mut self.display
    }

    pub fn lines_mut(&mut self) -> &mut L {
        &mut self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;
    use crate::flush::{Area, FlushReady, PixelFormat};
    use crate::input::{DeviceKind, PressState};
    use crate::keys::{KeyBinding, KeyCode};
    use pixie_hal::{Level, LineId};

    struct MockLines {
        active: Vec<LineId>,
        scans: usize,
    }

    impl LineReader for MockLines {
        fn read(&mut self, line: LineId) -> Level {
            // Count full passes by the first line of the map
            if line == 2 {
                self.scans += 1;
            }
            if self.active.contains(&line) {
                Level::Low
            } else {
                Level::High
            }
        }
    }

    struct NullPanel {
        windows: Vec<Area>,
    }

    impl Panel for NullPanel {
        type Error = ();

        fn size(&self) -> (u16, u16) {
            (160, 80)
        }

        fn set_window(&mut self, area: Area) -> Result<(), ()> {
            self.windows.push(area);
            Ok(())
        }

        fn write_pixels(&mut self, _data: &[u8]) -> Result<(), ()> {
            Ok(())
        }

        fn set_brightness(&mut self, _percent: u8) {}
    }

    #[derive(Debug, PartialEq, Eq)]
    enum Step {
        Process,
        TickInc(u32),
    }

    /// Engine that reads every device and flushes one small region
    #[derive(Default)]
    struct RecordingEngine {
        steps: Vec<Step>,
        readings: Vec<(DeviceKind, KeyCode, PressState)>,
        flushed: usize,
        read_input: bool,
    }

    impl FlushReady for usize {
        fn flush_ready(&mut self) {
            *self += 1;
        }
    }

    impl GraphicsEngine for RecordingEngine {
        fn tick_inc(&mut self, elapsed_ms: u32) {
            self.steps.push(Step::TickInc(elapsed_ms));
        }

        fn process<L2, P2>(&mut self, io: &mut EngineIo<'_, L2, P2>)
        where
            L2: LineReader + ?Sized,
            P2: Panel,
        {
            self.steps.push(Step::Process);
            if self.read_input {
                for (id, kind) in io.devices() {
                    let reading = io.read_input(id).unwrap();
                    self.readings.push((kind, reading.key, reading.state));
                }
            }
            let pixels = [0u16; 4];
            let _ = io.flush(Area::new(0, 0, 1, 1), &pixels, &mut self.flushed);
        }
    }

    fn scheduler(active: &[LineId], read_input: bool) -> UiScheduler<RecordingEngine, MockLines, NullPanel> {
        let map = KeyMap::new(&[
            KeyBinding::new(2, KeyCode::Up),
            KeyBinding::new(18, KeyCode::Down),
            KeyBinding::new(16, KeyCode::Left),
            KeyBinding::new(20, KeyCode::Right),
        ])
        .unwrap();

        let mut inputs = InputDevices::new();
        inputs.register(DeviceKind::Keypad).unwrap();
        inputs.register(DeviceKind::Encoder).unwrap();

        let engine = RecordingEngine {
            read_input,
            ..Default::default()
        };
        let lines = MockLines {
            active: active.to_vec(),
            scans: 0,
        };
        let display = FlushBridge::new(NullPanel { windows: Vec::new() }, PixelFormat::Rgb565);

        UiScheduler::new(engine, map, lines, inputs, display, 0, RemainderPolicy::Truncate)
    }

    #[test]
    fn test_process_then_clock() {
        let mut sched = scheduler(&[], false);
        let report = sched.tick(5_000);

        assert_eq!(report.elapsed_ms, 5);
        assert_eq!(report.ticks, 1);
        assert_eq!(sched.engine().steps, vec![Step::Process, Step::TickInc(5)]);
    }

    #[test]
    fn test_non_uniform_deltas() {
        let mut sched = scheduler(&[], false);
        sched.tick(4_999);
        sched.tick(10_000);
        sched.tick(15_000);

        assert_eq!(sched.elapsed_ms(), 14);
        let incs: Vec<&Step> = sched
            .engine()
            .steps
            .iter()
            .filter(|s| matches!(s, Step::TickInc(_)))
            .collect();
        assert_eq!(incs, vec![&Step::TickInc(4), &Step::TickInc(5), &Step::TickInc(5)]);
    }

    #[test]
    fn test_up_pressed_end_to_end() {
        let mut sched = scheduler(&[2], true);
        sched.tick(5_000);

        let readings = &sched.engine().readings;
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0], (DeviceKind::Keypad, KeyCode::Up, PressState::Pressed));
        // Encoder keeps its initial key and reports released
        assert_eq!(readings[1].0, DeviceKind::Encoder);
        assert_eq!(readings[1].1, crate::input::EncoderInput::IDLE_KEY);
        assert_eq!(readings[1].2, PressState::Released);
    }

    #[test]
    fn test_single_scan_per_tick() {
        let mut sched = scheduler(&[20], true);
        let report = sched.tick(5_000);

        assert!(report.scanned);
        assert_eq!(sched.lines_mut().scans, 1);
        assert_eq!(sched.key_state().last_key, KeyCode::Right);
    }

    #[test]
    fn test_no_scan_without_input_read() {
        let mut sched = scheduler(&[2], false);
        let report = sched.tick(5_000);

        assert!(!report.scanned);
        assert_eq!(sched.lines_mut().scans, 0);
    }

    #[test]
    fn test_flush_ready_each_tick() {
        let mut sched = scheduler(&[], false);
        for i in 1..=3 {
            sched.tick(i * 5_000);
        }
        assert_eq!(sched.engine().flushed, 3);
        assert_eq!(sched.flush_stats().flushes, 3);
    }

    #[test]
    fn test_guarded_tick_refused_while_running() {
        use crate::scheduler::{TickError, TickGuard};

        let guard = TickGuard::new();
        let mut sched = scheduler(&[2], true);

        let token = guard.try_enter();
        assert!(token.is_some());
        assert_eq!(guard.run(|| sched.tick(5_000)), Err(TickError::Reentrant));
        assert!(sched.engine().steps.is_empty());
        assert_eq!(sched.elapsed_ms(), 0);
        assert_eq!(sched.lines_mut().scans, 0);

        drop(token);
        let report = guard.run(|| sched.tick(5_000));
        assert_eq!(report.map(|r| r.elapsed_ms), Ok(5));
    }

    #[test]
    fn test_tick_now_uses_clock() {
        struct FixedClock(u64);
        impl MonotonicClock for FixedClock {
            fn now_us(&self) -> u64 {
                self.0
            }
        }

        let mut sched = scheduler(&[], false);
        let report = sched.tick_now(&FixedClock(30_000));
        assert_eq!(report.elapsed_ms, 30);
    }
}
