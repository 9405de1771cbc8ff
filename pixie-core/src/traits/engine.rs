//! UI engine boundary
//!
//! The engine is an external collaborator. The scheduler calls it through
//! two entry points: a processing step and a logical clock advance. During
//! the processing step the engine reaches the rest of the runtime through
//! [`EngineIo`].

use heapless::Vec;
use pixie_hal::LineReader;

use crate::flush::{Area, FlushBridge, FlushError, FlushReady};
use crate::input::{DeviceId, DeviceKind, InputDevices, InputError, InputReading, MAX_DEVICES};
use crate::keys::{KeyScanner, KeySnapshot};
use crate::traits::display::Panel;

/// Retained-mode UI engine driven by the tick scheduler
pub trait GraphicsEngine {
    /// Advance the engine's logical clock
    fn tick_inc(&mut self, elapsed_ms: u32);

    /// Run one processing step: read input, run due timers, redraw
    ///
    /// Must not block. Runs to completion inside the tick.
    fn process<L, P>(&mut self, io: &mut EngineIo<'_, L, P>)
    where
        L: LineReader + ?Sized,
        P: Panel;
}

/// Everything the engine may touch during one processing step
///
/// The key lines are scanned at most once per step: the first input read
/// scans, later reads in the same step reuse the snapshot, so the keypad
/// and the encoder always observe the same key state.
pub struct EngineIo<'a, L: ?Sized, P> {
    scanner: &'a mut KeyScanner,
    lines: &'a mut L,
    inputs: &'a mut InputDevices,
    display: &'a mut FlushBridge<P>,
    snapshot: Option<KeySnapshot>,
}

impl<'a, L, P> EngineIo<'a, L, P>
where
    L: LineReader + ?Sized,
    P: Panel,
{
    pub fn new(
        scanner: &'a mut KeyScanner,
        lines: &'a mut L,
        inputs: &'a mut InputDevices,
        display: &'a mut FlushBridge<P>,
    ) -> Self {
        Self {
            scanner,
            lines,
            inputs,
            display,
            snapshot: None,
        }
    }

    /// Registered devices, in registration order
    pub fn devices(&self) -> Vec<(DeviceId, DeviceKind), MAX_DEVICES> {
        self.inputs.ids().collect()
    }

    /// Read one input device
    pub fn read_input(&mut self, id: DeviceId) -> Result<InputReading, InputError> {
        let snapshot = self.key_snapshot();
        self.inputs.poll(id, snapshot)
    }

    /// Key state for this step, scanning on first use
    pub fn key_snapshot(&mut self) -> KeySnapshot {
        match self.snapshot {
            Some(snapshot) => snapshot,
            None => {
                let snapshot = self.scanner.scan(&mut *self.lines);
                self.snapshot = Some(snapshot);
                snapshot
            }
        }
    }

    /// Check if the lines were scanned during this step
    pub fn scanned(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Display resolution as (width, height)
    pub fn resolution(&self) -> (u16, u16) {
        self.display.resolution()
    }

    /// Push a rendered region to the display
    ///
    /// `ready` is notified exactly once before this returns.
    pub fn flush<R>(
        &mut self,
        area: Area,
        pixels: &[u16],
        ready: &mut R,
    ) -> Result<(), FlushError<P::Error>>
    where
        R: FlushReady + ?Sized,
    {
        self.display.flush(area, pixels, ready)
    }
}
