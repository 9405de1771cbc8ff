//! Focus engine
//!
//! Keeps a focus group of buttons, reads the keypad and encoder on its own
//! input timer, and redraws the damaged region on its refresh timer. Both
//! timers run on the logical clock advanced by the scheduler.

use embedded_graphics::prelude::*;
use pixie_core::flush::{Area, FlushReady};
use pixie_core::input::{DeviceKind, InputReading, PressState};
use pixie_core::keys::KeyCode;
use pixie_core::traits::{EngineIo, GraphicsEngine, Panel};
use pixie_hal::LineReader;

use crate::canvas::Canvas;
use crate::widgets::{Button, Theme};

/// Input read period on the logical clock
pub const INPUT_PERIOD_MS: u64 = 30;

/// Redraw period on the logical clock
pub const REFRESH_PERIOD_MS: u64 = 30;

const BUTTON_COUNT: usize = 2;
const BUTTON_SIZE: Size = Size::new(60, 20);

/// Draw buffer ownership flag
///
/// Set before a flush is handed out, cleared by the flush bridge once the
/// buffer may be drawn into again.
#[derive(Debug, Default)]
struct BufferFlag {
    busy: bool,
}

impl FlushReady for BufferFlag {
    fn flush_ready(&mut self) {
        self.busy = false;
    }
}

/// Engine counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineStats {
    /// Regions flushed
    pub frames: u32,
    /// Flushes that returned an error
    pub flush_errors: u32,
    /// Input timer runs
    pub input_reads: u32,
}

/// Timer firing every `period` ms of logical time
#[derive(Debug, Clone, Copy)]
struct Timer {
    period: u64,
    next: u64,
}

impl Timer {
    const fn new(period: u64) -> Self {
        Self { period, next: 0 }
    }

    /// Check and re-arm
    fn due(&mut self, now: u64) -> bool {
        if now < self.next {
            return false;
        }
        self.next = now.saturating_add(self.period);
        true
    }
}

/// Two counter buttons in one focus group
pub struct FocusEngine<'a> {
    buf: &'a mut [u16],
    flag: BufferFlag,
    theme: Theme,
    buttons: [Button; BUTTON_COUNT],
    focus: usize,
    now_ms: u64,
    input_timer: Timer,
    refresh_timer: Timer,
    dirty: Option<Area>,
    /// Whole screen still to be drawn once
    first_frame: bool,
    /// Previous readings, for edge detection
    keypad_prev: Option<InputReading>,
    encoder_prev: Option<InputReading>,
    stats: EngineStats,
}

impl<'a> FocusEngine<'a> {
    /// Create the engine over a draw buffer
    ///
    /// The buffer must hold a full screen; the first refresh redraws and
    /// flushes the whole screen.
    pub fn new(buf: &'a mut [u16]) -> Self {
        Self {
            buf,
            flag: BufferFlag::default(),
            theme: Theme::default(),
            buttons: [
                Button::new(Point::new(5, 5), BUTTON_SIZE),
                Button::new(Point::new(5, 30), BUTTON_SIZE),
            ],
            focus: 0,
            now_ms: 0,
            input_timer: Timer::new(INPUT_PERIOD_MS),
            refresh_timer: Timer::new(REFRESH_PERIOD_MS),
            dirty: None,
            first_frame: true,
            keypad_prev: None,
            encoder_prev: None,
            stats: EngineStats::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Index of the focused button
    pub fn focused(&self) -> usize {
        self.focus
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Logical time in ms
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Region waiting to be redrawn
    pub fn dirty(&self) -> Option<Area> {
        self.dirty
    }

    /// Mark a region for redraw
    pub fn invalidate(&mut self, area: Area) {
        self.dirty = Some(match self.dirty {
            Some(dirty) => dirty.union(&area),
            None => area,
        });
    }

    fn invalidate_button(&mut self, index: usize) {
        if let Some(area) = self.buttons.get(index).and_then(Button::area) {
            self.invalidate(area);
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let old = self.focus;
        self.focus = if forward {
            (old + 1) % BUTTON_COUNT
        } else {
            (old + BUTTON_COUNT - 1) % BUTTON_COUNT
        };
        // Focus moves drop a press in progress
        self.buttons[old].set_pressed(false);
        self.invalidate_button(old);
        self.invalidate_button(self.focus);
    }

    /// Keypad edges
    ///
    /// Switching straight from one held key to another releases the first
    /// without completing it, so a click needs Enter to go up on its own.
    fn handle_keypad(&mut self, reading: InputReading) {
        let prev = self.keypad_prev.replace(reading);
        let held = prev.filter(|p| p.state.is_pressed()).map(|p| p.key);
        let now = reading.state.is_pressed().then_some(reading.key);
        if held == now {
            return;
        }

        if let Some(key) = held {
            self.key_up(key, now.is_none());
        }
        if let Some(key) = now {
            self.key_down(key);
        }
    }

    fn key_down(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                if self.buttons[self.focus].set_pressed(true) {
                    self.invalidate_button(self.focus);
                }
            }
            KeyCode::Esc => self.cancel_press(),
            KeyCode::Next => self.move_focus(true),
            KeyCode::Prev => self.move_focus(false),
            _ => {}
        }
    }

    fn key_up(&mut self, key: KeyCode, complete: bool) {
        if key != KeyCode::Enter {
            return;
        }
        if complete && self.buttons[self.focus].is_pressed() {
            self.buttons[self.focus].click();
            self.invalidate_button(self.focus);
        } else {
            self.cancel_press();
        }
    }

    fn cancel_press(&mut self) {
        if self.buttons[self.focus].set_pressed(false) {
            self.invalidate_button(self.focus);
        }
    }

    /// Encoder steps move focus on the press edge only
    fn handle_encoder(&mut self, reading: InputReading) {
        let prev = self.encoder_prev.replace(reading);
        if reading.state != PressState::Pressed {
            return;
        }
        if prev.is_some_and(|p| p.state.is_pressed() && p.key == reading.key) {
            return;
        }

        match reading.key {
            KeyCode::Right => self.move_focus(true),
            KeyCode::Left => self.move_focus(false),
            _ => {}
        }
    }

    fn read_inputs<L, P>(&mut self, io: &mut EngineIo<'_, L, P>)
    where
        L: LineReader + ?Sized,
        P: Panel,
    {
        self.stats.input_reads = self.stats.input_reads.wrapping_add(1);
        for (id, kind) in io.devices() {
            let Ok(reading) = io.read_input(id) else {
                continue;
            };
            match kind {
                DeviceKind::Keypad => self.handle_keypad(reading),
                DeviceKind::Encoder => self.handle_encoder(reading),
            }
        }
    }

    /// Redraw `area` into the draw buffer
    fn render(&mut self, area: Area) {
        let Some(mut canvas) = Canvas::new(&mut *self.buf, area) else {
            return;
        };
        let _ = canvas.clear(self.theme.background);
        for (i, button) in self.buttons.iter().enumerate() {
            let _ = button.draw(&mut canvas, &self.theme, i == self.focus);
        }
    }

    fn refresh<L, P>(&mut self, io: &mut EngineIo<'_, L, P>)
    where
        L: LineReader + ?Sized,
        P: Panel,
    {
        // The previous flush still owns the buffer
        if self.flag.busy {
            return;
        }
        let Some(area) = self.dirty else {
            return;
        };

        let (width, height) = io.resolution();
        let screen = Area::new(0, 0, width.saturating_sub(1), height.saturating_sub(1));
        let area = Area::new(
            area.x1.min(screen.x2),
            area.y1.min(screen.y2),
            area.x2.min(screen.x2),
            area.y2.min(screen.y2),
        );

        self.render(area);
        self.dirty = None;

        self.flag.busy = true;
        let pixels = &self.buf[..area.pixel_count().min(self.buf.len())];
        match io.flush(area, pixels, &mut self.flag) {
            Ok(()) => self.stats.frames = self.stats.frames.wrapping_add(1),
            Err(_) => self.stats.flush_errors = self.stats.flush_errors.wrapping_add(1),
        }
    }
}

impl GraphicsEngine for FocusEngine<'_> {
    fn tick_inc(&mut self, elapsed_ms: u32) {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms as u64);
    }

    fn process<L, P>(&mut self, io: &mut EngineIo<'_, L, P>)
    where
        L: LineReader + ?Sized,
        P: Panel,
    {
        if self.first_frame {
            self.first_frame = false;
            let (width, height) = io.resolution();
            if let Some(screen) = Area::with_size(0, 0, width, height) {
                self.invalidate(screen);
            }
        }

        if self.input_timer.due(self.now_ms) {
            self.read_inputs(io);
        }
        if self.refresh_timer.due(self.now_ms) {
            self.refresh(io);
        }
    }
}
