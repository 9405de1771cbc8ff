//! Flush bridge implementation

use super::area::Area;
use crate::traits::display::Panel;

/// Pixels translated per panel write
pub const CHUNK_PIXELS: usize = 64;

/// Pixel layout of the engine's draw buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PixelFormat {
    /// Plain RGB565 values; the panel receives them high byte first
    #[default]
    Rgb565,
    /// RGB565 with the bytes already swapped in memory; sent as stored
    Rgb565Swapped,
}

/// Receiver of the "buffer is free again" notification
pub trait FlushReady {
    fn flush_ready(&mut self);
}

/// Flush errors
///
/// Whatever the error, the ready notification has already been issued
/// when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlushError<E> {
    /// Area extends past the panel; nothing was sent
    OutOfBounds(Area),
    /// Pixel slice smaller than the area; nothing was sent
    ShortBuffer { expected: usize, actual: usize },
    /// Panel bus error part way through the transfer
    Panel(E),
}

/// Running flush counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlushStats {
    /// Flush calls, successful or not
    pub flushes: u32,
    /// Pixels handed to the panel
    pub pixels: u32,
    /// Calls rejected before any transfer
    pub rejected: u32,
    /// Calls that hit a panel error
    pub panel_errors: u32,
}

/// Translate engine pixels into panel byte order
///
/// Returns the number of bytes written. `out` must hold two bytes per
/// pixel; extra pixels are ignored.
pub fn encode_pixels(pixels: &[u16], out: &mut [u8], format: PixelFormat) -> usize {
    let mut written = 0;
    for (px, dst) in pixels.iter().zip(out.chunks_exact_mut(2)) {
        let bytes = match format {
            PixelFormat::Rgb565 => px.to_be_bytes(),
            PixelFormat::Rgb565Swapped => px.to_le_bytes(),
        };
        dst.copy_from_slice(&bytes);
        written += 2;
    }
    written
}

/// Connects the engine's flush requests to a [`Panel`]
pub struct FlushBridge<P> {
    panel: P,
    width: u16,
    height: u16,
    format: PixelFormat,
    stats: FlushStats,
}

impl<P: Panel> FlushBridge<P> {
    /// Create a bridge for an initialised panel
    pub fn new(panel: P, format: PixelFormat) -> Self {
        let (width, height) = panel.size();
        Self {
            panel,
            width,
            height,
            format,
            stats: FlushStats::default(),
        }
    }

    /// Send `area` to the panel and notify `ready`
    ///
    /// Sets the panel window to `area`, streams the first
    /// `area.pixel_count()` pixels in panel byte order, then calls
    /// `ready.flush_ready()` exactly once. The notification is issued on
    /// every path, errors included, because the engine waits on it before
    /// touching the buffer again.
    pub fn flush<R>(&mut self, area: Area, pixels: &[u16], ready: &mut R) -> Result<(), FlushError<P::Error>>
    where
        R: FlushReady + ?Sized,
    {
        let result = self.transfer(area, pixels);
        ready.flush_ready();

        self.stats.flushes = self.stats.flushes.wrapping_add(1);
        match &result {
            Ok(()) => {
                self.stats.pixels = self.stats.pixels.wrapping_add(area.pixel_count() as u32);
            }
            Err(FlushError::Panel(_)) => {
                self.stats.panel_errors = self.stats.panel_errors.wrapping_add(1);
            }
            Err(_) => self.stats.rejected = self.stats.rejected.wrapping_add(1),
        }

        result
    }

    fn transfer(&mut self, area: Area, pixels: &[u16]) -> Result<(), FlushError<P::Error>> {
        if !area.fits_within(self.width, self.height) {
            return Err(FlushError::OutOfBounds(area));
        }

        let count = area.pixel_count();
        if pixels.len() < count {
            return Err(FlushError::ShortBuffer {
                expected: count,
                actual: pixels.len(),
            });
        }

        self.panel.set_window(area).map_err(FlushError::Panel)?;

        let mut chunk = [0u8; CHUNK_PIXELS * 2];
        for block in pixels[..count].chunks(CHUNK_PIXELS) {
            let len = encode_pixels(block, &mut chunk, self.format);
            self.panel
                .write_pixels(&chunk[..len])
                .map_err(FlushError::Panel)?;
        }

        Ok(())
    }

    /// Panel resolution as (width, height)
    pub fn resolution(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn stats(&self) -> FlushStats {
        self.stats
    }

    /// Direct access to the panel (brightness, diagnostics)
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }
}
