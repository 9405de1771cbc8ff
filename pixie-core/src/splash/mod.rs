//! Startup splash renderer
//!
//! One-shot: converts a packed image to panel byte order, draws it as the
//! first full frame and holds it on screen before the UI starts.

use alloc::vec::Vec;
use embedded_hal::delay::DelayNs;

use crate::traits::display::Panel;

/// A packed RGB565 image, two bytes per pixel, low byte first
#[derive(Debug, Clone, Copy)]
pub struct SplashImage<'a> {
    pub data: &'a [u8],
    pub width: u16,
    pub height: u16,
}

impl<'a> SplashImage<'a> {
    pub const fn new(data: &'a [u8], width: u16, height: u16) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Bytes a full image of this size occupies
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * 2
    }
}

/// Splash errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SplashError<E> {
    /// Source data length does not match width * height * 2
    ImageSize { expected: usize, actual: usize },
    /// Image dimensions differ from the panel
    PanelSize { panel: (u16, u16), image: (u16, u16) },
    /// Frame buffer allocation failed
    OutOfMemory,
    /// Panel bus error
    Panel(E),
}

/// Copy `src` into `dst` swapping the two bytes of every pixel
///
/// Stops at the end of the shorter slice.
fn swap_pixel_bytes(src: &[u8], dst: &mut [u8]) {
    for (from, to) in src.chunks_exact(2).zip(dst.chunks_exact_mut(2)) {
        to[0] = from[1];
        to[1] = from[0];
    }
}

/// Allocate a frame buffer and fill it with the converted image
///
/// The buffer is exactly `width * height * 2` bytes. A failed allocation
/// is reported, never retried.
pub fn convert<E>(image: &SplashImage<'_>) -> Result<Vec<u8>, SplashError<E>> {
    let len = image.byte_len();
    if image.data.len() != len {
        return Err(SplashError::ImageSize {
            expected: len,
            actual: image.data.len(),
        });
    }

    let mut frame = Vec::new();
    frame
        .try_reserve_exact(len)
        .map_err(|_| SplashError::OutOfMemory)?;
    frame.resize(len, 0);

    swap_pixel_bytes(image.data, &mut frame);
    Ok(frame)
}

/// Draw the splash and hold it for `dwell_ms`
///
/// The converted frame is released before the dwell starts.
pub fn render_splash<P, D>(
    panel: &mut P,
    image: &SplashImage<'_>,
    dwell_ms: u32,
    delay: &mut D,
) -> Result<(), SplashError<P::Error>>
where
    P: Panel + ?Sized,
    D: DelayNs + ?Sized,
{
    let panel_size = panel.size();
    if panel_size != (image.width, image.height) {
        return Err(SplashError::PanelSize {
            panel: panel_size,
            image: (image.width, image.height),
        });
    }

    let frame = convert(image)?;
    panel.write_frame(&frame).map_err(SplashError::Panel)?;
    drop(frame);

    delay.delay_ms(dwell_ms);
    Ok(())
}
