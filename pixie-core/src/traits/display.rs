//! Panel driver trait

use crate::flush::Area;

/// Scan orientation selected when the panel is initialised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Long side horizontal
    Horizontal,
    /// Long side vertical
    Vertical,
}

/// Physical display controller
///
/// Pixel data is always in the panel's native byte order; translation
/// from the engine's pixel format happens in the flush bridge.
pub trait Panel {
    /// Error type for bus operations
    type Error;

    /// Visible size in pixels as (width, height) for the current orientation
    fn size(&self) -> (u16, u16);

    /// Set the addressing window for the next pixel writes
    ///
    /// Coordinates are inclusive.
    fn set_window(&mut self, area: Area) -> Result<(), Self::Error>;

    /// Stream pixel bytes into the current window
    ///
    /// May be called several times after one [`Panel::set_window`].
    fn write_pixels(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Write a full frame of native-order pixel bytes
    fn write_frame(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let (w, h) = self.size();
        self.set_window(Area::new(0, 0, w - 1, h - 1))?;
        self.write_pixels(data)
    }

    /// Set backlight brightness (0-100 %)
    fn set_brightness(&mut self, percent: u8);
}

impl<T: Panel + ?Sized> Panel for &mut T {
    type Error = T::Error;

    fn size(&self) -> (u16, u16) {
        (**self).size()
    }

    fn set_window(&mut self, area: Area) -> Result<(), Self::Error> {
        (**self).set_window(area)
    }

    fn write_pixels(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_pixels(data)
    }

    fn write_frame(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_frame(data)
    }

    fn set_brightness(&mut self, percent: u8) {
        (**self).set_brightness(percent)
    }
}
