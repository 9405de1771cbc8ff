//! Draw target over the engine's draw buffer
//!
//! The buffer holds one rectangular region of the screen, packed row by
//! row with no stride padding, so a redrawn region can be flushed straight
//! from the start of the buffer. Drawing uses screen coordinates; pixels
//! outside the region are clipped.

use core::convert::Infallible;

use embedded_graphics::geometry::Dimensions;
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use pixie_core::flush::Area;

/// RGB565 canvas covering one screen region
pub struct Canvas<'a> {
    buf: &'a mut [u16],
    region: Rectangle,
}

impl<'a> Canvas<'a> {
    /// Wrap `buf` as the pixels of `area`
    ///
    /// Returns `None` if the buffer is too small for the area.
    pub fn new(buf: &'a mut [u16], area: Area) -> Option<Self> {
        if buf.len() < area.pixel_count() {
            return None;
        }
        Some(Self {
            buf,
            region: area_to_rect(area),
        })
    }

    /// Pixels written so far, in flush order
    pub fn pixels(&self) -> &[u16] {
        let len = self.region.size.width as usize * self.region.size.height as usize;
        &self.buf[..len]
    }

    fn index(&self, point: Point) -> Option<usize> {
        if !self.region.contains(point) {
            return None;
        }
        let x = (point.x - self.region.top_left.x) as usize;
        let y = (point.y - self.region.top_left.y) as usize;
        Some(y * self.region.size.width as usize + x)
    }
}

impl Dimensions for Canvas<'_> {
    fn bounding_box(&self) -> Rectangle {
        self.region
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(idx) = self.index(point) {
                self.buf[idx] = color.into_storage();
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.region);
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        let raw = color.into_storage();
        for y in area.top_left.y..=bottom_right.y {
            let (Some(start), Some(end)) = (
                self.index(Point::new(area.top_left.x, y)),
                self.index(Point::new(bottom_right.x, y)),
            ) else {
                continue;
            };
            self.buf[start..=end].fill(raw);
        }
        Ok(())
    }
}

/// Convert an inclusive area to an `embedded-graphics` rectangle
pub fn area_to_rect(area: Area) -> Rectangle {
    Rectangle::new(
        Point::new(area.x1 as i32, area.y1 as i32),
        Size::new(area.width() as u32, area.height() as u32),
    )
}

/// Convert a rectangle to an inclusive area
///
/// Returns `None` for empty rectangles or ones reaching negative
/// coordinates.
pub fn rect_to_area(rect: &Rectangle) -> Option<Area> {
    let bottom_right = rect.bottom_right()?;
    let x1 = u16::try_from(rect.top_left.x).ok()?;
    let y1 = u16::try_from(rect.top_left.y).ok()?;
    let x2 = u16::try_from(bottom_right.x).ok()?;
    let y2 = u16::try_from(bottom_right.y).ok()?;
    Some(Area::new(x1, y1, x2, y2))
}
