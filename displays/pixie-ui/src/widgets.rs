//! Widgets

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::String;
use pixie_core::flush::Area;

use crate::canvas::rect_to_area;

/// Longest label: "Button: " plus a full u32
const LABEL_LEN: usize = 20;

/// Colors used by every widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb565,
    pub button: Rgb565,
    pub button_pressed: Rgb565,
    pub focus: Rgb565,
    pub text: Rgb565,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb565::WHITE,
            button: Rgb565::new(4, 37, 30),
            button_pressed: Rgb565::new(2, 22, 18),
            focus: Rgb565::new(31, 40, 0),
            text: Rgb565::WHITE,
        }
    }
}

/// Push button that counts its clicks
#[derive(Debug, Clone)]
pub struct Button {
    bounds: Rectangle,
    clicks: u32,
    pressed: bool,
    label: String<LABEL_LEN>,
}

impl Button {
    /// Create a button at `pos` with the initial "Button" label
    pub fn new(pos: Point, size: Size) -> Self {
        let mut label = String::new();
        let _ = label.push_str("Button");
        Self {
            bounds: Rectangle::new(pos, size),
            clicks: 0,
            pressed: false,
            label,
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Screen area covered by the button
    pub fn area(&self) -> Option<Area> {
        rect_to_area(&self.bounds)
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Set the pressed look; returns true if it changed
    pub fn set_pressed(&mut self, pressed: bool) -> bool {
        let changed = self.pressed != pressed;
        self.pressed = pressed;
        changed
    }

    /// Count a click and relabel as "Button: N"
    pub fn click(&mut self) {
        self.clicks = self.clicks.wrapping_add(1);
        self.pressed = false;
        self.label.clear();
        // Capacity covers any u32
        let _ = write!(self.label, "Button: {}", self.clicks);
    }

    /// Draw the button, outlined when focused
    pub fn draw<D>(&self, target: &mut D, theme: &Theme, focused: bool) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let fill = if self.pressed {
            theme.button_pressed
        } else {
            theme.button
        };

        let mut style = PrimitiveStyleBuilder::new().fill_color(fill);
        if focused {
            style = style.stroke_color(theme.focus).stroke_width(2);
        }
        self.bounds.into_styled(style.build()).draw(target)?;

        let character_style = MonoTextStyle::new(&FONT_6X10, theme.text);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(&self.label, self.bounds.center(), character_style, text_style)
            .draw(target)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_relabels() {
        let mut button = Button::new(Point::new(5, 5), Size::new(60, 20));
        assert_eq!(button.label(), "Button");

        button.click();
        button.click();
        assert_eq!(button.clicks(), 2);
        assert_eq!(button.label(), "Button: 2");
    }

    #[test]
    fn test_label_fits_max_count() {
        let mut button = Button::new(Point::new(0, 0), Size::new(60, 20));
        button.clicks = u32::MAX - 1;
        button.click();
        assert_eq!(button.label(), "Button: 4294967295");
    }

    #[test]
    fn test_click_releases() {
        let mut button = Button::new(Point::new(0, 0), Size::new(60, 20));
        assert!(button.set_pressed(true));
        assert!(!button.set_pressed(true));
        button.click();
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_area() {
        let button = Button::new(Point::new(5, 30), Size::new(60, 20));
        assert_eq!(button.area(), Some(Area::new(5, 30, 64, 49)));
    }
}
