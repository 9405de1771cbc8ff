//! Fixed board wiring
//!
//! Waveshare Pico-LCD-0.96: the LCD sits on SPI1 with fixed pins,
//! everything else is free for buttons.
//!
//! | Signal | GPIO |
//! |--------|------|
//! | DC     | 8    |
//! | CS     | 9    |
//! | SCK    | 10   |
//! | MOSI   | 11   |
//! | RST    | 12   |
//! | BL     | 13   |

use embassy_rp::gpio::{Input, Level, Output};
use embassy_rp::peripherals::{PIN_10, PIN_11, PIN_12, PIN_13, PIN_8, PIN_9, PWM_SLICE6, SPI1};
use embassy_rp::pwm::{self, Pwm, PwmOutput};
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_rp::Peri;
use pixie_core::keys::MAX_KEYS;
use pixie_core::traits::Orientation;
use pixie_drivers::{ButtonBank, PwmBacklight, St7735};

/// LCD SPI clock
const LCD_SPI_HZ: u32 = 10_000_000;

/// Backlight PWM counter top; duty is set as a percentage of it
const BACKLIGHT_PWM_TOP: u16 = 1000;

pub type LcdSpi = Spi<'static, SPI1, Blocking>;
pub type Backlight = PwmBacklight<PwmOutput<'static>>;
pub type LcdPanel = St7735<LcdSpi, Output<'static>, Output<'static>, Output<'static>, Backlight>;
pub type Buttons = ButtonBank<Input<'static>, MAX_KEYS>;

/// LCD pins and peripherals
pub struct LcdResources {
    pub spi: Peri<'static, SPI1>,
    pub sck: Peri<'static, PIN_10>,
    pub mosi: Peri<'static, PIN_11>,
    pub dc: Peri<'static, PIN_8>,
    pub cs: Peri<'static, PIN_9>,
    pub rst: Peri<'static, PIN_12>,
    pub bl: Peri<'static, PIN_13>,
    pub bl_pwm: Peri<'static, PWM_SLICE6>,
}

/// Build the panel driver; the panel still needs `init`
pub fn lcd(r: LcdResources, orientation: Orientation) -> LcdPanel {
    let mut spi_config = spi::Config::default();
    spi_config.frequency = LCD_SPI_HZ;
    let spi = Spi::new_blocking_txonly(r.spi, r.sck, r.mosi, spi_config);

    let dc = Output::new(r.dc, Level::Low);
    let cs = Output::new(r.cs, Level::High);
    let rst = Output::new(r.rst, Level::High);

    let mut pwm_config = pwm::Config::default();
    pwm_config.top = BACKLIGHT_PWM_TOP;
    pwm_config.compare_b = 0;
    let (_, bl) = Pwm::new_output_b(r.bl_pwm, r.bl, pwm_config).split();
    let backlight = PwmBacklight::new(defmt::unwrap!(bl));

    St7735::new(spi, dc, cs, rst, backlight, orientation)
}
