//! ST7735S LCD driver
//!
//! Driver for the 0.96" 160x80 IPS module (ST7735S controller) over a
//! write-only SPI bus. Pixels are RGB565, high byte first on the wire.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use pixie_core::flush::Area;
use pixie_core::traits::{Orientation, Panel};

use super::backlight::Backlight;

/// Long side of the visible area
const LONG_SIDE: u16 = 160;
/// Short side of the visible area
const SHORT_SIDE: u16 = 80;

/// Controller RAM offsets of the visible area (column, row) for
/// horizontal scanning; swapped for vertical
const OFFSET_LONG: u16 = 1;
const OFFSET_SHORT: u16 = 26;

/// ST7735S commands
#[allow(dead_code)]
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const INVON: u8 = 0x21;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
    pub const FRMCTR1: u8 = 0xB1;
    pub const FRMCTR2: u8 = 0xB2;
    pub const FRMCTR3: u8 = 0xB3;
    pub const INVCTR: u8 = 0xB4;
    pub const PWCTR1: u8 = 0xC0;
    pub const PWCTR2: u8 = 0xC1;
    pub const PWCTR3: u8 = 0xC2;
    pub const PWCTR4: u8 = 0xC3;
    pub const PWCTR5: u8 = 0xC4;
    pub const VMCTR1: u8 = 0xC5;
    pub const GMCTRP1: u8 = 0xE0;
    pub const GMCTRN1: u8 = 0xE1;
}

/// MADCTL values: row/column exchange + mirror, BGR panel
const MADCTL_HORIZONTAL: u8 = 0x78;
const MADCTL_VERTICAL: u8 = 0x08;

/// 16 bits per pixel
const COLMOD_RGB565: u8 = 0x05;

/// Register setup after sleep-out: (command, parameters)
const INIT_REGS: &[(u8, &[u8])] = &[
    (cmd::INVON, &[]),
    (cmd::FRMCTR1, &[0x05, 0x3A, 0x3A]),
    (cmd::FRMCTR2, &[0x05, 0x3A, 0x3A]),
    (cmd::FRMCTR3, &[0x05, 0x3A, 0x3A, 0x05, 0x3A, 0x3A]),
    (cmd::INVCTR, &[0x03]),
    (cmd::PWCTR1, &[0x62, 0x02, 0x04]),
    (cmd::PWCTR2, &[0xC0]),
    (cmd::PWCTR3, &[0x0D, 0x00]),
    (cmd::PWCTR4, &[0x8D, 0x6A]),
    (cmd::PWCTR5, &[0x8D, 0xEE]),
    (cmd::VMCTR1, &[0x0E]),
    (
        cmd::GMCTRP1,
        &[
            0x10, 0x0E, 0x02, 0x03, 0x0E, 0x07, 0x02, 0x07, 0x0A, 0x12, 0x27, 0x37, 0x00, 0x0D,
            0x0E, 0x10,
        ],
    ),
    (
        cmd::GMCTRN1,
        &[
            0x10, 0x0E, 0x03, 0x03, 0x0F, 0x06, 0x02, 0x08, 0x0A, 0x13, 0x26, 0x36, 0x00, 0x0D,
            0x0E, 0x10,
        ],
    ),
    (cmd::COLMOD, &[COLMOD_RGB565]),
];

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum St7735Error<S, P> {
    /// SPI transfer failed
    Spi(S),
    /// Control pin (DC, CS or RST) failed
    Pin(P),
}

/// ST7735S panel
///
/// `DC`, `CS` and `RST` share one pin error type.
pub struct St7735<SPI, DC, CS, RST, BL> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
    backlight: BL,
    orientation: Orientation,
}

type Result<T, SPI, DC> = core::result::Result<
    T,
    St7735Error<<SPI as embedded_hal::spi::ErrorType>::Error, <DC as embedded_hal::digital::ErrorType>::Error>,
>;

impl<SPI, DC, CS, RST, BL> St7735<SPI, DC, CS, RST, BL>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin<Error = DC::Error>,
    RST: OutputPin<Error = DC::Error>,
    BL: Backlight,
{
    /// Create a driver; call [`St7735::init`] before drawing
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST, backlight: BL, orientation: Orientation) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst,
            backlight,
            orientation,
        }
    }

    /// Hardware reset, register setup and display on
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), SPI, DC> {
        self.cs.set_high().map_err(St7735Error::Pin)?;

        self.rst.set_high().map_err(St7735Error::Pin)?;
        delay.delay_ms(20);
        self.rst.set_low().map_err(St7735Error::Pin)?;
        delay.delay_ms(20);
        self.rst.set_high().map_err(St7735Error::Pin)?;
        delay.delay_ms(120);

        self.command(cmd::SLPOUT, &[])?;
        delay.delay_ms(120);

        for &(command, params) in INIT_REGS {
            self.command(command, params)?;
        }

        self.command(cmd::MADCTL, &[self.madctl()])?;
        self.command(cmd::DISPON, &[])?;
        delay.delay_ms(20);

        Ok(())
    }

    /// Fill the whole panel with one RGB565 color
    pub fn clear(&mut self, color: u16) -> Result<(), SPI, DC> {
        let (w, h) = self.dimensions();
        self.address_window(Area::new(0, 0, w - 1, h - 1))?;

        let [hi, lo] = color.to_be_bytes();
        let mut row = [0u8; LONG_SIDE as usize * 2];
        for px in row.chunks_exact_mut(2) {
            px[0] = hi;
            px[1] = lo;
        }

        let row_bytes = w as usize * 2;
        for _ in 0..h {
            self.data(&row[..row_bytes])?;
        }
        Ok(())
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, DC, CS, RST, BL) {
        (self.spi, self.dc, self.cs, self.rst, self.backlight)
    }

    fn dimensions(&self) -> (u16, u16) {
        match self.orientation {
            Orientation::Horizontal => (LONG_SIDE, SHORT_SIDE),
            Orientation::Vertical => (SHORT_SIDE, LONG_SIDE),
        }
    }

    fn offsets(&self) -> (u16, u16) {
        match self.orientation {
            Orientation::Horizontal => (OFFSET_LONG, OFFSET_SHORT),
            Orientation::Vertical => (OFFSET_SHORT, OFFSET_LONG),
        }
    }

    fn madctl(&self) -> u8 {
        match self.orientation {
            Orientation::Horizontal => MADCTL_HORIZONTAL,
            Orientation::Vertical => MADCTL_VERTICAL,
        }
    }

    fn address_window(&mut self, area: Area) -> Result<(), SPI, DC> {
        let (xo, yo) = self.offsets();
        let [xs_hi, xs_lo] = (area.x1 + xo).to_be_bytes();
        let [xe_hi, xe_lo] = (area.x2 + xo).to_be_bytes();
        let [ys_hi, ys_lo] = (area.y1 + yo).to_be_bytes();
        let [ye_hi, ye_lo] = (area.y2 + yo).to_be_bytes();

        self.command(cmd::CASET, &[xs_hi, xs_lo, xe_hi, xe_lo])?;
        self.command(cmd::RASET, &[ys_hi, ys_lo, ye_hi, ye_lo])?;
        self.command(cmd::RAMWR, &[])
    }

    /// Send a command byte followed by its parameters
    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), SPI, DC> {
        self.cs.set_low().map_err(St7735Error::Pin)?;
        self.dc.set_low().map_err(St7735Error::Pin)?;
        let result = self.write_bus(&[command]).and_then(|()| {
            if params.is_empty() {
                return Ok(());
            }
            self.dc.set_high().map_err(St7735Error::Pin)?;
            self.write_bus(params)
        });
        self.cs.set_high().map_err(St7735Error::Pin)?;
        result
    }

    /// Send data bytes (pixels or parameters)
    fn data(&mut self, data: &[u8]) -> Result<(), SPI, DC> {
        self.cs.set_low().map_err(St7735Error::Pin)?;
        self.dc.set_high().map_err(St7735Error::Pin)?;
        let result = self.write_bus(data);
        self.cs.set_high().map_err(St7735Error::Pin)?;
        result
    }

    fn write_bus(&mut self, bytes: &[u8]) -> Result<(), SPI, DC> {
        self.spi.write(bytes).map_err(St7735Error::Spi)?;
        self.spi.flush().map_err(St7735Error::Spi)
    }
}

impl<SPI, DC, CS, RST, BL> Panel for St7735<SPI, DC, CS, RST, BL>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin<Error = DC::Error>,
    RST: OutputPin<Error = DC::Error>,
    BL: Backlight,
{
    type Error = St7735Error<SPI::Error, DC::Error>;

    fn size(&self) -> (u16, u16) {
        self.dimensions()
    }

    fn set_window(&mut self, area: Area) -> core::result::Result<(), Self::Error> {
        self.address_window(area)
    }

    fn write_pixels(&mut self, data: &[u8]) -> core::result::Result<(), Self::Error> {
        self.data(data)
    }

    fn set_brightness(&mut self, percent: u8) {
        self.backlight.set_level(percent);
    }
}
