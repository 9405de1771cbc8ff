//! Pixie - Button-driven LCD UI Firmware
//!
//! Main firmware binary for RP2040 boards with a 0.96" ST7735S LCD and a
//! handful of push buttons. Brings the hardware up once, shows the
//! splash, then hands everything to the UI tick task.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Delay;
use embedded_alloc::LlffHeap as Heap;
use static_cell::{ConstStaticCell, StaticCell};
use {defmt_rtt as _, panic_probe as _};

use pixie_core::config::BoardConfig;
use pixie_core::flush::FlushBridge;
use pixie_core::input::{DeviceKind, InputDevices};
use pixie_core::splash::{render_splash, SplashImage};
use pixie_core::traits::Panel;
use pixie_hal::MonotonicClock;
use pixie_ui::FocusEngine;

use crate::board::{Buttons, LcdPanel, LcdResources};
use crate::clock::EmbassyClock;
use crate::pins::PinBank;
use crate::tasks::Ui;

mod board;
mod clock;
mod config;
mod pins;
mod tasks;

// Heap allocator for the splash frame
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 32KB (one 160x80 RGB565 frame plus slack)
const HEAP_SIZE: usize = 32 * 1024;

/// Largest screen the draw buffer can hold
const DRAW_BUF_PIXELS: usize = 160 * 80;

/// Splash image, 160x80 RGB565 with the two bytes of each pixel reversed
static SPLASH: &[u8] = include_bytes!("../assets/splash.bin");
const SPLASH_WIDTH: u16 = 160;
const SPLASH_HEIGHT: u16 = 80;

/// White in RGB565
const BACKGROUND: u16 = 0xFFFF;

// Static cells for state the tick task owns (must live forever)
static DRAW_BUF: ConstStaticCell<[u16; DRAW_BUF_PIXELS]> =
    ConstStaticCell::new([BACKGROUND; DRAW_BUF_PIXELS]);
static UI: StaticCell<Ui> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pixie firmware starting...");

    // Initialize heap allocator
    init_heap();

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();

    // LCD on SPI1 (fixed wiring, see board.rs)
    let mut lcd = board::lcd(
        LcdResources {
            spi: p.SPI1,
            sck: p.PIN_10,
            mosi: p.PIN_11,
            dc: p.PIN_8,
            cs: p.PIN_9,
            rst: p.PIN_12,
            bl: p.PIN_13,
            bl_pwm: p.PWM_SLICE6,
        },
        config.display.orientation,
    );
    init_display(&mut lcd, &config);

    if config.splash.enabled {
        show_splash(&mut lcd, config.splash.dwell_ms);
    }

    // Every pin the LCD does not use is available for buttons
    let mut bank = PinBank::new();
    free_pins!(bank, p, 0, 1, 2, 3, 4, 5, 6, 7, 14, 15, 16, 17, 18, 19, 20, 21, 22, 26, 27, 28);
    let buttons = init_buttons(&mut bank, &config);

    let mut inputs = InputDevices::new();
    let keypad = unwrap!(inputs.register(DeviceKind::Keypad));
    let encoder = unwrap!(inputs.register(DeviceKind::Encoder));
    info!("Input devices registered: keypad={}, encoder={}", keypad, encoder);

    let key_map = unwrap!(config.key_map());
    let draw_buf = DRAW_BUF.take();
    let engine = FocusEngine::new(draw_buf);
    let display = FlushBridge::new(lcd, config.display.pixel_format);

    let ui = UI.init(Ui::new(
        engine,
        key_map,
        buttons,
        inputs,
        display,
        EmbassyClock.now_us(),
        config.scheduler.remainder_policy(),
    ));

    spawner
        .spawn(tasks::ui_tick_task(ui, config.scheduler.tick_period_ms))
        .unwrap();

    info!("UI running");
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}

/// Reset and configure the panel, then clear it to the background
fn init_display(lcd: &mut LcdPanel, config: &BoardConfig) {
    let (width, height) = lcd.size();
    if (width, height) != (config.display.width, config.display.height) {
        error!(
            "board.toml says {}x{} but the panel is {}x{}",
            config.display.width, config.display.height, width, height
        );
        panic!("display size mismatch");
    }
    if width as usize * height as usize > DRAW_BUF_PIXELS {
        panic!("draw buffer too small for {}x{}", width, height);
    }

    if let Err(e) = lcd.init(&mut Delay) {
        error!("LCD init failed: {}", Debug2Format(&e));
        panic!("LCD init failed");
    }
    lcd.set_brightness(config.display.brightness);
    if let Err(e) = lcd.clear(BACKGROUND) {
        error!("LCD clear failed: {}", Debug2Format(&e));
        panic!("LCD clear failed");
    }

    info!(
        "LCD initialized: {}x{}, backlight {}%",
        width, height, config.display.brightness
    );
}

/// Draw the splash and hold it
fn show_splash(lcd: &mut LcdPanel, dwell_ms: u32) {
    let image = SplashImage::new(SPLASH, SPLASH_WIDTH, SPLASH_HEIGHT);
    match render_splash(lcd, &image, dwell_ms, &mut Delay) {
        Ok(()) => info!("Splash shown for {} ms", dwell_ms),
        Err(e) => {
            error!("Splash failed: {}", Debug2Format(&e));
            panic!("splash failed");
        }
    }
}

/// Claim one pulled-up input per configured key
fn init_buttons(bank: &mut PinBank, config: &BoardConfig) -> Buttons {
    let mut buttons = Buttons::new();
    for binding in config.keys.iter() {
        let pin = match bank.take_button(binding.line) {
            Ok(pin) => pin,
            Err(e) => {
                error!("Key {} on GPIO{}: {}", binding.key, binding.line, e);
                panic!("key pin unavailable");
            }
        };
        if buttons.add(binding.line, pin).is_err() {
            panic!("too many keys");
        }
        debug!("GPIO{} -> {}", binding.line, binding.key);
    }
    info!("{} buttons configured", buttons.len());
    buttons
}
