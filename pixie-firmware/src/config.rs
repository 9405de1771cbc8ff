//! Board configuration
//!
//! `build.rs` validates board.toml on the host and leaves a postcard blob
//! in OUT_DIR; decoding it is the only config work done on the target.

use defmt::*;
use pixie_core::config::BoardConfig;

/// Validated board.toml, postcard encoded
static BOARD_BIN: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/board.bin"));

/// Decode the embedded board configuration
///
/// The blob was produced from a validated config by the same build, so a
/// decode failure means a broken build and is fatal.
pub fn load() -> BoardConfig {
    match postcard::from_bytes::<BoardConfig>(BOARD_BIN) {
        Ok(config) => {
            info!(
                "Board config: {}x{} {}, brightness {}%, tick {} ms, {} keys",
                config.display.width,
                config.display.height,
                config.display.orientation,
                config.display.brightness,
                config.scheduler.tick_period_ms,
                config.keys.len()
            );
            config
        }
        Err(e) => {
            error!("Embedded board config is corrupt: {}", Debug2Format(&e));
            panic!("board config decode failed");
        }
    }
}
