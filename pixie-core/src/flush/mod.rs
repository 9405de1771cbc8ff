//! Display flush bridge
//!
//! Moves a rendered region from the engine's draw buffer to the panel and
//! tells the engine when the buffer may be reused.

pub mod area;
pub mod bridge;

pub use area::Area;
pub use bridge::{
    encode_pixels, FlushBridge, FlushError, FlushReady, FlushStats, PixelFormat, CHUNK_PIXELS,
};
