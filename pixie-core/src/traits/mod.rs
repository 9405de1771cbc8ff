//! Boundary traits
//!
//! These traits define the interface between the runtime core and its
//! external collaborators: the panel driver and the UI engine.

pub mod display;
pub mod engine;

pub use display::{Orientation, Panel};
pub use engine::{EngineIo, GraphicsEngine};
