//! Input devices exposed to the UI engine
//!
//! Two logical devices share the one key state: a keypad and a
//! directional encoder-with-keys.

pub mod device;
pub mod registry;

pub use device::{
    DeviceKind, EncoderInput, InputDevice, InputReading, InputSource, KeypadInput, PressState,
};
pub use registry::{DeviceId, InputDevices, InputError, MAX_DEVICES};
