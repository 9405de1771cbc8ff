//! Device registration

use heapless::Vec;

use super::device::{DeviceKind, InputDevice, InputReading, InputSource};
use crate::keys::KeySnapshot;

/// One keypad and one encoder
pub const MAX_DEVICES: usize = 2;

/// Handle returned by [`InputDevices::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceId(u8);

impl DeviceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Registration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// A device of this kind is already registered
    AlreadyRegistered(DeviceKind),
    /// Handle does not refer to a registered device
    UnknownDevice,
}

/// The devices registered with the engine
#[derive(Debug, Clone, Default)]
pub struct InputDevices {
    devices: Vec<InputDevice, MAX_DEVICES>,
}

impl InputDevices {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
        }
    }

    /// Register a device of the given kind
    ///
    /// Each kind can be registered once, so the table can never exceed
    /// [`MAX_DEVICES`].
    pub fn register(&mut self, kind: DeviceKind) -> Result<DeviceId, InputError> {
        if self.find(kind).is_some() {
            return Err(InputError::AlreadyRegistered(kind));
        }
        let id = DeviceId(self.devices.len() as u8);
        self.devices
            .push(InputDevice::of_kind(kind))
            .map_err(|_| InputError::AlreadyRegistered(kind))?;
        Ok(id)
    }

    /// Find the handle of a registered kind
    pub fn find(&self, kind: DeviceKind) -> Option<DeviceId> {
        self.devices
            .iter()
            .position(|dev| dev.kind() == kind)
            .map(|i| DeviceId(i as u8))
    }

    /// Poll one device with the snapshot of the current tick
    pub fn poll(&mut self, id: DeviceId, snapshot: KeySnapshot) -> Result<InputReading, InputError> {
        self.devices
            .get_mut(id.index())
            .map(|dev| dev.poll(snapshot))
            .ok_or(InputError::UnknownDevice)
    }

    /// Handles of all registered devices, in registration order
    pub fn ids(&self) -> impl Iterator<Item = (DeviceId, DeviceKind)> + '_ {
        self.devices
            .iter()
            .enumerate()
            .map(|(i, dev)| (DeviceId(i as u8), dev.kind()))
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
