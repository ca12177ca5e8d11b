//! Custom accelerator client

use super::device::CustomDevice;
use super::runtime::CustomRuntime;
use crate::runtime::RuntimeClient;

/// Client for dispatching operations to a custom device
#[derive(Clone, Debug)]
pub struct CustomClient {
    pub(crate) device: CustomDevice,
}

impl CustomClient {
    /// Create a new client bound to `device`
    pub fn new(device: CustomDevice) -> Self {
        Self { device }
    }
}

impl RuntimeClient<CustomRuntime> for CustomClient {
    fn device(&self) -> &CustomDevice {
        &self.device
    }

    fn synchronize(&self) {
        // Kernels complete before returning
    }
}
