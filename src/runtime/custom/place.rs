//! Process-wide current device selection

use super::device::CustomDevice;
use crate::error::Result;
use parking_lot::RwLock;
use std::sync::OnceLock;

static CURRENT_DEVICE: OnceLock<RwLock<CustomDevice>> = OnceLock::new();

fn current() -> &'static RwLock<CustomDevice> {
    CURRENT_DEVICE.get_or_init(|| RwLock::new(CustomDevice::default()))
}

/// Select the device used by subsequent eager calls
///
/// Accepts `npu` or `npu:<ordinal>` and returns the resolved device. On error
/// the current device is left unchanged.
pub fn set_device(spec: &str) -> Result<CustomDevice> {
    let device = CustomDevice::parse(spec)?;
    let mut guard = current().write();
    if *guard != device {
        log::debug!("current device: {} -> {device}", *guard);
    }
    *guard = device.clone();
    Ok(device)
}

/// The currently selected device (`npu:0` until `set_device` is called)
pub fn current_device() -> CustomDevice {
    current().read().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_specifier_keeps_current_device() {
        set_device("npu:0").unwrap();
        assert!(set_device("cpu").is_err());
        assert_eq!(current_device().to_string(), "npu:0");
    }
}
