//! Custom accelerator runtime implementation

use super::client::CustomClient;
use super::device::CustomDevice;
use crate::runtime::Runtime;
use std::sync::OnceLock;

/// Environment variable overriding the toolkit version code
pub const TOOLKIT_VERSION_ENV: &str = "ACCEL_TOOLKIT_VERSION";

/// Version code reported when no override is set
pub const BUILTIN_TOOLKIT_VERSION: u32 = 8;

static TOOLKIT_VERSION: OnceLock<u32> = OnceLock::new();

/// Custom accelerator compute runtime
///
/// Kernels run as reference software kernels over device buffers, so the
/// backend works on any host.
#[derive(Clone, Debug, Default)]
pub struct CustomRuntime;

impl Runtime for CustomRuntime {
    type Device = CustomDevice;
    type Client = CustomClient;

    fn name() -> &'static str {
        "custom"
    }

    fn default_device() -> Self::Device {
        CustomDevice::default()
    }

    fn default_client(device: &Self::Device) -> Self::Client {
        CustomClient::new(device.clone())
    }

    /// Queried once per process; `ACCEL_TOOLKIT_VERSION` overrides the
    /// built-in code.
    fn toolkit_version() -> u32 {
        *TOOLKIT_VERSION.get_or_init(|| match std::env::var(TOOLKIT_VERSION_ENV) {
            Ok(raw) => match raw.trim().parse::<u32>() {
                Ok(version) => version,
                Err(_) => {
                    log::warn!(
                        "ignoring {TOOLKIT_VERSION_ENV}={raw:?}: not an integer, using {BUILTIN_TOOLKIT_VERSION}"
                    );
                    BUILTIN_TOOLKIT_VERSION
                }
            },
            Err(_) => BUILTIN_TOOLKIT_VERSION,
        })
    }
}
