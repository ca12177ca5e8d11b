//! Suite configuration from the environment

use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::runtime::custom::{CustomDevice, CustomRuntime, TOOLKIT_VERSION_ENV};

/// Device specifier the cases select
pub const DEVICE_ENV: &str = "ACCEL_COMPARE_DEVICE";

/// Fixture seed (u64)
pub const SEED_ENV: &str = "ACCEL_COMPARE_SEED";

/// Settings for one suite run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Device each case selects before running (`npu:0` by default)
    pub device: String,
    /// Fixture seed; a random seed is drawn and logged when absent
    pub seed: Option<u64>,
    /// Toolkit version used for capability gating
    pub toolkit_version: u32,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            device: "npu:0".to_string(),
            seed: None,
            toolkit_version: CustomRuntime::toolkit_version(),
        }
    }
}

impl SuiteConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`
    ///
    /// Unset variables take their defaults; malformed values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(device) = lookup(DEVICE_ENV) {
            CustomDevice::parse(&device)?;
            config.device = device;
        }

        if let Some(seed) = lookup(SEED_ENV) {
            config.seed = Some(seed.trim().parse().map_err(|_| Error::InvalidArgument {
                arg: SEED_ENV,
                reason: format!("'{seed}' is not an unsigned 64-bit integer"),
            })?);
        }

        if let Some(version) = lookup(TOOLKIT_VERSION_ENV) {
            config.toolkit_version = version.trim().parse().map_err(|_| Error::InvalidArgument {
                arg: TOOLKIT_VERSION_ENV,
                reason: format!("'{version}' is not an unsigned integer"),
            })?;
        }

        Ok(config)
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder-style toolkit version override
    pub fn with_toolkit_version(mut self, version: u32) -> Self {
        self.toolkit_version = version;
        self
    }
}
