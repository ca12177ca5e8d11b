//! Custom accelerator device

use crate::error::{Error, Result};
use crate::runtime::Device;
use std::fmt;
use std::str::FromStr;

/// Device type string the custom backend registers under
pub const DEVICE_TYPE: &str = "npu";

/// Number of addressable devices of [`DEVICE_TYPE`]
pub const DEVICE_COUNT: usize = 8;

/// A custom accelerator device, addressed as `npu:<ordinal>`
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CustomDevice {
    id: usize,
}

impl CustomDevice {
    /// Create a device handle for ordinal `id`
    ///
    /// Returns an error if the ordinal is out of range.
    pub fn new(id: usize) -> Result<Self> {
        if id >= DEVICE_COUNT {
            return Err(Error::InvalidDevice {
                spec: format!("{DEVICE_TYPE}:{id}"),
                reason: format!("ordinal out of range (0..{DEVICE_COUNT})"),
            });
        }
        Ok(Self { id })
    }

    /// Parse a device specifier: `npu` or `npu:<ordinal>`
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidDevice {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };

        let (kind, ordinal) = match spec.split_once(':') {
            Some((kind, ordinal)) => (kind, Some(ordinal)),
            None => (spec, None),
        };

        if kind != DEVICE_TYPE {
            return Err(invalid(&format!(
                "unknown device type '{kind}', expected '{DEVICE_TYPE}'"
            )));
        }

        let id = match ordinal {
            None => 0,
            Some(s) => s
                .parse::<usize>()
                .map_err(|_| invalid(&format!("ordinal '{s}' is not a non-negative integer")))?,
        };

        Self::new(id).map_err(|_| invalid(&format!("ordinal out of range (0..{DEVICE_COUNT})")))
    }

    /// Device type string
    pub fn device_type(&self) -> &'static str {
        DEVICE_TYPE
    }
}

impl Device for CustomDevice {
    fn id(&self) -> usize {
        self.id
    }

    fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CustomDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DEVICE_TYPE}:{}", self.id)
    }
}

impl FromStr for CustomDevice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
