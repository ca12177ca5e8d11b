//! # accel-compare
//!
//! **Elementwise comparison operators on a custom accelerator, with a
//! data-driven test suite that checks them against host oracles.**
//!
//! The crate carries the framework slice the suite exercises: typed tensors
//! on `npu` devices, broadcasting comparison kernels with dtype promotion,
//! an eager API, a declarative program/executor, and LoD tensors.
//!
//! ## Operators
//!
//! `equal`, `not_equal`, `less_than`, `less_equal`, `greater_than`,
//! `greater_equal`. Outputs are Bool tensors of the broadcast shape.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use accel_compare::prelude::*;
//!
//! let device = set_device("npu:0")?;
//! let client = CustomRuntime::default_client(&device);
//! let a = Tensor::<CustomRuntime>::from_slice(&[1i32, 2, 3, 4], &[2, 2], &device)?;
//! let b = Tensor::<CustomRuntime>::from_slice(&[2i32, 2, 2, 2], &[2, 2], &device)?;
//! let out = client.lt(&a, &b)?; // [[true, false], [false, false]]
//!
//! let groups = build_registry(CustomRuntime::toolkit_version());
//! let report = run_suite(&groups, &SuiteConfig::from_env()?);
//! assert!(report.is_success());
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): parallel contiguous comparison kernels

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod graph;
pub mod harness;
pub mod host;
pub mod ops;
pub mod runtime;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::DType;
    pub use crate::error::{Error, Result};
    pub use crate::graph::{Executor, Feed, Program, Variable};
    pub use crate::harness::{SuiteConfig, build_registry, run_suite};
    pub use crate::host::HostArray;
    pub use crate::ops::{CompareOp, CompareOps, Kwargs, TypeConversionOps};
    pub use crate::runtime::custom::{CustomClient, CustomDevice, CustomRuntime};
    pub use crate::runtime::{Device, Runtime, RuntimeClient, current_device, set_device};
    pub use crate::tensor::{Layout, LodTensor, Tensor, create_lod_tensor};
}
