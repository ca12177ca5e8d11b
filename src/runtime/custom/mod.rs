//! Custom accelerator runtime
//!
//! Devices are addressed as `npu:<ordinal>`. Comparison kernels support
//! NumPy-style broadcasting: shapes are right-aligned and size-1 dimensions
//! expand. Broadcast views use stride 0 and are walked by a strided kernel,
//! while same-shape contiguous operands take a flat (optionally parallel) path.

mod client;
mod device;
mod helpers;
mod kernels;
mod ops;
mod place;
mod runtime;

pub use client::CustomClient;
pub use device::{CustomDevice, DEVICE_COUNT, DEVICE_TYPE};
pub use place::{current_device, set_device};
pub use runtime::{BUILTIN_TOOLKIT_VERSION, CustomRuntime, TOOLKIT_VERSION_ENV};
