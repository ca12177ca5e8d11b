//! Runtime backends for tensor computation
//!
//! This module defines the `Runtime` trait and the custom accelerator
//! backend that implements it.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity, toolkit capability query)
//! ├── Device (identifies a specific accelerator, e.g. npu:0)
//! └── Client (dispatches operations)
//! ```

pub mod custom;
mod traits;

pub use custom::{current_device, set_device};
pub use traits::{Device, Runtime, RuntimeClient};
