//! Tensor types
//!
//! This module provides the core `Tensor` type, an n-dimensional array stored
//! on a compute device, and `LodTensor`, its structured variable-length form.

mod core;
mod id;
mod layout;
mod lod;
mod storage;

pub use core::Tensor;
pub use id::TensorId;
pub use layout::{Layout, Shape, Strides, broadcast_shapes};
pub use lod::{LodTensor, create_lod_tensor};
pub use storage::Storage;
