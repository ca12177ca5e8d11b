//! Storage: device memory management with Arc-based sharing

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use bytemuck::Pod;
use std::sync::Arc;

/// Storage for tensor data on a device
///
/// Storage wraps device memory with reference counting, enabling zero-copy
/// views (broadcasts) that share the underlying buffer.
///
/// The buffer is kept as 8-byte words so it can be viewed as any element
/// type without alignment faults.
pub struct Storage<R: Runtime> {
    inner: Arc<StorageInner<R>>,
}

struct StorageInner<R: Runtime> {
    words: Vec<u64>,
    /// Number of elements (not bytes)
    len: usize,
    dtype: DType,
    device: R::Device,
}

impl<R: Runtime> Storage<R> {
    /// Create zero-initialized storage for `len` elements of `dtype`
    pub fn new(len: usize, dtype: DType, device: &R::Device) -> Self {
        let size_bytes = len * dtype.size_in_bytes();
        Self {
            inner: Arc::new(StorageInner {
                words: vec![0u64; size_bytes.div_ceil(8)],
                len,
                dtype,
                device: device.clone(),
            }),
        }
    }

    /// Create storage from existing data with inferred dtype
    pub fn from_slice<T: Element>(data: &[T], device: &R::Device) -> Self {
        Self::from_raw_bytes(bytemuck::cast_slice(data), data.len(), T::DTYPE, device)
    }

    /// Create storage from raw bytes with explicit dtype
    ///
    /// Returns an error if the byte count is not a whole number of elements.
    pub fn from_bytes(data: &[u8], dtype: DType, device: &R::Device) -> Result<Self> {
        let elem = dtype.size_in_bytes();
        if data.len() % elem != 0 {
            return Err(Error::InvalidArgument {
                arg: "data",
                reason: format!(
                    "{} bytes is not a multiple of the {dtype} element size {elem}",
                    data.len()
                ),
            });
        }
        Ok(Self::from_raw_bytes(data, data.len() / elem, dtype, device))
    }

    pub(crate) fn from_raw_bytes(bytes: &[u8], len: usize, dtype: DType, device: &R::Device) -> Self {
        let mut words = vec![0u64; bytes.len().div_ceil(8)];
        bytemuck::cast_slice_mut::<u64, u8>(&mut words)[..bytes.len()].copy_from_slice(bytes);
        Self {
            inner: Arc::new(StorageInner {
                words,
                len,
                dtype,
                device: device.clone(),
            }),
        }
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len
    }

    /// Check if storage is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.inner.dtype
    }

    /// Get the device
    #[inline]
    pub fn device(&self) -> &R::Device {
        &self.inner.device
    }

    /// Get size in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.inner.len * self.inner.dtype.size_in_bytes()
    }

    /// Get the reference count
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Raw bytes of the buffer
    pub fn bytes(&self) -> &[u8] {
        &bytemuck::cast_slice::<u64, u8>(&self.inner.words)[..self.size_in_bytes()]
    }

    /// View the buffer as a slice of `T`
    ///
    /// Returns an error if `T` does not have the storage's element size.
    pub fn as_slice<T: Pod>(&self) -> Result<&[T]> {
        if std::mem::size_of::<T>() != self.inner.dtype.size_in_bytes() {
            return Err(Error::Internal(format!(
                "cannot view {} storage as {}-byte elements",
                self.inner.dtype,
                std::mem::size_of::<T>()
            )));
        }
        Ok(bytemuck::cast_slice(self.bytes()))
    }
}

impl<R: Runtime> Clone for Storage<R> {
    /// Clone increments the reference count (zero-copy)
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Runtime> std::fmt::Debug for Storage<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("len", &self.inner.len)
            .field("dtype", &self.inner.dtype)
            .field("ref_count", &self.ref_count())
            .finish()
    }
}
