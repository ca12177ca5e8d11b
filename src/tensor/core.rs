//! Core Tensor type

use super::{Layout, Storage, TensorId};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use std::fmt;

/// N-dimensional array stored on a compute device
///
/// `Tensor` consists of:
/// - **Storage**: Reference-counted device memory
/// - **Layout**: Shape, strides, and offset defining the view into storage
/// - **DType**: Element type (determined at runtime)
///
/// Broadcasting creates views that share storage and use zero strides.
///
/// # Example
///
/// ```ignore
/// use accel_compare::prelude::*;
///
/// let device = CustomRuntime::default_device();
/// let a = Tensor::<CustomRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device)?;
/// let b = a.broadcast_to(&[3, 2, 2])?; // Zero-copy, shares storage with a
/// ```
pub struct Tensor<R: Runtime> {
    id: TensorId,
    storage: Storage<R>,
    layout: Layout,
}

impl<R: Runtime> Tensor<R> {
    /// Create a tensor from storage and layout
    pub fn from_parts(storage: Storage<R>, layout: Layout) -> Self {
        Self {
            id: TensorId::new(),
            storage,
            layout,
        }
    }

    /// Create a tensor from a slice of data
    ///
    /// Returns an error if `data.len()` does not equal the product of the `shape` dimensions.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let tensor = Tensor::<CustomRuntime>::from_slice(&[1i32, 2, 3, 4], &[2, 2], &device)?;
    /// ```
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize], device: &R::Device) -> Result<Self> {
        check_len(data.len(), shape)?;
        Ok(Self::from_parts(
            Storage::from_slice(data, device),
            Layout::contiguous(shape),
        ))
    }

    /// Create a boolean tensor (stored as one byte per element)
    pub fn from_bools(data: &[bool], shape: &[usize], device: &R::Device) -> Result<Self> {
        check_len(data.len(), shape)?;
        let bytes: Vec<u8> = data.iter().map(|&b| b as u8).collect();
        Self::from_bytes(&bytes, shape, DType::Bool, device)
    }

    /// Create a tensor from raw bytes with an explicit dtype
    pub fn from_bytes(data: &[u8], shape: &[usize], dtype: DType, device: &R::Device) -> Result<Self> {
        let storage = Storage::from_bytes(data, dtype, device)?;
        check_len(storage.len(), shape)?;
        Ok(Self::from_parts(storage, Layout::contiguous(shape)))
    }

    /// Create a zero-filled tensor
    pub fn zeros(shape: &[usize], dtype: DType, device: &R::Device) -> Self {
        let len = shape.iter().product();
        Self::from_parts(Storage::new(len, dtype, device), Layout::contiguous(shape))
    }

    // ===== Accessors =====

    /// Unique ID of this tensor
    #[inline]
    pub fn id(&self) -> TensorId {
        self.id
    }

    /// Underlying storage
    #[inline]
    pub fn storage(&self) -> &Storage<R> {
        &self.storage
    }

    /// Memory layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Strides (in elements)
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.elem_count()
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Device holding the storage
    #[inline]
    pub fn device(&self) -> &R::Device {
        self.storage.device()
    }

    /// Whether the layout is row-major contiguous
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    // ===== Views =====

    /// Broadcast to a target shape (zero-copy)
    pub fn broadcast_to(&self, shape: &[usize]) -> Result<Self> {
        let new_layout = self
            .layout
            .broadcast_to(shape)
            .ok_or_else(|| Error::broadcast(self.shape(), shape))?;

        Ok(Self {
            id: TensorId::new(),
            storage: self.storage.clone(),
            layout: new_layout,
        })
    }

    /// Make tensor contiguous (copy if needed)
    ///
    /// If the tensor is already contiguous, returns a view (zero-copy).
    pub fn contiguous(&self) -> Self {
        if self.is_contiguous() {
            return self.clone();
        }

        let elem_size = self.dtype().size_in_bytes();
        let src = self.storage.bytes();
        let shape = self.shape();
        let strides = self.strides();
        let numel = self.numel();
        let mut out = Vec::with_capacity(numel * elem_size);

        let mut indices = vec![0usize; shape.len()];
        let mut pos = self.layout.offset() as isize;
        for _ in 0..numel {
            let start = pos as usize * elem_size;
            out.extend_from_slice(&src[start..start + elem_size]);

            for dim in (0..shape.len()).rev() {
                indices[dim] += 1;
                pos += strides[dim];
                if indices[dim] < shape[dim] {
                    break;
                }
                indices[dim] = 0;
                pos -= shape[dim] as isize * strides[dim];
            }
        }

        let storage = Storage::from_raw_bytes(&out, numel, self.dtype(), self.device());
        Self::from_parts(storage, Layout::contiguous(shape))
    }

    // ===== Data Access =====

    /// Copy tensor data to a Vec on the host, in row-major order
    pub fn to_vec<T: bytemuck::Pod>(&self) -> Result<Vec<T>> {
        let tensor = self.contiguous();
        Ok(tensor.storage.as_slice::<T>()?.to_vec())
    }

    /// Copy a Bool tensor to the host as `bool`s
    pub fn to_bools(&self) -> Result<Vec<bool>> {
        if self.dtype() != DType::Bool {
            return Err(Error::DTypeMismatch {
                lhs: DType::Bool,
                rhs: self.dtype(),
            });
        }
        Ok(self.to_vec::<u8>()?.into_iter().map(|b| b != 0).collect())
    }
}

fn check_len(len: usize, shape: &[usize]) -> Result<()> {
    let expected: usize = shape.iter().product();
    if len != expected {
        return Err(Error::ShapeMismatch {
            expected: shape.to_vec(),
            got: vec![len],
        });
    }
    Ok(())
}

impl<R: Runtime> Clone for Tensor<R> {
    /// Clone shares storage; the clone gets a fresh ID
    fn clone(&self) -> Self {
        Self {
            id: TensorId::new(),
            storage: self.storage.clone(),
            layout: self.layout.clone(),
        }
    }
}

impl<R: Runtime> fmt::Debug for Tensor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("id", &self.id.raw())
            .field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .field("contiguous", &self.is_contiguous())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;
    use crate::runtime::custom::CustomRuntime;

    #[test]
    fn test_from_slice_checks_length() {
        let device = CustomRuntime::default_device();
        assert!(Tensor::<CustomRuntime>::from_slice(&[1.0f32, 2.0, 3.0], &[2, 2], &device).is_err());
        let t = Tensor::<CustomRuntime>::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2], &device)
            .unwrap();
        assert_eq!(t.shape(), &[2, 2]);
        assert_eq!(t.dtype(), DType::F32);
    }

    #[test]
    fn test_broadcast_then_contiguous() {
        let device = CustomRuntime::default_device();
        let t = Tensor::<CustomRuntime>::from_slice(&[5i32, 3, 2], &[3, 1], &device).unwrap();
        let b = t.broadcast_to(&[3, 2]).unwrap();
        assert!(!b.is_contiguous());
        assert_eq!(b.to_vec::<i32>().unwrap(), vec![5, 5, 3, 3, 2, 2]);
    }

    #[test]
    fn test_bools_round_trip() {
        let device = CustomRuntime::default_device();
        let t = Tensor::<CustomRuntime>::from_bools(&[true, false, true], &[3], &device).unwrap();
        assert_eq!(t.dtype(), DType::Bool);
        assert_eq!(t.to_bools().unwrap(), vec![true, false, true]);
        assert!(Tensor::<CustomRuntime>::zeros(&[2], DType::F32, &device).to_bools().is_err());
    }
}
