//! Host-side n-dimensional arrays

use crate::dtype::{DType, Element, decode_bf16, encode_bf16};
use crate::error::{Error, Result};
use crate::runtime::{Runtime, RuntimeClient};
use crate::tensor::Tensor;
use ndarray::{ArrayD, IxDyn};

/// A host array of any supported dtype
///
/// bf16 has no native host type; bf16 data lives either as `F32`
/// intermediates or as encoded 16-bit words in `Bf16Bits`.
#[derive(Clone, Debug, PartialEq)]
pub enum HostArray {
    /// Boolean array
    Bool(ArrayD<bool>),
    /// 8-bit signed integers
    I8(ArrayD<i8>),
    /// 16-bit signed integers
    I16(ArrayD<i16>),
    /// 32-bit signed integers
    I32(ArrayD<i32>),
    /// 64-bit signed integers
    I64(ArrayD<i64>),
    /// 8-bit unsigned integers
    U8(ArrayD<u8>),
    /// IEEE half precision
    F16(ArrayD<half::f16>),
    /// Single precision
    F32(ArrayD<f32>),
    /// Double precision
    F64(ArrayD<f64>),
    /// bf16 values encoded as their upper 16 bits
    Bf16Bits(ArrayD<u16>),
}

/// Apply `$body` to the inner array of every variant
macro_rules! map_host {
    ($array:expr, $a:ident => $body:expr) => {
        match $array {
            HostArray::Bool($a) => $body,
            HostArray::I8($a) => $body,
            HostArray::I16($a) => $body,
            HostArray::I32($a) => $body,
            HostArray::I64($a) => $body,
            HostArray::U8($a) => $body,
            HostArray::F16($a) => $body,
            HostArray::F32($a) => $body,
            HostArray::F64($a) => $body,
            HostArray::Bf16Bits($a) => $body,
        }
    };
}

fn shaped<T>(values: Vec<T>, shape: &[usize]) -> Result<ArrayD<T>> {
    let len = values.len();
    ArrayD::from_shape_vec(IxDyn(shape), values)
        .map_err(|_| Error::shape_mismatch(shape, &[len]))
}

impl HostArray {
    /// Array dimensions
    pub fn shape(&self) -> &[usize] {
        map_host!(self, a => a.shape())
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        map_host!(self, a => a.len())
    }

    /// True if the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element dtype (`Bf16Bits` reports `BF16`)
    pub fn dtype(&self) -> DType {
        match self {
            Self::Bool(_) => DType::Bool,
            Self::I8(_) => DType::I8,
            Self::I16(_) => DType::I16,
            Self::I32(_) => DType::I32,
            Self::I64(_) => DType::I64,
            Self::U8(_) => DType::U8,
            Self::F16(_) => DType::F16,
            Self::F32(_) => DType::F32,
            Self::F64(_) => DType::F64,
            Self::Bf16Bits(_) => DType::BF16,
        }
    }

    /// Build an array of `dtype` from row-major `f64` values
    ///
    /// Integers truncate toward zero, `Bool` maps nonzero to true and `BF16`
    /// produces encoded words.
    pub fn from_f64(values: &[f64], shape: &[usize], dtype: DType) -> Result<Self> {
        fn conv<T: Element>(values: &[f64], shape: &[usize]) -> Result<ArrayD<T>> {
            shaped(values.iter().map(|&v| T::from_f64(v)).collect(), shape)
        }

        Ok(match dtype {
            DType::Bool => Self::Bool(shaped(values.iter().map(|&v| v != 0.0).collect(), shape)?),
            DType::I8 => Self::I8(conv(values, shape)?),
            DType::I16 => Self::I16(conv(values, shape)?),
            DType::I32 => Self::I32(conv(values, shape)?),
            DType::I64 => Self::I64(conv(values, shape)?),
            DType::U8 => Self::U8(conv(values, shape)?),
            DType::F16 => Self::F16(conv(values, shape)?),
            DType::F32 => Self::F32(conv(values, shape)?),
            DType::F64 => Self::F64(conv(values, shape)?),
            DType::BF16 => Self::Bf16Bits(shaped(
                values.iter().map(|&v| encode_bf16(v as f32)).collect(),
                shape,
            )?),
        })
    }

    /// `[start, end)` with unit step, reshaped to `shape`
    pub fn arange(start: i64, end: i64, shape: &[usize], dtype: DType) -> Result<Self> {
        let values: Vec<f64> = (start..end).map(|v| v as f64).collect();
        Self::from_f64(&values, shape, dtype)
    }

    /// Values widened to `f64` (bools as 0/1, bf16 words decoded)
    pub fn to_f64(&self) -> ArrayD<f64> {
        match self {
            Self::Bool(a) => a.mapv(|v| v as u8 as f64),
            Self::I8(a) => a.mapv(|v| v as f64),
            Self::I16(a) => a.mapv(|v| v as f64),
            Self::I32(a) => a.mapv(|v| v as f64),
            Self::I64(a) => a.mapv(|v| v as f64),
            Self::U8(a) => a.mapv(|v| v as f64),
            Self::F16(a) => a.mapv(|v| v.to_f64()),
            Self::F32(a) => a.mapv(|v| v as f64),
            Self::F64(a) => a.clone(),
            Self::Bf16Bits(a) => a.mapv(|v| decode_bf16(v) as f64),
        }
    }

    /// Encode an `F32` array to bf16 words
    pub fn encode_bf16(&self) -> Result<Self> {
        match self {
            Self::F32(a) => Ok(Self::Bf16Bits(a.mapv(encode_bf16))),
            other => Err(Error::DTypeMismatch {
                lhs: DType::F32,
                rhs: other.dtype(),
            }),
        }
    }

    /// Convert to another dtype on the host
    pub fn cast(&self, dtype: DType) -> Result<Self> {
        if self.dtype() == dtype {
            return Ok(self.clone());
        }
        let values: Vec<f64> = self.to_f64().iter().copied().collect();
        Self::from_f64(&values, self.shape(), dtype)
    }

    /// Row-major element bytes in device encoding
    fn to_bytes(&self) -> Vec<u8> {
        fn pod<T: bytemuck::Pod>(a: &ArrayD<T>) -> Vec<u8> {
            let values: Vec<T> = a.iter().copied().collect();
            bytemuck::cast_slice(&values).to_vec()
        }

        match self {
            Self::Bool(a) => a.iter().map(|&v| v as u8).collect(),
            Self::I8(a) => pod(a),
            Self::I16(a) => pod(a),
            Self::I32(a) => pod(a),
            Self::I64(a) => pod(a),
            Self::U8(a) => pod(a),
            Self::F16(a) => pod(a),
            Self::F32(a) => pod(a),
            Self::F64(a) => pod(a),
            Self::Bf16Bits(a) => pod(a),
        }
    }
}

macro_rules! impl_from_array {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<ArrayD<$t>> for HostArray {
                fn from(a: ArrayD<$t>) -> Self {
                    Self::$variant(a)
                }
            }
        )*
    };
}

impl_from_array!(
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    half::f16 => F16,
    f32 => F32,
    f64 => F64,
);

/// Place a host array on the client's device as `dtype`
///
/// Converts on the host first when the array dtype differs, so an `F32`
/// array placed as `BF16` is truncated to bf16 words.
pub fn to_tensor<R: Runtime>(
    array: &HostArray,
    dtype: DType,
    client: &R::Client,
) -> Result<Tensor<R>> {
    let array = array.cast(dtype)?;
    Tensor::from_bytes(&array.to_bytes(), array.shape(), dtype, client.device())
}

/// Read a Bool tensor back to the host
pub fn from_bool_tensor<R: Runtime>(tensor: &Tensor<R>) -> Result<ArrayD<bool>> {
    shaped(tensor.to_bools()?, tensor.shape())
}
