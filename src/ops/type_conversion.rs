//! Type conversion operations trait.

use crate::dtype::DType;
use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// Type conversion operations
pub trait TypeConversionOps<R: Runtime> {
    /// Cast tensor to a different data type.
    ///
    /// The output tensor is contiguous and has the same shape as the input.
    ///
    /// # Conversions
    ///
    /// - **Widening** (lossless): I8→I16→I32→I64, F16→F32→F64
    /// - **Narrowing** (may lose precision): F64→F32→F16/BF16
    /// - **Float→Int**: Truncates toward zero
    /// - **→Bool**: nonzero becomes true
    fn cast(&self, a: &Tensor<R>, dtype: DType) -> Result<Tensor<R>>;
}
