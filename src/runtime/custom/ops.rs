//! CompareOps and TypeConversionOps implementations for the custom runtime

use super::helpers::{cast_impl, compare_op_impl};
use super::{CustomClient, CustomRuntime};
use crate::dtype::DType;
use crate::error::Result;
use crate::ops::{CompareOp, CompareOps, TypeConversionOps};
use crate::tensor::Tensor;

impl CompareOps<CustomRuntime> for CustomClient {
    fn eq(&self, a: &Tensor<CustomRuntime>, b: &Tensor<CustomRuntime>) -> Result<Tensor<CustomRuntime>> {
        compare_op_impl(self, CompareOp::Eq, a, b)
    }

    fn ne(&self, a: &Tensor<CustomRuntime>, b: &Tensor<CustomRuntime>) -> Result<Tensor<CustomRuntime>> {
        compare_op_impl(self, CompareOp::Ne, a, b)
    }

    fn lt(&self, a: &Tensor<CustomRuntime>, b: &Tensor<CustomRuntime>) -> Result<Tensor<CustomRuntime>> {
        compare_op_impl(self, CompareOp::Lt, a, b)
    }

    fn le(&self, a: &Tensor<CustomRuntime>, b: &Tensor<CustomRuntime>) -> Result<Tensor<CustomRuntime>> {
        compare_op_impl(self, CompareOp::Le, a, b)
    }

    fn gt(&self, a: &Tensor<CustomRuntime>, b: &Tensor<CustomRuntime>) -> Result<Tensor<CustomRuntime>> {
        compare_op_impl(self, CompareOp::Gt, a, b)
    }

    fn ge(&self, a: &Tensor<CustomRuntime>, b: &Tensor<CustomRuntime>) -> Result<Tensor<CustomRuntime>> {
        compare_op_impl(self, CompareOp::Ge, a, b)
    }
}

impl TypeConversionOps<CustomRuntime> for CustomClient {
    fn cast(&self, a: &Tensor<CustomRuntime>, dtype: DType) -> Result<Tensor<CustomRuntime>> {
        cast_impl(self, a, dtype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;

    fn client() -> CustomClient {
        CustomRuntime::default_client(&CustomRuntime::default_device())
    }

    #[test]
    fn test_less_than_same_shape() {
        let c = client();
        let d = c.device.clone();
        let a = Tensor::from_slice(&[1i32, 2, 3, 4], &[2, 2], &d).unwrap();
        let b = Tensor::from_slice(&[2i32, 2, 2, 2], &[2, 2], &d).unwrap();
        let out = c.lt(&a, &b).unwrap();
        assert_eq!(out.dtype(), DType::Bool);
        assert_eq!(out.shape(), &[2, 2]);
        assert_eq!(out.to_bools().unwrap(), [true, false, false, false]);
    }

    #[test]
    fn test_mixed_dtypes_promote() {
        let c = client();
        let d = c.device.clone();
        let a = Tensor::from_slice(&[0.5f32, 2.0, -1.0], &[3], &d).unwrap();
        let b = Tensor::from_slice(&[0i16, 2, -1], &[3], &d).unwrap();
        assert_eq!(c.eq(&a, &b).unwrap().to_bools().unwrap(), [false, true, true]);
        assert_eq!(c.gt(&b, &a).unwrap().to_bools().unwrap(), [false, false, false]);
    }

    #[test]
    fn test_broadcast_column_against_row() {
        let c = client();
        let d = c.device.clone();
        let x = Tensor::from_slice(&[0i64, 1, 2, 3, 4], &[5], &d).unwrap();
        let y = Tensor::from_slice(&[5i64, 3, 2], &[3, 1], &d).unwrap();
        let out = c.eq(&x, &y).unwrap();
        assert_eq!(out.shape(), &[3, 5]);
        let expected: Vec<bool> = [5i64, 3, 2]
            .iter()
            .flat_map(|&yv| (0..5).map(move |xv| xv == yv))
            .collect();
        assert_eq!(out.to_bools().unwrap(), expected);
    }

    #[test]
    fn test_incompatible_shapes() {
        let c = client();
        let d = c.device.clone();
        let x = Tensor::from_slice(&[1.0f32; 6], &[2, 3], &d).unwrap();
        let y = Tensor::from_slice(&[1.0f32; 4], &[4], &d).unwrap();
        assert!(matches!(c.ne(&x, &y), Err(crate::error::Error::BroadcastError { .. })));
    }

    #[test]
    fn test_cast_roundtrip_and_bool() {
        let c = client();
        let d = c.device.clone();
        let a = Tensor::from_slice(&[1.9f32, -2.5, 0.0], &[3], &d).unwrap();
        assert_eq!(c.cast(&a, DType::I32).unwrap().to_vec::<i32>().unwrap(), [1, -2, 0]);
        assert_eq!(c.cast(&a, DType::Bool).unwrap().to_bools().unwrap(), [true, true, false]);
        let h = c.cast(&a, DType::F16).unwrap();
        assert_eq!(h.dtype(), DType::F16);
        assert_eq!(h.to_vec::<half::f16>().unwrap()[2], half::f16::ZERO);
    }
}
