//! Reference comparisons on host arrays
//!
//! Broadcasting follows NumPy: shapes are right-aligned and size-1 dimensions
//! stretch. Values compare with `partial_cmp`, so NaN is unequal to
//! everything and fails every ordering test.

use super::HostArray;
use crate::error::{Error, Result};
use crate::ops::CompareOp;
use crate::tensor::broadcast_shapes;
use ndarray::{ArrayD, IxDyn, Zip};

/// A reference comparison
pub type Oracle = fn(&HostArray, &HostArray) -> Result<ArrayD<bool>>;

fn zip_compare<T: PartialOrd>(op: CompareOp, a: &ArrayD<T>, b: &ArrayD<T>) -> Result<ArrayD<bool>> {
    let shape = broadcast_shapes(a.shape(), b.shape())
        .ok_or_else(|| Error::broadcast(a.shape(), b.shape()))?;
    let dim = IxDyn(&shape);
    let a = a
        .broadcast(dim.clone())
        .ok_or_else(|| Error::broadcast(a.shape(), &shape))?;
    let b = b
        .broadcast(dim)
        .ok_or_else(|| Error::broadcast(b.shape(), &shape))?;
    Ok(Zip::from(&a)
        .and(&b)
        .map_collect(|x, y| op.holds_for(x.partial_cmp(y))))
}

/// Compare two host arrays with broadcasting
///
/// Arrays of the same native dtype compare natively; anything else
/// (including bf16 words) compares after widening to `f64`.
pub fn compare(op: CompareOp, x: &HostArray, y: &HostArray) -> Result<ArrayD<bool>> {
    use HostArray::*;
    match (x, y) {
        (Bool(a), Bool(b)) => zip_compare(op, a, b),
        (I8(a), I8(b)) => zip_compare(op, a, b),
        (I16(a), I16(b)) => zip_compare(op, a, b),
        (I32(a), I32(b)) => zip_compare(op, a, b),
        (I64(a), I64(b)) => zip_compare(op, a, b),
        (U8(a), U8(b)) => zip_compare(op, a, b),
        (F16(a), F16(b)) => zip_compare(op, a, b),
        (F32(a), F32(b)) => zip_compare(op, a, b),
        (F64(a), F64(b)) => zip_compare(op, a, b),
        _ => zip_compare(op, &x.to_f64(), &y.to_f64()),
    }
}

/// `x == y`
pub fn equal(x: &HostArray, y: &HostArray) -> Result<ArrayD<bool>> {
    compare(CompareOp::Eq, x, y)
}

/// `x != y`
pub fn not_equal(x: &HostArray, y: &HostArray) -> Result<ArrayD<bool>> {
    compare(CompareOp::Ne, x, y)
}

/// `x < y`
pub fn less_than(x: &HostArray, y: &HostArray) -> Result<ArrayD<bool>> {
    compare(CompareOp::Lt, x, y)
}

/// `x <= y`
pub fn less_equal(x: &HostArray, y: &HostArray) -> Result<ArrayD<bool>> {
    compare(CompareOp::Le, x, y)
}

/// `x > y`
pub fn greater_than(x: &HostArray, y: &HostArray) -> Result<ArrayD<bool>> {
    compare(CompareOp::Gt, x, y)
}

/// `x >= y`
pub fn greater_equal(x: &HostArray, y: &HostArray) -> Result<ArrayD<bool>> {
    compare(CompareOp::Ge, x, y)
}

/// Reference implementation for `op`
pub fn oracle_for(op: CompareOp) -> Oracle {
    match op {
        CompareOp::Eq => equal,
        CompareOp::Ne => not_equal,
        CompareOp::Lt => less_than,
        CompareOp::Le => less_equal,
        CompareOp::Gt => greater_than,
        CompareOp::Ge => greater_equal,
    }
}
