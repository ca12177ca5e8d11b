//! Software kernels for the custom accelerator
//!
//! Comparison kernels write one byte per element (0 or 1). Large contiguous
//! inputs are split across the Rayon pool.

use crate::dtype::Element;
use crate::ops::CompareOp;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Parallelization threshold: skip Rayon for small tensors
const PARALLEL_THRESHOLD: usize = 4096;

const CHUNK_SIZE: usize = 4096;

/// Element-wise comparison of two equally sized contiguous buffers
#[inline]
pub fn compare_op_kernel<T: Element>(op: CompareOp, a: &[T], b: &[T], out: &mut [u8]) {
    debug_assert!(a.len() == out.len() && b.len() == out.len());

    #[cfg(feature = "rayon")]
    if out.len() >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(CHUNK_SIZE)
            .zip(a.par_chunks(CHUNK_SIZE))
            .zip(b.par_chunks(CHUNK_SIZE))
            .for_each(|((o, a), b)| compare_serial(op, a, b, o));
        return;
    }

    compare_serial(op, a, b, out);
}

#[inline]
fn compare_serial<T: Element>(op: CompareOp, a: &[T], b: &[T], out: &mut [u8]) {
    for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
        *o = op.apply(x, y) as u8;
    }
}

/// Comparison with broadcasting support
///
/// Walks the output in row-major order, updating both input offsets
/// incrementally. A stride of 0 repeats the same input element along that
/// dimension.
#[allow(clippy::too_many_arguments)]
pub fn compare_op_strided_kernel<T: Element>(
    op: CompareOp,
    a: &[T],
    b: &[T],
    out: &mut [u8],
    out_shape: &[usize],
    a_strides: &[isize],
    b_strides: &[isize],
    a_offset: usize,
    b_offset: usize,
) {
    let ndim = out_shape.len();
    if out.is_empty() {
        return;
    }

    let mut indices = vec![0usize; ndim];
    let mut a_idx = a_offset as isize;
    let mut b_idx = b_offset as isize;

    for o in out.iter_mut() {
        *o = op.apply(a[a_idx as usize], b[b_idx as usize]) as u8;

        for dim in (0..ndim).rev() {
            indices[dim] += 1;
            a_idx += a_strides[dim];
            b_idx += b_strides[dim];

            if indices[dim] < out_shape[dim] {
                break;
            }

            indices[dim] = 0;
            a_idx -= (out_shape[dim] as isize) * a_strides[dim];
            b_idx -= (out_shape[dim] as isize) * b_strides[dim];
        }
    }
}

/// Numeric conversion between element types
///
/// Goes through `f64`; float to int truncates toward zero and saturates.
#[inline]
pub fn cast_kernel<S: Element, D: Element>(src: &[S], dst: &mut [D]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = D::from_f64(s.to_f64());
    }
}

/// Conversion to boolean: nonzero (including NaN) becomes 1
#[inline]
pub fn cast_to_bool_kernel<S: Element>(src: &[S], dst: &mut [u8]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = (s.to_f64() != 0.0) as u8;
    }
}
