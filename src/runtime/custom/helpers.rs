//! Operation helpers for custom device tensors

use super::kernels;
use super::{CustomClient, CustomRuntime};
use crate::dispatch_dtype;
use crate::dtype::{DType, promote};
use crate::error::{Error, Result};
use crate::ops::{CompareOp, TypeConversionOps};
use crate::runtime::Device;
use crate::tensor::{Layout, Storage, Tensor, broadcast_shapes};

fn ensure_on_device(client: &CustomClient, t: &Tensor<CustomRuntime>) -> Result<()> {
    if !t.device().is_same(&client.device) {
        return Err(Error::DeviceMismatch);
    }
    Ok(())
}

fn bool_tensor(bytes: &[u8], shape: &[usize], client: &CustomClient) -> Tensor<CustomRuntime> {
    let storage = Storage::from_raw_bytes(bytes, bytes.len(), DType::Bool, &client.device);
    Tensor::from_parts(storage, Layout::contiguous(shape))
}

/// Helper for comparison operations (eq, ne, lt, le, gt, ge)
///
/// Operands are promoted to a common dtype, broadcast against each other, and
/// compared into a Bool tensor of the broadcast shape.
pub fn compare_op_impl(
    client: &CustomClient,
    op: CompareOp,
    a: &Tensor<CustomRuntime>,
    b: &Tensor<CustomRuntime>,
) -> Result<Tensor<CustomRuntime>> {
    ensure_on_device(client, a)?;
    ensure_on_device(client, b)?;

    let dtype = promote(a.dtype(), b.dtype());
    let a = if a.dtype() == dtype { a.clone() } else { client.cast(a, dtype)? };
    let b = if b.dtype() == dtype { b.clone() } else { client.cast(b, dtype)? };

    let out_shape =
        broadcast_shapes(a.shape(), b.shape()).ok_or_else(|| Error::broadcast(a.shape(), b.shape()))?;
    let len: usize = out_shape.iter().product();
    let mut out = vec![0u8; len];

    // Fast path for same shapes, both contiguous
    let same_shapes = a.shape() == b.shape() && a.shape() == out_shape.as_slice();
    let both_contiguous = a.is_contiguous() && b.is_contiguous();

    if same_shapes && both_contiguous {
        let offset_a = a.layout().offset();
        let offset_b = b.layout().offset();
        dispatch_dtype!(dtype, T => {
            let a_data = &a.storage().as_slice::<T>()?[offset_a..offset_a + len];
            let b_data = &b.storage().as_slice::<T>()?[offset_b..offset_b + len];
            kernels::compare_op_kernel::<T>(op, a_data, b_data, &mut out);
        });
    } else {
        // Broadcasting path: use strided kernel
        let a_broadcast = a.broadcast_to(&out_shape)?;
        let b_broadcast = b.broadcast_to(&out_shape)?;

        dispatch_dtype!(dtype, T => {
            kernels::compare_op_strided_kernel::<T>(
                op,
                a_broadcast.storage().as_slice::<T>()?,
                b_broadcast.storage().as_slice::<T>()?,
                &mut out,
                &out_shape,
                a_broadcast.strides(),
                b_broadcast.strides(),
                a_broadcast.layout().offset(),
                b_broadcast.layout().offset(),
            );
        });
    }

    Ok(bool_tensor(&out, &out_shape, client))
}

/// Helper for dtype conversion
///
/// Always produces a fresh contiguous tensor.
pub fn cast_impl(
    client: &CustomClient,
    a: &Tensor<CustomRuntime>,
    dtype: DType,
) -> Result<Tensor<CustomRuntime>> {
    ensure_on_device(client, a)?;

    let src = a.contiguous();
    let len = src.numel();
    let src_dtype = src.dtype();
    let offset = src.layout().offset();

    if src_dtype == dtype {
        let elem = dtype.size_in_bytes();
        let bytes = &src.storage().bytes()[offset * elem..(offset + len) * elem];
        return Ok(Tensor::from_parts(
            Storage::from_raw_bytes(bytes, len, dtype, &client.device),
            Layout::contiguous(src.shape()),
        ));
    }

    if dtype == DType::Bool {
        let mut out = vec![0u8; len];
        dispatch_dtype!(src_dtype, S => {
            let input = &src.storage().as_slice::<S>()?[offset..offset + len];
            kernels::cast_to_bool_kernel::<S>(input, &mut out);
        });
        return Ok(bool_tensor(&out, src.shape(), client));
    }

    dispatch_dtype!(src_dtype, S => {
        let input = &src.storage().as_slice::<S>()?[offset..offset + len];
        dispatch_dtype!(dtype, D => {
            let mut out = vec![<D as bytemuck::Zeroable>::zeroed(); len];
            kernels::cast_kernel::<S, D>(input, &mut out);
            Ok(Tensor::from_parts(
                Storage::from_raw_bytes(bytemuck::cast_slice(&out), len, dtype, &client.device),
                Layout::contiguous(src.shape()),
            ))
        })
    })
}
