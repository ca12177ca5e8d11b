//! Type promotion rules for binary operations

use super::DType;

/// Promote two dtypes to a common dtype for binary operations
///
/// Follows NumPy-like promotion rules:
/// - Floats win over integers when their significand holds the integer range,
///   otherwise the result widens to the next float that does (`F64` at most)
/// - Larger types win over smaller types
/// - Signed wins over unsigned when mixing
pub fn promote(lhs: DType, rhs: DType) -> DType {
    use DType::*;

    if lhs == rhs {
        return lhs;
    }

    if lhs.is_float() != rhs.is_float() {
        let (float, other) = if lhs.is_float() { (lhs, rhs) } else { (rhs, lhs) };
        return int_float_promotion(other, float);
    }

    // F16 and BF16 have no common 16-bit type
    if matches!((lhs, rhs), (F16, BF16) | (BF16, F16)) {
        return F32;
    }

    // U8 mixed with a signed integer needs a signed type that holds 255
    if lhs == U8 && rhs.is_signed_int() {
        return if rhs == I8 { I16 } else { rhs };
    }
    if rhs == U8 && lhs.is_signed_int() {
        return promote(rhs, lhs);
    }

    let priority = |dt: DType| -> u8 {
        match dt {
            F64 => 100,
            F32 => 90,
            BF16 => 85,
            F16 => 80,
            I64 => 65,
            I32 => 55,
            I16 => 45,
            I8 => 35,
            U8 => 30,
            Bool => 25,
        }
    };

    if priority(lhs) >= priority(rhs) {
        lhs
    } else {
        rhs
    }
}

/// Significand bits of a float dtype (implicit bit included)
fn significand_bits(dtype: DType) -> u32 {
    match dtype {
        DType::BF16 => 8,
        DType::F16 => 11,
        DType::F32 => 24,
        _ => 53,
    }
}

/// Magnitude bits of an integer or bool dtype
fn value_bits(dtype: DType) -> u32 {
    match dtype {
        DType::Bool => 1,
        DType::I8 => 7,
        DType::U8 => 8,
        DType::I16 => 15,
        DType::I32 => 31,
        _ => 63,
    }
}

/// Smallest float at least as wide as `float` that holds every `int` value
///
/// `I64` goes to `F64` even though 63 bits exceed its significand.
fn int_float_promotion(int: DType, float: DType) -> DType {
    let bits = value_bits(int);
    [float, DType::F32]
        .into_iter()
        .find(|&candidate| significand_bits(candidate) >= bits)
        .unwrap_or(DType::F64)
}
