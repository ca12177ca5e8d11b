//! bf16 wire encoding
//!
//! BF16 has no native host type, so host data is produced as f32 and encoded
//! into the upper 16 bits of its IEEE-754 representation. Encoding truncates
//! (no rounding), matching how device feeds are prepared.

/// Encode an f32 as a bf16 word by truncating the low mantissa bits
#[inline]
pub fn encode_bf16(value: f32) -> u16 {
    (value.to_bits() >> 16) as u16
}

/// Decode a bf16 word back to f32
#[inline]
pub fn decode_bf16(bits: u16) -> f32 {
    half::bf16::from_bits(bits).to_f32()
}

/// Encode a slice of f32 values as bf16 words
pub fn encode_bf16_slice(values: &[f32]) -> Vec<u16> {
    values.iter().map(|&v| encode_bf16(v)).collect()
}

/// Snap an f32 onto the bf16 grid (encode then decode)
///
/// The result is exactly representable as bf16, so comparing quantized f32
/// values gives the same answer as comparing their bf16 encodings.
#[inline]
pub fn quantize_bf16(value: f32) -> f32 {
    decode_bf16(encode_bf16(value))
}
