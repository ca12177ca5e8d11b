//! Seeded random fixtures

use super::HostArray;
use crate::dtype::{DType, quantize_bf16};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Inclusive bounds for random integer fixtures
pub const INT_RANGE: (i64, i64) = (-4, 4);

/// Random fixture generator
///
/// - floats: uniform in `[0, 1)`
/// - signed ints: uniform in [`INT_RANGE`]
/// - `U8`: uniform in `[0, 4]`
/// - bools: fair coin
/// - `BF16`: `F32` intermediates already on the bf16 grid, so that the
///   host values and the encoded device values compare identically
pub struct FixtureRng {
    rng: StdRng,
    seed: u64,
}

impl FixtureRng {
    /// Create a generator from a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a generator from a fresh random seed
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Random array of `shape`
    pub fn random(&mut self, shape: &[usize], dtype: DType) -> Result<HostArray> {
        let len: usize = shape.iter().product();
        let rng = &mut self.rng;

        if dtype == DType::BF16 {
            let values: Vec<f64> = (0..len)
                .map(|_| quantize_bf16(rng.random::<f32>()) as f64)
                .collect();
            return HostArray::from_f64(&values, shape, DType::F32);
        }

        let values: Vec<f64> = match dtype {
            DType::Bool => (0..len).map(|_| rng.random_bool(0.5) as u8 as f64).collect(),
            DType::U8 => (0..len).map(|_| rng.random_range(0..=4u8) as f64).collect(),
            d if d.is_float() => (0..len).map(|_| rng.random::<f64>()).collect(),
            _ => (0..len)
                .map(|_| rng.random_range(INT_RANGE.0..=INT_RANGE.1) as f64)
                .collect(),
        };
        HostArray::from_f64(&values, shape, dtype)
    }
}
