//! LoD (level-of-detail) tensors: variable-length sequences packed along dim 0

use super::Tensor;
use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// A tensor whose leading dimension packs variable-length sequences
///
/// `lod` holds one offset vector per level; each vector starts at 0 and its
/// last entry is the number of rows (or sub-sequences) it spans. Comparison
/// operators only accept plain variables, so passing one of these is a type
/// error.
#[derive(Clone, Debug)]
pub struct LodTensor<R: Runtime> {
    tensor: Tensor<R>,
    lod: Vec<Vec<usize>>,
}

impl<R: Runtime> LodTensor<R> {
    /// Packed data
    pub fn tensor(&self) -> &Tensor<R> {
        &self.tensor
    }

    /// Offset-based LoD, one vector per level
    pub fn lod(&self) -> &[Vec<usize>] {
        &self.lod
    }

    /// Length-based LoD, one vector per level
    pub fn recursive_sequence_lengths(&self) -> Vec<Vec<usize>> {
        self.lod
            .iter()
            .map(|offsets| offsets.windows(2).map(|w| w[1] - w[0]).collect())
            .collect()
    }

    /// Number of top-level sequences
    pub fn num_sequences(&self) -> usize {
        self.lod.first().map_or(0, |level| level.len().saturating_sub(1))
    }
}

/// Build a LoD tensor from packed data and per-level sequence lengths
///
/// Each level's lengths must sum to the number of entries in the next level,
/// and the last level must sum to the leading dimension of `data`.
///
/// # Example
///
/// ```ignore
/// let data = Tensor::<CustomRuntime>::from_slice(&[-1i64], &[1, 1], &device)?;
/// let lod = create_lod_tensor(data, &[vec![1]])?;
/// assert_eq!(lod.lod(), &[vec![0usize, 1]]);
/// ```
pub fn create_lod_tensor<R: Runtime>(
    data: Tensor<R>,
    recursive_seq_lens: &[Vec<usize>],
) -> Result<LodTensor<R>> {
    if data.ndim() == 0 {
        return Err(Error::InvalidLod {
            reason: "data must have at least one dimension".to_string(),
        });
    }

    for (level, lens) in recursive_seq_lens.iter().enumerate() {
        let total: usize = lens.iter().sum();
        let expected = match recursive_seq_lens.get(level + 1) {
            Some(next) => next.len(),
            None => data.shape()[0],
        };
        if total != expected {
            return Err(Error::InvalidLod {
                reason: format!(
                    "level {level} lengths {lens:?} sum to {total}, expected {expected}"
                ),
            });
        }
    }

    let lod = recursive_seq_lens
        .iter()
        .map(|lens| {
            let mut offsets = Vec::with_capacity(lens.len() + 1);
            offsets.push(0);
            let mut acc = 0;
            for &len in lens {
                acc += len;
                offsets.push(acc);
            }
            offsets
        })
        .collect();

    Ok(LodTensor { tensor: data, lod })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Runtime;
    use crate::runtime::custom::CustomRuntime;

    #[test]
    fn test_single_level_lod() {
        let device = CustomRuntime::default_device();
        let data = Tensor::<CustomRuntime>::from_slice(&[-1i64], &[1, 1], &device).unwrap();
        let lod = create_lod_tensor(data, &[vec![1]]).unwrap();
        assert_eq!(lod.lod(), &[vec![0usize, 1]]);
        assert_eq!(lod.recursive_sequence_lengths(), vec![vec![1usize]]);
        assert_eq!(lod.num_sequences(), 1);
    }

    #[test]
    fn test_two_level_lod() {
        let device = CustomRuntime::default_device();
        let data =
            Tensor::<CustomRuntime>::from_slice(&[1i64, 2, 3, 4, 5], &[5, 1], &device).unwrap();
        let lod = create_lod_tensor(data, &[vec![2, 1], vec![2, 2, 1]]).unwrap();
        assert_eq!(lod.lod(), &[vec![0usize, 2, 3], vec![0, 2, 4, 5]]);
    }

    #[test]
    fn test_lengths_must_cover_rows() {
        let device = CustomRuntime::default_device();
        let data = Tensor::<CustomRuntime>::from_slice(&[1i64, 2], &[2, 1], &device).unwrap();
        let err = create_lod_tensor(data, &[vec![1]]).unwrap_err();
        assert!(matches!(err, Error::InvalidLod { .. }));
    }
}
