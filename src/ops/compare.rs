//! Comparison operations

use crate::error::Result;
use crate::runtime::Runtime;
use crate::tensor::Tensor;
use std::cmp::Ordering;
use std::fmt;

/// Elementwise comparison kinds
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// a == b
    Eq,
    /// a != b
    Ne,
    /// a < b
    Lt,
    /// a <= b
    Le,
    /// a > b
    Gt,
    /// a >= b
    Ge,
}

impl CompareOp {
    /// All comparison kinds, in registration order
    pub const ALL: [CompareOp; 6] = [
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Le,
        Self::Gt,
        Self::Ge,
    ];

    /// Framework-facing operator name (e.g. "less_than")
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eq => "equal",
            Self::Ne => "not_equal",
            Self::Lt => "less_than",
            Self::Le => "less_equal",
            Self::Gt => "greater_than",
            Self::Ge => "greater_equal",
        }
    }

    /// Evaluate the comparison on two values
    ///
    /// Unordered pairs (NaN) are unequal and fail every ordering test.
    #[inline]
    pub fn apply<T: PartialOrd>(self, a: T, b: T) -> bool {
        match self {
            Self::Eq => a == b,
            Self::Ne => a != b,
            Self::Lt => a < b,
            Self::Le => a <= b,
            Self::Gt => a > b,
            Self::Ge => a >= b,
        }
    }

    /// Evaluate the comparison from a `partial_cmp` result
    #[inline]
    pub fn holds_for(self, ordering: Option<Ordering>) -> bool {
        use Ordering::*;
        match self {
            Self::Eq => ordering == Some(Equal),
            Self::Ne => ordering != Some(Equal),
            Self::Lt => ordering == Some(Less),
            Self::Le => matches!(ordering, Some(Less | Equal)),
            Self::Gt => ordering == Some(Greater),
            Self::Ge => matches!(ordering, Some(Greater | Equal)),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparison operations trait
///
/// Outputs are Bool tensors with the broadcast shape of the inputs. Operands
/// of different dtypes are promoted to a common dtype first.
pub trait CompareOps<R: Runtime> {
    /// Element-wise equality: a == b
    fn eq(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>>;

    /// Element-wise inequality: a != b
    fn ne(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>>;

    /// Element-wise less than: a < b
    fn lt(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>>;

    /// Element-wise less than or equal: a <= b
    fn le(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>>;

    /// Element-wise greater than: a > b
    fn gt(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>>;

    /// Element-wise greater than or equal: a >= b
    fn ge(&self, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>>;

    /// Dispatch on a runtime comparison kind
    fn compare(&self, op: CompareOp, a: &Tensor<R>, b: &Tensor<R>) -> Result<Tensor<R>> {
        match op {
            CompareOp::Eq => self.eq(a, b),
            CompareOp::Ne => self.ne(a, b),
            CompareOp::Lt => self.lt(a, b),
            CompareOp::Le => self.le(a, b),
            CompareOp::Gt => self.gt(a, b),
            CompareOp::Ge => self.ge(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_matches_operators() {
        assert!(CompareOp::Lt.apply(1, 2));
        assert!(!CompareOp::Lt.apply(3, 2));
        assert!(CompareOp::Le.apply(2, 2));
        assert!(CompareOp::Ne.apply(f32::NAN, f32::NAN));
        assert!(!CompareOp::Eq.apply(f32::NAN, f32::NAN));
    }

    #[test]
    fn test_holds_for_agrees_with_apply() {
        let pairs = [(1.0f64, 2.0), (2.0, 2.0), (3.0, 2.0), (f64::NAN, 1.0)];
        for op in CompareOp::ALL {
            for (a, b) in pairs {
                assert_eq!(op.holds_for(a.partial_cmp(&b)), op.apply(a, b), "{op} {a} {b}");
            }
        }
    }
}
