//! Error types for accel-compare

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using accel-compare's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Broad category of an [`Error`]
///
/// The comparison API distinguishes argument-type problems (wrong keyword,
/// wrong operand kind) from everything else, so callers can assert on the
/// category without matching individual variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid argument types, unknown keywords, incompatible operand kinds
    Type,
    /// Invalid values (bad dtype names, malformed LoD, bad feeds)
    Value,
    /// Shape and broadcasting problems
    Shape,
    /// Device selection and placement problems
    Device,
    /// Invariant violations inside the crate
    Internal,
}

/// Errors that can occur in accel-compare operations
#[derive(Error, Debug)]
pub enum Error {
    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Shapes cannot be broadcast together
    #[error("Cannot broadcast shapes {lhs:?} and {rhs:?}")]
    BroadcastError {
        /// Left-hand side shape
        lhs: Vec<usize>,
        /// Right-hand side shape
        rhs: Vec<usize>,
    },

    /// Declared (possibly dynamic) shapes cannot be broadcast together
    #[error("Cannot broadcast declared shapes {lhs:?} and {rhs:?}")]
    SymbolicBroadcast {
        /// Left-hand side declared shape
        lhs: Vec<i64>,
        /// Right-hand side declared shape
        rhs: Vec<i64>,
    },

    /// DType mismatch between operands
    #[error("DType mismatch: {lhs} vs {rhs}")]
    DTypeMismatch {
        /// Left-hand side dtype
        lhs: DType,
        /// Right-hand side dtype
        rhs: DType,
    },

    /// A dtype name did not match any known dtype
    #[error("Unknown dtype '{name}'")]
    UnknownDType {
        /// The name that was looked up
        name: String,
    },

    /// An operator identifier did not match any registered operator
    #[error("Unknown operator '{name}'")]
    UnknownOperator {
        /// The identifier that was looked up
        name: String,
    },

    /// A device specifier could not be resolved
    #[error("Invalid device '{spec}': {reason}")]
    InvalidDevice {
        /// The specifier as given
        spec: String,
        /// Why it was rejected
        reason: String,
    },

    /// Device mismatch between operands
    #[error("Device mismatch: tensors must be on the same device")]
    DeviceMismatch,

    /// A keyword argument the operator does not accept
    #[error("{op}() got an unexpected keyword argument '{key}'")]
    UnexpectedKeyword {
        /// The operator being called
        op: &'static str,
        /// The offending keyword
        key: String,
    },

    /// A keyword argument with the wrong value type
    #[error("{op}(): argument '{arg}' must be {expected}, got {got}")]
    InvalidArgumentType {
        /// The operator being called
        op: &'static str,
        /// The argument name
        arg: String,
        /// Expected value type
        expected: &'static str,
        /// Actual value type
        got: &'static str,
    },

    /// An operand of the wrong kind (e.g. a LoD tensor where a variable is required)
    #[error("{op}(): input '{arg}' must be {expected}, got {got}")]
    InvalidInputType {
        /// The operator being called
        op: &'static str,
        /// Operand name (`x` or `y`)
        arg: &'static str,
        /// Expected operand kind
        expected: &'static str,
        /// Actual operand kind
        got: &'static str,
    },

    /// Malformed level-of-detail information
    #[error("Invalid LoD: {reason}")]
    InvalidLod {
        /// Reason for invalidity
        reason: String,
    },

    /// A variable name that already exists in the program
    #[error("Variable '{name}' already exists in the program")]
    DuplicateVariable {
        /// The duplicated name
        name: String,
    },

    /// A variable handle that does not belong to the program
    #[error("Variable '{name}' is not defined in this program")]
    UnknownVariable {
        /// The variable name
        name: String,
    },

    /// A placeholder with no value in the feed
    #[error("Missing feed for placeholder '{name}'")]
    MissingFeed {
        /// The placeholder name
        name: String,
    },

    /// A fed value incompatible with its placeholder
    #[error("Feed for '{name}' is invalid: {reason}")]
    FeedMismatch {
        /// The placeholder name
        name: String,
        /// Reason for rejection
        reason: String,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create a broadcast error
    pub fn broadcast(lhs: &[usize], rhs: &[usize]) -> Self {
        Self::BroadcastError {
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }

    /// Create a feed mismatch error
    pub fn feed_mismatch(name: &str, reason: impl Into<String>) -> Self {
        Self::FeedMismatch {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnexpectedKeyword { .. }
            | Self::InvalidArgumentType { .. }
            | Self::InvalidInputType { .. } => ErrorKind::Type,
            Self::ShapeMismatch { .. }
            | Self::BroadcastError { .. }
            | Self::SymbolicBroadcast { .. } => ErrorKind::Shape,
            Self::InvalidDevice { .. } | Self::DeviceMismatch => ErrorKind::Device,
            Self::Internal(_) => ErrorKind::Internal,
            Self::DTypeMismatch { .. }
            | Self::UnknownDType { .. }
            | Self::UnknownOperator { .. }
            | Self::InvalidLod { .. }
            | Self::DuplicateVariable { .. }
            | Self::UnknownVariable { .. }
            | Self::MissingFeed { .. }
            | Self::FeedMismatch { .. }
            | Self::InvalidArgument { .. } => ErrorKind::Value,
        }
    }

    /// True for argument-type errors
    #[inline]
    pub fn is_type_error(&self) -> bool {
        self.kind() == ErrorKind::Type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_errors_are_type_errors() {
        let err = Error::UnexpectedKeyword {
            op: "equal",
            key: "axis".to_string(),
        };
        assert!(err.is_type_error());
        assert_eq!(
            err.to_string(),
            "equal() got an unexpected keyword argument 'axis'"
        );
    }

    #[test]
    fn test_shape_errors_are_not_type_errors() {
        let err = Error::broadcast(&[3], &[4]);
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert!(!err.is_type_error());
    }
}
