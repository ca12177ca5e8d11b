//! Host arrays, random fixtures and reference comparisons
//!
//! Everything here runs on the host and is independent of any runtime. It is
//! what the framework's device results are checked against.

mod array;
pub mod oracle;
mod random;

pub use array::{HostArray, from_bool_tensor, to_tensor};
pub use oracle::{Oracle, oracle_for};
pub use random::{FixtureRng, INT_RANGE};
