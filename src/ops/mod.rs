//! Tensor operations
//!
//! Operations are defined as traits implemented by a runtime's client, which
//! gives them access to the device for creating output tensors.
//!
//! ```text
//! RuntimeClient<R>
//!   ├── implements CompareOps<R>         (eq, ne, lt, le, gt, ge)
//!   └── implements TypeConversionOps<R>  (cast)
//! ```
//!
//! Operators are resolved by identifier through an explicit table
//! ([`lookup`], [`comparator`]) rather than by reflection, and called
//! eagerly through [`call`], which validates keyword arguments first.

mod compare;
mod dispatch;
mod kwargs;
mod registry;
mod type_conversion;

pub use compare::{CompareOp, CompareOps};
pub use kwargs::{AttrValue, CompareAttrs, Kwargs};
pub use registry::{Comparator, call, comparator, lookup, operator_names};
pub use type_conversion::TypeConversionOps;
