//! Group registration: the (operator, dtype) grid

use super::factory::{TestGroup, create_test_class};
use crate::dtype::DType;
use crate::host::oracle_for;
use crate::ops::CompareOp;

/// Dtypes every operator is tested on
pub const PRIMITIVE_TYPES: [DType; 5] = [DType::F16, DType::F32, DType::I32, DType::I64, DType::Bool];

/// Minimum toolkit version with bf16 comparison kernels
pub const BF16_MIN_TOOLKIT_VERSION: u32 = 7;

/// Build every test group for a toolkit of `toolkit_version`
///
/// Six operators on each of [`PRIMITIVE_TYPES`], plus the six on bf16 when
/// the toolkit is at least [`BF16_MIN_TOOLKIT_VERSION`].
pub fn build_registry(toolkit_version: u32) -> Vec<TestGroup> {
    let bf16 = toolkit_version >= BF16_MIN_TOOLKIT_VERSION;
    let dtypes = PRIMITIVE_TYPES
        .iter()
        .copied()
        .chain(bf16.then_some(DType::BF16));

    let groups: Vec<TestGroup> = dtypes
        .flat_map(|dtype| {
            CompareOp::ALL
                .into_iter()
                .map(move |op| create_test_class(op, dtype, oracle_for(op)))
        })
        .collect();

    log::info!(
        "registered {} groups (toolkit version {toolkit_version}, bf16 {})",
        groups.len(),
        if bf16 { "enabled" } else { "disabled" }
    );
    groups
}

/// Find a group by its `{operator}_{dtype}` name
pub fn find_group<'a>(groups: &'a [TestGroup], name: &str) -> Option<&'a TestGroup> {
    groups.iter().find(|g| g.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bf16_gating() {
        assert_eq!(build_registry(6).len(), 30);
        assert_eq!(build_registry(7).len(), 36);
        assert!(find_group(&build_registry(6), "equal_bfloat16").is_none());
        assert!(find_group(&build_registry(8), "greater_equal_bfloat16").is_some());
    }

    #[test]
    fn test_names_are_unique() {
        let groups = build_registry(7);
        let mut names: Vec<&str> = groups.iter().map(TestGroup::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), groups.len());
        assert!(names.contains(&"less_than_int32"));
    }
}
