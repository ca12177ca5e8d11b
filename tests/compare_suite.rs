//! The generated comparison suite, one test per (operator, dtype) group

mod common;

use accel_compare::dtype::DType;
use accel_compare::harness::{
    BF16_MIN_TOOLKIT_VERSION, CaseContext, CaseFailure, CaseOutcome, SuiteConfig, TestGroup,
    build_registry, create_test_class, find_group, run_suite,
};
use accel_compare::host::{FixtureRng, oracle};
use accel_compare::ops::CompareOp;

const SEED: u64 = 0x5eed;

fn group(name: &str) -> TestGroup {
    let groups = build_registry(BF16_MIN_TOOLKIT_VERSION);
    find_group(&groups, name)
        .unwrap_or_else(|| panic!("group {name} not registered"))
        .clone()
}

fn run_group(name: &str) {
    common::init_logging();
    let group = group(name);
    let mut ctx = CaseContext::new("npu:0", FixtureRng::new(SEED));
    let report = group.run(&mut ctx);
    assert!(report.is_success(), "{report}");
    assert_eq!(report.cases.len(), group.cases().len());
}

macro_rules! compare_suite {
    ($($dtype:ident => $type_name:literal),* $(,)?) => {
        $(
            paste::paste! {
                #[test]
                fn [<equal_ $dtype>]() {
                    run_group(concat!("equal_", $type_name));
                }

                #[test]
                fn [<not_equal_ $dtype>]() {
                    run_group(concat!("not_equal_", $type_name));
                }

                #[test]
                fn [<less_than_ $dtype>]() {
                    run_group(concat!("less_than_", $type_name));
                }

                #[test]
                fn [<less_equal_ $dtype>]() {
                    run_group(concat!("less_equal_", $type_name));
                }

                #[test]
                fn [<greater_than_ $dtype>]() {
                    run_group(concat!("greater_than_", $type_name));
                }

                #[test]
                fn [<greater_equal_ $dtype>]() {
                    run_group(concat!("greater_equal_", $type_name));
                }
            }
        )*
    };
}

compare_suite!(
    float16 => "float16",
    float32 => "float32",
    int32 => "int32",
    int64 => "int64",
    bool => "bool",
    bfloat16 => "bfloat16",
);

#[test]
fn test_registry_enumerates_operator_dtype_grid() {
    let groups = build_registry(BF16_MIN_TOOLKIT_VERSION - 1);
    assert_eq!(groups.len(), 30);
    for dtype in [DType::F16, DType::F32, DType::I32, DType::I64, DType::Bool] {
        for op in CompareOp::ALL {
            let name = format!("{}_{}", op.name(), dtype.name());
            let g = find_group(&groups, &name).unwrap_or_else(|| panic!("{name} missing"));
            assert_eq!(g.op(), op);
            assert_eq!(g.dtype(), dtype);
        }
    }
    assert!(groups.iter().all(|g| g.dtype() != DType::BF16));
}

#[test]
fn test_bf16_groups_from_toolkit_seven() {
    let groups = build_registry(BF16_MIN_TOOLKIT_VERSION);
    assert_eq!(groups.len(), 36);
    assert_eq!(groups.iter().filter(|g| g.dtype() == DType::BF16).count(), 6);
}

#[test]
fn test_different_type_case_only_for_equal() {
    for g in build_registry(BF16_MIN_TOOLKIT_VERSION) {
        let has_case = g.case("test_dynamic_api_different_type").is_some();
        assert_eq!(has_case, g.op() == CompareOp::Eq, "{}", g.name());
    }
}

#[test]
fn test_single_case_outcome() {
    let group = group("less_than_int32");
    let case = *group.case("test_broadcast_api_3").unwrap();
    let mut ctx = CaseContext::new("npu:0", FixtureRng::new(SEED));
    assert!(matches!(group.run_case(&case, &mut ctx), CaseOutcome::Passed));
}

#[test]
fn test_run_suite_with_filter() {
    common::init_logging();
    let groups: Vec<TestGroup> = build_registry(BF16_MIN_TOOLKIT_VERSION)
        .into_iter()
        .filter(|g| g.name().ends_with("_int64"))
        .collect();
    let config = SuiteConfig::default().with_seed(SEED).with_toolkit_version(7);
    let report = run_suite(&groups, &config);
    assert_eq!(report.seed, SEED);
    assert_eq!(report.groups.len(), 6);
    assert!(report.is_success(), "{report}");
}

#[test]
fn test_unknown_device_fails_cases() {
    let group = group("equal_float32");
    let case = *group.case("test_dynamic_api").unwrap();
    let mut ctx = CaseContext::new("npu:64", FixtureRng::new(SEED));
    assert!(matches!(group.run_case(&case, &mut ctx), CaseOutcome::Failed(_)));
}

#[test]
fn test_disagreeing_oracle_fails_group() {
    common::init_logging();
    // x < y and x >= y never agree on integers
    let group = create_test_class(CompareOp::Lt, DType::I32, oracle::greater_equal);
    let mut ctx = CaseContext::new("npu:0", FixtureRng::new(SEED));
    let report = group.run(&mut ctx);
    assert!(!report.is_success(), "{report}");

    for case in &report.cases {
        let compares_values = case.case.starts_with("test_output")
            || case.case.starts_with("test_broadcast_api_")
            || case.case == "test_dynamic_api";
        match &case.outcome {
            CaseOutcome::Failed(CaseFailure::ValueMismatch { index: 0, .. }) if compares_values => {}
            CaseOutcome::Passed if !compares_values => {}
            outcome => panic!("{}: unexpected outcome {outcome:?}", case.case),
        }
    }
    assert_eq!(report.failed(), 7);
    assert_eq!(report.passed(), 2);
}
