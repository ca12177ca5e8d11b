//! Common test utilities
#![allow(dead_code)]

use accel_compare::dtype::DType;
use accel_compare::host::HostArray;
use accel_compare::runtime::Runtime;
use accel_compare::runtime::custom::{CustomClient, CustomDevice, CustomRuntime};
use accel_compare::tensor::Tensor;

/// Create a client and device on `npu:0` for testing
pub fn create_client() -> (CustomClient, CustomDevice) {
    let device = CustomRuntime::default_device();
    let client = CustomRuntime::default_client(&device);
    (client, device)
}

/// Initialize logging once; `RUST_LOG` controls verbosity
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Host array from row-major values
pub fn host(values: &[f64], shape: &[usize], dtype: DType) -> HostArray {
    HostArray::from_f64(values, shape, dtype)
        .unwrap_or_else(|e| panic!("host array {shape:?} {dtype}: {e}"))
}

/// Assert a Bool tensor has the given shape and row-major contents
pub fn assert_bools(t: &Tensor<CustomRuntime>, shape: &[usize], expected: &[bool], msg: &str) {
    assert_eq!(t.shape(), shape, "{msg}: shape mismatch");
    let got = t.to_bools().unwrap_or_else(|e| panic!("{msg}: {e}"));
    assert_eq!(got.len(), expected.len(), "{msg}: length mismatch");
    for (i, (g, e)) in got.iter().zip(expected).enumerate() {
        assert_eq!(g, e, "{msg}: element {i} differs");
    }
}
