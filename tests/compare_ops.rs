//! Eager comparison operators on the custom runtime

mod common;

use accel_compare::dtype::{DType, encode_bf16_slice};
use accel_compare::error::Error;
use accel_compare::host::{HostArray, from_bool_tensor, oracle, to_tensor};
use accel_compare::ops::{self, CompareOp, CompareOps, Kwargs, TypeConversionOps, lookup};
use accel_compare::runtime::custom::CustomRuntime;
use accel_compare::tensor::Tensor;
use common::{assert_bools, create_client, host};

#[test]
fn test_less_than_int32() {
    let (client, device) = create_client();
    let a = Tensor::<CustomRuntime>::from_slice(&[1i32, 2, 3, 4], &[2, 2], &device).unwrap();
    let b = Tensor::<CustomRuntime>::from_slice(&[2i32, 2, 2, 2], &[2, 2], &device).unwrap();

    let out = ops::call(&client, CompareOp::Lt, &a, &b, &Kwargs::new()).unwrap();
    assert_eq!(out.dtype(), DType::Bool);
    assert_bools(&out, &[2, 2], &[true, false, false, false], "less_than int32");
}

#[test]
fn test_equal_broadcast_row_against_column() {
    let (client, _) = create_client();
    let x = HostArray::arange(0, 5, &[5], DType::F32).unwrap();
    let y = host(&[5.0, 3.0, 2.0], &[3, 1], DType::F32);

    let xt = to_tensor::<CustomRuntime>(&x, DType::F32, &client).unwrap();
    let yt = to_tensor::<CustomRuntime>(&y, DType::F32, &client).unwrap();
    let out = client.eq(&xt, &yt).unwrap();

    assert_eq!(out.shape(), &[3, 5]);
    assert_eq!(from_bool_tensor(&out).unwrap(), oracle::equal(&x, &y).unwrap());
}

#[test]
fn test_int_float_mix_keeps_integer_precision() {
    let (client, _) = create_client();
    // 2^24 + 1 is the first int32 that f32 cannot hold
    let x = host(&[16_777_217.0, 16_777_216.0, -16_777_217.0], &[3], DType::I32);
    let y = host(&[16_777_216.0, 16_777_216.0, -16_777_216.0], &[3], DType::F32);

    let xt = to_tensor::<CustomRuntime>(&x, DType::I32, &client).unwrap();
    let yt = to_tensor::<CustomRuntime>(&y, DType::F32, &client).unwrap();
    let eq = client.eq(&xt, &yt).unwrap();
    assert_bools(&eq, &[3], &[false, true, false], "i32 == f32 at 2^24");
    assert_eq!(from_bool_tensor(&eq).unwrap(), oracle::equal(&x, &y).unwrap());

    let gt = client.gt(&xt, &yt).unwrap();
    assert_bools(&gt, &[3], &[true, false, false], "i32 > f32 at 2^24");
    assert_eq!(from_bool_tensor(&gt).unwrap(), oracle::greater_than(&x, &y).unwrap());

    // f16 rounds 2049 to 2048
    let small = host(&[2049.0], &[1], DType::I32);
    let st = to_tensor::<CustomRuntime>(&small, DType::I32, &client).unwrap();
    let ht = to_tensor::<CustomRuntime>(&host(&[2048.0], &[1], DType::F16), DType::F16, &client)
        .unwrap();
    assert_bools(&client.gt(&st, &ht).unwrap(), &[1], &[true], "i32 > f16");
}

#[test]
fn test_every_operator_matches_oracle() {
    let (client, _) = create_client();
    let x = HostArray::arange(1, 7, &[1, 2, 1, 3], DType::I64).unwrap();
    let y = HostArray::arange(0, 6, &[1, 2, 3], DType::I64).unwrap();
    let xt = to_tensor::<CustomRuntime>(&x, DType::I64, &client).unwrap();
    let yt = to_tensor::<CustomRuntime>(&y, DType::I64, &client).unwrap();

    for op in CompareOp::ALL {
        let out = client.compare(op, &xt, &yt).unwrap();
        assert_eq!(out.shape(), &[1, 2, 2, 3], "{op}");
        let expected = oracle::oracle_for(op)(&x, &y).unwrap();
        assert_eq!(from_bool_tensor(&out).unwrap(), expected, "{op}");
    }
}

#[test]
fn test_operator_table_dispatch_by_name() {
    let (client, device) = create_client();
    let a = Tensor::<CustomRuntime>::from_slice(&[1.0f64, 5.0], &[2], &device).unwrap();
    let b = Tensor::<CustomRuntime>::from_slice(&[3.0f64, 3.0], &[2], &device).unwrap();

    let cases = [
        ("equal", [false, false]),
        ("not_equal", [true, true]),
        ("less_than", [true, false]),
        ("less_equal", [true, false]),
        ("greater_than", [false, true]),
        ("greater_equal", [false, true]),
    ];
    for (name, expected) in cases {
        let op = lookup(name).unwrap();
        let out = ops::call(&client, op, &a, &b, &Kwargs::new()).unwrap();
        assert_bools(&out, &[2], &expected, name);
    }
}

#[test]
fn test_mixed_dtypes_are_not_type_errors() {
    let (client, device) = create_client();
    let a = Tensor::<CustomRuntime>::from_slice(&[0.0f32, 1.5, -2.0, 3.0], &[2, 2], &device).unwrap();
    let c = Tensor::<CustomRuntime>::from_slice(&[0i16, 1, -2, 4], &[2, 2], &device).unwrap();

    let ac = client.eq(&a, &c).unwrap();
    assert_bools(&ac, &[2, 2], &[true, false, true, false], "f32 == i16");
    let ca = client.lt(&c, &a).unwrap();
    assert_bools(&ca, &[2, 2], &[false, true, false, false], "i16 < f32");
}

#[test]
fn test_equal_with_float32_placed_int32() {
    let (client, _) = create_client();
    let x = host(&[0.0, 0.25, 1.0, -3.0], &[4], DType::F16);
    let y = host(&[0.0, 0.0, 1.0, -3.0], &[4], DType::I32);

    let xt = to_tensor::<CustomRuntime>(&x, DType::F16, &client).unwrap();
    let yt = to_tensor::<CustomRuntime>(&y, DType::F32, &client).unwrap();
    assert_eq!(yt.dtype(), DType::F32);
    let out = client.eq(&xt, &yt).unwrap();
    assert_eq!(from_bool_tensor(&out).unwrap(), oracle::equal(&x, &y).unwrap());
}

#[test]
fn test_bool_operands() {
    let (client, device) = create_client();
    let a = Tensor::<CustomRuntime>::from_bools(&[false, false, true, true], &[4], &device).unwrap();
    let b = Tensor::<CustomRuntime>::from_bools(&[false, true, false, true], &[4], &device).unwrap();
    assert_bools(&client.lt(&a, &b).unwrap(), &[4], &[false, true, false, false], "bool <");
    assert_bools(&client.ge(&a, &b).unwrap(), &[4], &[true, false, true, true], "bool >=");
}

#[test]
fn test_bf16_words_compare_as_values() {
    let (client, device) = create_client();
    let words = encode_bf16_slice(&[0.5, 1.0, 2.0]);
    let other = encode_bf16_slice(&[1.0, 1.0, 1.0]);
    let a = Tensor::<CustomRuntime>::from_bytes(bytemuck::cast_slice(&words), &[3], DType::BF16, &device).unwrap();
    let b = Tensor::<CustomRuntime>::from_bytes(bytemuck::cast_slice(&other), &[3], DType::BF16, &device).unwrap();
    assert_bools(&client.gt(&a, &b).unwrap(), &[3], &[false, false, true], "bf16 >");
}

#[test]
fn test_large_contiguous_input() {
    let (client, device) = create_client();
    let n = 8192;
    let a: Vec<f32> = (0..n).map(|i| i as f32).collect();
    let b: Vec<f32> = (0..n).map(|i| (n - i) as f32).collect();
    let at = Tensor::<CustomRuntime>::from_slice(&a, &[n], &device).unwrap();
    let bt = Tensor::<CustomRuntime>::from_slice(&b, &[n], &device).unwrap();

    let got = client.le(&at, &bt).unwrap().to_bools().unwrap();
    let expected: Vec<bool> = a.iter().zip(&b).map(|(x, y)| x <= y).collect();
    assert_eq!(got, expected);
}

#[test]
fn test_keyword_errors() {
    let (client, device) = create_client();
    let a = Tensor::<CustomRuntime>::from_slice(&[1.0f32, 2.0], &[1, 2], &device).unwrap();

    for kwargs in [
        Kwargs::new().with("axis", true),
        Kwargs::new().with("force_cpu", 1),
        Kwargs::new().with("cond", 1),
        Kwargs::new().with("name", 3),
    ] {
        let err = ops::call(&client, CompareOp::Ge, &a, &a, &kwargs).unwrap_err();
        assert!(err.is_type_error(), "{err}");
    }

    let named = Kwargs::new().with("name", "ge_out");
    assert!(ops::call(&client, CompareOp::Ge, &a, &a, &named).is_ok());
}

#[test]
fn test_incompatible_shapes() {
    let (client, device) = create_client();
    let a = Tensor::<CustomRuntime>::from_slice(&[0i64; 6], &[2, 3], &device).unwrap();
    let b = Tensor::<CustomRuntime>::from_slice(&[0i64; 2], &[2], &device).unwrap();
    assert!(matches!(client.eq(&a, &b), Err(Error::BroadcastError { .. })));
}

#[test]
fn test_cast_then_compare() {
    let (client, device) = create_client();
    let a = Tensor::<CustomRuntime>::from_slice(&[1.7f64, -0.2, 3.0], &[3], &device).unwrap();
    let ints = client.cast(&a, DType::I64).unwrap();
    assert_eq!(ints.to_vec::<i64>().unwrap(), [1, 0, 3]);
    let out = client.eq(&ints, &a).unwrap();
    assert_bools(&out, &[3], &[false, false, true], "cast then compare");
}
