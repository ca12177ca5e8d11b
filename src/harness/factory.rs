//! Test-case factory: one group of cases per (operator, dtype, oracle)

use super::report::{CaseFailure, CaseOutcome, CaseReport, GroupReport};
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::graph::{Executor, Feed, Operand, Program, Variable};
use crate::host::{FixtureRng, HostArray, Oracle, to_tensor};
use crate::ops::{self, CompareOp, Kwargs};
use crate::runtime::Runtime;
use crate::runtime::custom::{CustomClient, CustomRuntime, set_device};
use crate::tensor::{Tensor, create_lod_tensor};
use ndarray::ArrayD;
use std::time::Instant;

type CaseResult = std::result::Result<(), CaseFailure>;

/// Shape of the random eager fixtures
const DYNAMIC_SHAPE: [usize; 2] = [10, 7];

/// Deterministic broadcast fixtures
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BroadcastFixture {
    /// x `[1,2,1,3]` = 1..7, y `[1,2,3]` = 0..6
    HigherRankLhs,
    /// x `[1,2,3]` = 0..6, y `[1,2,1,3]` = 1..7
    HigherRankRhs,
    /// x `[5]` = 0..5, y `[3,1]` = `[5,3,2]`
    RowAgainstColumn,
}

impl BroadcastFixture {
    /// Host inputs in their intermediate representation (`F32` for bf16)
    fn inputs(self, dtype: DType) -> Result<(HostArray, HostArray)> {
        let host = host_dtype(dtype);
        Ok(match self {
            Self::HigherRankLhs => (
                HostArray::arange(1, 7, &[1, 2, 1, 3], host)?,
                HostArray::arange(0, 6, &[1, 2, 3], host)?,
            ),
            Self::HigherRankRhs => (
                HostArray::arange(0, 6, &[1, 2, 3], host)?,
                HostArray::arange(1, 7, &[1, 2, 1, 3], host)?,
            ),
            Self::RowAgainstColumn => (
                HostArray::arange(0, 5, &[5], host)?,
                HostArray::from_f64(&[5.0, 3.0, 2.0], &[3, 1], host)?,
            ),
        })
    }
}

/// What a test case exercises
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CaseKind {
    /// Declarative run on random same-shape inputs
    Output(&'static [usize]),
    /// Type-error expectations on invalid keywords and operand kinds
    Errors,
    /// Eager run on random inputs
    DynamicApi,
    /// Eager run with y sampled as int32 and placed as float32
    DynamicApiDifferentType,
    /// Declarative run on a broadcast fixture
    Broadcast(BroadcastFixture),
    /// The `name` keyword reaches the output variable name
    AttrName,
}

/// A named case of a [`TestGroup`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    /// Case name, e.g. `test_output1`
    pub name: &'static str,
    /// What the case checks
    pub kind: CaseKind,
}

const fn case(name: &'static str, kind: CaseKind) -> TestCase {
    TestCase { name, kind }
}

/// Mutable state shared by the cases of a run
pub struct CaseContext {
    /// Device each case selects before running
    pub device: String,
    /// Fixture generator
    pub rng: FixtureRng,
}

impl CaseContext {
    /// Create a context for `device` drawing fixtures from `rng`
    pub fn new(device: impl Into<String>, rng: FixtureRng) -> Self {
        Self {
            device: device.into(),
            rng,
        }
    }

    fn client(&self) -> Result<CustomClient> {
        let device = set_device(&self.device)?;
        Ok(CustomRuntime::default_client(&device))
    }
}

/// The cases generated for one operator and dtype
///
/// Immutable once built. Named `{operator}_{dtype}`, e.g. `less_than_int32`.
#[derive(Clone, Debug)]
pub struct TestGroup {
    name: String,
    op: CompareOp,
    dtype: DType,
    oracle: Oracle,
    cases: Vec<TestCase>,
}

/// Build the case group for `op` on `dtype`, checked against `oracle`
///
/// The mixed-dtype eager case is generated for `equal` only.
pub fn create_test_class(op: CompareOp, dtype: DType, oracle: Oracle) -> TestGroup {
    let mut cases = vec![
        case("test_output", CaseKind::Output(&[10, 7])),
        case("test_output1", CaseKind::Output(&[8192])),
        case("test_output2", CaseKind::Output(&[2, 4096, 1])),
        case("test_errors", CaseKind::Errors),
        case("test_dynamic_api", CaseKind::DynamicApi),
    ];
    if op == CompareOp::Eq {
        cases.push(case(
            "test_dynamic_api_different_type",
            CaseKind::DynamicApiDifferentType,
        ));
    }
    cases.extend([
        case(
            "test_broadcast_api_1",
            CaseKind::Broadcast(BroadcastFixture::HigherRankLhs),
        ),
        case(
            "test_broadcast_api_2",
            CaseKind::Broadcast(BroadcastFixture::HigherRankRhs),
        ),
        case(
            "test_broadcast_api_3",
            CaseKind::Broadcast(BroadcastFixture::RowAgainstColumn),
        ),
        case("test_attr_name", CaseKind::AttrName),
    ]);

    TestGroup {
        name: format!("{}_{}", op.name(), dtype.name()),
        op,
        dtype,
        oracle,
        cases,
    }
}

impl TestGroup {
    /// Group name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operator under test
    pub fn op(&self) -> CompareOp {
        self.op
    }

    /// Element dtype under test
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Cases in execution order
    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Look up a case by name
    pub fn case(&self, name: &str) -> Option<&TestCase> {
        self.cases.iter().find(|c| c.name == name)
    }

    /// Run every case in order
    pub fn run(&self, ctx: &mut CaseContext) -> GroupReport {
        let cases = self
            .cases
            .iter()
            .map(|case| {
                let start = Instant::now();
                let outcome = self.run_case(case, ctx);
                CaseReport {
                    case: case.name,
                    outcome,
                    elapsed: start.elapsed(),
                }
            })
            .collect();
        let report = GroupReport {
            name: self.name.clone(),
            cases,
        };
        log::info!("{}: {} passed, {} failed", report.name, report.passed(), report.failed());
        report
    }

    /// Run one case
    pub fn run_case(&self, case: &TestCase, ctx: &mut CaseContext) -> CaseOutcome {
        log::debug!("{}.{}", self.name, case.name);
        let result = match case.kind {
            CaseKind::Output(shape) => self.check_output(shape, ctx),
            CaseKind::Errors => self.check_errors(ctx),
            CaseKind::DynamicApi => self.check_dynamic_api(ctx),
            CaseKind::DynamicApiDifferentType => self.check_dynamic_api_different_type(ctx),
            CaseKind::Broadcast(fixture) => self.check_broadcast(fixture, ctx),
            CaseKind::AttrName => self.check_attr_name(),
        };
        if let Err(failure) = &result {
            log::warn!("{}.{} failed: {failure}", self.name, case.name);
        }
        result.into()
    }

    fn check_output(&self, shape: &[usize], ctx: &mut CaseContext) -> CaseResult {
        let x = ctx.rng.random(shape, self.dtype)?;
        let y = ctx.rng.random(shape, self.dtype)?;
        self.run_declarative(&x, &y, ctx)
    }

    fn check_broadcast(&self, fixture: BroadcastFixture, ctx: &mut CaseContext) -> CaseResult {
        let (x, y) = fixture.inputs(self.dtype)?;
        self.run_declarative(&x, &y, ctx)
    }

    /// Declare placeholders of the inputs' shapes, run, and compare with the oracle
    fn run_declarative(&self, x: &HostArray, y: &HostArray, ctx: &CaseContext) -> CaseResult {
        let mut program = Program::new();
        let xv = program.data("x", &declared(x.shape()), self.dtype)?;
        let yv = program.data("y", &declared(y.shape()), self.dtype)?;
        let out = program.compare(self.op, &xv, &yv, &Kwargs::new())?;

        let feed = Feed::new()
            .with("x", feed_value(x, self.dtype)?)
            .with("y", feed_value(y, self.dtype)?);
        let executor = Executor::<CustomRuntime>::new(ctx.client()?);
        let mut res = executor.run(&program, &feed, &[&out])?;
        let res = res
            .pop()
            .ok_or_else(|| Error::Internal("executor returned no outputs".to_string()))?;

        check_against(&res, &(self.oracle)(x, y)?)
    }

    fn check_errors(&self, ctx: &CaseContext) -> CaseResult {
        let op = self.op;
        let mut program = Program::new();
        let a = program.data("a", &[-1, 2], DType::F32)?;
        let b = program.data("b", &[-1, 2], DType::F32)?;
        let c = program.data("c", &[-1, 2], DType::I16)?;
        let device = ctx.client()?.device.clone();
        let d = create_lod_tensor(
            Tensor::<CustomRuntime>::from_slice(&[-1i64], &[1, 1], &device)?,
            &[vec![1]],
        )?;

        let bad_kwargs = [
            ("axis=True", Kwargs::new().with("axis", true)),
            ("force_cpu=1", Kwargs::new().with("force_cpu", 1)),
            ("cond=1", Kwargs::new().with("cond", 1)),
        ];
        for (label, kwargs) in &bad_kwargs {
            expect_type_error(
                &format!("{op}(a, b, {label})"),
                program.compare(op, &a, &b, kwargs),
            )?;
        }

        expect_no_type_error(
            &format!("{op}(a: float32, c: int16)"),
            program.compare(op, &a, &c, &Kwargs::new()),
        )?;
        expect_no_type_error(
            &format!("{op}(c: int16, a: float32)"),
            program.compare(op, &c, &a, &Kwargs::new()),
        )?;

        let lod_calls: [(&str, Operand<'_>, Operand<'_>); 3] = [
            ("a, d", (&a).into(), (&d).into()),
            ("d, a", (&d).into(), (&a).into()),
            ("c, d", (&c).into(), (&d).into()),
        ];
        for (label, x, y) in lod_calls {
            expect_type_error(
                &format!("{op}({label}: LoDTensor)"),
                program.compare(op, x, y, &Kwargs::new()),
            )?;
        }
        Ok(())
    }

    fn check_dynamic_api(&self, ctx: &mut CaseContext) -> CaseResult {
        let client = ctx.client()?;
        let x = ctx.rng.random(&DYNAMIC_SHAPE, self.dtype)?;
        let y = ctx.rng.random(&DYNAMIC_SHAPE, self.dtype)?;
        let expected = (self.oracle)(&x, &y)?;

        let xt = to_tensor::<CustomRuntime>(&x, self.dtype, &client)?;
        let yt = to_tensor::<CustomRuntime>(&y, self.dtype, &client)?;
        let out = ops::call(&client, self.op, &xt, &yt, &Kwargs::new())?;
        check_against(&out, &expected)
    }

    fn check_dynamic_api_different_type(&self, ctx: &mut CaseContext) -> CaseResult {
        let client = ctx.client()?;
        let y = ctx.rng.random(&DYNAMIC_SHAPE, DType::I32)?;
        let x = ctx.rng.random(&DYNAMIC_SHAPE, self.dtype)?;
        let expected = (self.oracle)(&x, &y)?;

        let xt = to_tensor::<CustomRuntime>(&x, self.dtype, &client)?;
        let yt = to_tensor::<CustomRuntime>(&y, DType::F32, &client)?;
        let out = ops::call(&client, self.op, &xt, &yt, &Kwargs::new())?;
        check_against(&out, &expected)
    }

    fn check_attr_name(&self) -> CaseResult {
        let mut program = Program::new();
        let x = program.data("x", &[-1, 4], self.dtype)?;
        let y = program.data("y", &[-1, 4], self.dtype)?;
        let requested = format!("name_{}", self.op.name());
        let out = program.compare(self.op, &x, &y, &Kwargs::new().with("name", requested.as_str()))?;
        if !out.name().contains(&requested) {
            return Err(CaseFailure::NameMismatch {
                expected: requested,
                got: out.name().to_string(),
            });
        }
        Ok(())
    }
}

/// Host representation fixtures use for `dtype`
fn host_dtype(dtype: DType) -> DType {
    if dtype.has_host_repr() { dtype } else { DType::F32 }
}

/// Value fed for a placeholder of `dtype`: bf16 intermediates become words
fn feed_value(array: &HostArray, dtype: DType) -> Result<HostArray> {
    if dtype == DType::BF16 && array.dtype() != DType::BF16 {
        array.encode_bf16()
    } else {
        Ok(array.clone())
    }
}

fn declared(shape: &[usize]) -> Vec<i64> {
    shape.iter().map(|&d| d as i64).collect()
}

/// Compare a Bool tensor with an oracle result element for element
pub fn check_against<R: Runtime>(out: &Tensor<R>, expected: &ArrayD<bool>) -> CaseResult {
    if out.shape() != expected.shape() {
        return Err(CaseFailure::ShapeMismatch {
            expected: expected.shape().to_vec(),
            got: out.shape().to_vec(),
        });
    }
    let got = out.to_bools()?;
    match got.iter().zip(expected.iter()).position(|(g, e)| g != e) {
        Some(index) => Err(CaseFailure::ValueMismatch {
            index,
            got: got[index],
            expected: !got[index],
        }),
        None => Ok(()),
    }
}

fn expect_type_error(call: &str, result: Result<Variable>) -> CaseResult {
    match result {
        Ok(_) => Err(CaseFailure::MissingTypeError {
            call: call.to_string(),
        }),
        Err(e) if e.is_type_error() => Ok(()),
        Err(e) => Err(CaseFailure::WrongErrorKind {
            call: call.to_string(),
            kind: e.kind(),
            source: e,
        }),
    }
}

fn expect_no_type_error(call: &str, result: Result<Variable>) -> CaseResult {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.is_type_error() => Err(CaseFailure::UnexpectedTypeError {
            call: call.to_string(),
            source: e,
        }),
        Err(e) => Err(e.into()),
    }
}
