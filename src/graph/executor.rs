//! Program execution on a runtime client

use super::program::{Program, Variable};
use crate::error::{Error, Result};
use crate::host::{HostArray, to_tensor};
use crate::ops::{CompareOps, comparator};
use crate::runtime::Runtime;
use crate::tensor::Tensor;
use std::collections::BTreeMap;

/// Host values for a program's placeholders, keyed by name
#[derive(Clone, Debug, Default)]
pub struct Feed {
    values: BTreeMap<String, HostArray>,
}

impl Feed {
    /// Create an empty feed
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: &str, value: HostArray) -> Self {
        self.insert(name, value);
        self
    }

    /// Set the value for `name`, replacing any previous one
    pub fn insert(&mut self, name: &str, value: HostArray) {
        self.values.insert(name.to_string(), value);
    }

    /// Fed value for `name`
    pub fn get(&self, name: &str) -> Option<&HostArray> {
        self.values.get(name)
    }
}

/// Runs programs on one client
pub struct Executor<R: Runtime> {
    client: R::Client,
}

impl<R: Runtime> Executor<R>
where
    R::Client: CompareOps<R>,
{
    /// Create an executor bound to `client`
    pub fn new(client: R::Client) -> Self {
        Self { client }
    }

    /// Run every node of `program` and return the fetched variables
    ///
    /// Fed arrays must have the placeholder's dtype exactly (bf16
    /// placeholders take `HostArray::Bf16Bits`) and a shape matching the
    /// declared one, where `-1` matches any extent.
    pub fn run(&self, program: &Program, feed: &Feed, fetch_list: &[&Variable]) -> Result<Vec<Tensor<R>>> {
        let mut values: Vec<Option<Tensor<R>>> = vec![None; program.num_vars()];

        for (name, array) in &feed.values {
            let var = program.find(name).ok_or_else(|| Error::UnknownVariable { name: name.clone() })?;
            check_feed(var, array)?;
            values[var.index()] = Some(to_tensor::<R>(array, var.dtype(), &self.client)?);
        }

        for node in program.nodes() {
            let x = fetch_value(program, &values, node.x)?;
            let y = fetch_value(program, &values, node.y)?;
            let out = comparator::<R, R::Client>(node.op)(&self.client, x, y)?;
            log::trace!("{}: {:?} -> {}", node.op, out.shape(), program.var(node.out).name());
            values[node.out] = Some(out);
        }

        fetch_list
            .iter()
            .map(|&v| {
                program.owns(v)?;
                fetch_value(program, &values, v.index()).cloned()
            })
            .collect()
    }
}

fn fetch_value<'a, R: Runtime>(
    program: &Program,
    values: &'a [Option<Tensor<R>>],
    index: usize,
) -> Result<&'a Tensor<R>> {
    values[index].as_ref().ok_or_else(|| Error::MissingFeed {
        name: program.var(index).name().to_string(),
    })
}

fn check_feed(var: &Variable, array: &HostArray) -> Result<()> {
    if array.dtype() != var.dtype() {
        return Err(Error::feed_mismatch(
            var.name(),
            format!("expected dtype {}, got {}", var.dtype(), array.dtype()),
        ));
    }

    let declared = var.shape();
    let shape = array.shape();
    let matches = declared.len() == shape.len()
        && declared
            .iter()
            .zip(shape)
            .all(|(&d, &s)| d == -1 || d as usize == s);
    if !matches {
        return Err(Error::feed_mismatch(
            var.name(),
            format!("shape {shape:?} does not match declared {declared:?}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::ops::{CompareOp, Kwargs};
    use crate::runtime::custom::CustomRuntime;

    fn executor() -> Executor<CustomRuntime> {
        Executor::new(CustomRuntime::default_client(&CustomRuntime::default_device()))
    }

    #[test]
    fn test_run_broadcast_program() {
        let mut p = Program::new();
        let x = p.data("x", &[5], DType::I32).unwrap();
        let y = p.data("y", &[3, 1], DType::I32).unwrap();
        let out = p.compare(CompareOp::Gt, &x, &y, &Kwargs::new()).unwrap();

        let feed = Feed::new()
            .with("x", HostArray::arange(0, 5, &[5], DType::I32).unwrap())
            .with("y", HostArray::from_f64(&[5.0, 3.0, 2.0], &[3, 1], DType::I32).unwrap());
        let res = executor().run(&p, &feed, &[&out]).unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].shape(), &[3, 5]);
        let bools = res[0].to_bools().unwrap();
        assert_eq!(&bools[5..10], &[false, false, false, false, true]);
    }

    #[test]
    fn test_wildcard_dims_accept_any_extent() {
        let mut p = Program::new();
        let x = p.data("x", &[-1, 4], DType::F32).unwrap();
        let out = p.compare(CompareOp::Eq, &x, &x, &Kwargs::new()).unwrap();
        let feed = Feed::new().with("x", HostArray::arange(0, 12, &[3, 4], DType::F32).unwrap());
        let res = executor().run(&p, &feed, &[&out]).unwrap();
        assert!(res[0].to_bools().unwrap().iter().all(|&b| b));
    }

    #[test]
    fn test_feed_validation() {
        let mut p = Program::new();
        let x = p.data("x", &[2], DType::BF16).unwrap();
        let out = p.compare(CompareOp::Le, &x, &x, &Kwargs::new()).unwrap();
        let exe = executor();

        let f32_feed = Feed::new().with("x", HostArray::arange(0, 2, &[2], DType::F32).unwrap());
        assert!(matches!(exe.run(&p, &f32_feed, &[&out]), Err(Error::FeedMismatch { .. })));

        let bad_shape = Feed::new().with("x", HostArray::arange(0, 3, &[3], DType::BF16).unwrap());
        assert!(matches!(exe.run(&p, &bad_shape, &[&out]), Err(Error::FeedMismatch { .. })));

        assert!(matches!(exe.run(&p, &Feed::new(), &[&out]), Err(Error::MissingFeed { .. })));

        let words = HostArray::arange(0, 2, &[2], DType::F32).unwrap().encode_bf16().unwrap();
        let res = exe.run(&p, &Feed::new().with("x", words), &[&out]).unwrap();
        assert_eq!(res[0].to_bools().unwrap(), [true, true]);
    }
}
