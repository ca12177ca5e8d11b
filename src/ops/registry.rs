//! Operator table: identifier → typed comparator

use super::{CompareAttrs, CompareOp, CompareOps, Kwargs};
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::tensor::Tensor;

/// A comparator bound to a concrete client type
pub type Comparator<R, C> = fn(&C, &Tensor<R>, &Tensor<R>) -> Result<Tensor<R>>;

/// Registered operator identifiers
static OPERATORS: [(&str, CompareOp); 6] = [
    ("equal", CompareOp::Eq),
    ("not_equal", CompareOp::Ne),
    ("less_than", CompareOp::Lt),
    ("less_equal", CompareOp::Le),
    ("greater_than", CompareOp::Gt),
    ("greater_equal", CompareOp::Ge),
];

/// Resolve an operator identifier
pub fn lookup(name: &str) -> Result<CompareOp> {
    OPERATORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, op)| op)
        .ok_or_else(|| Error::UnknownOperator {
            name: name.to_string(),
        })
}

/// All registered operator identifiers
pub fn operator_names() -> impl Iterator<Item = &'static str> {
    OPERATORS.iter().map(|&(n, _)| n)
}

/// The client method implementing `op`
pub fn comparator<R: Runtime, C: CompareOps<R>>(op: CompareOp) -> Comparator<R, C> {
    match op {
        CompareOp::Eq => <C as CompareOps<R>>::eq,
        CompareOp::Ne => <C as CompareOps<R>>::ne,
        CompareOp::Lt => <C as CompareOps<R>>::lt,
        CompareOp::Le => <C as CompareOps<R>>::le,
        CompareOp::Gt => <C as CompareOps<R>>::gt,
        CompareOp::Ge => <C as CompareOps<R>>::ge,
    }
}

/// Eager entry point: validate keyword arguments, then run the comparator
pub fn call<R: Runtime, C: CompareOps<R>>(
    client: &C,
    op: CompareOp,
    x: &Tensor<R>,
    y: &Tensor<R>,
    kwargs: &Kwargs,
) -> Result<Tensor<R>> {
    CompareAttrs::parse(op, kwargs)?;
    let out = comparator::<R, C>(op)(client, x, y)?;
    log::trace!(
        "{op}: {:?}[{}] vs {:?}[{}] -> {:?}",
        x.shape(),
        x.dtype(),
        y.shape(),
        y.dtype(),
        out.shape()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_every_registered_name() {
        for name in operator_names() {
            let op = lookup(name).unwrap();
            assert_eq!(op.name(), name);
        }
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(matches!(
            lookup("less_than_or_equal"),
            Err(Error::UnknownOperator { .. })
        ));
    }
}
