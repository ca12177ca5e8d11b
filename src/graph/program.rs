//! Declarative programs: placeholders and comparison nodes

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::ops::{CompareAttrs, CompareOp, Kwargs};
use crate::runtime::Runtime;
use crate::tensor::LodTensor;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PROGRAM_ID: AtomicU64 = AtomicU64::new(0);

/// Handle to a variable declared in a [`Program`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    program: u64,
    index: usize,
    name: String,
    shape: Vec<i64>,
    dtype: DType,
}

impl Variable {
    /// Unique name within the program
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared shape; `-1` marks a dimension fixed only at run time
    pub fn shape(&self) -> &[i64] {
        &self.shape
    }

    /// Element dtype
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}{:?}", self.name, self.dtype, self.shape)
    }
}

/// An operand of a comparison node
#[derive(Clone, Debug)]
pub enum Operand<'a> {
    /// A program variable
    Var(&'a Variable),
    /// A LoD tensor value; never accepted by comparisons
    Lod {
        /// Number of LoD levels
        levels: usize,
    },
}

impl Operand<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Var(_) => "Variable",
            Self::Lod { .. } => "LoDTensor",
        }
    }
}

impl<'a> From<&'a Variable> for Operand<'a> {
    fn from(v: &'a Variable) -> Self {
        Self::Var(v)
    }
}

impl<'a, R: Runtime> From<&'a LodTensor<R>> for Operand<'a> {
    fn from(t: &'a LodTensor<R>) -> Self {
        Self::Lod {
            levels: t.lod().len(),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum VarKind {
    Placeholder,
    Output,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) op: CompareOp,
    pub(crate) x: usize,
    pub(crate) y: usize,
    pub(crate) out: usize,
}

/// A declarative program
///
/// Placeholders are declared with [`Program::data`] and fed at run time;
/// [`Program::compare`] appends a comparison node and returns its output
/// variable. Programs are immutable once handed to an executor.
#[derive(Debug)]
pub struct Program {
    id: u64,
    vars: Vec<(Variable, VarKind)>,
    nodes: Vec<Node>,
    name_counters: HashMap<String, usize>,
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Program {
    /// Create an empty program
    pub fn new() -> Self {
        Self {
            id: NEXT_PROGRAM_ID.fetch_add(1, Ordering::Relaxed),
            vars: Vec::new(),
            nodes: Vec::new(),
            name_counters: HashMap::new(),
        }
    }

    /// Declare a placeholder
    ///
    /// Every dimension must be positive or `-1`.
    pub fn data(&mut self, name: &str, shape: &[i64], dtype: DType) -> Result<Variable> {
        if let Some(&d) = shape.iter().find(|&&d| d == 0 || d < -1) {
            return Err(Error::InvalidArgument {
                arg: "shape",
                reason: format!("dimension {d} of '{name}' must be positive or -1"),
            });
        }
        if self.find(name).is_some() {
            return Err(Error::DuplicateVariable {
                name: name.to_string(),
            });
        }
        Ok(self.push(name.to_string(), shape.to_vec(), dtype, VarKind::Placeholder))
    }

    /// Append a comparison node and return its Bool output variable
    ///
    /// Accepts only the `name` keyword. Both operands must be variables of
    /// this program; their dtypes may differ.
    pub fn compare<'a>(
        &mut self,
        op: CompareOp,
        x: impl Into<Operand<'a>>,
        y: impl Into<Operand<'a>>,
        kwargs: &Kwargs,
    ) -> Result<Variable> {
        let attrs = CompareAttrs::parse(op, kwargs)?;
        let x = self.resolve(op, "x", x.into())?;
        let y = self.resolve(op, "y", y.into())?;

        let shape = broadcast_declared(&x.shape, &y.shape).ok_or_else(|| Error::SymbolicBroadcast {
            lhs: x.shape.clone(),
            rhs: y.shape.clone(),
        })?;

        let prefix = attrs.name.unwrap_or_else(|| op.name().to_string());
        let name = self.unique_name(&prefix);
        let (xi, yi) = (x.index, y.index);
        let out = self.push(name, shape, DType::Bool, VarKind::Output);
        self.nodes.push(Node {
            op,
            x: xi,
            y: yi,
            out: out.index,
        });
        log::trace!("program {}: {op}({}, {}) -> {out}", self.id, x.name, y.name);
        Ok(out)
    }

    /// Look up a variable by name
    pub fn find(&self, name: &str) -> Option<&Variable> {
        self.vars.iter().map(|(v, _)| v).find(|v| v.name == name)
    }

    /// Placeholder variables in declaration order
    pub fn placeholders(&self) -> impl Iterator<Item = &Variable> {
        self.vars.iter().filter_map(|(v, kind)| match kind {
            VarKind::Placeholder => Some(v),
            VarKind::Output => None,
        })
    }

    /// Number of comparison nodes
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn var(&self, index: usize) -> &Variable {
        &self.vars[index].0
    }

    pub(crate) fn num_vars(&self) -> usize {
        self.vars.len()
    }

    /// Check that `v` was declared by this program
    pub(crate) fn owns(&self, v: &Variable) -> Result<()> {
        if v.program != self.id || v.index >= self.vars.len() {
            return Err(Error::UnknownVariable {
                name: v.name.clone(),
            });
        }
        Ok(())
    }

    fn resolve(&self, op: CompareOp, arg: &'static str, operand: Operand<'_>) -> Result<Variable> {
        match operand {
            Operand::Var(v) => {
                self.owns(v)?;
                Ok(v.clone())
            }
            other => Err(Error::InvalidInputType {
                op: op.name(),
                arg,
                expected: "Variable",
                got: other.kind(),
            }),
        }
    }

    fn push(&mut self, name: String, shape: Vec<i64>, dtype: DType, kind: VarKind) -> Variable {
        let var = Variable {
            program: self.id,
            index: self.vars.len(),
            name,
            shape,
            dtype,
        };
        self.vars.push((var.clone(), kind));
        var
    }

    fn unique_name(&mut self, prefix: &str) -> String {
        let counter = self.name_counters.entry(prefix.to_string()).or_insert(0);
        let name = format!("{prefix}.tmp_{counter}");
        *counter += 1;
        name
    }
}

/// Broadcast two declared shapes, keeping `-1` where the extent is unknown
pub fn broadcast_declared(a: &[i64], b: &[i64]) -> Option<Vec<i64>> {
    let ndim = a.len().max(b.len());
    let mut out = vec![0i64; ndim];
    for i in 0..ndim {
        let da = if i < ndim - a.len() { 1 } else { a[i - (ndim - a.len())] };
        let db = if i < ndim - b.len() { 1 } else { b[i - (ndim - b.len())] };
        out[i] = match (da, db) {
            (x, y) if x == y => x,
            (1, y) => y,
            (x, 1) => x,
            (-1, y) | (y, -1) => y,
            _ => return None,
        };
    }
    Some(out)
}
