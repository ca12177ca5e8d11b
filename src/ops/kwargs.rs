//! Keyword arguments for operator calls

use super::CompareOp;
use crate::error::{Error, Result};

/// A dynamically typed keyword argument value
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    /// Boolean flag
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point
    Float(f64),
    /// String
    Str(String),
}

impl AttrValue {
    /// Name of the value's type, for error messages
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Ordered keyword arguments passed to an operator call
///
/// # Example
///
/// ```
/// use accel_compare::ops::Kwargs;
/// let kwargs = Kwargs::new().with("name", "name_equal");
/// assert_eq!(kwargs.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Kwargs {
    entries: Vec<(String, AttrValue)>,
}

impl Kwargs {
    /// No keyword arguments
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a keyword argument, builder style
    pub fn with(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add (or replace) a keyword argument
    pub fn insert(&mut self, key: &str, value: impl Into<AttrValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Look up a keyword argument
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of keyword arguments
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no keyword arguments were given
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Validated attributes of a comparison call
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompareAttrs {
    /// Caller-supplied output name
    pub name: Option<String>,
}

impl CompareAttrs {
    /// Validate keyword arguments for a comparison operator
    ///
    /// Comparisons accept only `name`, which must be a string. Anything else
    /// is a type error.
    pub fn parse(op: CompareOp, kwargs: &Kwargs) -> Result<Self> {
        let mut attrs = Self::default();
        for (key, value) in kwargs.iter() {
            match (key, value) {
                ("name", AttrValue::Str(name)) => attrs.name = Some(name.clone()),
                ("name", other) => {
                    return Err(Error::InvalidArgumentType {
                        op: op.name(),
                        arg: key.to_string(),
                        expected: "str",
                        got: other.type_name(),
                    });
                }
                _ => {
                    return Err(Error::UnexpectedKeyword {
                        op: op.name(),
                        key: key.to_string(),
                    });
                }
            }
        }
        Ok(attrs)
    }
}
