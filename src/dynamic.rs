//! Runtime-typed keys.
//!
//! [`DynKey`] lets a single map accept keys whose kind is only known at runtime, as a
//! binding to a dynamically typed host would need. Keys of one kind are ordered naturally;
//! [`DynComparator`] rejects mixed kinds and NaN with a [`ComparisonError`] instead of
//! guessing an order.

use std::cmp::Ordering;
use std::fmt;

use crate::compare::Comparator;
use crate::error::ComparisonError;

#[derive(Debug, Clone, PartialEq)]
pub enum DynKey {
    Int(i64),
    Float(f64),
    Text(String),
}

impl DynKey {
    /// Name of the key's kind, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            DynKey::Int(_) => "int",
            DynKey::Float(_) => "float",
            DynKey::Text(_) => "text",
        }
    }
}

impl fmt::Display for DynKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynKey::Int(i) => write!(f, "{i}"),
            DynKey::Float(x) => write!(f, "{x}"),
            DynKey::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i64> for DynKey {
    fn from(i: i64) -> Self {
        DynKey::Int(i)
    }
}

impl From<f64> for DynKey {
    fn from(x: f64) -> Self {
        DynKey::Float(x)
    }
}

impl From<&str> for DynKey {
    fn from(s: &str) -> Self {
        DynKey::Text(s.to_owned())
    }
}

impl From<String> for DynKey {
    fn from(s: String) -> Self {
        DynKey::Text(s)
    }
}

/// Orders [`DynKey`]s of the same kind.
///
/// Text is compared bytewise, a shorter common prefix sorting first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DynComparator;

impl Comparator<DynKey> for DynComparator {
    fn compare(&self, lhs: &DynKey, rhs: &DynKey) -> Result<Ordering, ComparisonError> {
        match (lhs, rhs) {
            (DynKey::Int(a), DynKey::Int(b)) => Ok(a.cmp(b)),
            (DynKey::Float(a), DynKey::Float(b)) => {
                a.partial_cmp(b)
                    .ok_or(ComparisonError::Unordered { kind: lhs.kind() })
            }
            (DynKey::Text(a), DynKey::Text(b)) => Ok(a.as_bytes().cmp(b.as_bytes())),
            _ => Err(ComparisonError::KindMismatch {
                lhs: lhs.kind(),
                rhs: rhs.kind(),
            }),
        }
    }
}
