use thiserror::Error;

/// A comparator failed to order two keys.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    /// The keys are of different kinds and have no common order.
    #[error("cannot compare {lhs} key with {rhs} key")]
    KindMismatch {
        lhs: &'static str,
        rhs: &'static str,
    },
    /// The key has no place in the order (e.g. a NaN float).
    #[error("{kind} key is unordered")]
    Unordered { kind: &'static str },
    /// Raised by a user-supplied comparator.
    #[error("{0}")]
    Other(String),
}

impl ComparisonError {
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// The operation needs at least one entry but the map is empty.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("empty tree")]
pub struct EmptyTree;
