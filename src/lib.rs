//! An ordered map implemented with an AVL tree.
//!
//! Keys are ordered by a pluggable [`Comparator`] bound to the map when it is created.
//! Comparison may fail, so every operation that compares keys returns a `Result`;
//! maps over `Ord` keys use [`OrdComparator`], which never does.
//!
//! ```
//! use avl_map::{dynamic::{DynComparator, DynKey}, AvlTreeMap, ComparisonError};
//!
//! let mut map = AvlTreeMap::with_comparator(DynComparator);
//! map.insert(DynKey::Int(5), "five")?;
//! map.insert(DynKey::Int(3), "three")?;
//! assert_eq!(map.min().map(|(_, v)| *v), Ok("three"));
//!
//! let err = map.insert(DynKey::from("seven"), "seven").unwrap_err();
//! assert!(matches!(err, ComparisonError::KindMismatch { .. }));
//! assert_eq!(map.len(), 2);
//! # Ok::<(), ComparisonError>(())
//! ```

pub mod compare;
pub mod dynamic;
mod error;
pub mod map;

pub use compare::{Comparator, OrdComparator};
pub use error::{ComparisonError, EmptyTree};
pub use map::AvlTreeMap;

#[cfg(test)]
mod proptests;
