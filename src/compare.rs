//! Ordering contract for map keys.

use std::cmp::Ordering;
use std::fmt;

use crate::error::ComparisonError;

/// A total order over keys of type `K`.
///
/// One comparator is bound to a map for its whole lifetime and must order every key ever
/// stored in it consistently. The map does not verify this: an inconsistent comparator
/// leaves a well-formed tree whose lookups give wrong answers.
///
/// Comparison may fail, e.g. when runtime-typed keys of different kinds meet. The map
/// propagates the error to the caller unchanged.
pub trait Comparator<K: ?Sized> {
    fn compare(&self, lhs: &K, rhs: &K) -> Result<Ordering, ComparisonError>;
}

impl<K: ?Sized, C: Comparator<K> + ?Sized> Comparator<K> for &C {
    fn compare(&self, lhs: &K, rhs: &K) -> Result<Ordering, ComparisonError> {
        (**self).compare(lhs, rhs)
    }
}

/// Orders keys by their `Ord` implementation. Never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrdComparator;

impl<K: Ord + ?Sized> Comparator<K> for OrdComparator {
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Result<Ordering, ComparisonError> {
        Ok(lhs.cmp(rhs))
    }
}

/// Adapts a closure into a [`Comparator`].
///
/// ```
/// use avl_map::{compare, AvlTreeMap};
///
/// let descending = compare::from_fn(|a: &i32, b: &i32| Ok(b.cmp(a)));
/// let mut map = AvlTreeMap::with_comparator(descending);
/// map.insert(1, "one").unwrap();
/// map.insert(2, "two").unwrap();
/// assert_eq!(map.min(), Ok((&2, &"two")));
/// ```
#[derive(Clone, Copy)]
pub struct FnComparator<F> {
    f: F,
}

pub fn from_fn<K, F>(f: F) -> FnComparator<F>
where
    K: ?Sized,
    F: Fn(&K, &K) -> Result<Ordering, ComparisonError>,
{
    FnComparator { f }
}

impl<K, F> Comparator<K> for FnComparator<F>
where
    K: ?Sized,
    F: Fn(&K, &K) -> Result<Ordering, ComparisonError>,
{
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Result<Ordering, ComparisonError> {
        (self.f)(lhs, rhs)
    }
}

impl<F> fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnComparator")
    }
}
