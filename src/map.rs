//! An ordered map implemented with an AVL tree.

use std::cmp::Ordering;
use std::fmt;

use log::trace;

use crate::compare::{Comparator, OrdComparator};
use crate::error::{ComparisonError, EmptyTree};

mod node;
mod pretty;

use node::{Link, Node};
pub use pretty::Pretty;

/// An ordered map implemented with an AVL tree.
///
/// Keys are ordered by the comparator bound at construction, which defaults to the key
/// type's `Ord` implementation. Operations that compare keys return a [`ComparisonError`]
/// if the comparator fails; the map is left unchanged in that case.
///
/// ```
/// use avl_map::AvlTreeMap;
/// let mut map = AvlTreeMap::new();
/// map.insert(0, "zero")?;
/// map.insert(1, "one")?;
/// map.insert(2, "two")?;
/// assert_eq!(map.get(&1)?, Some(&"one"));
/// map.remove(&1)?;
/// assert!(map.get(&1)?.is_none());
/// assert_eq!(map.max(), Ok((&2, &"two")));
/// # Ok::<(), avl_map::ComparisonError>(())
/// ```
#[derive(Clone)]
pub struct AvlTreeMap<K, V, C = OrdComparator> {
    root: Link<K, V>,
    num_nodes: usize,
    comparator: C,
}

/// An iterator over the entries of a map, sorted by key.
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<K: Ord, V> AvlTreeMap<K, V> {
    /// Creates an empty map ordered by `K: Ord`.
    /// No memory is allocated until the first item is inserted.
    pub fn new() -> Self {
        Self::with_comparator(OrdComparator)
    }
}

impl<K, V, C: Comparator<K>> AvlTreeMap<K, V, C> {
    /// Creates an empty map ordered by the given comparator.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            num_nodes: 0,
            comparator,
        }
    }

    /// Returns the comparator the map is ordered by.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns true if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of distinct keys in the map.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree, zero for an empty map and one for a single entry.
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Clears the map, deallocating all memory.
    pub fn clear(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns a reference to the value corresponding to the key.
    pub fn get(&self, key: &K) -> Result<Option<&V>, ComparisonError> {
        Ok(self.find(key)?.map(|node| &node.value))
    }

    /// Returns references to the key-value pair corresponding to the key.
    pub fn get_key_value(&self, key: &K) -> Result<Option<(&K, &V)>, ComparisonError> {
        Ok(self.find(key)?.map(|node| (&node.key, &node.value)))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &K) -> Result<Option<&mut V>, ComparisonError> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match self.comparator.compare(key, &node.key)? {
                Ordering::Equal => return Ok(Some(&mut node.value)),
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }
        Ok(None)
    }

    /// Returns true if the map contains a value for the key.
    pub fn contains_key(&self, key: &K) -> Result<bool, ComparisonError> {
        Ok(self.find(key)?.is_some())
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key was already present, its value is replaced and the old value returned.
    /// The stored key is kept and the number of entries does not change.
    ///
    /// The first key of an empty map is compared with itself, so a key the comparator
    /// cannot order (e.g. a NaN float) is rejected before it is stored.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, ComparisonError> {
        if self.root.is_none() {
            self.comparator.compare(&key, &key)?;
        }
        let old_value = node::insert(&mut self.root, key, value, &self.comparator)?;
        if old_value.is_none() {
            self.num_nodes += 1;
            trace!("inserted new key, len {}", self.num_nodes);
        }
        Ok(old_value)
    }

    /// Removes a key from the map.
    /// Returns the value at the key if the key was previously in the map.
    pub fn remove(&mut self, key: &K) -> Result<Option<V>, ComparisonError> {
        Ok(self.remove_entry(key)?.map(|(_, value)| value))
    }

    /// Removes a key from the map.
    /// Returns the stored key and value if the key was previously in the map.
    pub fn remove_entry(&mut self, key: &K) -> Result<Option<(K, V)>, ComparisonError> {
        let entry = node::remove(&mut self.root, key, &self.comparator)?;
        if entry.is_some() {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
            trace!("removed key, len {}", self.num_nodes);
        }
        Ok(entry)
    }

    /// Returns the entry with the smallest key.
    pub fn min(&self) -> Result<(&K, &V), EmptyTree> {
        let mut node = self.root.as_deref().ok_or(EmptyTree)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok((&node.key, &node.value))
    }

    /// Returns the entry with the largest key.
    pub fn max(&self) -> Result<(&K, &V), EmptyTree> {
        let mut node = self.root.as_deref().ok_or(EmptyTree)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok((&node.key, &node.value))
    }

    /// Removes and returns the entry with the smallest key.
    pub fn pop_first(&mut self) -> Result<(K, V), EmptyTree> {
        let entry = node::take_min(&mut self.root).ok_or(EmptyTree)?;
        self.num_nodes -= 1;
        trace!("removed first key, len {}", self.num_nodes);
        Ok(entry)
    }

    /// Removes and returns the entry with the largest key.
    pub fn pop_last(&mut self) -> Result<(K, V), EmptyTree> {
        let entry = node::take_max(&mut self.root).ok_or(EmptyTree)?;
        self.num_nodes -= 1;
        trace!("removed last key, len {}", self.num_nodes);
        Ok(entry)
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.num_nodes)
    }

    /// Calls `visitor` on every entry in ascending key order.
    pub fn traverse<F: FnMut(&K, &V)>(&self, mut visitor: F) {
        fn inorder<K, V, F: FnMut(&K, &V)>(link: &Link<K, V>, visitor: &mut F) {
            if let Some(node) = link {
                inorder(&node.left, visitor);
                visitor(&node.key, &node.value);
                inorder(&node.right, visitor);
            }
        }
        inorder(&self.root, &mut visitor);
    }

    /// Returns an adapter that displays the tree structure sideways, one key per line,
    /// indented by depth.
    pub fn pretty(&self) -> Pretty<'_, K, V> {
        Pretty::new(&self.root)
    }

    /// Asserts the AVL, search order and length invariants of the whole tree.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        self.check_balance();

        // Check search order
        let mut prev: Option<&K> = None;
        for (key, _) in self.iter() {
            if let Some(prev) = prev {
                assert_eq!(self.comparator.compare(prev, key), Ok(Ordering::Less));
            }
            prev = Some(key);
        }
    }

    /// Asserts the AVL and length invariants without consulting the comparator.
    /// These hold even if the comparator is not a consistent order.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_balance(&self) {
        // Returns (height, number of nodes) of the subtree
        fn check<K, V>(link: &Link<K, V>) -> (usize, usize) {
            match link {
                None => (0, 0),
                Some(node) => {
                    let (left_height, left_nodes) = check(&node.left);
                    let (right_height, right_nodes) = check(&node.right);

                    // Check height
                    assert_eq!(node.height, 1 + left_height.max(right_height));

                    // Check AVL condition (nearly balance)
                    assert!(left_height <= right_height + 1);
                    assert!(right_height <= left_height + 1);

                    (node.height, left_nodes + right_nodes + 1)
                }
            }
        }

        let (_, num_nodes) = check(&self.root);
        assert_eq!(num_nodes, self.num_nodes);
        assert_eq!(self.root.is_none(), self.num_nodes == 0);
    }

    fn find(&self, key: &K) -> Result<Option<&Node<K, V>>, ComparisonError> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match self.comparator.compare(key, &node.key)? {
                Ordering::Equal => return Ok(Some(node)),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        Ok(None)
    }
}

impl<K, V, C: Comparator<K> + Default> Default for AvlTreeMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Comparator<K>> fmt::Debug for AvlTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlTreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let Ok(_) = self.insert(key, value) else {
                unreachable!("Ord comparison cannot fail");
            };
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, C: Comparator<K>> IntoIterator for &'a AvlTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: &'a Link<K, V>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<K, V>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}
