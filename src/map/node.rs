//! Tree nodes and the recursive insert/remove/rebalance logic.
//!
//! Every function works on a `Link`, the owning slot a node lives in (the map's root or a
//! parent's child field), so a rotation can swap the slot's occupant without parent
//! pointers. Comparisons always happen on the way down and structural changes on the way
//! back up. A comparison error therefore returns before anything has been modified.

use std::cmp::{self, Ordering};
use std::mem;

use log::trace;

use crate::compare::Comparator;
use crate::error::ComparisonError;

pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    pub(crate) height: usize,
}

impl<K, V> Node<K, V> {
    fn create(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    pub(crate) fn left_height(&self) -> usize {
        height(&self.left)
    }

    pub(crate) fn right_height(&self) -> usize {
        height(&self.right)
    }

    fn adjust_height(&mut self) {
        self.height = 1 + cmp::max(self.left_height(), self.right_height());
    }

    /// Left height minus right height.
    fn balance_factor(&self) -> isize {
        self.left_height() as isize - self.right_height() as isize
    }

    fn into_entry(self: Box<Self>) -> (K, V) {
        let Node { key, value, .. } = *self;
        (key, value)
    }
}

pub(crate) fn height<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Inserts or overwrites `key` below `link`.
/// Returns the previous value if the key was already present.
pub(crate) fn insert<K, V, C>(
    link: &mut Link<K, V>,
    key: K,
    value: V,
    cmp: &C,
) -> Result<Option<V>, ComparisonError>
where
    C: Comparator<K> + ?Sized,
{
    let node = match link {
        Some(node) => node,
        None => {
            *link = Some(Node::create(key, value));
            return Ok(None);
        }
    };
    let old_value = match cmp.compare(&key, &node.key)? {
        Ordering::Less => insert(&mut node.left, key, value, cmp)?,
        Ordering::Greater => insert(&mut node.right, key, value, cmp)?,
        Ordering::Equal => return Ok(Some(mem::replace(&mut node.value, value))),
    };
    rebalance(link);
    Ok(old_value)
}

/// Removes `key` from below `link`.
/// Returns the removed entry if the key was present.
pub(crate) fn remove<K, V, C>(
    link: &mut Link<K, V>,
    key: &K,
    cmp: &C,
) -> Result<Option<(K, V)>, ComparisonError>
where
    C: Comparator<K> + ?Sized,
{
    let node = match link {
        Some(node) => node,
        None => return Ok(None),
    };
    let removed = match cmp.compare(key, &node.key)? {
        Ordering::Less => remove(&mut node.left, key, cmp)?,
        Ordering::Greater => remove(&mut node.right, key, cmp)?,
        Ordering::Equal => return Ok(unlink(link)),
    };
    rebalance(link);
    Ok(removed)
}

/// Detaches the node in `link` and returns its entry.
fn unlink<K, V>(link: &mut Link<K, V>) -> Option<(K, V)> {
    let node = link.as_mut()?;
    if node.left.is_some() && node.right.is_some() {
        // Promote the in-order successor into this node, then fix the right spine.
        let (key, value) = take_min(&mut node.right)?;
        trace!("promoted in-order successor into node of height {}", node.height);
        let key = mem::replace(&mut node.key, key);
        let value = mem::replace(&mut node.value, value);
        rebalance(link);
        return Some((key, value));
    }

    // Stem or leaf: the only child (if any) takes its place and is already balanced.
    let mut node = link.take()?;
    *link = node.left.take().or_else(|| node.right.take());
    Some(node.into_entry())
}

/// Removes the leftmost node below `link` and returns its entry.
pub(crate) fn take_min<K, V>(link: &mut Link<K, V>) -> Option<(K, V)> {
    let node = link.as_mut()?;
    if node.left.is_some() {
        let entry = take_min(&mut node.left);
        rebalance(link);
        return entry;
    }
    let mut node = link.take()?;
    *link = node.right.take();
    Some(node.into_entry())
}

/// Removes the rightmost node below `link` and returns its entry.
pub(crate) fn take_max<K, V>(link: &mut Link<K, V>) -> Option<(K, V)> {
    let node = link.as_mut()?;
    if node.right.is_some() {
        let entry = take_max(&mut node.right);
        rebalance(link);
        return entry;
    }
    let mut node = link.take()?;
    *link = node.left.take();
    Some(node.into_entry())
}

/// Promotes the right child of the node in `link`.
fn rotate_left<K, V>(link: &mut Link<K, V>) {
    if let Some(mut node) = link.take() {
        match node.right.take() {
            Some(mut right) => {
                node.right = right.left.take();
                node.adjust_height();
                right.left = Some(node);
                right.adjust_height();
                *link = Some(right);
            }
            None => *link = Some(node),
        }
    }
}

/// Promotes the left child of the node in `link`.
fn rotate_right<K, V>(link: &mut Link<K, V>) {
    if let Some(mut node) = link.take() {
        match node.left.take() {
            Some(mut left) => {
                node.left = left.right.take();
                node.adjust_height();
                left.right = Some(node);
                left.adjust_height();
                *link = Some(left);
            }
            None => *link = Some(node),
        }
    }
}

/// Restores the AVL condition at the node in `link` if necessary and adjusts its height.
/// The children must already be balanced and differ in height by at most two, which
/// always holds after a single insert or remove below this node.
fn rebalance<K, V>(link: &mut Link<K, V>) {
    let Some(node) = link.as_mut() else {
        return;
    };
    node.adjust_height();
    match node.balance_factor() {
        2 => {
            // Left-right case: straighten the left child first.
            if node.left.as_ref().map_or(false, |left| left.balance_factor() < 0) {
                rotate_left(&mut node.left);
            }
            trace!("rotate right at height {}", node.height);
            rotate_right(link);
        }
        -2 => {
            // Right-left case: straighten the right child first.
            if node.right.as_ref().map_or(false, |right| right.balance_factor() > 0) {
                rotate_right(&mut node.right);
            }
            trace!("rotate left at height {}", node.height);
            rotate_left(link);
        }
        factor => debug_assert!(factor.abs() <= 1, "balance factor {factor} out of range"),
    }
}
