//! Sideways debug rendering of the tree structure.

use std::fmt;

use super::node::Link;

/// Displays a map's tree structure for debugging.
///
/// Entries are printed in key order, one per line, each key indented by its depth:
///
/// ```text
///     1
/// 2
///     3
/// ```
///
/// This struct is created by [`AvlTreeMap::pretty`](crate::AvlTreeMap::pretty).
pub struct Pretty<'a, K, V> {
    root: &'a Link<K, V>,
}

const INDENT: &str = "    ";

impl<'a, K, V> Pretty<'a, K, V> {
    pub(super) fn new(root: &'a Link<K, V>) -> Self {
        Self { root }
    }
}

impl<K: fmt::Display, V> fmt::Display for Pretty<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_subtree<K: fmt::Display, V>(
            f: &mut fmt::Formatter<'_>,
            link: &Link<K, V>,
            depth: usize,
        ) -> fmt::Result {
            if let Some(node) = link {
                write_subtree(f, &node.left, depth + 1)?;
                writeln!(f, "{}{}", INDENT.repeat(depth), node.key)?;
                write_subtree(f, &node.right, depth + 1)?;
            }
            Ok(())
        }
        write_subtree(f, self.root, 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::AvlTreeMap;

    #[test]
    fn test_pretty() {
        let mut map = AvlTreeMap::new();
        for key in [2, 1, 3, 4] {
            map.insert(key, ()).unwrap();
        }
        assert_eq!(
            map.pretty().to_string(),
            "    1\n2\n    3\n        4\n"
        );

        let empty = AvlTreeMap::<i32, ()>::new();
        assert_eq!(empty.pretty().to_string(), "");
    }
}
