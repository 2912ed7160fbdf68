use std::iter::FusedIterator;

use crate::avl_tree::BalancedTree;
use crate::config::ConfigT;
use crate::error::KeyNotFound;
use crate::pool::{NodeIdx, NodePool};
use crate::Key;

impl NodePool {
    pub fn leftmost(&self, mut idx: NodeIdx) -> NodeIdx {
        while let Some(l) = self[idx].left {
            idx = l;
        }
        idx
    }

    /// Next node in ascending key order, `None` if `idx` holds the maximum.
    pub fn successor(&self, idx: NodeIdx) -> Option<NodeIdx> {
        if let Some(r) = self[idx].right {
            return Some(self.leftmost(r));
        }
        // climb until we leave a left subtree
        let mut cur = idx;
        while let Some(p) = self[cur].parent {
            if self[p].left == Some(cur) {
                return Some(p);
            }
            cur = p;
        }
        None
    }
}

/// Ascending iterator over the keys of a [`BalancedTree`].
pub struct Iter<'a> {
    pool: &'a NodePool,
    next: Option<NodeIdx>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        let idx = self.next?;
        self.next = self.pool.successor(idx);
        self.remaining -= 1;
        Some(self.pool[idx].key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<Config: ConfigT> BalancedTree<Config> {
    /// Keys in ascending order. Each call starts over from the smallest key.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            pool: &self.pool,
            next: self.root.map(|root| self.pool.leftmost(root)),
            remaining: self.pool.len(),
        }
    }

    pub fn first(&self) -> Option<Key> {
        self.root.map(|root| self.pool[self.pool.leftmost(root)].key)
    }

    /// Smallest stored key greater than `key`, which must itself be stored.
    pub fn successor(&self, key: Key) -> Result<Option<Key>, KeyNotFound> {
        let idx = self.find(key).ok_or(KeyNotFound(key))?;
        Ok(self.pool.successor(idx).map(|next| self.pool[next].key))
    }
}

impl<'a, Config: ConfigT> IntoIterator for &'a BalancedTree<Config> {
    type Item = Key;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::avl_tree::Checked;
    use crate::error::KeyNotFound;

    #[test]
    fn successor_walks_up_and_down() {
        let tree: Checked = [50, 30, 70, 20, 40, 60, 80].into_iter().collect();
        assert_eq!(tree.successor(20), Ok(Some(30)));
        assert_eq!(tree.successor(30), Ok(Some(40)));
        assert_eq!(tree.successor(40), Ok(Some(50)));
        assert_eq!(tree.successor(50), Ok(Some(60)));
        assert_eq!(tree.successor(80), Ok(None));
        assert_eq!(tree.successor(45), Err(KeyNotFound(45)));
    }

    #[test]
    fn iter_is_exact_and_restartable() {
        let tree: Checked = (1..=7).rev().collect();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 7);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.len(), 6);
        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!((&tree).into_iter().sum::<i64>(), 28);
        assert_eq!(tree.first(), Some(1));
    }

    #[test]
    fn empty_tree_iterates_nothing() {
        let tree = Checked::new();
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.first(), None);
        assert_eq!(tree.successor(1), Err(KeyNotFound(1)));
    }
}
