use std::cmp::max;

use crate::avl_tree::BalancedTree;
use crate::config::ConfigT;
use crate::error::InvariantViolation;
use crate::pool::NodeIdx;
use crate::Key;

impl<Config: ConfigT> BalancedTree<Config> {
    /// Recomputes order bounds, heights, balance factors, parent links and the node
    /// count from scratch, without trusting any stored height.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let reachable = match self.root {
            None => 0,
            Some(root) => {
                if self.pool[root].parent.is_some() {
                    return Err(InvariantViolation::RootHasParent(self.pool[root].key));
                }
                self.check_subtree(root, None, None)?.1
            }
        };
        if reachable != self.pool.len() {
            return Err(InvariantViolation::WrongCount {
                counted: self.pool.len(),
                reachable,
            });
        }
        Ok(())
    }

    /// Returns the recomputed height and the number of nodes below and including `idx`.
    fn check_subtree(
        &self,
        idx: NodeIdx,
        lower: Option<Key>,
        upper: Option<Key>,
    ) -> Result<(usize, usize), InvariantViolation> {
        let node = &self.pool[idx];
        let key = node.key;
        if lower.is_some_and(|l| key <= l) || upper.is_some_and(|u| key >= u) {
            return Err(InvariantViolation::OutOfOrder { key, lower, upper });
        }

        let mut heights = [0usize; 2];
        let mut count = 1;
        let children = [(node.left, lower, Some(key)), (node.right, Some(key), upper)];
        for (slot, (child, lo, hi)) in children.into_iter().enumerate() {
            if let Some(child) = child {
                if self.pool[child].parent != Some(idx) {
                    return Err(InvariantViolation::BrokenParentLink {
                        parent: key,
                        child: self.pool[child].key,
                    });
                }
                let (height, n) = self.check_subtree(child, lo, hi)?;
                heights[slot] = height;
                count += n;
            }
        }

        let actual = max(heights[0], heights[1]) + 1;
        if node.height != actual {
            return Err(InvariantViolation::WrongHeight {
                key,
                stored: node.height,
                actual,
            });
        }
        let balance = heights[0] as isize - heights[1] as isize;
        if balance.abs() > 1 {
            return Err(InvariantViolation::Unbalanced { key, balance });
        }
        Ok((actual, count))
    }
}

#[cfg(test)]
mod tests {
    use crate::avl_tree::Default;
    use crate::error::InvariantViolation;

    fn sample() -> Default {
        [4, 2, 6, 1, 3].into_iter().collect()
    }

    #[test]
    fn healthy_tree_passes() {
        assert_eq!(sample().check_invariants(), Ok(()));
        assert_eq!(Default::new().check_invariants(), Ok(()));
    }

    #[test]
    fn detects_stale_height() {
        let mut tree = sample();
        let idx = tree.find(2).unwrap();
        tree.pool[idx].height = 1;
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::WrongHeight {
                key: 2,
                stored: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn detects_order_violation() {
        let mut tree = sample();
        let idx = tree.find(3).unwrap();
        tree.pool[idx].key = 5;
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::OutOfOrder {
                key: 5,
                lower: Some(2),
                upper: Some(4)
            })
        );
    }

    #[test]
    fn detects_broken_parent_link() {
        let mut tree = sample();
        let idx = tree.find(6).unwrap();
        tree.pool[idx].parent = None;
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::BrokenParentLink {
                parent: 4,
                child: 6
            })
        );
    }

    #[test]
    fn detects_imbalance() {
        let mut tree = sample();
        let six = tree.find(6).unwrap();
        let root = tree.root.unwrap();
        // drop the right subtree; heights stay consistent but the root tips over
        tree.pool[root].right = None;
        tree.pool.release(six);
        tree.pool[root].height = 3;
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::Unbalanced { key: 4, balance: 2 })
        );
    }

    #[test]
    fn detects_unreachable_nodes() {
        let mut tree = sample();
        tree.pool.alloc(100, None);
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::WrongCount {
                counted: 6,
                reachable: 5
            })
        );
    }
}
