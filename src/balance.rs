use std::cmp::max;

use crate::avl_tree::BalancedTree;
use crate::config::ConfigT;
use crate::debug;
use crate::pool::NodeIdx;

impl<Config: ConfigT> BalancedTree<Config> {
    fn update_height(&mut self, idx: NodeIdx) {
        let lh = self.pool.height_of(self.pool[idx].left);
        let rh = self.pool.height_of(self.pool[idx].right);
        self.pool[idx].height = max(lh, rh) + 1;
    }

    /// Recomputes the height of `idx` and of every ancestor up to the root.
    pub(crate) fn adjust_height(&mut self, idx: NodeIdx) {
        let mut cur = Some(idx);
        while let Some(i) = cur {
            self.update_height(i);
            cur = self.pool[i].parent;
        }
    }

    /// Restores balance and heights from `start` up to the root, one node at a time.
    pub(crate) fn rebalance(&mut self, start: NodeIdx) {
        let mut cur = Some(start);
        while let Some(idx) = cur {
            // a rotation moves `idx` below its replacement, so take the parent first
            let parent = self.pool[idx].parent;
            let lh = self.pool.height_of(self.pool[idx].left);
            let rh = self.pool.height_of(self.pool[idx].right);
            if lh > rh + 1 {
                self.rebalance_right(idx);
            } else if rh > lh + 1 {
                self.rebalance_left(idx);
            }
            self.update_height(idx);
            cur = parent;
        }
    }

    fn rebalance_right(&mut self, idx: NodeIdx) {
        let left = self.pool[idx]
            .left
            .expect("left-heavy node has a left child");
        if self.pool.height_of(self.pool[left].right) > self.pool.height_of(self.pool[left].left) {
            self.rotate_left(left);
        }
        self.rotate_right(idx);
    }

    fn rebalance_left(&mut self, idx: NodeIdx) {
        let right = self.pool[idx]
            .right
            .expect("right-heavy node has a right child");
        if self.pool.height_of(self.pool[right].left) > self.pool.height_of(self.pool[right].right) {
            self.rotate_right(right);
        }
        self.rotate_left(idx);
    }

    /// Lifts the left child of `idx` into its place. Heights of both moved nodes are
    /// recomputed; ancestors are left to the caller.
    pub(crate) fn rotate_right(&mut self, idx: NodeIdx) {
        debug!(self.debug_writer, "rotate right at {}", self.pool[idx].key);
        let parent = self.pool[idx].parent;
        let left = self.pool[idx].left.expect("rotate_right on None");
        let left_right = self.pool[left].right;

        self.replace_child(parent, idx, Some(left));
        self.pool[left].parent = parent;
        self.pool[left].right = Some(idx);
        self.pool[idx].parent = Some(left);
        self.pool[idx].left = left_right;
        if let Some(left_right) = left_right {
            self.pool[left_right].parent = Some(idx);
        }

        self.update_height(idx);
        self.update_height(left);
    }

    pub(crate) fn rotate_left(&mut self, idx: NodeIdx) {
        debug!(self.debug_writer, "rotate left at {}", self.pool[idx].key);
        let parent = self.pool[idx].parent;
        let right = self.pool[idx].right.expect("rotate_left on None");
        let right_left = self.pool[right].left;

        self.replace_child(parent, idx, Some(right));
        self.pool[right].parent = parent;
        self.pool[right].left = Some(idx);
        self.pool[idx].parent = Some(right);
        self.pool[idx].right = right_left;
        if let Some(right_left) = right_left {
            self.pool[right_left].parent = Some(idx);
        }

        self.update_height(idx);
        self.update_height(right);
    }

    /// Points whichever slot of `parent` held `old` (the root slot when `parent` is
    /// `None`) at `new`. The parent link of `new` is not touched.
    pub(crate) fn replace_child(
        &mut self,
        parent: Option<NodeIdx>,
        old: NodeIdx,
        new: Option<NodeIdx>,
    ) {
        match parent {
            None => self.root = new,
            Some(p) if self.pool[p].left == Some(old) => self.pool[p].left = new,
            Some(p) => self.pool[p].right = new,
        }
    }
}
