use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use crate::config::{CheckedConfig, ConfigT, DebugConfig, ReleaseConfig};
use crate::debug;
use crate::error::{DuplicateKey, KeyNotFound};
use crate::pool::{NodeIdx, NodePool};
use crate::Key;

/// AVL tree over unique integer keys.
///
/// Nodes live in a [`NodePool`] and refer to each other by [`NodeIdx`]. Every node keeps
/// a link to its parent so that height repair, rebalancing and successor lookup can walk
/// upward without recursion.
pub struct BalancedTree<Config: ConfigT> {
    pub(crate) pool: NodePool,
    pub(crate) root: Option<NodeIdx>,
    pub(crate) debug_writer: Option<RefCell<Box<dyn fmt::Write>>>,
    _config: PhantomData<Config>,
}

impl<Config: ConfigT> BalancedTree<Config> {
    pub fn new() -> Self {
        Self::new_with_debug_writer::<String>(None)
    }

    pub fn new_with_debug_writer<Writer: fmt::Write + 'static>(
        debug_writer: Option<Writer>,
    ) -> Self {
        BalancedTree {
            pool: NodePool::new(),
            root: None,
            debug_writer: debug_writer
                .map(|w| RefCell::new(Box::new(w) as Box<dyn fmt::Write>)),
            _config: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the root, 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.pool.height_of(self.root)
    }

    pub fn clear(&mut self) {
        self.pool.clear();
        self.root = None;
    }

    pub fn contains(&self, key: Key) -> bool {
        self.find(key).is_some()
    }

    pub fn insert(&mut self, key: Key) -> Result<(), DuplicateKey> {
        let Some(root) = self.root else {
            debug!(self.debug_writer, "insert {} as root", key);
            self.root = Some(self.pool.alloc(key, None));
            self.check_invariants_after("inserting", key);
            return Ok(());
        };

        let parent = self.locate(root, key);
        let parent_key = self.pool[parent].key;
        if parent_key == key {
            debug!(self.debug_writer, "reject duplicate {}", key);
            return Err(DuplicateKey(key));
        }

        debug!(self.debug_writer, "insert {} under {}", key, parent_key);
        let idx = self.pool.alloc(key, Some(parent));
        if parent_key > key {
            self.pool[parent].left = Some(idx);
        } else {
            self.pool[parent].right = Some(idx);
        }

        // rotations read heights, so they must be right before rebalancing starts
        self.adjust_height(idx);
        self.rebalance(parent);
        self.check_invariants_after("inserting", key);
        Ok(())
    }

    pub fn remove(&mut self, key: Key) -> Result<(), KeyNotFound> {
        let Some(target) = self.find(key) else {
            debug!(self.debug_writer, "remove missing {}", key);
            return Err(KeyNotFound(key));
        };

        debug!(self.debug_writer, "remove {}", key);
        if let Some(anchor) = self.unlink(target) {
            self.adjust_height(anchor);
            self.rebalance(anchor);
        }
        self.pool.release(target);
        self.check_invariants_after("removing", key);
        Ok(())
    }

    /// Walks down from `start` toward `key`. Returns the node holding `key`, or the last
    /// node visited, which is where a node for `key` would be attached.
    pub(crate) fn locate(&self, start: NodeIdx, key: Key) -> NodeIdx {
        let mut cur = start;
        loop {
            let node = &self.pool[cur];
            let next = match key.cmp(&node.key) {
                Ordering::Equal => return cur,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
            match next {
                Some(next) => cur = next,
                None => return cur,
            }
        }
    }

    pub(crate) fn find(&self, key: Key) -> Option<NodeIdx> {
        self.root
            .map(|root| self.locate(root, key))
            .filter(|&idx| self.pool[idx].key == key)
    }

    /// Detaches `target` from the tree, moving its in-order successor into its slot when
    /// it has a right subtree. Returns the lowest node whose subtree changed shape, i.e.
    /// where height repair and rebalancing have to start. `target` itself stays allocated.
    fn unlink(&mut self, target: NodeIdx) -> Option<NodeIdx> {
        let parent = self.pool[target].parent;
        let left = self.pool[target].left;

        let Some(right) = self.pool[target].right else {
            self.replace_child(parent, target, left);
            if let Some(left) = left {
                self.pool[left].parent = parent;
            }
            return parent;
        };

        let successor = self.pool.leftmost(right);
        debug!(
            self.debug_writer,
            "splice {} into slot of {}",
            self.pool[successor].key,
            self.pool[target].key
        );

        let anchor = if successor == right {
            successor
        } else {
            let successor_parent = self.pool[successor]
                .parent
                .expect("successor below the right child has a parent");
            let successor_right = self.pool[successor].right;
            self.pool[successor_parent].left = successor_right;
            if let Some(successor_right) = successor_right {
                self.pool[successor_right].parent = Some(successor_parent);
            }
            self.pool[successor].right = Some(right);
            self.pool[right].parent = Some(successor);
            successor_parent
        };

        self.replace_child(parent, target, Some(successor));
        self.pool[successor].parent = parent;
        self.pool[successor].left = left;
        if let Some(left) = left {
            self.pool[left].parent = Some(successor);
        }
        Some(anchor)
    }

    fn check_invariants_after(&self, action: &str, key: Key) {
        if Config::CHECK_INVARIANTS {
            if let Err(violation) = self.check_invariants() {
                panic!("{violation} after {action} {key}");
            }
        }
    }
}

impl<Config: ConfigT> std::default::Default for BalancedTree<Config> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Config: ConfigT> fmt::Debug for BalancedTree<Config> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Duplicates are skipped.
impl<Config: ConfigT> Extend<Key> for BalancedTree<Config> {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, keys: I) {
        for key in keys {
            let _ = self.insert(key);
        }
    }
}

impl<Config: ConfigT> FromIterator<Key> for BalancedTree<Config> {
    fn from_iter<I: IntoIterator<Item = Key>>(keys: I) -> Self {
        let mut tree = Self::new();
        tree.extend(keys);
        tree
    }
}

pub type Default = BalancedTree<ReleaseConfig>;
pub type Checked = BalancedTree<CheckedConfig>;
pub type DefaultDebug = BalancedTree<DebugConfig>;
