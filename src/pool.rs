use std::ops::{Index, IndexMut};

use crate::Key;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeIdx(usize);

#[derive(Clone, Debug)]
pub struct Node {
    pub key: Key,
    pub height: usize,
    /// Back-link used for upward walks only. Ownership runs through `left`/`right`.
    pub parent: Option<NodeIdx>,
    pub left: Option<NodeIdx>,
    pub right: Option<NodeIdx>,
}

/// Arena owning every node of a tree. Released slots are recycled by later allocations.
#[derive(Clone, Debug)]
pub struct NodePool {
    nodes: Vec<Node>,
    free_list: Vec<NodeIdx>,
}

impl NodePool {
    pub fn new() -> Self {
        NodePool {
            nodes: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub fn alloc(&mut self, key: Key, parent: Option<NodeIdx>) -> NodeIdx {
        let node = Node {
            key,
            height: 1,
            parent,
            left: None,
            right: None,
        };
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx.0] = node;
            idx
        } else {
            let idx = NodeIdx(self.nodes.len());
            self.nodes.push(node);
            idx
        }
    }

    /// The slot must already be unreachable from the tree.
    pub fn release(&mut self, idx: NodeIdx) {
        let node = &mut self.nodes[idx.0];
        node.parent = None;
        node.left = None;
        node.right = None;
        self.free_list.push(idx);
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
    }

    pub fn height_of(&self, idx: Option<NodeIdx>) -> usize {
        idx.map_or(0, |i| self.nodes[i.0].height)
    }
}

impl Default for NodePool {
    fn default() -> Self {
        NodePool::new()
    }
}

impl Index<NodeIdx> for NodePool {
    type Output = Node;

    fn index(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.0]
    }
}

impl IndexMut<NodeIdx> for NodePool {
    fn index_mut(&mut self, idx: NodeIdx) -> &mut Node {
        &mut self.nodes[idx.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_slots_are_reused() {
        let mut pool = NodePool::new();
        let a = pool.alloc(1, None);
        let b = pool.alloc(2, Some(a));
        assert_eq!(pool.len(), 2);
        pool.release(b);
        assert_eq!(pool.len(), 1);
        let c = pool.alloc(3, None);
        assert_eq!(c, b);
        assert_eq!(pool[c].key, 3);
        assert_eq!(pool[c].height, 1);
        assert_eq!(pool[c].parent, None);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn height_of_missing_child_is_zero() {
        let mut pool = NodePool::new();
        let a = pool.alloc(7, None);
        pool[a].height = 3;
        assert_eq!(pool.height_of(None), 0);
        assert_eq!(pool.height_of(Some(a)), 3);
    }
}
