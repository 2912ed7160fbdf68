use thiserror::Error;

use crate::Key;

/// Returned by `insert` when the key is already stored. The tree is left untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("key {0} is already present")]
pub struct DuplicateKey(pub Key);

/// Returned by `remove` and `successor` when the key is not stored.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("key {0} is not present")]
pub struct KeyNotFound(pub Key);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("root {0} has a parent")]
    RootHasParent(Key),
    #[error("key {key} lies outside ({lower:?}, {upper:?})")]
    OutOfOrder {
        key: Key,
        lower: Option<Key>,
        upper: Option<Key>,
    },
    #[error("node {key} has balance factor {balance}")]
    Unbalanced { key: Key, balance: isize },
    #[error("node {key} stores height {stored}, its subtrees give {actual}")]
    WrongHeight {
        key: Key,
        stored: usize,
        actual: usize,
    },
    #[error("child {child} of {parent} does not point back at it")]
    BrokenParentLink { parent: Key, child: Key },
    #[error("tree counts {counted} nodes but {reachable} are reachable")]
    WrongCount { counted: usize, reachable: usize },
}
