pub mod avl_tree;
mod balance;
pub mod config;
pub mod error;
pub mod invariants;
pub mod pool;
pub mod trace_writer;
pub mod traverse;

/// Keys stored in a [`avl_tree::BalancedTree`].
pub type Key = i64;
