//! Ordered collections built on binary search trees.
//!
//! The [`tree`] module provides a plain binary search tree and an AVL tree sharing one engine.
//! The [`set`] module builds an ordered set with set algebra on top of the AVL tree.

mod error;
pub mod set;
pub mod tree;

pub use self::error::{Error, Result};
