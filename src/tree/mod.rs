//! Binary search trees sharing one engine, parameterized by a balancing policy.
//!
//! `Bst` never restructures itself, while `AvlTree` keeps the heights of the two child subtrees
//! of any node within one of each other by rotating after every insertion and removal.

mod balance;
mod iter;
mod link;
mod node;
mod ordered;
mod path;

pub use self::balance::{Avl, Balance, Unbalanced};
pub use self::iter::{InOrder, IntoIter, PostOrder, PreOrder, ReverseInOrder};
pub use self::ordered::OrderedTree;

/// A plain binary search tree.
pub type Bst<T> = OrderedTree<T, Unbalanced>;

/// A height-balanced binary search tree.
pub type AvlTree<T> = OrderedTree<T, Avl>;
