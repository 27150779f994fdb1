use crate::tree::link::{self, Link};
use std::cmp;

/// A struct representing an internal node of a binary search tree.
///
/// The cached `height` follows the convention that an empty link has height `-1`, so a leaf has
/// height `0`.
pub struct Node<T> {
    pub value: T,
    pub height: isize,
    pub left: Link<T>,
    pub right: Link<T>,
}

impl<T> Node<T> {
    pub fn new(value: T) -> Self {
        Node {
            value,
            height: 0,
            left: None,
            right: None,
        }
    }

    pub fn update(&mut self) {
        let Node {
            ref mut height,
            ref left,
            ref right,
            ..
        } = self;
        *height = cmp::max(link::height(left), link::height(right)) + 1;
    }

    pub fn balance(&self) -> isize {
        link::height(&self.left) - link::height(&self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::Node;

    #[test]
    fn test_new_is_leaf() {
        let node = Node::new(1);
        assert_eq!(node.height, 0);
        assert_eq!(node.balance(), 0);
    }

    #[test]
    fn test_update() {
        let mut node = Node::new(2);
        node.left = Some(Box::new(Node::new(1)));
        node.update();
        assert_eq!(node.height, 1);
        assert_eq!(node.balance(), 1);
    }
}
