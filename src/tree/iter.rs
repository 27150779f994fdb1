use crate::tree::link::{self, Link};
use crate::tree::node::Node;

/// An iterator over an `OrderedTree` in ascending order.
///
/// This iterator traverses the elements of the tree in-order and yields immutable references.
pub struct InOrder<'a, T>
where
    T: 'a,
{
    current: &'a Link<T>,
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(root: &'a Link<T>, len: usize) -> Self {
        InOrder {
            current: root,
            stack: Vec::new(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for InOrder<'a, T> where T: 'a {}

/// An iterator over an `OrderedTree` in descending order.
///
/// This iterator traverses the elements of the tree in reverse in-order and yields immutable
/// references.
pub struct ReverseInOrder<'a, T>
where
    T: 'a,
{
    current: &'a Link<T>,
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> ReverseInOrder<'a, T> {
    pub(crate) fn new(root: &'a Link<T>, len: usize) -> Self {
        ReverseInOrder {
            current: root,
            stack: Vec::new(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for ReverseInOrder<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.current = &node.right;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.left;
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for ReverseInOrder<'a, T> where T: 'a {}

/// An iterator over an `OrderedTree` that visits every node before its subtrees.
pub struct PreOrder<'a, T>
where
    T: 'a,
{
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(root: &'a Link<T>, len: usize) -> Self {
        PreOrder {
            stack: root.iter().map(|node| &**node).collect(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.stack.pop().map(|node| {
            if let Some(right) = &node.right {
                self.stack.push(right);
            }
            if let Some(left) = &node.left {
                self.stack.push(left);
            }
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for PreOrder<'a, T> where T: 'a {}

/// An iterator over an `OrderedTree` that visits every node after its subtrees.
pub struct PostOrder<'a, T>
where
    T: 'a,
{
    // the flag is set once the subtrees of the node have been scheduled
    stack: Vec<(&'a Node<T>, bool)>,
    remaining: usize,
}

impl<'a, T> PostOrder<'a, T> {
    pub(crate) fn new(root: &'a Link<T>, len: usize) -> Self {
        PostOrder {
            stack: root.iter().map(|node| (&**node, false)).collect(),
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                self.remaining -= 1;
                return Some(&node.value);
            }
            self.stack.push((node, true));
            if let Some(right) = &node.right {
                self.stack.push((&**right, false));
            }
            if let Some(left) = &node.left {
                self.stack.push((&**left, false));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for PostOrder<'a, T> where T: 'a {}

/// An owning iterator for `OrderedTree`.
///
/// This iterator traverses the elements of the tree in-order and yields owned values.
pub struct IntoIter<T> {
    current: Link<T>,
    stack: Vec<Node<T>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>, len: usize) -> Self {
        IntoIter {
            current: root,
            stack: Vec::new(),
            remaining: len,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { value, right, .. } = node;
            self.current = right;
            self.remaining -= 1;
            value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        link::release(self.current.take());
        for node in self.stack.drain(..) {
            link::release(node.right);
        }
    }
}
