use crate::error::{Error, Result};
use crate::tree::balance::{Avl, Balance};
use crate::tree::iter::{InOrder, IntoIter, PostOrder, PreOrder, ReverseInOrder};
use crate::tree::link::{self, Link};
use log::debug;
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;

/// An ordered collection implemented by a binary search tree with a pluggable balancing policy.
///
/// Every value in the left subtree of a node compares less than the value of the node, and every
/// value in the right subtree compares greater. Values are compared with `PartialOrd`; comparing
/// two values for which `partial_cmp` returns `None` fails with `Error::Comparison` before the
/// tree is modified.
///
/// With the `Avl` policy, the heights of the two child subtrees of any node differ by at most one,
/// so every operation takes logarithmic time. With the `Unbalanced` policy, the shape of the tree
/// depends on the insertion order.
///
/// # Examples
///
/// ```
/// use bs_trees::tree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert(0).unwrap();
/// tree.insert(3).unwrap();
///
/// assert_eq!(tree.len(), 2);
///
/// assert_eq!(tree.min(), Some(&0));
/// assert_eq!(tree.ceil(&2), Ok(Some(&3)));
///
/// assert_eq!(tree.remove(&0), Ok(Some(0)));
/// assert_eq!(tree.remove(&1), Ok(None));
/// ```
pub struct OrderedTree<T, B = Avl> {
    root: Link<T>,
    len: usize,
    frozen: bool,
    balance: PhantomData<B>,
}

impl<T, B> OrderedTree<T, B> {
    /// Constructs a new, empty `OrderedTree<T, B>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::Bst;
    ///
    /// let tree: Bst<u32> = Bst::new();
    /// ```
    pub fn new() -> Self {
        OrderedTree {
            root: None,
            len: 0,
            frozen: false,
            balance: PhantomData,
        }
    }

    /// Returns the number of values in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1).unwrap();
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let tree: AvlTree<u32> = AvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the tree, that is the number of edges on the longest path from the
    /// root to a leaf. Both the empty tree and a tree with a single value have height `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::Bst;
    ///
    /// let tree = Bst::from_values(vec![3, 2, 4, 1]).unwrap();
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn height(&self) -> usize {
        match &self.root {
            Some(node) => node.height as usize,
            None => 0,
        }
    }

    /// Clears the tree, removing all values.
    ///
    /// # Errors
    ///
    /// Returns `Error::Frozen` if the tree is frozen.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1).unwrap();
    /// tree.insert(2).unwrap();
    /// tree.clear().unwrap();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        link::release(self.root.take());
        self.len = 0;
        Ok(())
    }

    /// Makes the tree read-only. Every later mutation fails with `Error::Frozen`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::Error;
    /// use bs_trees::tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1).unwrap();
    /// tree.freeze();
    /// assert!(tree.is_frozen());
    /// assert_eq!(tree.insert(2), Err(Error::Frozen("tree")));
    /// assert!(tree.contains(&1));
    /// ```
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Returns `true` if the tree has been frozen.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Returns the minimum value of the tree. Returns `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let tree = AvlTree::from_values(vec![1, 3]).unwrap();
    /// assert_eq!(tree.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        link::min(&self.root)
    }

    /// Returns the maximum value of the tree. Returns `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let tree = AvlTree::from_values(vec![1, 3]).unwrap();
    /// assert_eq!(tree.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        link::max(&self.root)
    }

    /// Returns an iterator over the tree. The iterator will yield values using in-order
    /// traversal, so values come out in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let tree = AvlTree::from_values(vec![3, 1]).unwrap();
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> InOrder<T> {
        self.iter_inorder()
    }

    /// Returns an iterator yielding values using in-order traversal.
    pub fn iter_inorder(&self) -> InOrder<T> {
        InOrder::new(&self.root, self.len)
    }

    /// Returns an iterator yielding values using pre-order traversal: every value comes before
    /// the values of its subtrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let tree = AvlTree::from_values(vec![1, 2, 3]).unwrap();
    /// assert_eq!(tree.iter_preorder().collect::<Vec<&u32>>(), vec![&2, &1, &3]);
    /// ```
    pub fn iter_preorder(&self) -> PreOrder<T> {
        PreOrder::new(&self.root, self.len)
    }

    /// Returns an iterator yielding values using post-order traversal: every value comes after
    /// the values of its subtrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let tree = AvlTree::from_values(vec![1, 2, 3]).unwrap();
    /// assert_eq!(tree.iter_postorder().collect::<Vec<&u32>>(), vec![&1, &3, &2]);
    /// ```
    pub fn iter_postorder(&self) -> PostOrder<T> {
        PostOrder::new(&self.root, self.len)
    }

    /// Returns an iterator yielding values in descending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let tree = AvlTree::from_values(vec![2, 1, 3]).unwrap();
    /// assert_eq!(tree.iter_reverse().collect::<Vec<&u32>>(), vec![&3, &2, &1]);
    /// ```
    pub fn iter_reverse(&self) -> ReverseInOrder<T> {
        ReverseInOrder::new(&self.root, self.len)
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.frozen {
            debug!("rejected mutation of a frozen tree holding {} values", self.len);
            return Err(Error::Frozen("tree"));
        }
        Ok(())
    }
}

impl<T, B> OrderedTree<T, B>
where
    T: PartialOrd,
    B: Balance,
{
    /// Constructs a tree holding the given values, inserted in iteration order.
    ///
    /// # Errors
    ///
    /// Returns `Error::Comparison` if two of the values cannot be compared.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let tree = AvlTree::from_values(1..=10).unwrap();
    /// assert_eq!(tree.len(), 10);
    /// assert!(AvlTree::from_values(vec![1.0, f64::NAN]).is_err());
    /// ```
    pub fn from_values<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::new();
        tree.insert_each(values)?;
        Ok(tree)
    }

    /// Inserts a value into the tree and returns a reference to the stored value. If an equal
    /// value already exists in the tree, it is replaced and the length of the tree is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Error::Frozen` if the tree is frozen, and `Error::Comparison` if the value cannot
    /// be compared with a stored value. The tree is left untouched in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.insert(1), Ok(&1));
    /// assert_eq!(tree.insert(1), Ok(&1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> Result<&T> {
        self.ensure_mutable()?;
        let insertion = link::insert::<T, B>(&mut self.root, value)?;
        if insertion.created {
            self.len += 1;
        }
        match link::follow(&self.root, &insertion.path) {
            Some(value) => Ok(value),
            None => unreachable!(),
        }
    }

    /// Inserts every value of an iterator. Values inserted before a failure stay in the tree.
    ///
    /// # Errors
    ///
    /// Returns `Error::Frozen` if the tree is frozen, and `Error::Comparison` on the first value
    /// that cannot be compared with a stored value.
    pub fn insert_each<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.ensure_mutable()?;
        for value in values {
            self.insert(value)?;
        }
        Ok(())
    }

    /// Removes a value from the tree. If the value exists in the tree, it will return the
    /// removed value. Otherwise it will return `None`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Frozen` if the tree is frozen, and `Error::Comparison` if the key cannot
    /// be compared with a stored value. The tree is left untouched in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1).unwrap();
    /// assert_eq!(tree.remove(&1), Ok(Some(1)));
    /// assert_eq!(tree.remove(&1), Ok(None));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<Option<T>>
    where
        T: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        self.ensure_mutable()?;
        let removed = link::remove::<T, Q, B>(&mut self.root, key)?;
        if removed.is_some() {
            self.len -= 1;
        }
        Ok(removed)
    }

    /// Removes every key of an iterator from the tree. Keys removed before a failure stay
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Frozen` if the tree is frozen, and `Error::Comparison` on the first key
    /// that cannot be compared with a stored value.
    pub fn remove_each<'a, I, Q>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Q>,
        T: Borrow<Q>,
        Q: 'a + PartialOrd + ?Sized,
    {
        self.ensure_mutable()?;
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }

    /// Returns a reference to the stored value equal to `key`, or `None` if there is no such
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `Error::Comparison` if the key cannot be compared with a stored value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(String::from("a")).unwrap();
    /// assert_eq!(tree.get("a"), Ok(Some(&String::from("a"))));
    /// assert_eq!(tree.get("b"), Ok(None));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Result<Option<&T>>
    where
        T: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        link::get(&self.root, key)
    }

    /// Checks if a value equal to `key` exists in the tree. A key that cannot be compared with
    /// the stored values is reported as absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1.0).unwrap();
    /// assert!(tree.contains(&1.0));
    /// assert!(!tree.contains(&0.0));
    /// assert!(!tree.contains(&f64::NAN));
    /// ```
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        match self.get(key) {
            Ok(value) => value.is_some(),
            Err(_) => false,
        }
    }

    /// Returns a value in the tree that is greater than or equal to a particular key. Returns
    /// `None` if such a value does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::Comparison` if the key cannot be compared with a stored value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1).unwrap();
    /// assert_eq!(tree.ceil(&0), Ok(Some(&1)));
    /// assert_eq!(tree.ceil(&2), Ok(None));
    /// ```
    pub fn ceil<Q>(&self, key: &Q) -> Result<Option<&T>>
    where
        T: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        link::ceil(&self.root, key)
    }

    /// Returns a value in the tree that is less than or equal to a particular key. Returns `None`
    /// if such a value does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::Comparison` if the key cannot be compared with a stored value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1).unwrap();
    /// assert_eq!(tree.floor(&0), Ok(None));
    /// assert_eq!(tree.floor(&2), Ok(Some(&1)));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Result<Option<&T>>
    where
        T: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        link::floor(&self.root, key)
    }

    /// Replaces the contents of the tree with a copy of `other`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Frozen` if the tree is frozen.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::tree::AvlTree;
    ///
    /// let mut tree = AvlTree::from_values(vec![1, 2]).unwrap();
    /// let other = AvlTree::from_values(vec![3]).unwrap();
    /// tree.replace(&other).unwrap();
    /// assert_eq!(tree, other);
    /// ```
    pub fn replace(&mut self, other: &Self) -> Result<()>
    where
        T: Clone,
    {
        self.ensure_mutable()?;
        link::release(mem::replace(&mut self.root, link::duplicate(&other.root)));
        self.len = other.len;
        Ok(())
    }
}

impl<T, B> Drop for OrderedTree<T, B> {
    fn drop(&mut self) {
        link::release(self.root.take());
    }
}

impl<T, B> Clone for OrderedTree<T, B>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        OrderedTree {
            root: link::duplicate(&self.root),
            len: self.len,
            frozen: self.frozen,
            balance: PhantomData,
        }
    }
}

impl<T, B> Default for OrderedTree<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B> fmt::Debug for OrderedTree<T, B>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, B> PartialEq for OrderedTree<T, B>
where
    T: PartialOrd,
    B: Balance,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && other.iter().all(|value| self.contains(value))
    }
}

impl<T, B> Eq for OrderedTree<T, B>
where
    T: Ord,
    B: Balance,
{
}

impl<T, B> IntoIterator for OrderedTree<T, B> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take(), self.len)
    }
}

impl<'a, T, B> IntoIterator for &'a OrderedTree<T, B>
where
    T: 'a,
{
    type Item = &'a T;
    type IntoIter = InOrder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// # Panics
///
/// Panics if the tree is frozen.
impl<T, B> Extend<T> for OrderedTree<T, B>
where
    T: Ord,
    B: Balance,
{
    fn extend<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        if let Err(err) = self.insert_each(values) {
            panic!("cannot extend tree: {}", err);
        }
    }
}

impl<T, B> FromIterator<T> for OrderedTree<T, B>
where
    T: Ord,
    B: Balance,
{
    fn from_iter<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::new();
        tree.extend(values);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::OrderedTree;
    use crate::error::Error;
    use crate::tree::balance::{Avl, Balance, Unbalanced};
    use crate::tree::link::Link;
    use rand::Rng;
    use std::cmp::{self, Ordering};

    type AvlTree<T> = OrderedTree<T, Avl>;
    type Bst<T> = OrderedTree<T, Unbalanced>;

    const OBJECTS: &str = "gdkbeilacfhjm";

    #[derive(Debug)]
    struct Keyed {
        key: u32,
        tag: &'static str,
    }

    impl PartialEq for Keyed {
        fn eq(&self, other: &Keyed) -> bool {
            self.key == other.key
        }
    }

    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Keyed) -> Option<Ordering> {
            self.key.partial_cmp(&other.key)
        }
    }

    fn check_link<T: PartialOrd>(link: &Link<T>, balanced: bool) -> isize {
        match link {
            None => -1,
            Some(node) => {
                let left = check_link(&node.left, balanced);
                let right = check_link(&node.right, balanced);
                assert_eq!(node.height, cmp::max(left, right) + 1);
                if balanced {
                    assert!((left - right).abs() <= 1, "balance factor {}", left - right);
                }
                node.height
            },
        }
    }

    fn check<T: PartialOrd, B: Balance>(tree: &OrderedTree<T, B>, balanced: bool) {
        check_link(&tree.root, balanced);
        let values: Vec<&T> = tree.iter().collect();
        assert_eq!(values.len(), tree.len());
        assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
    }

    fn root<T: Copy, B>(tree: &OrderedTree<T, B>) -> Option<T> {
        tree.root.as_ref().map(|node| node.value)
    }

    fn letters(tree: impl Iterator<Item = char>) -> String {
        tree.collect()
    }

    #[test]
    fn test_len_empty() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_height_empty() {
        let tree: Bst<u32> = Bst::new();
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_min_max_empty() {
        let tree: AvlTree<u32> = AvlTree::new();
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut tree = AvlTree::new();
        assert_eq!(tree.insert(1), Ok(&1));
        assert!(tree.contains(&1));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_insert_replace() {
        let mut tree = AvlTree::new();
        for _ in 0..10 {
            assert_eq!(tree.insert(1), Ok(&1));
        }
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_insert_replaces_equal_value() {
        let mut tree = AvlTree::new();
        tree.insert(Keyed { key: 1, tag: "old" }).unwrap();
        let stored = tree.insert(Keyed { key: 1, tag: "new" }).unwrap();
        assert_eq!(stored.tag, "new");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(&Keyed { key: 1, tag: "" }).unwrap().map(|v| v.tag), Some("new"));
    }

    #[test]
    fn test_insert_returns_value_moved_by_rotation() {
        let mut tree = AvlTree::new();
        tree.insert(Keyed { key: 3, tag: "c" }).unwrap();
        tree.insert(Keyed { key: 1, tag: "a" }).unwrap();
        let stored = tree.insert(Keyed { key: 2, tag: "b" }).unwrap();
        assert_eq!((stored.key, stored.tag), (2, "b"));
        assert_eq!(tree.root.as_ref().map(|node| node.value.key), Some(2));
    }

    #[test]
    fn test_rotate_left_on_insert() {
        let tree = AvlTree::from_values(vec![1, 2, 3]).unwrap();
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
        assert_eq!(root(&tree), Some(2));
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.iter_preorder().collect::<Vec<&u32>>(), vec![&2, &1, &3]);
    }

    #[test]
    fn test_rotate_right_on_insert() {
        let tree = AvlTree::from_values(vec![3, 2, 1]).unwrap();
        assert_eq!(root(&tree), Some(2));
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.iter_preorder().collect::<Vec<&u32>>(), vec![&2, &1, &3]);
    }

    #[test]
    fn test_double_rotations_on_insert() {
        for values in &[vec![3, 1, 2], vec![1, 3, 2]] {
            let tree = AvlTree::from_values(values.clone()).unwrap();
            assert_eq!(root(&tree), Some(2));
            assert_eq!(tree.height(), 1);
            assert_eq!(tree.iter_preorder().collect::<Vec<&u32>>(), vec![&2, &1, &3]);
        }
    }

    #[test]
    fn test_bst_keeps_insertion_shape() {
        let tree = Bst::from_values(vec![1, 2, 3]).unwrap();
        assert_eq!(root(&tree), Some(1));
        assert_eq!(tree.height(), 2);
        check(&tree, false);
    }

    #[test]
    fn test_remove() {
        let mut tree = AvlTree::new();
        tree.insert(1).unwrap();
        assert_eq!(tree.remove(&1), Ok(Some(1)));
        assert!(!tree.contains(&1));
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn test_remove_absent() {
        let mut tree = AvlTree::from_values(vec![1, 2, 3]).unwrap();
        assert_eq!(tree.remove(&4), Ok(None));
        assert_eq!(tree.len(), 3);

        let mut empty: AvlTree<u32> = AvlTree::new();
        assert_eq!(empty.remove(&1), Ok(None));
    }

    #[test]
    fn test_remove_promotes_successor() {
        let mut tree = AvlTree::from_values(vec![2, 1, 4, 3, 5]).unwrap();
        assert_eq!(tree.remove(&2), Ok(Some(2)));
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &3, &4, &5]);
        assert_eq!(root(&tree), Some(3));
        check(&tree, true);
    }

    #[test]
    fn test_remove_rebalances() {
        let mut tree = AvlTree::from_values(vec![2, 1, 3, 4]).unwrap();
        tree.remove(&1).unwrap();
        assert_eq!(root(&tree), Some(3));
        assert_eq!(tree.height(), 1);
        check(&tree, true);
    }

    #[test]
    fn test_comparison_error_leaves_tree_unchanged() {
        let mut tree = AvlTree::from_values(vec![2.0, 1.0, 3.0]).unwrap();
        let before: Vec<f64> = tree.iter_preorder().cloned().collect();

        match tree.insert(f64::NAN) {
            Err(Error::Comparison { .. }) => {},
            other => panic!("unexpected result {:?}", other),
        }
        assert!(tree.remove(&f64::NAN).is_err());
        assert!(tree.get(&f64::NAN).is_err());

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.iter_preorder().cloned().collect::<Vec<f64>>(), before);
        check(&tree, true);
    }

    #[test]
    fn test_contains_incomparable() {
        let mut tree = Bst::new();
        tree.insert(1.0).unwrap();
        assert!(!tree.contains(&f64::NAN));
    }

    #[test]
    fn test_frozen() {
        let mut tree = AvlTree::from_values(vec![1, 2]).unwrap();
        tree.freeze();
        assert_eq!(tree.insert(3), Err(Error::Frozen("tree")));
        assert_eq!(tree.remove(&1), Err(Error::Frozen("tree")));
        assert_eq!(tree.clear(), Err(Error::Frozen("tree")));
        assert_eq!(tree.insert_each(vec![4]), Err(Error::Frozen("tree")));
        assert_eq!(tree.replace(&AvlTree::new()), Err(Error::Frozen("tree")));
        assert_eq!(tree.len(), 2);
        assert!(tree.contains(&1));
        assert!(tree.clone().is_frozen());
    }

    #[test]
    fn test_clear() {
        let mut tree = AvlTree::from_values(1..=10).unwrap();
        tree.clear().unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn test_height() {
        let tree = Bst::from_values(vec![3, 2, 4, 1]).unwrap();
        assert_eq!(tree.height(), 2);

        let single = Bst::from_values(vec![1]).unwrap();
        assert_eq!(single.height(), 0);
    }

    #[test]
    fn test_degenerate_bst_height() {
        let bst = Bst::from_values(1..=100).unwrap();
        assert_eq!(bst.height(), 99);
        check(&bst, false);

        let avl = AvlTree::from_values(1..=100).unwrap();
        assert!(avl.height() <= 7);
        check(&avl, true);
    }

    #[test]
    fn test_traversals() {
        let bst: Bst<char> = OBJECTS.chars().collect();
        let avl: AvlTree<char> = OBJECTS.chars().collect();

        assert_eq!(letters(bst.iter_inorder().cloned()), "abcdefghijklm");
        assert_eq!(letters(bst.iter_preorder().cloned()), "gdbacefkihjlm");
        assert_eq!(letters(bst.iter_postorder().cloned()), "acbfedhjimlkg");
        assert_eq!(letters(bst.iter_reverse().cloned()), "mlkjihgfedcba");

        assert_eq!(letters(avl.iter_preorder().cloned()), "gdbacefkihjlm");
        assert_eq!(letters(avl.iter_postorder().cloned()), "acbfedhjimlkg");
    }

    #[test]
    fn test_traversals_are_restartable() {
        let tree: AvlTree<u32> = (0..5).collect();
        let mut first = tree.iter();
        first.next();
        assert_eq!(first.len(), 4);
        assert_eq!(tree.iter().len(), 5);
        assert_eq!(tree.iter_postorder().count(), 5);
        assert_eq!(tree.iter_preorder().size_hint(), (5, Some(5)));
    }

    #[test]
    fn test_min_max() {
        let tree = AvlTree::from_values(vec![1, 3, 5]).unwrap();
        assert_eq!(tree.min(), Some(&1));
        assert_eq!(tree.max(), Some(&5));
    }

    #[test]
    fn test_floor_ceil() {
        let tree = AvlTree::from_values(vec![1, 3, 5]).unwrap();

        assert_eq!(tree.floor(&0), Ok(None));
        assert_eq!(tree.floor(&2), Ok(Some(&1)));
        assert_eq!(tree.floor(&4), Ok(Some(&3)));
        assert_eq!(tree.floor(&6), Ok(Some(&5)));

        assert_eq!(tree.ceil(&0), Ok(Some(&1)));
        assert_eq!(tree.ceil(&2), Ok(Some(&3)));
        assert_eq!(tree.ceil(&4), Ok(Some(&5)));
        assert_eq!(tree.ceil(&6), Ok(None));
    }

    #[test]
    fn test_clone_is_independent() {
        let tree = Bst::from_values(1..=10).unwrap();
        let mut copy = tree.clone();
        copy.remove_each(&[4, 5, 6, 7, 8]).unwrap();
        assert_eq!(copy.len(), 5);
        assert_eq!(tree.len(), 10);
    }

    #[test]
    fn test_replace() {
        let mut tree = AvlTree::from_values(vec![1, 2]).unwrap();
        let other = AvlTree::from_values(vec![7, 8, 9]).unwrap();
        tree.replace(&other).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&7, &8, &9]);
    }

    #[test]
    fn test_eq() {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
        let mut values: Vec<char> = OBJECTS.chars().collect();
        let left: AvlTree<char> = values.iter().cloned().collect();
        rng.shuffle(&mut values);
        let right: AvlTree<char> = values.iter().cloned().collect();
        assert_eq!(left, right);

        let mut smaller = right.clone();
        smaller.remove(&'a').unwrap();
        assert_ne!(left, smaller);
    }

    #[test]
    fn test_debug() {
        let tree = AvlTree::from_values(vec![2, 3, 1]).unwrap();
        assert_eq!(format!("{:?}", tree), "{1, 2, 3}");
    }

    #[test]
    fn test_into_iter() {
        let tree = AvlTree::from_values(vec![1, 5, 3]).unwrap();
        assert_eq!(tree.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_into_iter_partial() {
        let tree = Bst::from_values(1..=1000).unwrap();
        let mut iter = tree.into_iter();
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.len(), 999);
    }

    #[test]
    #[should_panic(expected = "cannot extend tree")]
    fn test_extend_frozen() {
        let mut tree: AvlTree<u32> = AvlTree::new();
        tree.freeze();
        tree.extend(vec![1]);
    }

    #[test]
    fn test_random_operations_keep_invariants() {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
        let mut avl = AvlTree::new();
        let mut bst = Bst::new();

        for _ in 0..2000 {
            let key = rng.gen_range(0, 200u32);
            if rng.gen::<bool>() {
                avl.insert(key).unwrap();
                bst.insert(key).unwrap();
            } else {
                assert_eq!(avl.remove(&key), bst.remove(&key));
            }
            check(&avl, true);
            check(&bst, false);
            assert_eq!(avl.len(), bst.len());
        }
    }
}
