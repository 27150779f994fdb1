//! An ordered set with set algebra, built on an AVL tree.

use crate::error::{Error, Result};
use crate::tree::{AvlTree, InOrder, IntoIter};
use log::debug;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Add, BitAnd, BitOr, BitXor, Sub};

/// An ordered set implemented using an AVL tree.
///
/// Set operations probe membership in one set while iterating the other. A probe with a value
/// that cannot be compared with the values of the other set counts as a miss, but inserting such a
/// value into a result set fails with `Error::Comparison`.
///
/// # Examples
///
/// ```
/// use bs_trees::set::OrderedSet;
///
/// let mut set = OrderedSet::new();
/// set.insert(0).unwrap();
/// set.insert(3).unwrap();
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.min(), Some(&0));
///
/// assert_eq!(set.remove(&0), Ok(Some(0)));
/// assert_eq!(set.remove(&1), Ok(None));
/// ```
pub struct OrderedSet<T> {
    tree: AvlTree<T>,
}

impl<T> OrderedSet<T> {
    /// Constructs a new, empty `OrderedSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::set::OrderedSet;
    ///
    /// let set: OrderedSet<u32> = OrderedSet::new();
    /// ```
    pub fn new() -> Self {
        OrderedSet {
            tree: AvlTree::new(),
        }
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the set, removing all values.
    ///
    /// # Errors
    ///
    /// Returns `Error::Frozen` if the set is frozen.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.tree.clear()
    }

    /// Makes the set read-only. Every later mutation fails with `Error::Frozen`.
    pub fn freeze(&mut self) {
        self.tree.freeze();
    }

    /// Returns `true` if the set has been frozen.
    pub fn is_frozen(&self) -> bool {
        self.tree.is_frozen()
    }

    /// Returns the minimum value of the set. Returns `None` if the set is empty.
    pub fn min(&self) -> Option<&T> {
        self.tree.min()
    }

    /// Returns the maximum value of the set. Returns `None` if the set is empty.
    pub fn max(&self) -> Option<&T> {
        self.tree.max()
    }

    /// Returns an iterator over the set. The iterator will yield values in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::set::OrderedSet;
    ///
    /// let set: OrderedSet<u32> = vec![3, 1].into_iter().collect();
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> InOrder<T> {
        self.tree.iter()
    }

    fn ensure_mutable(&self) -> Result<()> {
        if self.tree.is_frozen() {
            debug!("rejected mutation of a frozen set holding {} values", self.len());
            return Err(Error::Frozen("set"));
        }
        Ok(())
    }
}

impl<T> OrderedSet<T>
where
    T: PartialOrd,
{
    /// Inserts a value into the set. Returns `true` if the value was not present. If an equal
    /// value is already present, it is replaced.
    ///
    /// # Errors
    ///
    /// Returns `Error::Frozen` if the set is frozen, and `Error::Comparison` if the value cannot
    /// be compared with the values of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::set::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// assert_eq!(set.insert(1), Ok(true));
    /// assert_eq!(set.insert(1), Ok(false));
    /// ```
    pub fn insert(&mut self, value: T) -> Result<bool> {
        self.ensure_mutable()?;
        let len = self.tree.len();
        self.tree.insert(value)?;
        Ok(self.tree.len() > len)
    }

    /// Removes a value from the set. If the value exists in the set, it will return the removed
    /// value. Otherwise it will return `None`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Frozen` if the set is frozen, and `Error::Comparison` if the key cannot be
    /// compared with the values of the set.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<Option<T>>
    where
        T: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        self.ensure_mutable()?;
        self.tree.remove(key)
    }

    /// Returns a reference to the value of the set equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Comparison` if the key cannot be compared with the values of the set.
    pub fn get<Q>(&self, key: &Q) -> Result<Option<&T>>
    where
        T: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        self.tree.get(key)
    }

    /// Checks if a value exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::set::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// set.insert(1).unwrap();
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: PartialOrd + ?Sized,
    {
        self.tree.contains(key)
    }

    /// Returns the set of values that are in `self` or in `other`. The `|` and `+` operators are
    /// implemented to take the union of two sets of totally ordered values.
    ///
    /// # Errors
    ///
    /// Returns `Error::Comparison` if a value of `other` cannot be compared with the values of
    /// `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::set::OrderedSet;
    ///
    /// let n: OrderedSet<u32> = vec![1, 2].into_iter().collect();
    /// let m: OrderedSet<u32> = vec![2, 3].into_iter().collect();
    ///
    /// let union = n.union(m).unwrap();
    /// assert_eq!(union.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// ```
    pub fn union(self, other: Self) -> Result<Self> {
        let mut ret = Self::new();
        ret.extend_from(self)?;
        ret.extend_from(other)?;
        Ok(ret)
    }

    /// Returns the set of values that are in both `self` and `other`. The `&` operator is
    /// implemented to take the intersection of two sets of totally ordered values.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::set::OrderedSet;
    ///
    /// let n: OrderedSet<u32> = vec![1, 2].into_iter().collect();
    /// let m: OrderedSet<u32> = vec![2, 3].into_iter().collect();
    ///
    /// let intersection = n.intersection(m).unwrap();
    /// assert_eq!(intersection.iter().collect::<Vec<&u32>>(), vec![&2]);
    /// ```
    pub fn intersection(self, other: Self) -> Result<Self> {
        let mut ret = Self::new();
        for value in other {
            if self.contains(&value) {
                ret.tree.insert(value)?;
            }
        }
        Ok(ret)
    }

    /// Returns the set of values that are in `self` but not in `other`. The `-` operator is
    /// implemented to take the difference of two sets of totally ordered values.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::set::OrderedSet;
    ///
    /// let n: OrderedSet<u32> = vec![1, 2].into_iter().collect();
    /// let m: OrderedSet<u32> = vec![2, 3].into_iter().collect();
    ///
    /// let difference = n.difference(m).unwrap();
    /// assert_eq!(difference.iter().collect::<Vec<&u32>>(), vec![&1]);
    /// ```
    pub fn difference(self, other: Self) -> Result<Self> {
        let mut ret = Self::new();
        for value in self {
            if !other.contains(&value) {
                ret.tree.insert(value)?;
            }
        }
        Ok(ret)
    }

    /// Returns the set of values that are in exactly one of `self` and `other`. The `^` operator
    /// is implemented to take the symmetric difference of two sets of totally ordered values.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::set::OrderedSet;
    ///
    /// let n: OrderedSet<u32> = vec![1, 2].into_iter().collect();
    /// let m: OrderedSet<u32> = vec![2, 3].into_iter().collect();
    ///
    /// let symmetric_difference = n.symmetric_difference(m).unwrap();
    /// assert_eq!(symmetric_difference.iter().collect::<Vec<&u32>>(), vec![&1, &3]);
    /// ```
    pub fn symmetric_difference(self, other: Self) -> Result<Self> {
        let mut ret = Self::new();
        ret.extend_from(other)?;
        for value in self {
            if ret.contains(&value) {
                ret.tree.remove(&value)?;
            } else {
                ret.tree.insert(value)?;
            }
        }
        Ok(ret)
    }

    /// Inserts every value of `other` into `self`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Frozen` if the set is frozen, and `Error::Comparison` on the first value of
    /// `other` that cannot be compared with the values of `self`.
    pub fn merge(&mut self, other: Self) -> Result<()> {
        self.ensure_mutable()?;
        self.extend_from(other)
    }

    /// Removes every value of `other` from `self`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Frozen` if the set is frozen, and `Error::Comparison` on the first value of
    /// `other` that cannot be compared with the values of `self`.
    pub fn subtract(&mut self, other: &Self) -> Result<()> {
        self.ensure_mutable()?;
        self.tree.remove_each(other.iter())
    }

    /// Returns `true` if every value of `self` is in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bs_trees::set::OrderedSet;
    ///
    /// let n: OrderedSet<u32> = vec![1, 2].into_iter().collect();
    /// let m: OrderedSet<u32> = vec![1, 2, 3].into_iter().collect();
    ///
    /// assert!(n.is_subset(&m));
    /// assert!(n <= m);
    /// assert!(!m.is_subset(&n));
    /// ```
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|value| other.contains(value))
    }

    /// Returns `true` if `self` is a subset of `other` and the two sets differ.
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.len() < other.len() && self.iter().all(|value| other.contains(value))
    }

    /// Returns `true` if every value of `other` is in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` is a superset of `other` and the two sets differ.
    pub fn is_proper_superset(&self, other: &Self) -> bool {
        other.is_proper_subset(self)
    }

    fn extend_from(&mut self, other: Self) -> Result<()> {
        for value in other {
            self.tree.insert(value)?;
        }
        Ok(())
    }
}

impl<T> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T>
where
    T: 'a,
{
    type Item = &'a T;
    type IntoIter = InOrder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for OrderedSet<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        OrderedSet {
            tree: self.tree.clone(),
        }
    }
}

impl<T> fmt::Debug for OrderedSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<T> PartialEq for OrderedSet<T>
where
    T: PartialOrd,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && other.iter().all(|value| self.contains(value))
    }
}

impl<T> Eq for OrderedSet<T> where T: Ord {}

/// Sets are partially ordered by inclusion.
impl<T> PartialOrd for OrderedSet<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.is_proper_subset(other) {
            Some(Ordering::Less)
        } else if self.is_proper_superset(other) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

/// # Panics
///
/// Panics if the set is frozen.
impl<T> Extend<T> for OrderedSet<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.tree.extend(values);
    }
}

impl<T> FromIterator<T> for OrderedSet<T>
where
    T: Ord,
{
    fn from_iter<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        OrderedSet {
            tree: values.into_iter().collect(),
        }
    }
}

macro_rules! set_operator {
    ($($trait_name:ident, $method_name:ident => $set_method:ident;)*) => {
        $(
            impl<T> $trait_name for OrderedSet<T>
            where
                T: Ord,
            {
                type Output = OrderedSet<T>;

                fn $method_name(self, other: OrderedSet<T>) -> OrderedSet<T> {
                    match Self::$set_method(self, other) {
                        Ok(set) => set,
                        Err(err) => panic!("cannot take {}: {}", stringify!($set_method), err),
                    }
                }
            }
        )*
    };
}

set_operator! {
    BitOr, bitor => union;
    Add, add => union;
    BitAnd, bitand => intersection;
    Sub, sub => difference;
    BitXor, bitxor => symmetric_difference;
}
