use crate::error::{Error, Result};
use crate::tree::balance::Balance;
use crate::tree::node::Node;
use crate::tree::path::{Direction, Path};
use std::any;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

pub type Link<T> = Option<Box<Node<T>>>;

/// Where an inserted value ended up, relative to the subtree root the insertion started from.
pub struct Insertion {
    pub path: Path,
    pub created: bool,
}

pub fn height<T>(link: &Link<T>) -> isize {
    match link {
        None => -1,
        Some(node) => node.height,
    }
}

fn compare<T, Q>(key: &Q, value: &T) -> Result<Ordering>
where
    T: Borrow<Q>,
    Q: PartialOrd + ?Sized,
{
    key.partial_cmp(value.borrow()).ok_or_else(|| Error::Comparison {
        left: any::type_name::<Q>(),
        right: any::type_name::<T>(),
    })
}

/// Ancestors detached from the tree during a descent, each with the side the descent took.
type Ancestors<T> = Vec<(Box<Node<T>>, Direction)>;

fn attach<T>(mut node: Box<Node<T>>, direction: Direction, child: Link<T>) -> Link<T> {
    match direction {
        Direction::Left => node.left = child,
        Direction::Right => node.right = child,
    }
    Some(node)
}

// Reattaches the ancestors above `subtree` without touching their shape.
fn restore<T>(mut ancestors: Ancestors<T>, mut subtree: Link<T>) -> Link<T> {
    while let Some((node, direction)) = ancestors.pop() {
        subtree = attach(node, direction, subtree);
    }
    subtree
}

// Reattaches the ancestors above `subtree`, rebalancing each one from the deepest up.
fn retrace<T, B>(mut ancestors: Ancestors<T>, mut subtree: Link<T>) -> Link<T>
where
    B: Balance,
{
    while let Some((node, direction)) = ancestors.pop() {
        subtree = attach(node, direction, subtree);
        B::rebalance(&mut subtree);
    }
    subtree
}

// precondition: the tree is not empty
fn remove_min<T, B>(link: &mut Link<T>) -> T
where
    B: Balance,
{
    let mut ancestors = Vec::new();
    let mut current = link.take();
    let min = loop {
        let mut node = match current.take() {
            Some(node) => node,
            None => unreachable!(),
        };
        match node.left.take() {
            Some(left) => {
                ancestors.push((node, Direction::Left));
                current = Some(left);
            },
            None => {
                current = node.right.take();
                break node.value;
            },
        }
    };

    *link = retrace::<T, B>(ancestors, current);
    min
}

// precondition: the tree is not empty
fn unlink<T, B>(link: &mut Link<T>) -> T
where
    B: Balance,
{
    let mut node = match link.take() {
        Some(node) => node,
        None => unreachable!(),
    };

    match (node.left.take(), node.right.take()) {
        (None, right) => {
            *link = right;
            node.value
        },
        (left, None) => {
            *link = left;
            node.value
        },
        (left, mut right) => {
            let successor = remove_min::<T, B>(&mut right);
            let value = mem::replace(&mut node.value, successor);
            node.left = left;
            node.right = right;
            *link = Some(node);
            value
        },
    }
}

/// Inserts `value`, replacing an equal value in place. The descent detaches the nodes it passes
/// and keeps them on a stack, so the depth of the tree never translates into recursion.
pub fn insert<T, B>(link: &mut Link<T>, value: T) -> Result<Insertion>
where
    T: PartialOrd,
    B: Balance,
{
    let mut ancestors = Vec::new();
    let mut current = link.take();
    let created = loop {
        let mut node = match current.take() {
            Some(node) => node,
            None => {
                current = Some(Box::new(Node::new(value)));
                break true;
            },
        };
        let ordering = match compare(&value, &node.value) {
            Ok(ordering) => ordering,
            Err(error) => {
                *link = restore(ancestors, Some(node));
                return Err(error);
            },
        };
        match ordering {
            Ordering::Less => {
                current = node.left.take();
                ancestors.push((node, Direction::Left));
            },
            Ordering::Greater => {
                current = node.right.take();
                ancestors.push((node, Direction::Right));
            },
            Ordering::Equal => {
                node.value = value;
                current = Some(node);
                break false;
            },
        }
    };

    let mut path = Path::new();
    while let Some((node, direction)) = ancestors.pop() {
        current = attach(node, direction, current);
        path.push(direction);
        if created {
            path.reroute(B::rebalance(&mut current));
        }
    }
    *link = current;
    Ok(Insertion { path, created })
}

pub fn remove<T, Q, B>(link: &mut Link<T>, key: &Q) -> Result<Option<T>>
where
    T: Borrow<Q>,
    Q: PartialOrd + ?Sized,
    B: Balance,
{
    let mut ancestors = Vec::new();
    let mut current = link.take();
    let mut removed = None;
    while let Some(mut node) = current.take() {
        let ordering = match compare(key, &node.value) {
            Ok(ordering) => ordering,
            Err(error) => {
                *link = restore(ancestors, Some(node));
                return Err(error);
            },
        };
        match ordering {
            Ordering::Less => {
                current = node.left.take();
                ancestors.push((node, Direction::Left));
            },
            Ordering::Greater => {
                current = node.right.take();
                ancestors.push((node, Direction::Right));
            },
            Ordering::Equal => {
                current = Some(node);
                removed = Some(unlink::<T, B>(&mut current));
                break;
            },
        }
    }

    *link = match removed {
        Some(_) => {
            B::rebalance(&mut current);
            retrace::<T, B>(ancestors, current)
        },
        None => restore(ancestors, current),
    };
    Ok(removed)
}

/// Copies a subtree without recursing. Nodes are listed in pre-order and rebuilt in reverse, so
/// both children of a node are complete by the time the node itself is rebuilt.
pub fn duplicate<T>(link: &Link<T>) -> Link<T>
where
    T: Clone,
{
    let mut preorder = Vec::new();
    let mut pending: Vec<&Node<T>> = link.as_deref().into_iter().collect();
    while let Some(node) = pending.pop() {
        preorder.push(node);
        pending.extend(node.right.as_deref());
        pending.extend(node.left.as_deref());
    }

    let mut built: Vec<Box<Node<T>>> = Vec::new();
    for node in preorder.into_iter().rev() {
        let left = if node.left.is_some() { built.pop() } else { None };
        let right = if node.right.is_some() { built.pop() } else { None };
        built.push(Box::new(Node {
            value: node.value.clone(),
            height: node.height,
            left,
            right,
        }));
    }
    built.pop()
}

pub fn follow<'a, T>(link: &'a Link<T>, path: &Path) -> Option<&'a T> {
    let mut node = link.as_ref()?;
    for step in path.steps() {
        node = match step {
            Direction::Left => node.left.as_ref()?,
            Direction::Right => node.right.as_ref()?,
        };
    }
    Some(&node.value)
}

pub fn get<'a, T, Q>(link: &'a Link<T>, key: &Q) -> Result<Option<&'a T>>
where
    T: Borrow<Q>,
    Q: PartialOrd + ?Sized,
{
    let mut current = link;
    while let Some(node) = current {
        current = match compare(key, &node.value)? {
            Ordering::Less => &node.left,
            Ordering::Greater => &node.right,
            Ordering::Equal => return Ok(Some(&node.value)),
        };
    }
    Ok(None)
}

pub fn ceil<'a, T, Q>(link: &'a Link<T>, key: &Q) -> Result<Option<&'a T>>
where
    T: Borrow<Q>,
    Q: PartialOrd + ?Sized,
{
    let mut current = link;
    let mut ret = None;
    while let Some(node) = current {
        current = match compare(key, &node.value)? {
            Ordering::Greater => &node.right,
            Ordering::Less => {
                ret = Some(&node.value);
                &node.left
            },
            Ordering::Equal => return Ok(Some(&node.value)),
        };
    }
    Ok(ret)
}

pub fn floor<'a, T, Q>(link: &'a Link<T>, key: &Q) -> Result<Option<&'a T>>
where
    T: Borrow<Q>,
    Q: PartialOrd + ?Sized,
{
    let mut current = link;
    let mut ret = None;
    while let Some(node) = current {
        current = match compare(key, &node.value)? {
            Ordering::Less => &node.left,
            Ordering::Greater => {
                ret = Some(&node.value);
                &node.right
            },
            Ordering::Equal => return Ok(Some(&node.value)),
        };
    }
    Ok(ret)
}

/// Releases a subtree without recursing, so that degenerate trees cannot exhaust the stack.
pub fn release<T>(link: Link<T>) {
    let mut stack: Vec<Box<Node<T>>> = link.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

pub fn min<T>(link: &Link<T>) -> Option<&T> {
    link.as_ref().map(|node| {
        let mut curr = node;
        while let Some(left_node) = &curr.left {
            curr = left_node;
        }
        &curr.value
    })
}

pub fn max<T>(link: &Link<T>) -> Option<&T> {
    link.as_ref().map(|node| {
        let mut curr = node;
        while let Some(right_node) = &curr.right {
            curr = right_node;
        }
        &curr.value
    })
}
