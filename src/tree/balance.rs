use crate::tree::link::Link;
use crate::tree::node::Node;
use log::trace;

/// The restructuring applied to a subtree root by a balancing policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    None,
    Left,
    Right,
    LeftRight,
    RightLeft,
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Unbalanced {}
    impl Sealed for super::Avl {}
}

/// A balancing policy for `OrderedTree`. The policies are `Unbalanced` and `Avl`; the trait is
/// sealed.
///
/// After every structural change (a node linked in or spliced out), the tree calls `rebalance` on
/// each ancestor of the changed position, from the deepest one up to the root. Value replacement
/// on an existing node is not a structural change and does not trigger the hook.
pub trait Balance: sealed::Sealed {
    /// Refreshes the node at `link` and restores the shape invariant of the policy. Returns the
    /// rotation that was applied to the subtree.
    fn rebalance<T>(link: &mut Link<T>) -> Rotation;
}

/// Plain binary search tree policy. Heights are kept up to date, but the tree is never
/// restructured, so its height is bounded only by the number of values.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbalanced;

impl Balance for Unbalanced {
    fn rebalance<T>(link: &mut Link<T>) -> Rotation {
        if let Some(node) = link {
            node.update();
        }
        Rotation::None
    }
}

/// AVL policy. Keeps the balance factor of every node in `{-1, 0, +1}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Avl;

impl Balance for Avl {
    fn rebalance<T>(link: &mut Link<T>) -> Rotation {
        let mut node = match link.take() {
            Some(node) => node,
            None => return Rotation::None,
        };

        node.update();

        let rotation = match node.balance() {
            -1..=1 => Rotation::None,
            2 => {
                if node.left.as_ref().map_or(0, |child| child.balance()) >= 0 {
                    trace!("rotating right at height {}", node.height);
                    node = rotate_right(node);
                    Rotation::Right
                } else {
                    trace!("rotating left-right at height {}", node.height);
                    node.left = node.left.take().map(rotate_left);
                    node = rotate_right(node);
                    Rotation::LeftRight
                }
            },
            -2 => {
                if node.right.as_ref().map_or(0, |child| child.balance()) <= 0 {
                    trace!("rotating left at height {}", node.height);
                    node = rotate_left(node);
                    Rotation::Left
                } else {
                    trace!("rotating right-left at height {}", node.height);
                    node.right = node.right.take().map(rotate_right);
                    node = rotate_left(node);
                    Rotation::RightLeft
                }
            },
            balance => panic!("abnormal balance factor: {:+}", balance),
        };

        *link = Some(node);
        rotation
    }
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}
