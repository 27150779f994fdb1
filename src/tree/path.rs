use crate::tree::balance::Rotation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// The sequence of child links leading from a subtree root to one of its nodes.
///
/// Steps are stored deepest first, so that extending the path towards the root while unwinding a
/// descent is a push. Rotations at the subtree root only rewrite the last two steps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    steps: Vec<Direction>,
}

impl Path {
    pub fn new() -> Self {
        Path { steps: Vec::new() }
    }

    /// Prepends a step taken from the parent of the current subtree root.
    pub fn push(&mut self, direction: Direction) {
        self.steps.push(direction);
    }

    /// Iterates the steps from the subtree root downwards.
    pub fn steps<'a>(&'a self) -> impl Iterator<Item = Direction> + 'a {
        self.steps.iter().rev().cloned()
    }

    /// Rewrites the path so that it designates the same node after `rotation` has been applied at
    /// the subtree root.
    pub fn reroute(&mut self, rotation: Rotation) {
        match rotation {
            Rotation::None => {},
            Rotation::Left => self.rotate(Direction::Left),
            Rotation::Right => self.rotate(Direction::Right),
            Rotation::LeftRight => {
                self.rotate_child(Direction::Left, Direction::Left);
                self.rotate(Direction::Right);
            },
            Rotation::RightLeft => {
                self.rotate_child(Direction::Right, Direction::Right);
                self.rotate(Direction::Left);
            },
        }
    }

    // The old root moves down towards `towards` and its child on the opposite side is promoted.
    fn rotate(&mut self, towards: Direction) {
        let promoted = towards.opposite();
        let len = self.steps.len();
        match self.steps.last().cloned() {
            Some(first) if first == promoted => {
                if len >= 2 && self.steps[len - 2] == towards {
                    self.steps.swap(len - 1, len - 2);
                } else {
                    self.steps.pop();
                }
            },
            _ => self.steps.push(towards),
        }
    }

    fn rotate_child(&mut self, child: Direction, towards: Direction) {
        if self.steps.last() == Some(&child) {
            self.steps.pop();
            self.rotate(towards);
            self.steps.push(child);
        }
    }
}
