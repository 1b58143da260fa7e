use std::collections::VecDeque;
use std::ops::Add;

use Direction::*;

/// A tile on the grid. Coordinates are signed so a head that leaves the arena
/// can still be represented and rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// True when both coordinates lie in `[0, tile_count)`.
    pub fn in_bounds(&self, tile_count: i32) -> bool {
        (0..tile_count).contains(&self.x) && (0..tile_count).contains(&self.y)
    }
}

/// Per-tick displacement of the head. At most one axis is nonzero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { dx: 0, dy: 0 };
}

impl Add<Velocity> for Cell {
    type Output = Cell;

    fn add(self, v: Velocity) -> Cell {
        Cell::new(self.x + v.dx, self.y + v.dy)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Screen coordinates: y grows downwards.
    pub fn velocity(self) -> Velocity {
        let (dx, dy) = match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        };
        Velocity { dx, dy }
    }

    /// Lenient parse of a command token. Unknown tokens give `None`.
    pub fn from_token(token: &str) -> Option<Direction> {
        match token.trim().to_ascii_uppercase().as_str() {
            "UP" => Some(Up),
            "DOWN" => Some(Down),
            "LEFT" => Some(Left),
            "RIGHT" => Some(Right),
            _ => None,
        }
    }
}

/// Snake body, head at the front.
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    pub fn new(pos: Cell) -> Self {
        Snake { body: VecDeque::from(vec![pos]) }
    }

    pub fn head(&self) -> Cell {
        // The body is never empty: `new` seeds one cell and `drop_tail` keeps it.
        self.body[0]
    }

    pub fn body(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Pushes a new head one step along `velocity` and returns it. The tail is
    /// kept, so the snake is one cell longer until `drop_tail` is called.
    pub fn push_head(&mut self, velocity: Velocity) -> Cell {
        let new_head = self.head() + velocity;
        self.body.push_front(new_head);
        new_head
    }

    /// Removes the last segment, never the only one left.
    pub fn drop_tail(&mut self) -> Option<Cell> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// Whether the head shares its cell with any other segment.
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|seg| *seg == head)
    }
}
