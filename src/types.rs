//! geometry types shared by every part of the motion engine
use serde::{Deserialize, Serialize};
use std::fmt;

/// Edge length of one grid cell, in screen units. Every position the snake
/// occupies is a multiple of this.
pub const GRID: i32 = 20;

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    /// x offset
    pub x: i32,
    /// y offset
    pub y: i32,
}

/// A point on the screen, in units. y grows downward.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// x position
    pub x: i32,
    /// y position
    pub y: i32,
}

impl Position {
    /// builds a position from raw units
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// builds a position from cell coordinates
    pub const fn from_cell(cell_x: i32, cell_y: i32) -> Self {
        Position {
            x: cell_x * GRID,
            y: cell_y * GRID,
        }
    }

    #[allow(missing_docs)]
    pub fn add_vec(&self, v: Vector) -> Position {
        Position {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }

    /// the position one grid cell away in the given direction
    pub fn step(&self, direction: Direction) -> Position {
        self.add_vec(direction.to_vector())
    }

    /// true when the position sits on a grid line in both axes
    pub fn is_on_grid(&self) -> bool {
        self.x % GRID == 0 && self.y % GRID == 0
    }

    /// true when `other` is exactly one grid cell away along one axis
    pub fn is_adjacent(&self, other: &Position) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx + dy == GRID && (dx == 0 || dy == 0)
    }

    /// the component of this position along `axis`
    pub fn along(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// The axis a stride travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    #[allow(missing_docs)]
    X,
    #[allow(missing_docs)]
    Y,
}

impl Axis {
    /// the perpendicular axis
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Represents a heading on the grid. The declaration order matches the
/// index used for sprite rotation: counter-clockwise starting from right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    #[allow(missing_docs)]
    Right,
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Left => write!(f, "left"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl Direction {
    /// convert this direction to a one cell vector, in screen space (up is -y)
    pub fn to_vector(self) -> Vector {
        match self {
            Direction::Right => Vector { x: GRID, y: 0 },
            Direction::Up => Vector { x: 0, y: -GRID },
            Direction::Left => Vector { x: -GRID, y: 0 },
            Direction::Down => Vector { x: 0, y: GRID },
        }
    }

    /// returns all four headings in index order
    pub fn all() -> [Direction; 4] {
        [
            Direction::Right,
            Direction::Up,
            Direction::Left,
            Direction::Down,
        ]
    }

    /// converts this direction to its rotation index, 0 = right, 1 = up, 2 = left, 3 = down
    pub fn as_index(&self) -> u8 {
        match self {
            Direction::Right => 0,
            Direction::Up => 1,
            Direction::Left => 2,
            Direction::Down => 3,
        }
    }

    /// the axis this heading moves along
    pub fn axis(self) -> Axis {
        match self {
            Direction::Right | Direction::Left => Axis::X,
            Direction::Up | Direction::Down => Axis::Y,
        }
    }

    /// true for the headings that grow their coordinate, right and down
    pub fn is_positive(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    /// the heading along `axis` with the given sign, positive meaning growing coordinates
    pub fn along(axis: Axis, positive: bool) -> Direction {
        match (axis, positive) {
            (Axis::X, true) => Direction::Right,
            (Axis::X, false) => Direction::Left,
            (Axis::Y, true) => Direction::Down,
            (Axis::Y, false) => Direction::Up,
        }
    }

    /// the heading along `axis` that brings `from` closer to `to`
    pub fn toward(axis: Axis, from: Position, to: Position) -> Direction {
        Direction::along(axis, from.along(axis) < to.along(axis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_indices_count_counter_clockwise() {
        let indices: Vec<u8> = Direction::all().iter().map(|d| d.as_index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_step_is_adjacent() {
        let p = Position::new(60, 140);
        for d in Direction::all().iter() {
            let next = p.step(*d);
            assert!(p.is_adjacent(&next), "{} -> {}", p, next);
            assert_eq!(Direction::along(d.axis(), d.is_positive()), *d);
        }
        assert_eq!(p.step(Direction::Up), Position::new(60, 120));
        assert_eq!(p.step(Direction::Down), Position::new(60, 160));
    }

    #[test]
    fn test_adjacency_rejects_diagonals_and_far_cells() {
        let p = Position::new(40, 40);
        assert!(!p.is_adjacent(&Position::new(60, 60)));
        assert!(!p.is_adjacent(&Position::new(80, 40)));
        assert!(!p.is_adjacent(&p));
    }

    #[test]
    fn test_toward() {
        let from = Position::new(100, 100);
        let to = Position::new(40, 200);
        assert_eq!(Direction::toward(Axis::X, from, to), Direction::Left);
        assert_eq!(Direction::toward(Axis::Y, from, to), Direction::Down);
    }
}
