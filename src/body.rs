//! the snake body: the ordered list of cells it occupies
use crate::types::Position;
use itertools::Itertools;
use std::collections::VecDeque;
use std::error::Error;
use std::fmt;
use tracing::debug;

/// What a [Body::step] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// the head moved without running into the body
    Advanced,
    /// the head ran into the body; `cleared` once it has been appended
    Collided {
        #[allow(missing_docs)]
        cleared: bool,
    },
}

/// Cells occupied by the snake, tail at the front and head at the back.
///
/// Neighbouring cells always differ by one grid step on one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    cells: VecDeque<Position>,
    collision_threshold: usize,
}

impl Body {
    /// Builds a body from cells given tail first.
    ///
    /// Fails if the list is empty or if neighbouring cells are not one grid
    /// step apart. `collision_threshold` is the length above which the head
    /// running into the body counts as a collision.
    pub fn new(
        cells: impl IntoIterator<Item = Position>,
        collision_threshold: usize,
    ) -> Result<Self, Box<dyn Error>> {
        let cells: VecDeque<Position> = cells.into_iter().collect();
        if cells.is_empty() {
            return Err("a snake body needs at least one cell".into());
        }
        if let Some(p) = cells.iter().find(|p| !p.is_on_grid()) {
            return Err(format!("body cell {} is not on the grid", p).into());
        }
        if let Some((a, b)) = cells.iter().tuple_windows().find(|(a, b)| !a.is_adjacent(b)) {
            return Err(format!("body cells {} and {} are not adjacent", a, b).into());
        }

        Ok(Body {
            cells,
            collision_threshold,
        })
    }

    /// the leading cell
    pub fn head(&self) -> Position {
        *self.cells.back().expect("a body is never empty")
    }

    /// the trailing cell
    pub fn tail(&self) -> Position {
        *self.cells.front().expect("a body is never empty")
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// always false, bodies keep at least one cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// cells from tail to head
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Position> + ExactSizeIterator + '_ {
        self.cells.iter()
    }

    /// cells from tail to head, as a vec
    pub fn to_vec(&self) -> Vec<Position> {
        self.cells.iter().copied().collect()
    }

    /// true when `pos` is any cell of the body
    pub fn contains(&self, pos: &Position) -> bool {
        self.cells.contains(pos)
    }

    /// True when moving the head onto `head` would run into the body.
    ///
    /// Short bodies (length at or below the threshold) are allowed to overlap
    /// themselves.
    pub fn collides(&self, head: Position) -> bool {
        self.cells.len() > self.collision_threshold && self.cells.contains(&head)
    }

    /// Appends `new_head` and drops cells from the tail until the length is at
    /// most `cap`.
    pub fn advance(&mut self, new_head: Position, cap: usize) {
        debug_assert!(
            self.head().is_adjacent(&new_head),
            "{} is not next to the head {}",
            new_head,
            self.head()
        );
        self.cells.push_back(new_head);
        while self.cells.len() > cap.max(1) {
            self.cells.pop_front();
        }
        debug_assert!(self.is_contiguous());
    }

    /// Moves the head onto the neighbouring cell `next`.
    ///
    /// Without a collision the body simply advances. On a collision one round
    /// of recovery runs right away; if that already cleared the way the head
    /// has been appended, otherwise the caller keeps calling [Body::recover]
    /// with the same cell, one call per tick.
    pub fn step(&mut self, next: Position, cap: usize) -> Step {
        if !self.collides(next) {
            self.advance(next, cap);
            return Step::Advanced;
        }
        Step::Collided {
            cleared: self.recover(next, cap),
        }
    }

    /// One round of collision recovery: sheds a tail cell, then appends
    /// `head` if it is no longer in the body. Returns true once appended.
    pub fn recover(&mut self, head: Position, cap: usize) -> bool {
        if self.shed_tail(head) {
            self.advance(head, cap);
            true
        } else {
            false
        }
    }

    /// drops the tail cell unless it is the last one, true once `head` is clear
    fn shed_tail(&mut self, head: Position) -> bool {
        if self.cells.len() > 1 {
            let dropped = self.cells.pop_front();
            debug!(?dropped, len = self.cells.len(), "shed tail");
        }
        debug_assert!(!self.cells.is_empty());
        !self.cells.contains(&head)
    }

    /// true when every pair of neighbouring cells is one grid step apart
    pub fn is_contiguous(&self) -> bool {
        self.cells
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.is_adjacent(b))
    }

    /// replaces every cell, used when the idle animation hands its window over
    pub(crate) fn replace(&mut self, cells: impl IntoIterator<Item = Position>) {
        self.cells.clear();
        self.cells.extend(cells);
        debug_assert!(!self.cells.is_empty());
        debug_assert!(self.is_contiguous());
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cells.iter().join(" "))
    }
}
