//! picking the rotation and placement of each snake segment sprite
//!
//! Sprites are drawn facing up. A segment's heading is the average of the
//! direction it was entered from and the direction it leaves in, measured in
//! quarter turns (0 = right, 1 = up, 2 = left, 3 = down), so a corner
//! segment sits on the diagonal between its two neighbours.
use crate::body::Body;
use crate::types::{Direction, Position};
use std::f32::consts::SQRT_2;

/// direction of travel from `from` to the neighbouring cell `to`
pub fn relative_direction(from: Position, to: Position) -> Direction {
    if from.x == to.x {
        if to.y < from.y {
            Direction::Up
        } else {
            Direction::Down
        }
    } else if to.x > from.x {
        Direction::Right
    } else {
        Direction::Left
    }
}

/// How a single segment sprite is turned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPose {
    /// heading in quarter turns, in `[0, 4)`, halves for corners
    pub angle: f32,
    /// false for a straight segment, true for a corner
    pub corner: bool,
}

impl SegmentPose {
    /// counter clockwise rotation to apply to an upward facing sprite, in degrees
    pub fn rotation_degrees(&self) -> f32 {
        90.0 * (self.angle - 1.0)
    }

    /// Distance from the cell to the sprite's top left corner on both axes.
    ///
    /// Rotating a square sprite by 45 degrees grows its bounding box to the
    /// diagonal, so corners are shifted further to stay centred on the cell.
    pub fn offset(&self, sprite_width: f32) -> f32 {
        if self.corner {
            sprite_width * SQRT_2 * 0.5
        } else {
            sprite_width * 0.5
        }
    }

    /// where to put the top left corner of a `sprite_width` sprite drawn on `cell`
    pub fn top_left(&self, cell: Position, sprite_width: f32) -> (f32, f32) {
        let shift = self.offset(sprite_width);
        (cell.x as f32 - shift, cell.y as f32 - shift)
    }
}

/// Pose of the segment at `cur`, given its neighbours.
///
/// The tail has no `prev` and the head has no `next`; an endpoint uses its
/// only direction for both halves of the average.
pub fn orientation(prev: Option<Position>, cur: Position, next: Option<Position>) -> SegmentPose {
    let incoming = prev.map(|p| relative_direction(p, cur));
    let outgoing = next.map(|n| relative_direction(cur, n));

    let (d1, d2) = match (incoming, outgoing) {
        (Some(a), Some(b)) => (a, b),
        (Some(a), None) => (a, a),
        (None, Some(b)) => (b, b),
        (None, None) => (Direction::Up, Direction::Up),
    };

    let (i1, i2) = (d1.as_index() as f32, d2.as_index() as f32);
    let mut angle = 0.5 * (i1 + i2);
    // right <-> down is encoded 0/3 and would average to the opposite diagonal
    if (i2 - i1).abs() == 3.0 {
        angle += 2.0;
    }

    SegmentPose {
        angle,
        corner: d1 != d2,
    }
}

/// Which sprite a segment uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    #[allow(missing_docs)]
    Tail,
    #[allow(missing_docs)]
    Body,
    #[allow(missing_docs)]
    Head,
}

/// A segment ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    #[allow(missing_docs)]
    pub kind: SegmentKind,
    /// the grid cell the sprite is centred on
    pub cell: Position,
    #[allow(missing_docs)]
    pub pose: SegmentPose,
}

/// Segments of `cells` in drawing order, tail to head. Fewer than two cells
/// draw nothing.
pub fn segments(cells: &[Position]) -> Vec<Segment> {
    let n = cells.len();
    if n < 2 {
        return vec![];
    }

    (0..n)
        .map(|i| {
            let prev = if i == 0 { None } else { Some(cells[i - 1]) };
            let next = cells.get(i + 1).copied();
            let kind = match i {
                0 => SegmentKind::Tail,
                i if i == n - 1 => SegmentKind::Head,
                _ => SegmentKind::Body,
            };
            Segment {
                kind,
                cell: cells[i],
                pose: orientation(prev, cells[i], next),
            }
        })
        .collect()
}

/// [segments] for a body
pub fn body_segments(body: &Body) -> Vec<Segment> {
    segments(&body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_relative_direction() {
        let c = p(60, 60);
        assert_eq!(relative_direction(c, p(80, 60)), Direction::Right);
        assert_eq!(relative_direction(c, p(60, 40)), Direction::Up);
        assert_eq!(relative_direction(c, p(40, 60)), Direction::Left);
        assert_eq!(relative_direction(c, p(60, 80)), Direction::Down);
    }

    #[test]
    fn test_straight_segment() {
        let pose = orientation(Some(p(40, 60)), p(60, 60), Some(p(80, 60)));
        assert_eq!(pose.angle, 0.0);
        assert!(!pose.corner);
        assert_eq!(pose.rotation_degrees(), -90.0);
        assert_eq!(pose.offset(24.0), 12.0);
    }

    #[test]
    fn test_corner_segment() {
        // right then up
        let pose = orientation(Some(p(40, 60)), p(60, 60), Some(p(60, 40)));
        assert_eq!(pose.angle, 0.5);
        assert!(pose.corner);
        assert!((pose.offset(24.0) - 24.0 * 1.414_213_5 / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_correction() {
        // right then down: 0 and 3 average to 1.5 (up-left), corrected to 3.5 (down-right)
        let pose = orientation(Some(p(40, 60)), p(60, 60), Some(p(60, 80)));
        assert_eq!(pose.angle, 3.5);
        // down then right
        let pose = orientation(Some(p(60, 40)), p(60, 60), Some(p(80, 60)));
        assert_eq!(pose.angle, 3.5);
    }

    #[test]
    fn test_endpoints_use_single_direction() {
        let tail = orientation(None, p(60, 60), Some(p(60, 80)));
        assert_eq!(tail.angle, 3.0);
        assert!(!tail.corner);
        let head = orientation(Some(p(40, 60)), p(60, 60), None);
        assert_eq!(head.angle, 0.0);
    }

    #[test]
    fn test_reversal_flips_heading() {
        let c = p(60, 60);
        let neighbours = [p(80, 60), p(60, 40), p(40, 60), p(60, 80)];
        for prev in neighbours.iter() {
            for next in neighbours.iter() {
                if prev == next {
                    continue;
                }
                let forward = orientation(Some(*prev), c, Some(*next));
                let backward = orientation(Some(*next), c, Some(*prev));
                assert_eq!(forward.corner, backward.corner);
                assert_eq!(
                    (forward.angle + 2.0) % 4.0,
                    backward.angle % 4.0,
                    "{:?} {:?}",
                    prev,
                    next
                );
            }
        }
    }

    #[test]
    fn test_angles_stay_in_range() {
        let c = p(60, 60);
        let neighbours = [p(80, 60), p(60, 40), p(40, 60), p(60, 80)];
        for prev in neighbours.iter() {
            for next in neighbours.iter() {
                let a = orientation(Some(*prev), c, Some(*next)).angle;
                assert!(a >= 0.0 && a < 4.0, "{}", a);
            }
        }
    }

    #[test]
    fn test_segments_kinds_in_order() {
        let cells = [p(20, 100), p(40, 100), p(60, 100), p(60, 120)];
        let segs = segments(&cells);
        let kinds: Vec<_> = segs.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SegmentKind::Tail,
                SegmentKind::Body,
                SegmentKind::Body,
                SegmentKind::Head
            ]
        );
        assert_eq!(segs[2].pose.angle, 3.5);
        assert!(segments(&cells[..1]).is_empty());
    }
}
