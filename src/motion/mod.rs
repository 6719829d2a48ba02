//! turning a target into axis aligned strides of unit grid steps
//!
//! The hunting snake never moves diagonally. It walks a stride along one axis,
//! then a stride along the other, round robin, until the head lands exactly on
//! the target. Strides are randomly shortened while neither axis is aligned so
//! the path wanders a little instead of tracing an L.
pub mod cycle;

use crate::config::StrideRule;
use crate::types::{Axis, Direction, Position, GRID};
use rand::Rng;
use tracing::trace;

/// shifts `position` one grid cell along `axis`, toward growing coordinates when
/// `positive` is set
pub fn next_step(position: Position, axis: Axis, positive: bool) -> Position {
    position.step(Direction::along(axis, positive))
}

impl StrideRule {
    /// largest random stride, in cells, for a remaining distance in units
    pub fn bound(&self, distance: u32) -> u32 {
        (distance + self.divisor - 1) / self.divisor + self.slack
    }

    /// how many cells to move along `axis` before switching axis.
    ///
    /// * 0 when `current` already agrees with `target` on `axis`
    /// * the whole remaining distance when they agree on the other axis
    /// * otherwise uniform in `1..=bound(distance)`
    pub fn step_count<R: Rng>(
        &self,
        current: Position,
        target: Position,
        axis: Axis,
        rng: &mut R,
    ) -> u32 {
        let from = current.along(axis);
        let to = target.along(axis);
        if from == to {
            return 0;
        }

        let distance = (to - from).unsigned_abs();
        let other = axis.other();
        if current.along(other) == target.along(other) {
            return distance / GRID as u32;
        }

        rng.gen_range(1..=self.bound(distance))
    }
}

/// A run of single cell steps in one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stride {
    /// heading of every step in the stride
    pub direction: Direction,
    /// steps left to take
    pub remaining: u32,
}

impl Stride {
    /// consumes one step, returning the new head
    pub fn take_step(&mut self, head: Position) -> Option<Position> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(next_step(
            head,
            self.direction.axis(),
            self.direction.is_positive(),
        ))
    }

    /// true once every step has been taken
    pub fn is_done(&self) -> bool {
        self.remaining == 0
    }
}

/// Plans strides toward a target, alternating the driving axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMotion {
    axis: Axis,
    rule: StrideRule,
}

impl GridMotion {
    /// new planner, driving along x first
    pub fn new(rule: StrideRule) -> Self {
        GridMotion { axis: Axis::X, rule }
    }

    /// the axis the next stride will be planned on
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Plans the next non empty stride from `head` toward `target`.
    ///
    /// The axis flips after every planned stride, empty ones included, so an
    /// aligned axis is skipped and the other one is used. Returns `None` only
    /// when the head is already on the target.
    pub fn plan<R: Rng>(&mut self, head: Position, target: Position, rng: &mut R) -> Option<Stride> {
        for _ in 0..2 {
            let axis = self.axis;
            self.axis = axis.other();

            let steps = self.rule.step_count(head, target, axis, rng);
            if steps > 0 {
                let stride = Stride {
                    direction: Direction::toward(axis, head, target),
                    remaining: steps,
                };
                trace!(?axis, direction = %stride.direction, steps, "planned stride");
                return Some(stride);
            }
        }

        debug_assert_eq!(head, target);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn test_next_step() {
        let p = Position::new(60, 140);
        assert_eq!(next_step(p, Axis::Y, true), Position::new(60, 160));
        assert_eq!(next_step(p, Axis::Y, false), Position::new(60, 120));
        assert_eq!(next_step(p, Axis::X, true), Position::new(80, 140));
        assert_eq!(next_step(p, Axis::X, false), Position::new(40, 140));
    }

    #[test]
    fn test_stride_walks_its_direction() {
        let mut up = Stride {
            direction: Direction::Up,
            remaining: 2,
        };
        let head = Position::new(60, 140);
        assert_eq!(up.take_step(head), Some(Position::new(60, 120)));
        assert_eq!(up.take_step(Position::new(60, 120)), Some(Position::new(60, 100)));
        assert!(up.is_done());
        assert_eq!(up.take_step(Position::new(60, 100)), None);

        let mut right = Stride {
            direction: Direction::Right,
            remaining: 1,
        };
        assert_eq!(right.take_step(head), Some(Position::new(80, 140)));
    }

    #[test]
    fn test_step_count_aligned_on_driving_axis() {
        let rule = StrideRule::default();
        let c = Position::new(100, 100);
        let t = Position::new(100, 400);
        assert_eq!(rule.step_count(c, t, Axis::X, &mut rng()), 0);
    }

    #[test]
    fn test_step_count_aligned_on_other_axis_goes_all_the_way() {
        let rule = StrideRule::default();
        let c = Position::new(60, 140);
        let t = Position::new(60, 180);
        assert_eq!(rule.step_count(c, t, Axis::Y, &mut rng()), 2);
        let t = Position::new(400, 140);
        assert_eq!(rule.step_count(c, t, Axis::X, &mut rng()), 17);
    }

    #[test]
    fn test_step_count_unaligned_stays_in_bounds() {
        let rule = StrideRule::default();
        let mut rng = rng();
        let c = Position::new(60, 140);
        for cells in 1..40 {
            let t = Position::new(60 + cells * GRID, 400);
            let distance = (cells * GRID) as u32;
            let bound = rule.bound(distance);
            assert_eq!(bound, (distance as f64 / 50.0).ceil() as u32 + 3);
            for _ in 0..50 {
                let n = rule.step_count(c, t, Axis::X, &mut rng);
                assert!(n >= 1 && n <= bound, "{} outside 1..={}", n, bound);
            }
        }
    }

    #[test]
    fn test_plan_alternates_axes() {
        let mut motion = GridMotion::new(StrideRule::default());
        let mut rng = rng();
        let head = Position::new(100, 100);
        let target = Position::new(300, 300);

        let first = motion.plan(head, target, &mut rng).expect("not on target");
        assert_eq!(first.direction, Direction::Right);
        assert_eq!(motion.axis(), Axis::Y);

        let second = motion.plan(head, target, &mut rng).expect("not on target");
        assert_eq!(second.direction, Direction::Down);
        assert_eq!(motion.axis(), Axis::X);
    }

    #[test]
    fn test_plan_skips_aligned_axis() {
        let mut motion = GridMotion::new(StrideRule::default());
        let head = Position::new(60, 140);
        let target = Position::new(60, 180);
        let stride = motion.plan(head, target, &mut rng()).expect("not on target");
        assert_eq!(
            stride,
            Stride {
                direction: Direction::Down,
                remaining: 2
            }
        );
        assert_eq!(motion.axis(), Axis::X);
        assert_eq!(motion.plan(target, target, &mut rng()), None);
    }

    #[test]
    fn test_repeated_strides_reach_the_target() {
        let mut motion = GridMotion::new(StrideRule::default());
        let mut rng = rng();
        let mut head = Position::new(20, 100);
        let target = Position::new(500, 420);
        let mut strides = 0;
        while let Some(mut stride) = motion.plan(head, target, &mut rng) {
            while let Some(next) = stride.take_step(head) {
                assert!(head.is_adjacent(&next));
                head = next;
            }
            assert!(stride.is_done());
            strides += 1;
            assert!(strides < 1_000, "never converged");
        }
        assert_eq!(head, target);
    }
}
