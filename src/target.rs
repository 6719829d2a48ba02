//! placing the ball the snake hunts next
use crate::config::{TargetRule, WindowSize};
use crate::types::Position;
use rand::Rng;
use tracing::trace;

/// Picks a ball cell in the target area at least `min_gap` cells from `head`
/// on both axes.
///
/// This is rejection sampling with no retry limit. [crate::config::Config::validate]
/// guarantees the area is wide enough that a candidate exists for any head.
pub fn pick_target<R: Rng>(
    head: Position,
    rule: &TargetRule,
    window: WindowSize,
    rng: &mut R,
) -> Position {
    let (x_min, x_max, y_min, y_max) = rule.cell_range(window);
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let candidate = Position::from_cell(rng.gen_range(x_min..=x_max), rng.gen_range(y_min..=y_max));
        if far_enough(head, candidate, rule.min_gap) {
            trace!(%candidate, attempts, "picked target");
            return candidate;
        }
    }
}

/// true when `candidate` is at least `min_gap` cells from `head` on both axes
pub fn far_enough(head: Position, candidate: Position, min_gap: i32) -> bool {
    let gap = min_gap * crate::types::GRID;
    (candidate.x - head.x).abs() >= gap && (candidate.y - head.y).abs() >= gap
}
