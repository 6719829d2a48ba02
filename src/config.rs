//! tunable constants for a lottery session, loadable from a json file
//!
//! Every section is `#[serde(default)]` so a config file only needs to name
//! the values it changes:
//! ```
//! # use snake_lottery::config::Config;
//! let c: Config = serde_json::from_str(r#"{"max_number": 999, "seed": 7}"#).unwrap();
//! assert_eq!(c.max_number, 999);
//! assert_eq!(c.growth.base, 10);
//! ```
use crate::body::Body;
use crate::types::{Position, GRID};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Size of the drawing surface, in units
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct WindowSize {
    #[allow(missing_docs)]
    pub width: i32,
    #[allow(missing_docs)]
    pub height: i32,
}

impl Default for WindowSize {
    fn default() -> Self {
        WindowSize {
            width: 1024,
            height: 768,
        }
    }
}

/// The rectangle the idle snake circles around, in units
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct CycleBounds {
    #[allow(missing_docs)]
    pub top: i32,
    #[allow(missing_docs)]
    pub bottom: i32,
    #[allow(missing_docs)]
    pub left: i32,
    #[allow(missing_docs)]
    pub right: i32,
}

impl Default for CycleBounds {
    fn default() -> Self {
        CycleBounds {
            top: 540,
            bottom: 600,
            left: 40,
            right: 880,
        }
    }
}

/// Body length schedule: `base + step * draw_index`
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Growth {
    #[allow(missing_docs)]
    pub base: usize,
    #[allow(missing_docs)]
    pub step: usize,
}

impl Default for Growth {
    fn default() -> Self {
        Growth { base: 10, step: 10 }
    }
}

impl Growth {
    /// the body length cap while hunting the ball of the given draw
    pub fn cap(&self, draw_index: usize) -> usize {
        self.base + self.step * draw_index
    }
}

/// Bounds on the random stride length used when neither axis is aligned
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct StrideRule {
    /// units of remaining distance per extra cell of stride
    pub divisor: u32,
    /// cells added to every stride bound
    pub slack: u32,
}

impl Default for StrideRule {
    fn default() -> Self {
        StrideRule {
            divisor: 50,
            slack: 3,
        }
    }
}

/// Where balls may be placed
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct TargetRule {
    /// minimum distance, in cells, between the head and the ball on each axis
    pub min_gap: i32,
    /// cells kept free along the left, right and top edges
    pub inset: i32,
    /// units reserved at the bottom of the screen for the digit panel
    pub panel_height: i32,
}

impl Default for TargetRule {
    fn default() -> Self {
        TargetRule {
            min_gap: 4,
            inset: 12,
            panel_height: 140,
        }
    }
}

/// Ticks per second for each phase of a session
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct TickRates {
    #[allow(missing_docs)]
    pub idle: u32,
    #[allow(missing_docs)]
    pub hunt: u32,
    /// rate of the tail shedding frames after a self collision
    pub recover: u32,
    #[allow(missing_docs)]
    pub reveal: u32,
}

impl Default for TickRates {
    fn default() -> Self {
        TickRates {
            idle: 6,
            hunt: 6,
            recover: 12,
            reveal: 6,
        }
    }
}

/// Full configuration for the lottery
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    #[allow(missing_docs)]
    pub window: WindowSize,
    /// the drawn number is uniform in `1..=max_number`
    pub max_number: u32,
    /// fixed rng seed, entropy when unset
    pub seed: Option<u64>,
    /// body at the start of every session, tail first
    pub initial_body: Vec<Position>,
    #[allow(missing_docs)]
    pub cycle: CycleBounds,
    #[allow(missing_docs)]
    pub growth: Growth,
    /// body length above which running into yourself counts as a collision
    pub collision_threshold: usize,
    #[allow(missing_docs)]
    pub stride: StrideRule,
    #[allow(missing_docs)]
    pub target: TargetRule,
    #[allow(missing_docs)]
    pub rates: TickRates,
    /// directory holding `sprites.json`
    pub assets_dir: PathBuf,
    /// ring the terminal bell for audio cues
    pub bell: bool,
    /// write logs here, no logging when unset
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window: WindowSize::default(),
            max_number: 288,
            seed: None,
            initial_body: vec![
                Position::new(20, 100),
                Position::new(40, 100),
                Position::new(60, 100),
                Position::new(60, 120),
                Position::new(60, 140),
            ],
            cycle: CycleBounds::default(),
            growth: Growth::default(),
            collision_threshold: 8,
            stride: StrideRule::default(),
            target: TargetRule::default(),
            rates: TickRates::default(),
            assets_dir: PathBuf::from("assets"),
            bell: false,
            log_file: None,
        }
    }
}

impl Config {
    /// reads and validates a config file
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("can't read config {}: {}", path.display(), e))?;
        let config: Config = serde_json::from_str(&raw)
            .map_err(|e| format!("bad config {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// number of digits drawn per session
    pub fn digit_count(&self) -> usize {
        self.max_number.to_string().len()
    }

    /// checks that the rules can always be satisfied, in particular that the
    /// ball search always has a candidate far enough from any head
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.max_number == 0 {
            return Err("max_number must be at least 1".into());
        }
        if self.window.width <= 0 || self.window.height <= 0 {
            return Err("window size must be positive".into());
        }

        let (x_min, x_max, y_min, y_max) = self.target.cell_range(self.window);
        let gap = self.target.min_gap;
        if gap < 0 {
            return Err("target.min_gap can't be negative".into());
        }
        if x_max - x_min < 2 * gap || y_max - y_min < 2 * gap {
            return Err(format!(
                "target area x {}..={} y {}..={} (cells) is too small for a gap of {} cells",
                x_min, x_max, y_min, y_max, gap
            )
            .into());
        }

        let b = self.cycle;
        let on_grid = [b.top, b.bottom, b.left, b.right]
            .iter()
            .all(|v| v % GRID == 0);
        if !on_grid || b.right - b.left < GRID || b.bottom - b.top < GRID {
            return Err("cycle bounds must be on the grid and at least one cell apart".into());
        }

        Body::new(self.initial_body.iter().copied(), self.collision_threshold)
            .map_err(|e| format!("bad initial_body: {}", e))?;
        if self.stride.divisor == 0 {
            return Err("stride.divisor must be positive".into());
        }

        let r = self.rates;
        if [r.idle, r.hunt, r.recover, r.reveal].iter().any(|r| *r == 0) {
            return Err("tick rates must be positive".into());
        }

        Ok(())
    }
}

impl TargetRule {
    /// inclusive cell range `(x_min, x_max, y_min, y_max)` a ball may occupy
    pub fn cell_range(&self, window: WindowSize) -> (i32, i32, i32, i32) {
        (
            self.inset,
            window.width / GRID - self.inset,
            self.inset,
            (window.height - self.panel_height) / GRID,
        )
    }
}
