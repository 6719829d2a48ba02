#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! A lottery draw acted out by a snake.
//!
//! The drawn number is revealed one digit at a time, least significant
//! first. For each digit a ball is dropped on the grid, the snake hunts it
//! down with axis aligned strides and eats it, and the digit lands in the
//! panel at the bottom of the screen. The snake grows with every draw and
//! sheds its tail when it runs into itself.
//!
//! [lottery::Lottery] is the tick driven state machine. It knows nothing
//! about terminals: [lottery::session::run] drives it against any
//! [lottery::session::Frontend], and [terminal::TerminalFrontend] is the
//! one the binary uses.
//!
//! ```
//! use rand::{rngs::SmallRng, SeedableRng};
//! use snake_lottery::config::Config;
//! use snake_lottery::lottery::{Lottery, Phase, Signal};
//!
//! let mut lottery = Lottery::new(Config::default(), SmallRng::seed_from_u64(1))
//!     .unwrap()
//!     .with_number(45);
//! lottery.tick(Some(Signal::Start));
//! while lottery.phase() != Phase::AwaitRestart {
//!     lottery.tick(None);
//! }
//! assert_eq!(lottery.revealed(), &[5, 4, 0]);
//! ```

pub mod body;
pub mod config;
pub mod lottery;
pub mod motion;
pub mod orientation;
pub mod render;
pub mod target;
pub mod terminal;
pub mod types;
