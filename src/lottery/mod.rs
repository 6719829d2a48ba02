//! the per tick state machine that runs one lottery session
//!
//! A session idles with the snake circling until it is told to start, then
//! for every digit of the drawn number it places a ball, hunts it down one
//! cell per tick, explodes it and reveals the digit. Every tick does a bounded
//! amount of work and hands control back, so the caller can poll input, draw
//! and sleep between ticks; nothing in here blocks.
pub mod session;

use crate::body::{Body, Step};
use crate::config::Config;
use crate::motion::cycle::{CycleMotion, CyclePath};
use crate::motion::{GridMotion, Stride};
use crate::orientation::body_segments;
use crate::render::{Overlay, Scene, BALL_VISIBLE_FRAMES};
use crate::target::pick_target;
use crate::types::Position;
use rand::Rng;
use std::error::Error;
use tracing::{debug, info, instrument, warn};

/// Frames in the explosion animation
pub const EXPLOSION_FRAMES: usize = 7;

/// A discrete input, polled once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    #[allow(missing_docs)]
    Quit,
    #[allow(missing_docs)]
    Escape,
    /// begin the draw from the idle screen
    Start,
    /// run a fresh session once the draw is over
    Restart,
}

/// A fire and forget sound effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// the draw is starting
    Ready,
    /// the snake ran into itself
    Collision,
    /// a ball was eaten
    Explosion,
}

/// How the snake is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// looping around the idle rectangle
    Circling,
    /// chasing a ball
    Hunting,
}

/// How a session finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionEnd {
    /// start over with a fresh session
    Restart,
    /// leave the program
    Quit,
}

/// Where the session is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// idle animation, waiting for [Signal::Start]
    AwaitInput,
    /// hunting the ball at `target`
    PerDigitDraw {
        #[allow(missing_docs)]
        target: Position,
        /// the stride being walked, if any
        stride: Option<Stride>,
        /// a head that ran into the body, appended once the tail has been shed past it
        pending: Option<Position>,
    },
    /// explosion animation over the eaten ball
    RevealDigit {
        #[allow(missing_docs)]
        target: Position,
        #[allow(missing_docs)]
        frame: usize,
    },
    /// every digit is out, waiting for restart or quit
    AwaitRestart,
}

impl Phase {
    /// the motion mode for this phase
    pub fn mode(&self) -> Mode {
        match self {
            Phase::AwaitInput => Mode::Circling,
            _ => Mode::Hunting,
        }
    }
}

/// What one tick asks of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// ticks per second to pace the next frame at
    pub rate: u32,
    /// sound to play, at most one per tick
    pub cue: Option<Cue>,
    /// set when the session is over
    pub end: Option<SessionEnd>,
}

impl Tick {
    fn at(rate: u32) -> Self {
        Tick {
            rate,
            cue: None,
            end: None,
        }
    }

    fn with_cue(mut self, cue: Cue) -> Self {
        self.cue = Some(cue);
        self
    }

    fn ended(end: SessionEnd) -> Self {
        Tick {
            rate: 0,
            cue: None,
            end: Some(end),
        }
    }
}

/// Zero padded digits of `number`, most significant first
pub fn digits_of(number: u32, width: usize) -> Vec<u8> {
    format!("{:0width$}", number, width = width)
        .bytes()
        .map(|b| b - b'0')
        .collect()
}

/// One lottery session and everything it mutates
#[derive(Debug)]
pub struct Lottery<R: Rng> {
    config: Config,
    rng: R,
    body: Body,
    cycle: CycleMotion,
    motion: GridMotion,
    phase: Phase,
    preset: Option<u32>,
    number: Option<u32>,
    remaining: Vec<u8>,
    revealed: Vec<u8>,
    draw_index: usize,
}

impl<R: Rng> Lottery<R> {
    /// a session in the idle phase, with the configured starting body
    pub fn new(config: Config, rng: R) -> Result<Self, Box<dyn Error>> {
        config.validate()?;
        let body = Body::new(config.initial_body.iter().copied(), config.collision_threshold)?;
        let cycle = CycleMotion::new(CyclePath::rectangle(config.cycle));
        let motion = GridMotion::new(config.stride);
        Ok(Lottery {
            config,
            rng,
            body,
            cycle,
            motion,
            phase: Phase::AwaitInput,
            preset: None,
            number: None,
            remaining: vec![],
            revealed: vec![],
            draw_index: 0,
        })
    }

    /// draws `number` at the next start instead of a random one
    pub fn with_number(mut self, number: u32) -> Self {
        self.preset = Some(number);
        self
    }

    /// back to the idle phase with the starting body, keeping the rng
    pub fn reset(&mut self) -> Result<(), Box<dyn Error>> {
        self.body = Body::new(
            self.config.initial_body.iter().copied(),
            self.config.collision_threshold,
        )?;
        self.cycle = CycleMotion::new(CyclePath::rectangle(self.config.cycle));
        self.motion = GridMotion::new(self.config.stride);
        self.phase = Phase::AwaitInput;
        self.number = None;
        self.remaining.clear();
        self.revealed.clear();
        self.draw_index = 0;
        Ok(())
    }

    #[allow(missing_docs)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[allow(missing_docs)]
    pub fn body(&self) -> &Body {
        &self.body
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// the number being drawn, once started
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    /// digits revealed so far, least significant first
    pub fn revealed(&self) -> &[u8] {
        &self.revealed
    }

    /// zero based index of the digit being hunted
    pub fn draw_index(&self) -> usize {
        self.draw_index
    }

    /// Advances the session by one tick.
    ///
    /// Quit and escape end the session from any phase, including in the
    /// middle of collision recovery. Signals a phase has no use for are
    /// ignored.
    #[instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, signal: Option<Signal>) -> Tick {
        match signal {
            Some(Signal::Quit) => {
                info!("quit requested");
                return Tick::ended(SessionEnd::Quit);
            }
            Some(Signal::Escape) => {
                info!("escape");
                return Tick::ended(SessionEnd::Quit);
            }
            _ => {}
        }

        match self.phase {
            Phase::AwaitInput => self.idle(signal),
            Phase::PerDigitDraw {
                target,
                stride,
                pending,
            } => self.hunt(target, stride, pending),
            Phase::RevealDigit { target, frame } => self.reveal(target, frame),
            Phase::AwaitRestart => {
                if signal == Some(Signal::Restart) {
                    info!("restart requested");
                    Tick::ended(SessionEnd::Restart)
                } else {
                    Tick::at(self.config.rates.idle)
                }
            }
        }
    }

    fn idle(&mut self, signal: Option<Signal>) -> Tick {
        if signal != Some(Signal::Start) {
            self.body.replace(self.cycle.next_window());
            return Tick::at(self.config.rates.idle);
        }

        let max = self.config.max_number;
        let number = match self.preset.take() {
            Some(n) => n,
            None => self.rng.gen_range(1..=max),
        };
        self.number = Some(number);
        self.remaining = digits_of(number, self.config.digit_count());
        self.revealed.clear();
        self.draw_index = 0;
        info!(number, max, "draw started");

        self.phase = self.next_ball();
        Tick::at(self.config.rates.hunt).with_cue(Cue::Ready)
    }

    fn next_ball(&mut self) -> Phase {
        let target = pick_target(
            self.body.head(),
            &self.config.target,
            self.config.window,
            &mut self.rng,
        );
        debug!(%target, draw = self.draw_index, "ball placed");
        Phase::PerDigitDraw {
            target,
            stride: None,
            pending: None,
        }
    }

    /// One cell of the hunt, or one round of collision recovery while a head
    /// is pending. Bodies at or below the collision threshold never recover,
    /// so a short snake may keep overlapping cells.
    fn hunt(&mut self, target: Position, stride: Option<Stride>, pending: Option<Position>) -> Tick {
        let cap = self.config.growth.cap(self.draw_index);
        let rates = self.config.rates;

        if let Some(head) = pending {
            if self.body.recover(head, cap) {
                self.phase = Phase::PerDigitDraw {
                    target,
                    stride,
                    pending: None,
                };
                return Tick::at(rates.hunt);
            }
            return Tick::at(rates.recover);
        }

        let head = self.body.head();
        if head == target {
            return self.start_reveal(target);
        }

        let mut stride = match stride.filter(|s| !s.is_done()) {
            Some(s) => s,
            None => match self.motion.plan(head, target, &mut self.rng) {
                Some(s) => s,
                None => return self.start_reveal(target),
            },
        };
        let next = match stride.take_step(head) {
            Some(next) => next,
            None => return self.start_reveal(target),
        };

        let mut tick = Tick::at(rates.hunt);
        let mut pending = None;
        if let Step::Collided { cleared } = self.body.step(next, cap) {
            warn!(head = %next, len = self.body.len(), "snake ran into itself");
            tick = tick.with_cue(Cue::Collision);
            if !cleared {
                pending = Some(next);
                tick.rate = rates.recover;
            }
        }

        self.phase = Phase::PerDigitDraw {
            target,
            stride: Some(stride),
            pending,
        };
        tick
    }

    fn start_reveal(&mut self, target: Position) -> Tick {
        debug!(%target, "ball eaten");
        self.phase = Phase::RevealDigit { target, frame: 0 };
        Tick::at(self.config.rates.reveal).with_cue(Cue::Explosion)
    }

    fn reveal(&mut self, target: Position, frame: usize) -> Tick {
        let rates = self.config.rates;
        if frame + 1 < EXPLOSION_FRAMES {
            self.phase = Phase::RevealDigit {
                target,
                frame: frame + 1,
            };
            return Tick::at(rates.reveal);
        }

        if let Some(digit) = self.remaining.pop() {
            self.revealed.push(digit);
            info!(digit, draw = self.draw_index, "digit revealed");
        }

        if self.remaining.is_empty() {
            info!(number = ?self.number, "draw complete");
            self.phase = Phase::AwaitRestart;
            Tick::at(rates.idle)
        } else {
            self.draw_index += 1;
            self.phase = self.next_ball();
            Tick::at(rates.hunt)
        }
    }

    /// what should be on screen after the latest tick
    pub fn scene(&self) -> Scene<'_> {
        let (ball, explosion, overlay) = match self.phase {
            Phase::AwaitInput => (None, None, Overlay::Attract),
            Phase::PerDigitDraw { target, .. } => (Some(target), None, Overlay::Drawing),
            Phase::RevealDigit { target, frame } => {
                let ball = if frame < BALL_VISIBLE_FRAMES {
                    Some(target)
                } else {
                    None
                };
                (ball, Some((target, frame)), Overlay::Drawing)
            }
            Phase::AwaitRestart => (None, None, Overlay::Restart),
        };

        Scene {
            window: self.config.window,
            segments: body_segments(&self.body),
            ball,
            explosion,
            overlay,
            digits: &self.revealed,
            max_number: self.config.max_number,
        }
    }
}
