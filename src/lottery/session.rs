//! driving a [Lottery] against a frontend that polls input, draws and paces frames
use super::{Cue, Lottery, SessionEnd, Signal};
use crate::config::Config;
use crate::render::Scene;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::error::Error;
use tracing::{info, instrument};

/// The outside world as a session sees it
pub trait Frontend {
    /// the signal for this tick, if any, without blocking
    fn poll_signal(&mut self) -> Result<Option<Signal>, Box<dyn Error>>;

    /// shows a frame
    fn present(&mut self, scene: &Scene<'_>) -> Result<(), Box<dyn Error>>;

    /// plays a sound, failures are not reported
    fn play(&mut self, cue: Cue);

    /// sleeps out the rest of a frame at `rate` ticks per second
    fn pace(&mut self, rate: u32);
}

/// Runs one session to its end.
///
/// Every iteration polls one signal, ticks, plays the cue, then presents the
/// new scene and paces the frame. A session that ends is not presented again.
#[instrument(level = "debug", skip_all)]
pub fn run_session<R: Rng, F: Frontend>(
    lottery: &mut Lottery<R>,
    frontend: &mut F,
) -> Result<SessionEnd, Box<dyn Error>> {
    let mut frames = 0u64;
    loop {
        let signal = frontend.poll_signal()?;
        let tick = lottery.tick(signal);
        if let Some(cue) = tick.cue {
            frontend.play(cue);
        }
        if let Some(end) = tick.end {
            info!(?end, frames, "session over");
            return Ok(end);
        }
        frontend.present(&lottery.scene())?;
        frontend.pace(tick.rate);
        frames += 1;
    }
}

/// the rng a config asks for: seeded when it names a seed, entropy otherwise
pub fn rng_for(config: &Config) -> SmallRng {
    match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// Runs sessions back to back until one ends in [SessionEnd::Quit]. Returns
/// how many sessions ran.
pub fn run<F: Frontend>(config: &Config, frontend: &mut F) -> Result<usize, Box<dyn Error>> {
    let mut lottery = Lottery::new(config.clone(), rng_for(config))?;
    let mut sessions = 1;
    loop {
        match run_session(&mut lottery, frontend)? {
            SessionEnd::Quit => return Ok(sessions),
            SessionEnd::Restart => {
                lottery.reset()?;
                sessions += 1;
                info!(sessions, "starting a new session");
            }
        }
    }
}
