//! the interactive frontend: a raw mode terminal with an alternate screen
pub mod canvas;

use crate::config::Config;
use crate::lottery::session::Frontend;
use crate::lottery::{Cue, Signal};
use crate::render::assets::Assets;
use crate::render::Scene;
use canvas::TextCanvas;
use crossterm::{
    cursor::{Hide, Show},
    event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Print, ResetColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use fps_clock::FpsClock;
use std::error::Error;
use std::fmt;
use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Maps a terminal event to a lottery signal.
///
/// `q` and ctrl-c quit, escape escapes, space starts a draw and `x` restarts.
/// Everything else, key releases included, maps to nothing.
pub fn signal_for(event: &Event) -> Option<Signal> {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Signal::Quit),
            KeyCode::Char('q') => Some(Signal::Quit),
            KeyCode::Esc => Some(Signal::Escape),
            KeyCode::Char(' ') => Some(Signal::Start),
            KeyCode::Char('x') => Some(Signal::Restart),
            _ => None,
        },
        _ => None,
    }
}

/// Terminal frontend. Creating one switches the terminal into raw mode on the
/// alternate screen; [TerminalFrontend::restore] or dropping it switches back.
pub struct TerminalFrontend {
    out: Stdout,
    canvas: TextCanvas,
    assets: Assets,
    bell: bool,
    limit: (u16, u16),
    clock: FpsClock,
    rate: u32,
    active: bool,
}

impl fmt::Debug for TerminalFrontend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalFrontend")
            .field("limit", &self.limit)
            .field("rate", &self.rate)
            .field("bell", &self.bell)
            .field("active", &self.active)
            .finish()
    }
}

impl TerminalFrontend {
    /// Takes over the terminal. If any step of the switch fails, whatever was
    /// already switched is restored before the error is returned.
    pub fn new(config: &Config) -> io::Result<Self> {
        let mut frontend = TerminalFrontend::detached(config, size()?);
        let canvas = &frontend.canvas;
        if frontend.limit.0 < canvas.cols() || frontend.limit.1 < canvas.rows() {
            warn!(
                "terminal is {}x{}, the lottery needs {}x{} and will be cut off",
                frontend.limit.0,
                frontend.limit.1,
                canvas.cols(),
                canvas.rows()
            );
        }

        enable_raw_mode()?;
        frontend.active = true;
        queue!(frontend.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        frontend.out.flush()?;
        info!(cols = frontend.limit.0, rows = frontend.limit.1, "terminal ready");
        Ok(frontend)
    }

    /// a frontend that hasn't touched the terminal yet
    fn detached(config: &Config, limit: (u16, u16)) -> Self {
        TerminalFrontend {
            out: stdout(),
            canvas: TextCanvas::for_window(config.window),
            assets: Assets::new(&config.assets_dir),
            bell: config.bell,
            limit,
            clock: FpsClock::new(config.rates.idle),
            rate: config.rates.idle,
            active: false,
        }
    }

    /// Leaves the alternate screen and raw mode. Calling it again does nothing.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        queue!(self.out, ResetColor, LeaveAlternateScreen, Show)?;
        self.out.flush()?;
        disable_raw_mode()
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("couldn't restore the terminal: {}", e);
        }
    }
}

impl Frontend for TerminalFrontend {
    /// Drains every pending event. Quit and escape win over anything else
    /// queued in the same tick, otherwise the first mapped key is returned.
    fn poll_signal(&mut self) -> Result<Option<Signal>, Box<dyn Error>> {
        let mut found = None;
        while poll(Duration::ZERO)? {
            let event = read()?;
            if let Event::Resize(cols, rows) = event {
                debug!(cols, rows, "terminal resized");
                self.limit = (cols, rows);
                queue!(self.out, Clear(ClearType::All))?;
                continue;
            }
            match signal_for(&event) {
                Some(s @ Signal::Quit) | Some(s @ Signal::Escape) => return Ok(Some(s)),
                Some(s) if found.is_none() => found = Some(s),
                _ => {}
            }
        }
        Ok(found)
    }

    fn present(&mut self, scene: &Scene<'_>) -> Result<(), Box<dyn Error>> {
        scene.draw(&mut self.canvas, &mut self.assets);
        self.canvas.queue_to(&mut self.out, self.limit)?;
        self.out.flush()?;
        Ok(())
    }

    fn play(&mut self, cue: Cue) {
        debug!(?cue, "cue");
        if self.bell {
            if let Err(e) = queue!(self.out, Print('\x07')) {
                debug!("bell failed: {}", e);
            }
        }
    }

    fn pace(&mut self, rate: u32) {
        if rate != self.rate {
            self.clock = FpsClock::new(rate);
            self.rate = rate;
        }
        self.clock.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_key_mapping() {
        let none = KeyModifiers::NONE;
        assert_eq!(signal_for(&press(KeyCode::Char('q'), none)), Some(Signal::Quit));
        assert_eq!(signal_for(&press(KeyCode::Esc, none)), Some(Signal::Escape));
        assert_eq!(signal_for(&press(KeyCode::Char(' '), none)), Some(Signal::Start));
        assert_eq!(signal_for(&press(KeyCode::Char('x'), none)), Some(Signal::Restart));
        assert_eq!(
            signal_for(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Signal::Quit)
        );
        assert_eq!(signal_for(&press(KeyCode::Char('c'), none)), None);
        assert_eq!(signal_for(&press(KeyCode::Enter, none)), None);
        assert_eq!(signal_for(&Event::FocusGained), None);
    }

    #[test]
    fn test_restore_without_terminal_is_a_no_op() {
        let mut frontend = TerminalFrontend::detached(&Config::default(), (80, 24));
        assert!(!frontend.active);
        frontend.restore().expect("nothing to restore");
        frontend.restore().expect("still nothing to restore");
        assert!(!frontend.active);
    }

    #[test]
    fn test_pace_follows_rate_changes() {
        let mut frontend = TerminalFrontend::detached(&Config::default(), (80, 24));
        assert_eq!(frontend.rate, 6);
        frontend.pace(1000);
        assert_eq!(frontend.rate, 1000);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char(' '),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(signal_for(&release), None);
    }
}
