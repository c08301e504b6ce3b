// SPDX-License-Identifier: MIT
//
// Event loop: the read-decode-act-render cycle.
//
// One thread, one loop, two states. While running, each iteration paints a
// frame into a fresh RenderBuffer and flushes it in one write, then blocks
// for the next key and hands it to the application. When the application
// answers Quit, the loop clears the screen, homes the cursor and returns.
//
// # Blocking and timeouts
//
// Raw mode sets VMIN=0 / VTIME=n, so every read returns after at most n
// tenths of a second. An idle timeout is not an error: the loop checks
// whether the window was resized and goes back to waiting. A resize gets
// a fresh frame straight away, without waiting for a keypress.
//
// # Failure
//
// Any error from the terminal ends the loop. Before returning it, the loop
// makes a best-effort attempt to clear the screen so the diagnostic the
// caller prints lands on a clean terminal. Restoring the line discipline
// is the caller's job: it owns the raw-mode guard.

use std::time::Duration;

use crate::ansi;
use crate::error::{Result, TermError};
use crate::input::{self, Key};
use crate::output::RenderBuffer;
use crate::terminal::{Size, Tty};

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the application tells the event loop to do after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    Continue,
    /// Leave the loop cleanly.
    Quit,
}

/// Application interface for the event loop.
///
/// Each iteration the loop calls [`paint`](App::paint), then
/// [`on_key`](App::on_key) with the next decoded key.
/// [`on_resize`](App::on_resize) is called between keys when the window
/// size changes.
pub trait App {
    /// Handle one decoded key. Return [`Action::Quit`] to exit the loop.
    fn on_key(&mut self, key: Key) -> Action;

    /// Handle a terminal resize. A repaint follows immediately.
    fn on_resize(&mut self, _size: Size) {}

    /// Compose the whole frame into `frame`. The loop flushes it.
    fn paint(&mut self, frame: &mut RenderBuffer);
}

// ─── Loop Config ─────────────────────────────────────────────────────────────

/// Timing configuration for the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopConfig {
    /// How long a single read may block before reporting "no data".
    ///
    /// Applied as the raw-mode `VTIME`, so the granularity is a tenth of a
    /// second. Default: 100 ms.
    pub read_timeout: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_millis(100),
        }
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// The terminal event loop over a borrowed [`Tty`].
///
/// # Example
///
/// ```
/// use nilo_term::event_loop::{Action, App, EventLoop};
/// use nilo_term::input::Key;
/// use nilo_term::output::RenderBuffer;
/// use nilo_term::terminal::Size;
/// use nilo_term::testing::ScriptedTty;
///
/// struct QuitOnQ;
///
/// impl App for QuitOnQ {
///     fn on_key(&mut self, key: Key) -> Action {
///         if key == Key::Byte(b'q') { Action::Quit } else { Action::Continue }
///     }
///
///     fn paint(&mut self, frame: &mut RenderBuffer) {
///         frame.append(b"hello");
///     }
/// }
///
/// let mut tty = ScriptedTty::new(Size::new(80, 24)).input(b"q");
/// EventLoop::new(&mut tty).run(&mut QuitOnQ)?;
/// assert!(tty.output().ends_with(b"\x1b[2J\x1b[H"));
/// # Ok::<(), nilo_term::error::TermError>(())
/// ```
#[derive(Debug)]
pub struct EventLoop<'t, T: Tty> {
    tty: &'t mut T,
    frames: u64,
}

impl<'t, T: Tty> EventLoop<'t, T> {
    /// Create a loop that reads from and draws to `tty`.
    pub const fn new(tty: &'t mut T) -> Self {
        Self { tty, frames: 0 }
    }

    /// Frames flushed so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Run until the application returns [`Action::Quit`].
    ///
    /// On quit the screen is cleared and the cursor homed. On error the
    /// same cleanup is attempted, ignoring its own failures, and the
    /// original error is returned.
    ///
    /// # Errors
    ///
    /// Returns the first [`TermError`] raised by reading, writing, or the
    /// final cleanup.
    pub fn run(&mut self, app: &mut impl App) -> Result<()> {
        match self.run_inner(app) {
            Ok(()) => {
                tracing::info!(frames = self.frames, "quit requested");
                ansi::reset_screen(self.tty).map_err(TermError::Write)?;
                self.tty.flush().map_err(TermError::Write)
            }
            Err(e) => {
                tracing::error!(error = %e, frames = self.frames, "event loop failed");
                let _ = ansi::reset_screen(self.tty);
                let _ = self.tty.flush();
                Err(e)
            }
        }
    }

    fn run_inner(&mut self, app: &mut impl App) -> Result<()> {
        loop {
            self.refresh(app)?;
            let key = self.wait_for_key(app)?;
            tracing::debug!(?key, "key");
            if app.on_key(key) == Action::Quit {
                return Ok(());
            }
        }
    }

    /// Block for the next key, repainting on resize while idle.
    fn wait_for_key(&mut self, app: &mut impl App) -> Result<Key> {
        loop {
            if let Some(key) = input::try_key(self.tty)? {
                return Ok(key);
            }
            if self.tty.take_resize() {
                if let Some(size) = self.tty.window_size() {
                    tracing::debug!(?size, "terminal resized");
                    app.on_resize(size);
                    self.refresh(app)?;
                }
            }
        }
    }

    /// Paint one frame and flush it in a single write.
    fn refresh(&mut self, app: &mut impl App) -> Result<()> {
        let mut frame = RenderBuffer::new();
        app.paint(&mut frame);
        frame.flush(self.tty)?;
        self.frames += 1;
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
