// SPDX-License-Identifier: MIT
//
// An in-memory terminal for driving the decoder, size detection, and the
// whole event loop without a tty.
//
// Input is a script of steps: bytes, read timeouts, and window resizes.
// Output is captured verbatim. Entering and leaving raw mode only flip a
// flag, and either can be made to fail. Reading past the end of the script is an
// EOF read error, so a test that forgets its quit key fails instead of
// spinning forever.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::time::Duration;

use crate::error::{Result, TermError};
use crate::input::ByteSource;
use crate::terminal::{Size, Tty};

/// One scripted input step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Byte(u8),
    Timeout,
    Resize(Option<Size>),
}

/// Scripted [`Tty`] for tests.
///
/// # Example
///
/// ```
/// use nilo_term::input::{next_key, Key};
/// use nilo_term::terminal::Size;
/// use nilo_term::testing::ScriptedTty;
///
/// let mut tty = ScriptedTty::new(Size::new(80, 24)).timeout().input(b"\x1b[A");
/// assert_eq!(next_key(&mut tty)?, Key::Up);
/// # Ok::<(), nilo_term::error::TermError>(())
/// ```
#[derive(Debug, Default)]
pub struct ScriptedTty {
    script: VecDeque<Step>,
    size: Option<Size>,
    resized: bool,
    output: Vec<u8>,
    writes: usize,
    fail_writes: bool,
    raw: bool,
    fail_enter: bool,
    fail_leave: bool,
}

impl ScriptedTty {
    /// A terminal whose size query reports `size`.
    #[must_use]
    pub fn new(size: Option<Size>) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Queue input bytes.
    #[must_use]
    pub fn input(mut self, bytes: &[u8]) -> Self {
        self.script.extend(bytes.iter().copied().map(Step::Byte));
        self
    }

    /// Queue a read that times out with no data.
    #[must_use]
    pub fn timeout(mut self) -> Self {
        self.script.push_back(Step::Timeout);
        self
    }

    /// Queue a window resize. The read it interrupts returns no data.
    #[must_use]
    pub fn resize(mut self, size: Option<Size>) -> Self {
        self.script.push_back(Step::Resize(size));
        self
    }

    /// Make every write fail with `BrokenPipe`.
    #[must_use]
    pub const fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Make entering raw mode fail as if `tcgetattr` had.
    #[must_use]
    pub const fn failing_enter(mut self) -> Self {
        self.fail_enter = true;
        self
    }

    /// Make leaving raw mode fail as if the restoring `tcsetattr` had.
    #[must_use]
    pub const fn failing_leave(mut self) -> Self {
        self.fail_leave = true;
        self
    }

    /// Whether the terminal is in raw mode.
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        self.raw
    }

    /// Everything written so far.
    #[must_use]
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Number of `write` calls that reached the terminal.
    #[must_use]
    pub const fn write_count(&self) -> usize {
        self.writes
    }

    /// Script steps not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl ByteSource for ScriptedTty {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        match self.script.pop_front() {
            Some(Step::Byte(b)) => Ok(Some(b)),
            Some(Step::Timeout) => Ok(None),
            Some(Step::Resize(size)) => {
                self.size = size;
                self.resized = true;
                Ok(None)
            }
            None => Err(TermError::Read(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input script exhausted",
            ))),
        }
    }
}

impl Write for ScriptedTty {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_writes {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        self.writes += 1;
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Tty for ScriptedTty {
    fn enter(&mut self, _read_timeout: Duration) -> Result<()> {
        if self.fail_enter {
            return Err(TermError::ModeCapture(io::Error::other("not a terminal")));
        }
        self.raw = true;
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if !std::mem::take(&mut self.raw) {
            return Ok(());
        }
        if self.fail_leave {
            return Err(TermError::ModeRestore(io::Error::other("terminal went away")));
        }
        Ok(())
    }

    fn window_size(&self) -> Option<Size> {
        self.size
    }

    fn take_resize(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }
}
