// SPDX-License-Identifier: MIT
//
// Terminal control: raw mode, window size, and guaranteed restore.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), isatty, and raw fd reads/writes. These are
// the standard POSIX interfaces for terminal control and have no safe
// alternative. Each unsafe block is minimal.
#![allow(unsafe_code)]
//
// Descriptor policy: every query (termios, window size, input reads,
// including the cursor-position reply) goes through stdin; every write goes
// to stdout. Mixing the two for a single query is how a size probe ends up
// talking to the wrong device when one of them is redirected.
//
// Restore is guaranteed three ways, in order of preference:
//
//   1. The binary calls `leave()` on every exit path.
//   2. `RawMode` restores on drop if nobody did.
//   3. A panic hook writes a visual reset straight to fd 1 and restores the
//      saved termios before the default handler prints its message.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;

use crate::ansi;
use crate::error::{Result, TermError};
use crate::input::{ByteSource, ESC};

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells. Both fields are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of columns (width in character cells).
    pub cols: u16,
    /// Number of rows (height in character cells).
    pub rows: u16,
}

impl Size {
    /// Build a size, rejecting degenerate dimensions.
    #[must_use]
    pub const fn new(cols: u16, rows: u16) -> Option<Self> {
        if cols == 0 || rows == 0 {
            None
        } else {
            Some(Self { cols, rows })
        }
    }
}

// ─── Tty ────────────────────────────────────────────────────────────────────

/// Everything the editor needs from a terminal: a raw-mode session, timed
/// byte input, output, and a direct size query.
///
/// [`Terminal`] is the real implementation. Tests drive the event loop and
/// the binary's session with a scripted one.
pub trait Tty: ByteSource + Write {
    /// Enter raw mode with the given read timeout. No-op if already active.
    ///
    /// # Errors
    ///
    /// Fails if the attributes cannot be captured or applied.
    fn enter(&mut self, read_timeout: Duration) -> Result<()>;

    /// Restore the original terminal attributes. No-op if not active.
    ///
    /// # Errors
    ///
    /// Fails if the attributes cannot be restored. The session counts as
    /// ended either way.
    fn leave(&mut self) -> Result<()>;

    /// Ask the OS for the window size. `None` if unavailable or degenerate.
    fn window_size(&self) -> Option<Size>;

    /// Whether the window was resized since the last call. Clears the flag.
    fn take_resize(&mut self) -> bool;
}

/// Determine the terminal dimensions.
///
/// Tries [`Tty::window_size`] first. If that fails, pushes the cursor into
/// the bottom-right corner and asks the terminal where it ended up.
///
/// # Errors
///
/// Returns [`TermError::DimensionDetection`] if both methods fail, or
/// [`TermError::Write`] / [`TermError::Read`] if the fallback probe cannot
/// talk to the terminal.
pub fn detect_size(tty: &mut impl Tty) -> Result<Size> {
    if let Some(size) = tty.window_size() {
        return Ok(size);
    }

    tracing::debug!("window size ioctl unavailable, probing cursor position");
    ansi::cursor_far_corner(tty).map_err(TermError::Write)?;
    let size = cursor_position(tty)?;
    tracing::debug!(?size, "window size from cursor report");
    Ok(size)
}

/// Longest cursor report we are willing to read: `ESC [ 65535 ; 65535 R`
/// is 14 bytes, so 32 leaves room for noise without reading forever.
const MAX_REPORT: usize = 32;

/// Request a cursor-position report and parse the reply as a size.
fn cursor_position(tty: &mut impl Tty) -> Result<Size> {
    ansi::request_cursor_position(tty).map_err(TermError::Write)?;
    tty.flush().map_err(TermError::Write)?;

    let mut reply = Vec::with_capacity(MAX_REPORT);
    while reply.len() < MAX_REPORT {
        match tty.read_byte()? {
            Some(b'R') => break,
            Some(b) => reply.push(b),
            None => break,
        }
    }

    parse_cursor_report(&reply)
        .ok_or_else(|| TermError::dimensions("no usable cursor position report"))
}

/// Parse a cursor-position report body `ESC [ rows ; cols` (the final `R`
/// already stripped) into a [`Size`].
#[must_use]
pub fn parse_cursor_report(reply: &[u8]) -> Option<Size> {
    let body = reply.strip_prefix(&[ESC, b'['])?;
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Size::new(cols.parse().ok()?, rows.parse().ok()?)
}

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Query the terminal size via `ioctl(TIOCGWINSZ)` on stdin.
///
/// Returns `None` if stdin is not a terminal, the query fails, or the
/// terminal reports a zero dimension.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDIN_FILENO, libc::TIOCGWINSZ, &raw mut ws) };

    if result == 0 {
        Size::new(ws.ws_col, ws.ws_row)
    } else {
        None
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

// ─── Resize ─────────────────────────────────────────────────────────────────

/// Set by the SIGWINCH handler, cleared by [`Tty::take_resize`].
static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

/// Install a signal handler for SIGWINCH (terminal resize).
///
/// The handler only stores to an atomic, which is async-signal-safe.
/// Without `SA_RESTART` a resize interrupts the pending `read()`, which the
/// byte source reports as a timeout so the loop notices promptly.
#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        sa.sa_flags = 0;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
fn install_sigwinch_handler() {}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// Global backup of original termios for panic recovery.
///
/// [`RawMode`] owns its own copy, but the panic hook can't reach it. This
/// backup lets the hook restore the line discipline without the guard.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Set while a raw-mode session is active. Only one may exist per process.
static RAW_SESSION: AtomicBool = AtomicBool::new(false);

/// Restore termios from the global backup. Best-effort, ignores errors.
#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, original);
            }
        }
    }
}

/// Visual reset for emergency use: show cursor, clear screen, home cursor.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[?25h\x1b[2J\x1b[H";

/// Panic hook guard, so the hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before printing the error.
///
/// A panic in raw mode would otherwise leave the shell with no echo and no
/// line editing. The hook writes [`EMERGENCY_RESTORE`] directly to fd 1
/// (bypassing Rust's stdout lock in case the panic happened mid-flush),
/// restores termios, logs the panic, then delegates to the original handler.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();

            #[cfg(unix)]
            restore_termios_from_backup();

            tracing::error!(%info, "panic in raw mode");
            original(info);
        }));
    });
}

/// Write the restore sequence directly to stdout's file descriptor.
fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── RawMode ────────────────────────────────────────────────────────────────

/// Convert a read timeout to `VTIME` deciseconds, clamped to `1..=255`.
///
/// Zero would make `read()` return immediately and spin the loop; 255 is
/// the field's limit.
#[must_use]
pub fn vtime_for(timeout: Duration) -> u8 {
    let ds = timeout.as_millis().div_ceil(100);
    u8::try_from(ds.clamp(1, 255)).unwrap_or(u8::MAX)
}

/// Scoped raw-mode session.
///
/// [`enable`](Self::enable) captures the current attributes and applies raw
/// mode; [`disable`](Self::disable) restores them exactly. Dropping an
/// enabled guard restores too, so the terminal is released on every path.
pub struct RawMode {
    /// Attributes captured before raw mode. `None` once restored.
    #[cfg(unix)]
    original: Option<libc::termios>,
    #[cfg(not(unix))]
    original: Option<()>,
}

impl RawMode {
    /// Capture the terminal attributes and switch to raw mode.
    ///
    /// Disables CR→NL translation, parity checking, 8th-bit stripping,
    /// software flow control, output post-processing, echo, canonical
    /// input, extended input processing, and signal characters. Sets
    /// `VMIN = 0` and `VTIME` from `read_timeout` so reads return after a
    /// short poll interval even when nothing was typed.
    ///
    /// # Errors
    ///
    /// - [`TermError::SessionActive`] if another session is already active.
    /// - [`TermError::ModeCapture`] if `tcgetattr` fails (e.g. not a tty).
    /// - [`TermError::ModeApply`] if `tcsetattr` fails.
    #[cfg(unix)]
    pub fn enable(read_timeout: Duration) -> Result<Self> {
        if RAW_SESSION
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(TermError::SessionActive);
        }

        match Self::apply(read_timeout) {
            Ok(original) => {
                install_panic_hook();
                tracing::info!(vtime = vtime_for(read_timeout), "raw mode enabled");
                Ok(Self {
                    original: Some(original),
                })
            }
            Err(e) => {
                RAW_SESSION.store(false, Ordering::Release);
                Err(e)
            }
        }
    }

    #[cfg(unix)]
    fn apply(read_timeout: Duration) -> Result<libc::termios> {
        let fd = libc::STDIN_FILENO;

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &raw mut termios) != 0 {
                return Err(TermError::ModeCapture(io::Error::last_os_error()));
            }
            let original = termios;

            // Save to the global backup for the panic hook.
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = Some(original);
            }

            termios.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
            termios.c_oflag &= !libc::OPOST;
            termios.c_cflag |= libc::CS8;
            termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);

            // VMIN=0, VTIME=n: read() returns after n tenths of a second
            // with zero bytes if nothing arrives.
            termios.c_cc[libc::VMIN] = 0;
            termios.c_cc[libc::VTIME] = vtime_for(read_timeout);

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const termios) != 0 {
                if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                    *guard = None;
                }
                return Err(TermError::ModeApply(io::Error::last_os_error()));
            }

            Ok(original)
        }
    }

    /// Without termios there is no line discipline to capture.
    ///
    /// # Errors
    ///
    /// Always returns [`TermError::ModeCapture`].
    #[cfg(not(unix))]
    pub fn enable(_read_timeout: Duration) -> Result<Self> {
        Err(TermError::ModeCapture(io::Error::from(io::ErrorKind::Unsupported)))
    }

    /// Whether the captured attributes are still waiting to be restored.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.original.is_some()
    }

    /// Restore the captured attributes. Idempotent: restores exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::ModeRestore`] if `tcsetattr` fails. The guard
    /// still counts as released, so the restore is not attempted again.
    pub fn disable(&mut self) -> Result<()> {
        let Some(original) = self.original.take() else {
            return Ok(());
        };
        RAW_SESSION.store(false, Ordering::Release);

        #[cfg(unix)]
        {
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = None;
            }
            let rc = unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const original) };
            if rc != 0 {
                return Err(TermError::ModeRestore(io::Error::last_os_error()));
            }
        }
        #[cfg(not(unix))]
        let () = original;

        tracing::info!("raw mode disabled");
        Ok(())
    }
}

impl std::fmt::Debug for RawMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawMode")
            .field("active", &self.is_active())
            .finish()
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if self.is_active() {
            let _ = self.disable();
        }
    }
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// The process's controlling terminal: stdin for input, stdout for output.
///
/// Call [`enter`](Tty::enter) to switch to raw mode and
/// [`leave`](Tty::leave) to restore. The terminal is also restored when the
/// handle is dropped, and on panic.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use nilo_term::terminal::{Terminal, Tty};
///
/// let mut term = Terminal::new();
/// term.enter(Duration::from_millis(100))?;
/// // ... render frames, handle input ...
/// term.leave()?;
/// # Ok::<(), nilo_term::error::TermError>(())
/// ```
#[derive(Debug)]
pub struct Terminal {
    mode: Option<RawMode>,
    /// Descriptor frames are written to.
    #[cfg(unix)]
    output: libc::c_int,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    /// Create a handle. Does **not** enter raw mode.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: None,
            #[cfg(unix)]
            output: libc::STDOUT_FILENO,
        }
    }

    /// A handle writing to `fd` instead of stdout.
    #[cfg(all(test, unix))]
    const fn with_output(fd: libc::c_int) -> Self {
        Self { mode: None, output: fd }
    }

    /// Whether raw mode is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.mode.as_ref().is_some_and(RawMode::is_active)
    }
}

impl ByteSource for Terminal {
    #[cfg(unix)]
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = 0u8;
        let n = unsafe { libc::read(libc::STDIN_FILENO, (&raw mut byte).cast(), 1) };

        match n {
            1 => Ok(Some(byte)),
            0 => Ok(None),
            _ => {
                let err = io::Error::last_os_error();
                match err.kind() {
                    // EAGAIN from VMIN=0 on some platforms; EINTR from SIGWINCH.
                    io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => Ok(None),
                    _ => Err(TermError::Read(err)),
                }
            }
        }
    }

    #[cfg(not(unix))]
    fn read_byte(&mut self) -> Result<Option<u8>> {
        use std::io::Read;

        let mut byte = [0u8; 1];
        match io::stdin().read(&mut byte) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(e) => Err(TermError::Read(e)),
        }
    }
}

/// Unbuffered: each `write` is one `write(2)` on the output descriptor.
/// `std::io::Stdout` is line-buffered and would split a frame at its last
/// `\r\n`. `write_all` retries short and interrupted writes.
#[cfg(unix)]
impl Write for Terminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = unsafe { libc::write(self.output, buf.as_ptr().cast::<libc::c_void>(), buf.len()) };
        usize::try_from(n).map_err(|_| io::Error::last_os_error())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(not(unix))]
impl Write for Terminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().lock().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        io::stdout().lock().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

impl Tty for Terminal {
    /// See [`RawMode::enable`] for the errors.
    fn enter(&mut self, read_timeout: Duration) -> Result<()> {
        if self.is_active() {
            return Ok(());
        }
        self.mode = Some(RawMode::enable(read_timeout)?);
        install_sigwinch_handler();
        Ok(())
    }

    /// See [`RawMode::disable`] for the errors.
    fn leave(&mut self) -> Result<()> {
        match self.mode.take() {
            Some(mut mode) => mode.disable(),
            None => Ok(()),
        }
    }

    fn window_size(&self) -> Option<Size> {
        get_size()
    }

    fn take_resize(&mut self) -> bool {
        SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTty;
    use pretty_assertions::assert_eq;
    use std::io::IsTerminal;

    // ── Size ──────────────────────────────────────────────────────────

    #[test]
    fn size_rejects_zero_dimensions() {
        assert_eq!(Size::new(0, 24), None);
        assert_eq!(Size::new(80, 0), None);
        assert_eq!(Size::new(80, 24), Some(Size { cols: 80, rows: 24 }));
    }

    // ── Cursor report parsing ───────────────────────────────────────

    #[test]
    fn parse_report_rows_then_cols() {
        assert_eq!(
            parse_cursor_report(b"\x1b[24;80"),
            Some(Size { cols: 80, rows: 24 })
        );
    }

    #[test]
    fn parse_report_rejects_garbage() {
        assert_eq!(parse_cursor_report(b""), None);
        assert_eq!(parse_cursor_report(b"24;80"), None);
        assert_eq!(parse_cursor_report(b"\x1b[24"), None);
        assert_eq!(parse_cursor_report(b"\x1b[a;80"), None);
        assert_eq!(parse_cursor_report(b"\x1b[0;80"), None);
        assert_eq!(parse_cursor_report(b"\x1b[99999;80"), None);
    }

    // ── detect_size ─────────────────────────────────────────────────

    #[test]
    fn detect_prefers_ioctl() {
        let mut tty = ScriptedTty::new(Some(Size { cols: 100, rows: 40 }));
        let size = detect_size(&mut tty).unwrap();
        assert_eq!(size, Size { cols: 100, rows: 40 });
        assert!(tty.output().is_empty());
    }

    #[test]
    fn detect_falls_back_to_cursor_report() {
        let mut tty = ScriptedTty::new(None).input(b"\x1b[50;132R");
        let size = detect_size(&mut tty).unwrap();
        assert_eq!(size, Size { cols: 132, rows: 50 });
        assert_eq!(tty.output(), b"\x1b[999C\x1b[999B\x1b[6n");
    }

    #[test]
    fn detect_fallback_stops_at_r() {
        let mut tty = ScriptedTty::new(None).input(b"\x1b[24;80Rq");
        detect_size(&mut tty).unwrap();
        assert_eq!(tty.remaining(), 1);
    }

    #[test]
    fn detect_fails_without_report() {
        let mut tty = ScriptedTty::new(None).timeout();
        let err = detect_size(&mut tty).unwrap_err();
        assert!(matches!(err, TermError::DimensionDetection(_)));
    }

    #[test]
    fn detect_fails_on_malformed_report() {
        let mut tty = ScriptedTty::new(None).input(b"\x1b[;R");
        assert!(matches!(
            detect_size(&mut tty),
            Err(TermError::DimensionDetection(_))
        ));
    }

    // ── VTIME ───────────────────────────────────────────────────────

    #[test]
    fn vtime_rounds_up_to_deciseconds() {
        assert_eq!(vtime_for(Duration::from_millis(100)), 1);
        assert_eq!(vtime_for(Duration::from_millis(150)), 2);
        assert_eq!(vtime_for(Duration::from_secs(1)), 10);
    }

    #[test]
    fn vtime_is_clamped() {
        assert_eq!(vtime_for(Duration::ZERO), 1);
        assert_eq!(vtime_for(Duration::from_secs(3600)), 255);
    }

    // ── Emergency restore sequence ──────────────────────────────────

    #[test]
    fn emergency_restore_shows_cursor_and_clears() {
        assert_eq!(EMERGENCY_RESTORE, b"\x1b[?25h\x1b[2J\x1b[H");
    }

    // ── Terminal queries ────────────────────────────────────────────

    #[test]
    fn get_size_without_tty_is_none() {
        if io::stdin().is_terminal() {
            return;
        }
        assert_eq!(get_size(), None);
    }

    // ── Output ──────────────────────────────────────────────────────

    /// A connected `SOCK_SEQPACKET` pair: every `write(2)` on one end
    /// arrives as exactly one message on the other.
    #[cfg(target_os = "linux")]
    fn packet_pair() -> [libc::c_int; 2] {
        let mut fds = [0; 2];
        let rc = unsafe { libc::socketpair(libc::AF_UNIX, libc::SOCK_SEQPACKET, 0, fds.as_mut_ptr()) };
        assert_eq!(rc, 0, "socketpair: {}", io::Error::last_os_error());
        fds
    }

    /// Every message waiting on `fd`, one entry per `write(2)`.
    #[cfg(target_os = "linux")]
    fn drain_packets(fd: libc::c_int) -> Vec<Vec<u8>> {
        let mut packets = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = unsafe { libc::recv(fd, buf.as_mut_ptr().cast(), buf.len(), libc::MSG_DONTWAIT) };
            let Ok(n) = usize::try_from(n) else { break };
            if n == 0 {
                break;
            }
            packets.push(buf[..n].to_vec());
        }
        packets
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn frame_reaches_the_descriptor_in_one_write() {
        use crate::output::RenderBuffer;

        let [ours, theirs] = packet_pair();
        let mut term = Terminal::with_output(ours);

        let mut frame = RenderBuffer::new();
        frame.append(b"\x1b[?25l\x1b[H~\x1b[K\r\n~\x1b[K\x1b[1;1H\x1b[?25h");
        let expected = frame.as_bytes().to_vec();
        frame.flush(&mut term).unwrap();

        let packets = drain_packets(theirs);
        unsafe {
            libc::close(ours);
            libc::close(theirs);
        }
        assert_eq!(packets, vec![expected]);
    }

    #[cfg(unix)]
    #[test]
    fn write_to_closed_descriptor_is_an_error() {
        let mut term = Terminal::with_output(-1);
        assert!(term.write_all(b"x").is_err());
    }

    // ── SIGWINCH flag ──────────────────────────────────────────────

    #[test]
    fn take_resize_clears_flag() {
        let mut term = Terminal::new();
        SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
        assert!(term.take_resize());
        assert!(!term.take_resize());
    }

    // ── Terminal / RawMode ──────────────────────────────────────────

    #[test]
    fn terminal_starts_inactive() {
        let term = Terminal::new();
        assert!(!term.is_active());
    }

    #[test]
    fn leave_without_enter_is_noop() {
        let mut term = Terminal::new();
        term.leave().unwrap();
        assert!(!term.is_active());
    }

    #[test]
    fn enter_without_tty_is_capture_failure() {
        if io::stdin().is_terminal() {
            return;
        }
        let mut term = Terminal::new();
        let err = term.enter(Duration::from_millis(100)).unwrap_err();
        assert!(matches!(err, TermError::ModeCapture(_)));
        assert!(!term.is_active());
    }
}
