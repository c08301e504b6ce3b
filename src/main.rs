// SPDX-License-Identifier: MIT
//
// nilo — the terminal-control core of a character-mode editor.
//
// This is the binary that wires the crates together:
//
//   nilo-term   → raw mode, key decoding, frame output, event loop
//   nilo-editor → viewport, screen renderer, key dispatch
//
// Lifecycle:
//
//   enter raw mode → detect size → event loop → leave raw mode → exit
//
// Leaving raw mode is explicit and happens on every path, success or
// failure, before the process exits. `process::exit` skips destructors,
// so the drop guard inside `Terminal` is only a backstop for panics.
//
// Exit status: 0 when the user quits, 1 on any fatal terminal failure,
// reported as one `nilo: <operation>: <error>` line on stderr.

use std::io::{self, Write};
use std::process;

use nilo_editor::config::EditorConfig;
use nilo_editor::editor::Editor;
use nilo_term::ansi;
use nilo_term::error::Result;
use nilo_term::event_loop::EventLoop;
use nilo_term::terminal::{self, Terminal, Tty};

mod logging;

fn main() {
    logging::init();

    let config = EditorConfig::default();
    let mut term = Terminal::new();

    let code = run(&mut term, &config, &mut io::stderr());
    process::exit(code);
}

/// Run one session on `tty` and return the exit status.
///
/// The terminal is restored before anything is reported. When both the
/// session and the restore fail, the session's error is the one printed.
fn run(tty: &mut impl Tty, config: &EditorConfig, diagnostics: &mut impl Write) -> i32 {
    let result = session(tty, config);
    let restored = tty.leave();

    match result.and(restored) {
        Ok(()) => {
            tracing::info!("exited cleanly");
            0
        }
        Err(e) => {
            // Best-effort: the screen may already be clean if the loop failed.
            let _ = ansi::reset_screen(tty);
            let _ = tty.flush();

            tracing::error!(error = %e, "fatal");
            let _ = writeln!(diagnostics, "nilo: {e}");
            1
        }
    }
}

/// Everything between entering and leaving raw mode.
fn session(tty: &mut impl Tty, config: &EditorConfig) -> Result<()> {
    tty.enter(config.event_loop.read_timeout)?;

    let size = terminal::detect_size(tty)?;
    tracing::info!(cols = size.cols, rows = size.rows, "terminal ready");

    let mut editor = Editor::new(size, config);
    EventLoop::new(tty).run(&mut editor)
}
