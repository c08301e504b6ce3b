//! Screen renderer — one complete frame per refresh.
//!
//! Composes a frame from the viewport into a [`RenderBuffer`]:
//!
//! ```text
//! ESC[?25l ESC[H                    hide cursor, go home
//! ~ ESC[K \r\n                      one tilde per row
//! ~ ESC[K \r\n
//! ~     Nilo editor -- ... ESC[K    welcome on row rows/3
//! ~ ESC[K                           no separator after the last row
//! ESC[{y+1};{x+1}H ESC[?25h         place and show the cursor
//! ```
//!
//! The cursor stays hidden while the frame is drawn so it never flickers
//! across the screen, and since the whole frame is flushed in one write
//! the terminal never shows a half-drawn state.

use std::io::{self, Write};

use unicode_width::UnicodeWidthChar;

use nilo_term::ansi;
use nilo_term::output::RenderBuffer;

use crate::viewport::Viewport;

/// Marker drawn at the start of rows with no content.
const TILDE: &[u8] = b"~";

/// Separator between rows. Raw mode disables output post-processing, so
/// the carriage return has to be explicit.
const ROW_SEPARATOR: &[u8] = b"\r\n";

/// Draws the editor screen.
#[derive(Debug, Clone)]
pub struct ScreenRenderer {
    welcome: String,
}

impl ScreenRenderer {
    /// A renderer that centres `welcome` a third of the way down.
    #[must_use]
    pub fn new(welcome: impl Into<String>) -> Self {
        Self {
            welcome: welcome.into(),
        }
    }

    /// Append one complete frame for `viewport` to `frame`.
    pub fn render_frame(&self, viewport: &Viewport, frame: &mut RenderBuffer) {
        // Writing into a RenderBuffer never fails.
        let _ = self.compose(viewport, frame);
    }

    fn compose(&self, viewport: &Viewport, frame: &mut RenderBuffer) -> io::Result<()> {
        ansi::cursor_hide(frame)?;
        ansi::cursor_home(frame)?;

        self.draw_rows(viewport, frame)?;

        let cursor = viewport.cursor();
        ansi::cursor_to(frame, cursor.x, cursor.y)?;
        ansi::cursor_show(frame)
    }

    fn draw_rows(&self, viewport: &Viewport, frame: &mut RenderBuffer) -> io::Result<()> {
        let rows = viewport.rows();
        let cols = usize::from(viewport.cols());
        let welcome_row = rows / 3;

        for y in 0..rows {
            if y == welcome_row {
                self.draw_welcome(cols, frame)?;
            } else {
                frame.write_all(TILDE)?;
            }

            ansi::clear_line(frame)?;
            if y + 1 < rows {
                frame.write_all(ROW_SEPARATOR)?;
            }
        }
        Ok(())
    }

    /// The welcome line: truncated to the width, centred, tilde first.
    fn draw_welcome(&self, cols: usize, frame: &mut RenderBuffer) -> io::Result<()> {
        let (welcome, width) = truncate_to_width(&self.welcome, cols);
        let mut padding = (cols - width) / 2;
        if padding > 0 {
            frame.write_all(TILDE)?;
            padding -= 1;
        }
        for _ in 0..padding {
            frame.write_all(b" ")?;
        }
        frame.write_all(welcome.as_bytes())
    }
}

/// The longest prefix of `s` that fits in `cols` terminal columns, and its
/// width. Control characters count as zero columns; the width is never
/// more than `cols`.
fn truncate_to_width(s: &str, cols: usize) -> (&str, usize) {
    let mut used = 0;
    for (i, ch) in s.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > cols {
            return (&s[..i], used);
        }
        used += w;
    }
    (s, used)
}
