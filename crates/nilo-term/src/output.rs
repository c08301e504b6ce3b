// SPDX-License-Identifier: MIT
//
// Output buffering.
//
// RenderBuffer accumulates every byte of one frame in memory so the whole
// frame reaches the terminal in a single write. Many small writes let the
// terminal paint half-drawn frames (tearing, a flickering cursor); one write
// per frame does not.
//
// A buffer lives for exactly one refresh cycle: created empty, appended to
// while the frame is composed, then consumed by `flush`, which writes and
// frees it. It is never carried over to the next frame.

use std::io::{self, Write};

use crate::error::{Result, TermError};

/// Initial capacity. A full 80×24 frame of tildes and escapes fits easily.
const DEFAULT_CAPACITY: usize = 4096;

// ─── RenderBuffer ────────────────────────────────────────────────────────────

/// Append-only byte accumulator for a single frame.
///
/// Appends are best-effort: if the allocator refuses to grow the buffer,
/// that append is dropped and rendering carries on with what fits.
#[derive(Debug)]
pub struct RenderBuffer {
    buf: Vec<u8>,
}

impl RenderBuffer {
    /// Create an empty buffer with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append `bytes` to the end of the frame.
    ///
    /// A failed allocation is a silent no-op for this append.
    pub fn append(&mut self, bytes: &[u8]) {
        if self.buf.try_reserve(bytes.len()).is_err() {
            tracing::warn!(len = bytes.len(), "render buffer could not grow; append dropped");
            return;
        }
        self.buf.extend_from_slice(bytes);
    }

    /// Write the whole frame to `w` in one operation, then release it.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::Write`] if writing or flushing `w` fails.
    pub fn flush(self, w: &mut impl Write) -> Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf).map_err(TermError::Write)?;
        }
        w.flush().map_err(TermError::Write)
    }
}

impl Write for RenderBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // No-op. The real flush consumes the buffer via `RenderBuffer::flush`.
        Ok(())
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
