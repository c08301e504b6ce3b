// SPDX-License-Identifier: MIT
//
// Terminal failure taxonomy.
//
// Every variant is fatal to the editor. The only retried condition, a read
// that timed out with no data, never becomes an error: the byte source
// reports it as `Ok(None)`. Each variant names the failing operation so the
// binary can print a one-line diagnostic in the style of `perror`.

use std::io;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TermError>;

/// A fatal terminal or I/O failure.
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    /// `tcgetattr` failed while capturing the original terminal attributes.
    #[error("tcgetattr: {0}")]
    ModeCapture(#[source] io::Error),

    /// `tcsetattr` failed while applying raw mode.
    #[error("tcsetattr: {0}")]
    ModeApply(#[source] io::Error),

    /// `tcsetattr` failed while restoring the captured attributes.
    #[error("tcsetattr (restore): {0}")]
    ModeRestore(#[source] io::Error),

    /// Neither `TIOCGWINSZ` nor the cursor-position report produced a size.
    #[error("window size: {0}")]
    DimensionDetection(#[source] io::Error),

    /// Reading from the terminal failed for a reason other than "no data yet".
    #[error("read: {0}")]
    Read(#[source] io::Error),

    /// Writing to the terminal failed.
    #[error("write: {0}")]
    Write(#[source] io::Error),

    /// A raw-mode session is already active in this process.
    #[error("raw mode is already enabled")]
    SessionActive,
}

impl TermError {
    /// Build a [`DimensionDetection`](Self::DimensionDetection) error from a message.
    pub(crate) fn dimensions(msg: &str) -> Self {
        Self::DimensionDetection(io::Error::other(msg.to_owned()))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::error::Error as _;

    #[test]
    fn display_names_the_operation() {
        let err = TermError::Read(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert!(err.to_string().starts_with("read: "));

        let err = TermError::ModeCapture(io::Error::from(io::ErrorKind::NotFound));
        assert!(err.to_string().starts_with("tcgetattr: "));
    }

    #[test]
    fn restore_is_distinguishable_from_apply() {
        let apply = TermError::ModeApply(io::Error::other("x")).to_string();
        let restore = TermError::ModeRestore(io::Error::other("x")).to_string();
        assert_ne!(apply, restore);
    }

    #[test]
    fn source_is_the_io_error() {
        let err = TermError::Write(io::Error::other("broken pipe"));
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "broken pipe");
    }

    #[test]
    fn dimensions_helper_carries_message() {
        let err = TermError::dimensions("no cursor report");
        assert_eq!(err.to_string(), "window size: no cursor report");
    }

    #[test]
    fn session_active_has_no_source() {
        assert!(TermError::SessionActive.source().is_none());
    }
}
