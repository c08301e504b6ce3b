// SPDX-License-Identifier: MIT
//
// Terminal input decoding.
//
// Turns raw stdin bytes into logical keys. Plain bytes pass straight
// through; the escape byte starts a short lookahead that recognizes the
// navigation keys terminals send in VT100/xterm form:
//
// - CSI letter:  ESC [ A/B/C/D/H/F   arrows, Home, End
// - CSI tilde:   ESC [ 1..8 ~        Home, Delete, End, PageUp, PageDown
// - SS3 letter:  ESC O H/F           Home, End (application cursor mode)
//
// # Design
//
// Decoding itself is the pure function [`parse`]: it looks at a lookahead
// of at most four bytes and says either "this is the key" or "need another
// byte". The I/O half, [`try_key`] / [`next_key`], pulls bytes from a
// [`ByteSource`] one at a time and stops as soon as `parse` has decided, so
// no byte beyond the recognized pattern is ever consumed.
//
// A read that times out in the middle of a sequence resolves the whole
// lookahead to a bare Escape. That is also how a lone Escape keypress is
// told apart from the start of a sequence: nothing follows it in time.

use crate::error::Result;

/// Escape byte (0x1B).
pub const ESC: u8 = 0x1B;

/// Longest sequence the decoder recognizes: `ESC [ <digit> ~`.
const MAX_SEQUENCE: usize = 4;

// ─── Key ────────────────────────────────────────────────────────────────────

/// A logical key produced by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Any byte that does not start an escape sequence, printable or control.
    Byte(u8),
    /// A bare Escape, or an escape sequence the decoder does not recognize.
    Escape,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
}

/// The byte a terminal sends for Ctrl + `key`.
///
/// Ctrl clears bits 5 and 6 of the ASCII code, so `ctrl_key(b'q')` is
/// `0x11`. Works for upper and lower case letters alike.
#[must_use]
pub const fn ctrl_key(key: u8) -> u8 {
    key & 0x1F
}

// ─── ByteSource ─────────────────────────────────────────────────────────────

/// A source of single input bytes with a read timeout.
///
/// `Ok(None)` means the timeout elapsed with no data (the retryable
/// "try again" condition). Any other failure is an error.
pub trait ByteSource {
    /// Read at most one byte.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::Read`](crate::error::TermError::Read) when the
    /// underlying read fails for any reason other than a timeout.
    fn read_byte(&mut self) -> Result<Option<u8>>;
}

// ─── Pure decoding ──────────────────────────────────────────────────────────

/// Result of decoding a lookahead buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed {
    /// The lookahead decodes to this key; every byte in it was consumed.
    Key(Key),
    /// The lookahead is a valid prefix of a longer sequence.
    Incomplete,
}

/// Decode a lookahead buffer that starts at a key boundary.
///
/// `bytes` holds everything read so far for this key. The caller appends one
/// byte at a time until this returns [`Parsed::Key`]. An empty buffer is
/// `Incomplete`.
#[must_use]
pub fn parse(bytes: &[u8]) -> Parsed {
    match bytes {
        [] => Parsed::Incomplete,
        [b, ..] if *b != ESC => Parsed::Key(Key::Byte(*b)),
        [_] | [_, b'[' | b'O'] | [_, b'[', b'0'..=b'9'] => Parsed::Incomplete,
        [_, b'[', d @ b'0'..=b'9', b'~', ..] => Parsed::Key(tilde_key(*d)),
        [_, b'[', letter, ..] => Parsed::Key(csi_letter(*letter)),
        [_, b'O', letter, ..] => Parsed::Key(ss3_letter(*letter)),
        _ => Parsed::Key(Key::Escape),
    }
}

/// `ESC [ <digit> ~` table. Unknown digits (0, 2, 9) fall back to Escape.
const fn tilde_key(digit: u8) -> Key {
    match digit {
        b'1' | b'7' => Key::Home,
        b'3' => Key::Delete,
        b'4' | b'8' => Key::End,
        b'5' => Key::PageUp,
        b'6' => Key::PageDown,
        _ => Key::Escape,
    }
}

const fn csi_letter(letter: u8) -> Key {
    match letter {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'H' => Key::Home,
        b'F' => Key::End,
        _ => Key::Escape,
    }
}

const fn ss3_letter(letter: u8) -> Key {
    match letter {
        b'H' => Key::Home,
        b'F' => Key::End,
        _ => Key::Escape,
    }
}

// ─── Reading keys ───────────────────────────────────────────────────────────

/// Try to read one key.
///
/// Returns `Ok(None)` if the first read times out with nothing typed. Once a
/// byte has arrived this always produces a key: a timeout inside an escape
/// sequence degrades to [`Key::Escape`].
///
/// # Errors
///
/// Propagates non-timeout read failures from `src`.
pub fn try_key(src: &mut impl ByteSource) -> Result<Option<Key>> {
    let Some(first) = src.read_byte()? else {
        return Ok(None);
    };

    let mut seq = [0u8; MAX_SEQUENCE];
    seq[0] = first;
    let mut len = 1;

    loop {
        if let Parsed::Key(key) = parse(&seq[..len]) {
            tracing::trace!(?key, bytes = ?&seq[..len], "key decoded");
            return Ok(Some(key));
        }
        // `parse` decides every sequence by its fourth byte.
        debug_assert!(len < MAX_SEQUENCE);
        match src.read_byte()? {
            Some(b) => {
                seq[len] = b;
                len += 1;
            }
            None => {
                tracing::trace!(bytes = ?&seq[..len], "escape sequence timed out");
                return Ok(Some(Key::Escape));
            }
        }
    }
}

/// Block until a key is available, retrying read timeouts indefinitely.
///
/// # Errors
///
/// Propagates non-timeout read failures from `src`.
pub fn next_key(src: &mut impl ByteSource) -> Result<Key> {
    loop {
        if let Some(key) = try_key(src)? {
            return Ok(key);
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TermError;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::io;

    /// Scripted input: `Some(b)` is a byte, `None` is a read timeout.
    /// Running out of script is an EOF error so tests can never hang.
    struct Script(VecDeque<Option<u8>>);

    impl Script {
        fn bytes(bytes: &[u8]) -> Self {
            Self(bytes.iter().copied().map(Some).collect())
        }

        fn with(steps: &[Option<u8>]) -> Self {
            Self(steps.iter().copied().collect())
        }

        fn remaining(&self) -> usize {
            self.0.len()
        }
    }

    impl ByteSource for Script {
        fn read_byte(&mut self) -> Result<Option<u8>> {
            self.0
                .pop_front()
                .ok_or_else(|| TermError::Read(io::Error::from(io::ErrorKind::UnexpectedEof)))
        }
    }

    fn key(bytes: &[u8]) -> Key {
        next_key(&mut Script::bytes(bytes)).unwrap()
    }

    // ── Plain bytes ─────────────────────────────────────────────────

    #[test]
    fn printable_byte() {
        assert_eq!(key(b"a"), Key::Byte(b'a'));
    }

    #[test]
    fn control_byte() {
        assert_eq!(key(&[0x11]), Key::Byte(0x11));
    }

    #[test]
    fn ctrl_key_masks_letters() {
        assert_eq!(ctrl_key(b'q'), 0x11);
        assert_eq!(ctrl_key(b'Q'), 0x11);
        assert_eq!(ctrl_key(b'a'), 0x01);
    }

    // ── CSI letters ─────────────────────────────────────────────────

    #[test]
    fn arrows() {
        assert_eq!(key(b"\x1b[A"), Key::Up);
        assert_eq!(key(b"\x1b[B"), Key::Down);
        assert_eq!(key(b"\x1b[C"), Key::Right);
        assert_eq!(key(b"\x1b[D"), Key::Left);
    }

    #[test]
    fn csi_home_end() {
        assert_eq!(key(b"\x1b[H"), Key::Home);
        assert_eq!(key(b"\x1b[F"), Key::End);
    }

    #[test]
    fn csi_unknown_letter_is_escape() {
        assert_eq!(key(b"\x1b[Z"), Key::Escape);
    }

    // ── CSI tilde ───────────────────────────────────────────────────

    #[test]
    fn tilde_delete_and_paging() {
        assert_eq!(key(b"\x1b[3~"), Key::Delete);
        assert_eq!(key(b"\x1b[5~"), Key::PageUp);
        assert_eq!(key(b"\x1b[6~"), Key::PageDown);
    }

    #[test]
    fn tilde_home_end_variants() {
        assert_eq!(key(b"\x1b[1~"), Key::Home);
        assert_eq!(key(b"\x1b[7~"), Key::Home);
        assert_eq!(key(b"\x1b[4~"), Key::End);
        assert_eq!(key(b"\x1b[8~"), Key::End);
    }

    #[test]
    fn tilde_unknown_digit_is_escape() {
        assert_eq!(key(b"\x1b[2~"), Key::Escape);
        assert_eq!(key(b"\x1b[9~"), Key::Escape);
    }

    #[test]
    fn digit_without_tilde_is_escape() {
        assert_eq!(key(b"\x1b[5x"), Key::Escape);
    }

    // ── SS3 ─────────────────────────────────────────────────────────

    #[test]
    fn ss3_home_end() {
        assert_eq!(key(b"\x1bOH"), Key::Home);
        assert_eq!(key(b"\x1bOF"), Key::End);
    }

    #[test]
    fn ss3_other_letter_is_escape() {
        assert_eq!(key(b"\x1bOP"), Key::Escape);
    }

    // ── Timeouts and malformed input ────────────────────────────────

    #[test]
    fn bare_escape_then_timeout() {
        let mut src = Script::with(&[Some(ESC), None]);
        assert_eq!(next_key(&mut src).unwrap(), Key::Escape);
        assert_eq!(src.remaining(), 0);
    }

    #[test]
    fn timeout_after_bracket_is_escape() {
        let mut src = Script::with(&[Some(ESC), Some(b'['), None]);
        assert_eq!(next_key(&mut src).unwrap(), Key::Escape);
    }

    #[test]
    fn timeout_after_digit_is_escape() {
        let mut src = Script::with(&[Some(ESC), Some(b'['), Some(b'5'), None]);
        assert_eq!(next_key(&mut src).unwrap(), Key::Escape);
    }

    #[test]
    fn leading_timeouts_are_retried() {
        let mut src = Script::with(&[None, None, None, Some(b'x')]);
        assert_eq!(next_key(&mut src).unwrap(), Key::Byte(b'x'));
    }

    #[test]
    fn try_key_reports_idle_timeout() {
        let mut src = Script::with(&[None]);
        assert_eq!(try_key(&mut src).unwrap(), None);
    }

    #[test]
    fn unrecognized_introducer_consumes_two_bytes() {
        let mut src = Script::bytes(b"\x1bxy");
        assert_eq!(next_key(&mut src).unwrap(), Key::Escape);
        assert_eq!(next_key(&mut src).unwrap(), Key::Byte(b'y'));
    }

    #[test]
    fn does_not_read_past_the_sequence() {
        let mut src = Script::bytes(b"\x1b[Aq");
        assert_eq!(next_key(&mut src).unwrap(), Key::Up);
        assert_eq!(src.remaining(), 1);
        assert_eq!(next_key(&mut src).unwrap(), Key::Byte(b'q'));
    }

    #[test]
    fn back_to_back_sequences() {
        let mut src = Script::bytes(b"\x1b[C\x1b[6~\x1bOHz");
        let keys: Vec<Key> = (0..4).map(|_| next_key(&mut src).unwrap()).collect();
        assert_eq!(keys, vec![Key::Right, Key::PageDown, Key::Home, Key::Byte(b'z')]);
    }

    #[test]
    fn read_error_propagates() {
        let mut src = Script::with(&[]);
        assert!(matches!(next_key(&mut src), Err(TermError::Read(_))));
    }

    // ── parse ───────────────────────────────────────────────────────

    #[test]
    fn parse_prefixes_are_incomplete() {
        assert_eq!(parse(b""), Parsed::Incomplete);
        assert_eq!(parse(b"\x1b"), Parsed::Incomplete);
        assert_eq!(parse(b"\x1b["), Parsed::Incomplete);
        assert_eq!(parse(b"\x1bO"), Parsed::Incomplete);
        assert_eq!(parse(b"\x1b[3"), Parsed::Incomplete);
    }

    #[test]
    fn parse_never_needs_a_fifth_byte() {
        for a in 0..=u8::MAX {
            for b in 0..=u8::MAX {
                let seq = [ESC, a, b, b'?'];
                assert!(matches!(parse(&seq), Parsed::Key(_)), "{seq:?}");
            }
        }
    }
}
