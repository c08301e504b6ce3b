// SPDX-License-Identifier: MIT
//
// nilo-term — terminal control for the nilo editor.
//
// The substrate an editor is built on: put the controlling terminal into
// raw mode and guarantee it comes back out, decode raw input bytes into
// logical keys, and get each frame onto the screen in a single write.
//
// Like the rest of nilo, this crate talks to the terminal directly through
// termios and VT100 escape sequences rather than through a TUI framework.
// Terminal I/O sits behind the `ByteSource` and `Tty` traits so every layer
// above the raw file descriptors can be exercised in tests.

pub mod ansi;
pub mod error;
pub mod event_loop;
pub mod input;
pub mod output;
pub mod terminal;
pub mod testing;
