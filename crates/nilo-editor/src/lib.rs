//! # nilo-editor — Editor core for nilo
//!
//! The layer between the terminal substrate in `nilo-term` and an actual
//! editor:
//!
//! - **[`config`]** — `EditorConfig`: quit key, welcome line, loop timing
//! - **[`viewport`]** — terminal dimensions and a cursor clamped to them
//! - **[`screen`]** — `ScreenRenderer`, one full frame per refresh
//! - **[`editor`]** — `Editor`, the event-loop application that dispatches keys
//!
//! Text buffers, files, and editing commands are not here yet; the editor
//! draws an empty screen and lets the cursor roam it.

pub mod config;
pub mod editor;
pub mod screen;
pub mod viewport;
