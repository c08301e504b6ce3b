//! Editor — key dispatch on top of the viewport.
//!
//! [`Editor`] is the application the event loop drives. It owns the
//! [`Viewport`] and the [`ScreenRenderer`] and maps each decoded key to an
//! action:
//!
//! | Key                     | Effect                              |
//! |-------------------------|-------------------------------------|
//! | Up / Down / Left / Right| move one cell, clamped              |
//! | `PageUp` / `PageDown`   | move a screenful vertically         |
//! | Home / End              | first / last column of the row      |
//! | quit key (Ctrl+Q)       | end the session                     |
//! | anything else           | ignored                             |

use nilo_term::event_loop::{Action, App};
use nilo_term::input::Key;
use nilo_term::output::RenderBuffer;
use nilo_term::terminal::Size;

use crate::config::EditorConfig;
use crate::screen::ScreenRenderer;
use crate::viewport::{Direction, Viewport};

/// Editor state for one session.
#[derive(Debug, Clone)]
pub struct Editor {
    viewport: Viewport,
    renderer: ScreenRenderer,
    quit_key: u8,
}

impl Editor {
    /// An editor filling a terminal of `size`.
    #[must_use]
    pub fn new(size: Size, config: &EditorConfig) -> Self {
        Self {
            viewport: Viewport::new(size),
            renderer: ScreenRenderer::new(config.welcome.clone()),
            quit_key: config.quit_key,
        }
    }

    /// The viewport, for inspection.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

impl App for Editor {
    fn on_key(&mut self, key: Key) -> Action {
        match key {
            Key::Byte(b) if b == self.quit_key => return Action::Quit,
            Key::Up => self.viewport.move_cursor(Direction::Up),
            Key::Down => self.viewport.move_cursor(Direction::Down),
            Key::Left => self.viewport.move_cursor(Direction::Left),
            Key::Right => self.viewport.move_cursor(Direction::Right),
            Key::PageUp => self.viewport.page(Direction::Up),
            Key::PageDown => self.viewport.page(Direction::Down),
            Key::Home => self.viewport.line_start(),
            Key::End => self.viewport.line_end(),
            Key::Byte(_) | Key::Escape | Key::Delete => {}
        }
        Action::Continue
    }

    fn on_resize(&mut self, size: Size) {
        self.viewport.resize(size);
    }

    fn paint(&mut self, frame: &mut RenderBuffer) {
        self.renderer.render_frame(&self.viewport, frame);
    }
}
