//! Viewport — terminal dimensions and a cursor bounded by them.
//!
//! The viewport is the visible terminal area. It owns the cursor and keeps
//! it inside `[0, cols-1] × [0, rows-1]` at all times. Every movement is
//! clamped: pushing against an edge is silently absorbed, never wrapped and
//! never an error.
//!
//! Dimensions come from [`nilo_term::terminal::detect_size`] at startup and
//! from the event loop on resize. A resize re-clamps the cursor so the
//! invariant survives the window shrinking under it.

use nilo_term::terminal::Size;

/// A cell position on screen, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl Cursor {
    /// The top-left cell.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// A cursor at `(x, y)`.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// A one-cell movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Terminal dimensions plus the cursor inside them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    size: Size,
    cursor: Cursor,
}

impl Viewport {
    /// A viewport of `size` with the cursor at the origin.
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            cursor: Cursor::ORIGIN,
        }
    }

    /// Current dimensions.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.size.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> u16 {
        self.size.cols
    }

    /// Current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Largest valid column.
    const fn max_x(&self) -> u16 {
        self.size.cols.saturating_sub(1)
    }

    /// Largest valid row.
    const fn max_y(&self) -> u16 {
        self.size.rows.saturating_sub(1)
    }

    /// Move the cursor one cell, clamped to the viewport.
    pub const fn move_cursor(&mut self, dir: Direction) {
        let c = &mut self.cursor;
        match dir {
            Direction::Up => c.y = c.y.saturating_sub(1),
            Direction::Down => {
                if c.y < self.size.rows.saturating_sub(1) {
                    c.y += 1;
                }
            }
            Direction::Left => c.x = c.x.saturating_sub(1),
            Direction::Right => {
                if c.x < self.size.cols.saturating_sub(1) {
                    c.x += 1;
                }
            }
        }
    }

    /// Move one screenful vertically: `rows` single steps in `dir`.
    pub fn page(&mut self, dir: Direction) {
        for _ in 0..self.size.rows {
            self.move_cursor(dir);
        }
    }

    /// Jump to the first column of the current row.
    pub const fn line_start(&mut self) {
        self.cursor.x = 0;
    }

    /// Jump to the last column of the current row.
    pub const fn line_end(&mut self) {
        self.cursor.x = self.max_x();
    }

    /// Adopt new dimensions, pulling the cursor back inside if needed.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.cursor.x = self.cursor.x.min(self.max_x());
        self.cursor.y = self.cursor.y.min(self.max_y());
    }
}
