//! Cursor-tracking text console.
//!
//! Invariant: the cursor is always inside the grid. [`Console::write_char`]
//! is the only place that advances it, and it wraps to the next row at the
//! last column and scrolls instead of moving past the last row.

use core::fmt;

use crate::buffer::{BUFFER_HEIGHT, BUFFER_WIDTH, ScreenChar, TextBuffer};
use crate::color::{Color, ColorCode};

/// A text console over an exclusively owned frame buffer.
pub struct Console<B: TextBuffer> {
    buffer: B,
    row: usize,
    column: usize,
    color: ColorCode,
    /// Scrolls since the last `initialize`.
    scrolls: usize,
}

impl<B: TextBuffer> Console<B> {
    /// Wrap `buffer`. The screen is left untouched until [`initialize`].
    ///
    /// [`initialize`]: Console::initialize
    pub const fn new(buffer: B) -> Self {
        Self {
            buffer,
            row: 0,
            column: 0,
            color: ColorCode::DEFAULT,
            scrolls: 0,
        }
    }

    /// Home the cursor, restore the default color and blank every cell.
    pub fn initialize(&mut self) {
        self.row = 0;
        self.column = 0;
        self.color = ColorCode::DEFAULT;
        self.scrolls = 0;
        for row in 0..BUFFER_HEIGHT {
            self.clear_row(row);
        }
        log::debug!("console initialized ({}x{})", BUFFER_WIDTH, BUFFER_HEIGHT);
    }

    pub fn set_color(&mut self, foreground: Color, background: Color) {
        self.color = ColorCode::new(foreground, background);
    }

    pub fn color(&self) -> ColorCode {
        self.color
    }

    /// Current `(row, column)` of the cursor.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    pub fn scroll_count(&self) -> usize {
        self.scrolls
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Write one character code at the cursor and advance.
    ///
    /// `\n` moves to column 0 of the next row. Every other byte, control
    /// codes included, is stored as-is in the active color.
    pub fn write_char(&mut self, c: u8) {
        if c == b'\n' {
            self.new_line();
            return;
        }

        self.buffer
            .write(self.row, self.column, ScreenChar::new(c, self.color));
        self.column += 1;
        if self.column == BUFFER_WIDTH {
            self.new_line();
        }
    }

    /// Write each byte in order.
    pub fn write_text(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_char(byte);
        }
    }

    /// Shift every row up by one and blank the last row in the active
    /// color. The cursor does not move.
    pub fn scroll(&mut self) {
        for row in 1..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                let cell = self.buffer.read(row, col);
                self.buffer.write(row - 1, col, cell);
            }
        }
        self.clear_row(BUFFER_HEIGHT - 1);
        self.scrolls += 1;
    }

    fn new_line(&mut self) {
        self.column = 0;
        if self.row + 1 < BUFFER_HEIGHT {
            self.row += 1;
        } else {
            self.scroll();
        }
    }

    fn clear_row(&mut self, row: usize) {
        let blank = ScreenChar::blank(self.color);
        for col in 0..BUFFER_WIDTH {
            self.buffer.write(row, col, blank);
        }
    }
}

impl<B: TextBuffer> fmt::Write for Console<B> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_text(s.as_bytes());
        Ok(())
    }
}
