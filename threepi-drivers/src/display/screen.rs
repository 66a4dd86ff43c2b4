//! Character LCD model
//!
//! Keeps the screen contents in memory. Text is printed at the cursor and
//! wraps to the next row; anything past the last cell is dropped. Non-ASCII
//! characters show as `?`.

use threepi_core::traits::Display;

/// The robot's 8x2 LCD
pub type LcdScreen = CharScreen<8, 2>;

/// `COLS` x `ROWS` character screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharScreen<const COLS: usize, const ROWS: usize> {
    cells: [[u8; COLS]; ROWS],
    row: usize,
    col: usize,
    /// Set on every change, cleared by [`CharScreen::take_dirty`]
    dirty: bool,
}

impl<const COLS: usize, const ROWS: usize> Default for CharScreen<COLS, ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COLS: usize, const ROWS: usize> CharScreen<COLS, ROWS> {
    /// Blank screen with the cursor home
    pub const fn new() -> Self {
        Self {
            cells: [[b' '; COLS]; ROWS],
            row: 0,
            col: 0,
            dirty: false,
        }
    }

    /// Blank the screen and home the cursor
    pub fn clear(&mut self) {
        self.cells = [[b' '; COLS]; ROWS];
        self.row = 0;
        self.col = 0;
        self.dirty = true;
    }

    /// Print at the cursor, wrapping rows
    pub fn print(&mut self, text: &str) {
        for c in text.chars() {
            if self.row >= ROWS || COLS == 0 {
                break;
            }
            self.cells[self.row][self.col] = if c.is_ascii() && !c.is_ascii_control() {
                c as u8
            } else {
                b'?'
            };
            self.col += 1;
            if self.col == COLS {
                self.col = 0;
                self.row += 1;
            }
        }
        self.dirty = true;
    }

    /// Text of one row, trailing blanks included
    pub fn row_text(&self, row: usize) -> &str {
        self.cells
            .get(row)
            .and_then(|cells| core::str::from_utf8(cells).ok())
            .unwrap_or("")
    }

    /// Cursor as (row, column); row equals `ROWS` once the screen is full
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Return whether the screen changed since the last call, and reset
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }
}

impl<const COLS: usize, const ROWS: usize> Display for CharScreen<COLS, ROWS> {
    fn clear(&mut self) {
        CharScreen::clear(self);
    }

    fn show(&mut self, text: &str) {
        self.print(text);
    }
}
