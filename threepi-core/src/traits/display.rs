//! Character display trait

/// Small character display
///
/// `show` prints at the current cursor position and advances it, so
/// consecutive calls append. `clear` blanks the screen and homes the cursor.
pub trait Display {
    /// Clear the screen and move the cursor home
    fn clear(&mut self);

    /// Print text at the cursor
    fn show(&mut self, text: &str);
}
