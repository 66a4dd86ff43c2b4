//! Tone player trait

/// Buzzer that plays notes in the background
pub trait TonePlayer {
    /// Start playing a note spec such as `"c16"`
    ///
    /// Returns without waiting for the note to finish. Unplayable specs
    /// are ignored.
    fn play(&mut self, note: &str);
}
