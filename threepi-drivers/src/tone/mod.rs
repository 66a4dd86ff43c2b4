//! Buzzer tone support

pub mod note;

pub use note::{parse_note, Note, NoteError, DEFAULT_OCTAVE, TEMPO_BPM};
