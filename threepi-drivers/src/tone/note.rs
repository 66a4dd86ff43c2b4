//! Note spec parser
//!
//! Note specs are short strings such as `"c16"`: a letter, optional
//! accidentals and an optional duration divisor. Supported syntax:
//!
//! - `>` / `<` prefixes raise or lower the octave (repeatable)
//! - letters `a`-`g`, or `r` for a rest
//! - `+` or `#` sharpens, `-` flattens (repeatable)
//! - duration divisor: 1 whole, 2 half, 4 quarter (default), 8, 16, ...
//! - a trailing `.` makes the note dotted (half as long again)
//!
//! Durations assume [`TEMPO_BPM`] quarter notes per minute.

/// Quarter notes per minute
pub const TEMPO_BPM: u32 = 120;

/// Octave of an unprefixed note (`c` is middle C)
pub const DEFAULT_OCTAVE: i8 = 4;

/// Duration divisor when none is given
const DEFAULT_DIVISOR: u32 = 4;

/// Octave 4 frequencies in 0.1 Hz, C through B
const OCTAVE_4_DECIHZ: [u32; 12] = [
    2616, 2772, 2937, 3111, 3296, 3492, 3700, 3920, 4153, 4400, 4662, 4939,
];

/// Lowest and highest playable octave
const OCTAVE_RANGE: core::ops::RangeInclusive<i8> = 0..=8;

/// Note parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoteError {
    /// Empty spec
    Empty,
    /// Not a note letter
    InvalidNote,
    /// Duration divisor is zero, too large or followed by junk
    InvalidDuration,
    /// Octave shifted outside the buzzer's range
    OutOfRange,
}

/// One note to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    /// Frequency in Hz, 0 for a rest
    pub frequency_hz: u16,
    /// Length in milliseconds
    pub duration_ms: u16,
}

impl Note {
    /// Check if this is a rest
    pub fn is_rest(&self) -> bool {
        self.frequency_hz == 0
    }
}

/// Parse a note spec
pub fn parse_note(spec: &str) -> Result<Note, NoteError> {
    let mut chars = spec.trim().chars().peekable();
    if chars.peek().is_none() {
        return Err(NoteError::Empty);
    }

    let mut octave = DEFAULT_OCTAVE;
    while let Some(&c) = chars.peek() {
        match c {
            '>' => octave = octave.saturating_add(1),
            '<' => octave = octave.saturating_sub(1),
            _ => break,
        }
        chars.next();
    }

    let letter = chars.next().ok_or(NoteError::InvalidNote)?;
    let semitone: Option<i8> = match letter.to_ascii_lowercase() {
        'c' => Some(0),
        'd' => Some(2),
        'e' => Some(4),
        'f' => Some(5),
        'g' => Some(7),
        'a' => Some(9),
        'b' => Some(11),
        'r' => None,
        _ => return Err(NoteError::InvalidNote),
    };

    let mut shift: i8 = 0;
    while let Some(&c) = chars.peek() {
        match c {
            '+' | '#' => shift = shift.saturating_add(1),
            '-' => shift = shift.saturating_sub(1),
            _ => break,
        }
        chars.next();
    }

    let mut divisor: u32 = 0;
    let mut has_digits = false;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        divisor = divisor * 10 + digit;
        if divisor > 1024 {
            return Err(NoteError::InvalidDuration);
        }
        has_digits = true;
        chars.next();
    }
    if !has_digits {
        divisor = DEFAULT_DIVISOR;
    }
    if divisor == 0 {
        return Err(NoteError::InvalidDuration);
    }

    let dotted = chars.next_if_eq(&'.').is_some();
    if chars.next().is_some() {
        return Err(NoteError::InvalidDuration);
    }

    let whole_ms = 4 * 60_000 / TEMPO_BPM;
    let mut duration_ms = whole_ms / divisor;
    if dotted {
        duration_ms += duration_ms / 2;
    }

    let frequency_hz = match semitone {
        Some(semitone) => frequency(octave, semitone.saturating_add(shift))?,
        None => 0,
    };

    Ok(Note {
        frequency_hz,
        duration_ms: duration_ms as u16,
    })
}

/// Frequency for a semitone offset from C in `octave`, rounded to 1 Hz
fn frequency(octave: i8, semitone: i8) -> Result<u16, NoteError> {
    let octave = octave.saturating_add(semitone.div_euclid(12));
    let index = semitone.rem_euclid(12) as usize;
    if !OCTAVE_RANGE.contains(&octave) {
        return Err(NoteError::OutOfRange);
    }

    let base = OCTAVE_4_DECIHZ[index];
    let decihz = if octave >= DEFAULT_OCTAVE {
        base << (octave - DEFAULT_OCTAVE) as u32
    } else {
        base >> (DEFAULT_OCTAVE - octave) as u32
    };
    Ok(((decihz + 5) / 10) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_link_notes() {
        assert_eq!(
            parse_note("c16"),
            Ok(Note {
                frequency_hz: 262,
                duration_ms: 125
            })
        );
        assert_eq!(
            parse_note("d16"),
            Ok(Note {
                frequency_hz: 294,
                duration_ms: 125
            })
        );
    }

    #[test]
    fn test_default_duration_is_quarter() {
        assert_eq!(parse_note("a").unwrap().duration_ms, 500);
        assert_eq!(parse_note("a").unwrap().frequency_hz, 440);
        assert_eq!(parse_note("a1").unwrap().duration_ms, 2000);
    }

    #[test]
    fn test_octave_prefixes() {
        assert_eq!(parse_note(">a").unwrap().frequency_hz, 880);
        assert_eq!(parse_note(">>a").unwrap().frequency_hz, 1760);
        assert_eq!(parse_note("<a").unwrap().frequency_hz, 220);
    }

    #[test]
    fn test_accidentals() {
        assert_eq!(parse_note("c#").unwrap().frequency_hz, 277);
        assert_eq!(parse_note("c+").unwrap(), parse_note("d-").unwrap());
        // b sharp wraps into the next octave
        assert_eq!(parse_note("b+").unwrap().frequency_hz, 523);
        // c flat wraps into the previous one
        assert_eq!(parse_note("c-").unwrap().frequency_hz, 247);
    }

    #[test]
    fn test_rest_and_dot() {
        let rest = parse_note("r8").unwrap();
        assert!(rest.is_rest());
        assert_eq!(rest.duration_ms, 250);
        assert_eq!(parse_note("e8.").unwrap().duration_ms, 375);
    }

    #[test]
    fn test_uppercase_and_whitespace() {
        assert_eq!(parse_note(" C16 "), parse_note("c16"));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_note(""), Err(NoteError::Empty));
        assert_eq!(parse_note(">"), Err(NoteError::InvalidNote));
        assert_eq!(parse_note("h4"), Err(NoteError::InvalidNote));
        assert_eq!(parse_note("c0"), Err(NoteError::InvalidDuration));
        assert_eq!(parse_note("c4x"), Err(NoteError::InvalidDuration));
        assert_eq!(parse_note("c99999"), Err(NoteError::InvalidDuration));
        assert_eq!(parse_note(">>>>>c"), Err(NoteError::OutOfRange));
        assert_eq!(parse_note("<<<<<c"), Err(NoteError::OutOfRange));
    }

    proptest! {
        #[test]
        fn prop_never_panics(spec in "\\PC{0,12}") {
            let _ = parse_note(&spec);
        }

        #[test]
        fn prop_octave_up_doubles(index in 0usize..7) {
            let letter = ['c', 'd', 'e', 'f', 'g', 'a', 'b'][index];
            let mut base = [0u8; 4];
            let low = parse_note(letter.encode_utf8(&mut base)).unwrap().frequency_hz as i32;
            let mut spec = std::string::String::from(">");
            spec.push(letter);
            let high = parse_note(&spec).unwrap().frequency_hz as i32;
            prop_assert!((high - 2 * low).abs() <= 1);
        }
    }
}
