//! Pitch index and frequency conversion
//!
//! Pitch indices follow the MIDI numbering: C in octave -1 is 0, C4 is 60 and
//! A4 (the tuning reference) is 69. Frequencies are equal-tempered.

use crate::models::accidental::EffectiveAccidental;
use crate::models::clef::Letter;

/// Pitch index of the tuning reference (A4)
pub const REFERENCE_PITCH_INDEX: i32 = 69;

/// Default tuning reference in Hz
pub const DEFAULT_REFERENCE_HZ: f64 = 440.0;

/// Semitone offset from C for a letter and accidental
///
/// The natural letter's offset plus one for a sharp, minus one for a flat.
/// Enharmonic spellings share an offset (C# and Db are both 1), and spellings
/// that cross the octave line keep the letter's octave (Cb is -1, B# is 12).
pub fn semitone_offset(letter: Letter, accidental: EffectiveAccidental) -> i32 {
    letter.semitone() + accidental.semitone_delta()
}

/// Semitone offset for a composed note identifier such as "C#" or "Bb"
///
/// Returns `None` when the first character is not a note letter. Anything after
/// the letter other than "#" or "b" is treated as no accidental.
pub fn note_identifier_offset(identifier: &str) -> Option<i32> {
    let mut chars = identifier.chars();
    let letter = chars.next()?.to_string().parse::<Letter>().ok()?;
    let accidental = EffectiveAccidental::from_symbol(chars.as_str());
    Some(semitone_offset(letter, accidental))
}

/// Absolute pitch index: `12 * (octave + 1) + offset`
///
/// # Examples
/// ```
/// use pitch_pipe_wasm::audio::frequency::pitch_index;
/// use pitch_pipe_wasm::models::accidental::EffectiveAccidental;
/// use pitch_pipe_wasm::models::clef::Letter;
///
/// assert_eq!(pitch_index(Letter::C, EffectiveAccidental::None, 4), 60);
/// assert_eq!(pitch_index(Letter::F, EffectiveAccidental::Sharp, 4), 66);
/// ```
pub fn pitch_index(letter: Letter, accidental: EffectiveAccidental, octave: i32) -> i32 {
    12 * (octave + 1) + semitone_offset(letter, accidental)
}

/// Frequency of a pitch index against a reference frequency for A4
pub fn frequency_from_pitch_index(index: i32, reference_hz: f64) -> f64 {
    frequency_from_semitone_offset(index - REFERENCE_PITCH_INDEX, reference_hz)
}

/// Fractional pitch index of a frequency (inverse of [`frequency_from_pitch_index`])
pub fn pitch_index_from_frequency(frequency: f64, reference_hz: f64) -> f64 {
    REFERENCE_PITCH_INDEX as f64 + semitone_offset_from_frequency(frequency, reference_hz)
}

/// Frequency `semitones` away from the reference
pub fn frequency_from_semitone_offset(semitones: i32, reference_hz: f64) -> f64 {
    reference_hz * 2f64.powf(semitones as f64 / 12.0)
}

/// Semitones between `frequency` and the reference (fractional)
pub fn semitone_offset_from_frequency(frequency: f64, reference_hz: f64) -> f64 {
    12.0 * (frequency / reference_hz).log2()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_reference_pitch() {
        assert_eq!(pitch_index(Letter::A, EffectiveAccidental::None, 4), 69);
        assert!(approx(frequency_from_pitch_index(69, DEFAULT_REFERENCE_HZ), 440.0));
    }

    #[test]
    fn test_known_frequencies() {
        // A2
        assert!(approx(frequency_from_pitch_index(45, DEFAULT_REFERENCE_HZ), 110.0));
        // Middle C
        assert!(approx(frequency_from_pitch_index(60, DEFAULT_REFERENCE_HZ), 261.63));
        // F#4
        assert!(approx(frequency_from_pitch_index(66, DEFAULT_REFERENCE_HZ), 369.99));
        // F5
        assert!(approx(frequency_from_pitch_index(77, DEFAULT_REFERENCE_HZ), 698.46));
    }

    #[test]
    fn test_enharmonic_offsets() {
        assert_eq!(note_identifier_offset("C#"), note_identifier_offset("Db"));
        assert_eq!(note_identifier_offset("A#"), Some(10));
        assert_eq!(note_identifier_offset("Bb"), Some(10));
        assert_eq!(note_identifier_offset("Cb"), Some(-1));
        assert_eq!(note_identifier_offset("B#"), Some(12));
        assert_eq!(note_identifier_offset("E#"), Some(5));
        assert_eq!(note_identifier_offset("Fb"), Some(4));
        assert_eq!(note_identifier_offset("Gn"), Some(7));
        assert_eq!(note_identifier_offset("X"), None);
        assert_eq!(note_identifier_offset(""), None);
    }

    #[test]
    fn test_cross_octave_spellings() {
        // Cb4 sounds as B3, B#3 as C4
        assert_eq!(
            pitch_index(Letter::C, EffectiveAccidental::Flat, 4),
            pitch_index(Letter::B, EffectiveAccidental::None, 3)
        );
        assert_eq!(
            pitch_index(Letter::B, EffectiveAccidental::Sharp, 3),
            pitch_index(Letter::C, EffectiveAccidental::None, 4)
        );
    }

    #[test]
    fn test_frequency_round_trip() {
        for index in 0..=127 {
            let frequency = frequency_from_pitch_index(index, DEFAULT_REFERENCE_HZ);
            let back = pitch_index_from_frequency(frequency, DEFAULT_REFERENCE_HZ);
            assert!((back - index as f64).abs() < 1e-9, "index {}", index);
        }
        for semitones in -60..=60 {
            let frequency = frequency_from_semitone_offset(semitones, DEFAULT_REFERENCE_HZ);
            let back = semitone_offset_from_frequency(frequency, DEFAULT_REFERENCE_HZ);
            assert!((back - semitones as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn test_alternate_reference() {
        assert!(approx(frequency_from_pitch_index(69, 415.0), 415.0));
        assert!(approx(frequency_from_pitch_index(81, 415.0), 830.0));
    }
}
