//! Tone synthesis
//!
//! Converts a note name and octave into a single-voice tone and hands it to a
//! `ToneGenerator`. The generator owns the audio resources; the browser
//! implementation lives in `audio::web`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::frequency;
use crate::config::ToneConfig;
use crate::error::Result;
use crate::models::accidental::EffectiveAccidental;
use crate::models::clef::Letter;
use crate::pitch::CalculatedNote;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    pub fn as_str(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tone to emit
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tone {
    /// Note identifier the tone was built from ("F#")
    pub note: String,
    pub octave: i32,
    pub pitch_index: i32,
    pub frequency: f64,
    pub waveform: Waveform,
    pub gain: f32,
    pub duration_secs: f64,
}

/// Something that can emit a tone
///
/// Implementations acquire whatever audio resource they need per tone and
/// release it when the tone ends.
pub trait ToneGenerator {
    fn play_tone(&mut self, tone: &Tone) -> Result<()>;
}

/// Build the tone for a letter, accidental symbol and octave
///
/// Only "#" and "b" alter the pitch; any other symbol (natural, none) plays the
/// plain letter.
pub fn tone_for(letter: Letter, accidental_symbol: &str, octave: i32, config: &ToneConfig) -> Tone {
    let accidental = EffectiveAccidental::from_symbol(accidental_symbol);
    let pitch_index = frequency::pitch_index(letter, accidental, octave);

    Tone {
        note: format!("{}{}", letter, accidental.symbol()),
        octave,
        pitch_index,
        frequency: frequency::frequency_from_pitch_index(pitch_index, config.reference_hz),
        waveform: config.waveform,
        gain: config.gain,
        duration_secs: config.duration_secs,
    }
}

/// Play a pitch through `generator` and return the tone that was emitted
pub fn play_pitch<G: ToneGenerator + ?Sized>(
    generator: &mut G,
    letter: Letter,
    accidental_symbol: &str,
    octave: i32,
    config: &ToneConfig,
) -> Result<Tone> {
    let tone = tone_for(letter, accidental_symbol, octave, config);
    log::info!(
        "playing {}{} ({:.2} Hz, {} for {}s)",
        tone.note,
        tone.octave,
        tone.frequency,
        tone.waveform,
        tone.duration_secs
    );

    generator.play_tone(&tone).map_err(|e| {
        log::error!("failed to play {}{}: {}", tone.note, tone.octave, e);
        e
    })?;

    Ok(tone)
}

/// Play the calculated note
pub fn play_note<G: ToneGenerator + ?Sized>(
    generator: &mut G,
    note: &CalculatedNote,
    config: &ToneConfig,
) -> Result<Tone> {
    play_pitch(
        generator,
        note.letter,
        note.effective_accidental.symbol(),
        note.octave as i32,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PitchPipeError;

    #[derive(Default)]
    struct RecordingGenerator {
        played: Vec<Tone>,
    }

    impl ToneGenerator for RecordingGenerator {
        fn play_tone(&mut self, tone: &Tone) -> Result<()> {
            self.played.push(tone.clone());
            Ok(())
        }
    }

    struct SilentHost;

    impl ToneGenerator for SilentHost {
        fn play_tone(&mut self, _tone: &Tone) -> Result<()> {
            Err(PitchPipeError::AudioUnavailable)
        }
    }

    #[test]
    fn test_play_f_sharp_4() {
        let mut generator = RecordingGenerator::default();
        let tone = play_pitch(&mut generator, Letter::F, "#", 4, &ToneConfig::default()).unwrap();

        assert_eq!(tone.note, "F#");
        assert_eq!(tone.pitch_index, 66);
        assert!((tone.frequency - 369.99).abs() < 0.01);
        assert_eq!(tone.waveform, Waveform::Sine);
        assert_eq!(tone.gain, 0.5);
        assert_eq!(tone.duration_secs, 1.0);
        assert_eq!(generator.played, vec![tone]);
    }

    #[test]
    fn test_natural_symbol_plays_plain_letter() {
        let tone = tone_for(Letter::A, "n", 2, &ToneConfig::default());
        assert_eq!(tone.note, "A");
        assert!((tone.frequency - 110.0).abs() < 0.01);
    }

    #[test]
    fn test_overlapping_plays_are_layered() {
        let mut generator = RecordingGenerator::default();
        let config = ToneConfig::default();
        play_pitch(&mut generator, Letter::C, "", 4, &config).unwrap();
        play_pitch(&mut generator, Letter::E, "", 4, &config).unwrap();
        assert_eq!(generator.played.len(), 2);
    }

    #[test]
    fn test_missing_audio_fails_fast() {
        let result = play_pitch(&mut SilentHost, Letter::C, "", 4, &ToneConfig::default());
        assert_eq!(result, Err(PitchPipeError::AudioUnavailable));
    }

    #[test]
    fn test_play_note_uses_effective_accidental() {
        let note = CalculatedNote {
            letter: Letter::B,
            octave: 3,
            effective_accidental: EffectiveAccidental::Flat,
        };
        let mut generator = RecordingGenerator::default();
        let tone = play_note(&mut generator, &note, &ToneConfig::default()).unwrap();
        assert_eq!(tone.note, "Bb");
        assert_eq!(tone.pitch_index, 58);
    }
}
