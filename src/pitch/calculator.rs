//! Pitch calculation
//!
//! Derives the note to display and play from the five state primitives:
//! the clef table gives the natural pitch, and the accidental override and key
//! signature decide the accidental it sounds with.

use serde::{Deserialize, Serialize};

use crate::audio::frequency;
use crate::error::Result;
use crate::models::accidental::{AccidentalOverride, EffectiveAccidental};
use crate::models::clef::{Clef, Letter, PitchName, StaffPosition};
use crate::models::key_signature::{KeySignatureCount, KeySignatureFamily, KeySignatureName};
use crate::models::pitch_pipe_state::{PitchPipeState, StepDirection};

/// Note derived from the current state
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedNote {
    pub letter: Letter,
    pub octave: i8,
    pub effective_accidental: EffectiveAccidental,
}

impl CalculatedNote {
    /// Natural pitch as drawn on the staff
    pub fn pitch_name(&self) -> PitchName {
        PitchName::new(self.letter, self.octave)
    }

    /// Letter plus accidental symbol, e.g. "F#" or "Bb"
    pub fn note_identifier(&self) -> String {
        format!("{}{}", self.letter, self.effective_accidental.symbol())
    }

    /// Letter plus accidental glyph, e.g. "F♯"
    pub fn display_name(&self) -> String {
        format!("{}{}", self.letter, self.effective_accidental.display())
    }

    /// Absolute pitch index (C4 = 60)
    pub fn pitch_index(&self) -> i32 {
        frequency::pitch_index(self.letter, self.effective_accidental, self.octave as i32)
    }
}

/// Accidental a note sounds with
///
/// A natural override cancels the key signature, a sharp or flat override
/// always applies, and with no override the key signature decides.
pub fn effective_accidental(
    letter: Letter,
    accidental: AccidentalOverride,
    key_signature: KeySignatureName,
    family: KeySignatureFamily,
) -> EffectiveAccidental {
    match accidental {
        AccidentalOverride::Natural => EffectiveAccidental::None,
        AccidentalOverride::Sharp => EffectiveAccidental::Sharp,
        AccidentalOverride::Flat => EffectiveAccidental::Flat,
        AccidentalOverride::None if key_signature.alters(letter) => family.accidental(),
        AccidentalOverride::None => EffectiveAccidental::None,
    }
}

/// Calculate the note for a clef position under an accidental and key signature
///
/// Fails with `OutOfRange` when the position has no entry in the clef table.
///
/// # Examples
/// ```
/// use pitch_pipe_wasm::models::accidental::{AccidentalOverride, EffectiveAccidental};
/// use pitch_pipe_wasm::models::clef::{Clef, StaffPosition};
/// use pitch_pipe_wasm::models::key_signature::{KeySignatureCount, KeySignatureFamily};
/// use pitch_pipe_wasm::pitch::calculator::calculate_note;
///
/// // Bottom-space F in G major is F#
/// let note = calculate_note(
///     Clef::Treble,
///     StaffPosition(0),
///     AccidentalOverride::None,
///     KeySignatureFamily::Sharp,
///     KeySignatureCount::new(1).unwrap(),
/// ).unwrap();
/// assert_eq!(note.note_identifier(), "F#");
/// assert_eq!(note.octave, 4);
/// assert_eq!(note.effective_accidental, EffectiveAccidental::Sharp);
/// ```
pub fn calculate_note(
    clef: Clef,
    position: StaffPosition,
    accidental: AccidentalOverride,
    family: KeySignatureFamily,
    count: KeySignatureCount,
) -> Result<CalculatedNote> {
    let pitch = clef.pitch_name(position)?;
    let key_signature = KeySignatureName::resolve(family, count);

    Ok(CalculatedNote {
        letter: pitch.letter,
        octave: pitch.octave,
        effective_accidental: effective_accidental(pitch.letter, accidental, key_signature, family),
    })
}

/// Everything the page shows, derived from one state
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView {
    pub state: PitchPipeState,
    pub note: CalculatedNote,
    /// Natural pitch in renderer form ("F/4")
    pub pitch_name: String,
    /// "F#"
    pub note_identifier: String,
    /// "F♯"; the octave is shown separately as a subscript
    pub note_display: String,
    pub pitch_index: i32,
    pub key_signature: KeySignatureName,
    pub key_signature_display: String,
    pub min_position: i32,
    pub max_position: i32,
    pub can_step_up: bool,
    pub can_step_down: bool,
    pub can_step_octave_up: bool,
    pub can_step_octave_down: bool,
}

/// Recompute the derived view after a transition
pub fn recompute_derived_state(state: &PitchPipeState) -> Result<DerivedView> {
    let note = calculate_note(
        state.clef,
        state.position,
        state.accidental,
        state.key_signature_family,
        state.key_signature_count,
    )?;
    let key_signature = state.key_signature();
    let range = state.clef.position_range();

    Ok(DerivedView {
        state: *state,
        note,
        pitch_name: note.pitch_name().to_string(),
        note_identifier: note.note_identifier(),
        note_display: note.display_name(),
        pitch_index: note.pitch_index(),
        key_signature,
        key_signature_display: key_signature.display(),
        min_position: *range.start(),
        max_position: *range.end(),
        can_step_up: state.can_step(StepDirection::NoteUp),
        can_step_down: state.can_step(StepDirection::NoteDown),
        can_step_octave_up: state.can_step(StepDirection::OctaveUp),
        can_step_octave_down: state.can_step(StepDirection::OctaveDown),
    })
}
