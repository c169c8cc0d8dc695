//! Pitch pipe UI state
//!
//! The whole UI is described by five primitives. The state is a small `Copy`
//! value and every transition returns a new state; the controller swaps it
//! in and recomputes the derived view.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PitchPipeError, Result};
use crate::models::accidental::AccidentalOverride;
use crate::models::clef::{Clef, PitchName, StaffPosition};
use crate::models::key_signature::{KeySignatureCount, KeySignatureFamily, KeySignatureName};

/// Direction for the note and octave buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepDirection {
    NoteUp,
    NoteDown,
    OctaveUp,
    OctaveDown,
}

impl StepDirection {
    pub const ALL: [StepDirection; 4] = [
        StepDirection::NoteUp,
        StepDirection::NoteDown,
        StepDirection::OctaveUp,
        StepDirection::OctaveDown,
    ];

    /// Staff positions moved by one press
    pub fn delta(self) -> i32 {
        match self {
            StepDirection::NoteUp => 1,
            StepDirection::NoteDown => -1,
            StepDirection::OctaveUp => 7,
            StepDirection::OctaveDown => -7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepDirection::NoteUp => "noteUp",
            StepDirection::NoteDown => "noteDown",
            StepDirection::OctaveUp => "octaveUp",
            StepDirection::OctaveDown => "octaveDown",
        }
    }
}

impl fmt::Display for StepDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepDirection {
    type Err = PitchPipeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "noteUp" | "up" => Ok(StepDirection::NoteUp),
            "noteDown" | "down" => Ok(StepDirection::NoteDown),
            "octaveUp" => Ok(StepDirection::OctaveUp),
            "octaveDown" => Ok(StepDirection::OctaveDown),
            _ => Err(PitchPipeError::InvalidInput(format!(
                "Invalid step direction: '{}'. Expected one of: noteUp, noteDown, octaveUp, octaveDown",
                s
            ))),
        }
    }
}

/// Complete pitch pipe state
///
/// Defaults to the page's initial state: bottom-space F in the treble clef,
/// no accidental, key of C.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PitchPipeState {
    pub position: StaffPosition,
    pub clef: Clef,
    pub accidental: AccidentalOverride,
    pub key_signature_count: KeySignatureCount,
    pub key_signature_family: KeySignatureFamily,
}

impl PitchPipeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical key name selected by the family and count
    pub fn key_signature(&self) -> KeySignatureName {
        KeySignatureName::resolve(self.key_signature_family, self.key_signature_count)
    }

    /// Natural pitch drawn at the current position
    pub fn pitch_name(&self) -> Result<PitchName> {
        self.clef.pitch_name(self.position)
    }

    /// Switch clef, keeping the position (clamped into the new clef's range)
    pub fn with_clef(self, clef: Clef) -> Self {
        let range = clef.position_range();
        let position = StaffPosition(self.position.0.clamp(*range.start(), *range.end()));
        log::debug!("clef {} -> {}", self.clef, clef);
        Self { clef, position, ..self }
    }

    /// Move to `position`; positions outside the clef's table are ignored
    pub fn with_position(self, position: StaffPosition) -> Self {
        if self.clef.contains(position) {
            log::debug!("position {} -> {}", self.position, position);
            Self { position, ..self }
        } else {
            log::warn!(
                "position {} is outside the {} clef table, keeping {}",
                position,
                self.clef,
                self.position
            );
            self
        }
    }

    /// Apply a note or octave step if the target exists, otherwise no-op
    pub fn step(self, direction: StepDirection) -> Self {
        self.with_position(self.position.offset(direction.delta()))
    }

    /// Whether [`PitchPipeState::step`] would move the note
    pub fn can_step(&self, direction: StepDirection) -> bool {
        self.clef.contains(self.position.offset(direction.delta()))
    }

    pub fn with_accidental(self, accidental: AccidentalOverride) -> Self {
        log::debug!("accidental {} -> {}", self.accidental, accidental);
        Self { accidental, ..self }
    }

    pub fn with_key_signature_family(self, family: KeySignatureFamily) -> Self {
        Self { key_signature_family: family, ..self }
    }

    pub fn with_key_signature_count(self, count: KeySignatureCount) -> Self {
        Self { key_signature_count: count, ..self }
    }

    /// Select a key by name, back-computing the family and count
    pub fn with_key_signature(self, name: KeySignatureName) -> Self {
        let (family, count) = name.family_and_count();
        log::debug!("key signature {} -> {} ({} {})", self.key_signature(), name, count.get(), family);
        Self {
            key_signature_family: family,
            key_signature_count: count,
            ..self
        }
    }
}
