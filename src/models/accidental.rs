//! Note accidentals
//!
//! `AccidentalOverride` is what the user picked for the note; it is the only
//! accidental representation kept in state. `EffectiveAccidental` is what the
//! note actually sounds with once the key signature is taken into account.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PitchPipeError, Result};

/// Explicit per-note accidental chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccidentalOverride {
    #[default]
    None,
    Sharp,
    Flat,
    Natural,
}

impl AccidentalOverride {
    pub const ALL: [AccidentalOverride; 4] = [
        AccidentalOverride::None,
        AccidentalOverride::Sharp,
        AccidentalOverride::Flat,
        AccidentalOverride::Natural,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AccidentalOverride::None => "none",
            AccidentalOverride::Sharp => "sharp",
            AccidentalOverride::Flat => "flat",
            AccidentalOverride::Natural => "natural",
        }
    }

    /// Accidental glyph code understood by the notation renderer
    ///
    /// `None` draws nothing; the key signature already shows its own accidentals.
    pub fn glyph_code(self) -> Option<&'static str> {
        match self {
            AccidentalOverride::None => None,
            AccidentalOverride::Sharp => Some("#"),
            AccidentalOverride::Flat => Some("b"),
            AccidentalOverride::Natural => Some("n"),
        }
    }

    /// Display character for the accidental selector ("", "♯", "♭", "♮")
    pub fn display(self) -> &'static str {
        match self {
            AccidentalOverride::None => "",
            AccidentalOverride::Sharp => "♯",
            AccidentalOverride::Flat => "♭",
            AccidentalOverride::Natural => "♮",
        }
    }
}

impl fmt::Display for AccidentalOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccidentalOverride {
    type Err = PitchPipeError;

    /// Accepts the enum labels as well as the symbol and glyph forms
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" | "none" => Ok(AccidentalOverride::None),
            "sharp" | "#" | "♯" => Ok(AccidentalOverride::Sharp),
            "flat" | "b" | "♭" => Ok(AccidentalOverride::Flat),
            "natural" | "n" | "♮" => Ok(AccidentalOverride::Natural),
            _ => Err(PitchPipeError::InvalidInput(format!(
                "Invalid accidental: '{}'. Expected one of: none, sharp, flat, natural",
                s
            ))),
        }
    }
}

/// Accidental the note sounds with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveAccidental {
    #[default]
    None,
    Sharp,
    Flat,
}

impl EffectiveAccidental {
    /// ASCII symbol used to compose note identifiers ("", "#", "b")
    pub fn symbol(self) -> &'static str {
        match self {
            EffectiveAccidental::None => "",
            EffectiveAccidental::Sharp => "#",
            EffectiveAccidental::Flat => "b",
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            EffectiveAccidental::None => "",
            EffectiveAccidental::Sharp => "♯",
            EffectiveAccidental::Flat => "♭",
        }
    }

    /// Semitone adjustment applied to the natural letter
    pub fn semitone_delta(self) -> i32 {
        match self {
            EffectiveAccidental::None => 0,
            EffectiveAccidental::Sharp => 1,
            EffectiveAccidental::Flat => -1,
        }
    }

    /// Parse a note-identifier modifier; only "#" and "b" alter the pitch
    pub fn from_symbol(symbol: &str) -> EffectiveAccidental {
        match symbol {
            "#" => EffectiveAccidental::Sharp,
            "b" => EffectiveAccidental::Flat,
            _ => EffectiveAccidental::None,
        }
    }
}

impl fmt::Display for EffectiveAccidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
