//! Key signatures
//!
//! A key signature is chosen either by accidental family and count, or
//! directly by name. Both entry points resolve through the same
//! `[family][count]` table, and each key name knows which letters it alters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PitchPipeError, Result};
use crate::models::accidental::EffectiveAccidental;
use crate::models::clef::Letter;

/// Order in which sharps are added to a key signature
const SHARP_ORDER: [Letter; 7] = [
    Letter::F,
    Letter::C,
    Letter::G,
    Letter::D,
    Letter::A,
    Letter::E,
    Letter::B,
];

/// Order in which flats are added to a key signature
const FLAT_ORDER: [Letter; 7] = [
    Letter::B,
    Letter::E,
    Letter::A,
    Letter::D,
    Letter::G,
    Letter::C,
    Letter::F,
];

// ============================================================================
// Family and count
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeySignatureFamily {
    #[default]
    Sharp,
    Flat,
}

impl KeySignatureFamily {
    pub const ALL: [KeySignatureFamily; 2] = [KeySignatureFamily::Sharp, KeySignatureFamily::Flat];

    pub fn as_str(self) -> &'static str {
        match self {
            KeySignatureFamily::Sharp => "sharp",
            KeySignatureFamily::Flat => "flat",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            KeySignatureFamily::Sharp => "Sharp",
            KeySignatureFamily::Flat => "Flat",
        }
    }

    /// Accidental applied to the letters this family alters
    pub fn accidental(self) -> EffectiveAccidental {
        match self {
            KeySignatureFamily::Sharp => EffectiveAccidental::Sharp,
            KeySignatureFamily::Flat => EffectiveAccidental::Flat,
        }
    }

    fn order(self) -> &'static [Letter; 7] {
        match self {
            KeySignatureFamily::Sharp => &SHARP_ORDER,
            KeySignatureFamily::Flat => &FLAT_ORDER,
        }
    }
}

impl fmt::Display for KeySignatureFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeySignatureFamily {
    type Err = PitchPipeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sharp" | "#" | "♯" => Ok(KeySignatureFamily::Sharp),
            "flat" | "b" | "♭" => Ok(KeySignatureFamily::Flat),
            _ => Err(PitchPipeError::InvalidInput(format!(
                "Invalid key signature accidental type: '{}'. Expected sharp or flat",
                s
            ))),
        }
    }
}

/// Number of accidentals in a key signature, 0 through 7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct KeySignatureCount(u8);

impl KeySignatureCount {
    pub const MAX: u8 = 7;

    pub fn new(count: u8) -> Result<Self> {
        if count <= Self::MAX {
            Ok(Self(count))
        } else {
            Err(PitchPipeError::InvalidInput(format!(
                "Invalid key signature accidental count: {} (expected 0-{})",
                count,
                Self::MAX
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = KeySignatureCount> {
        (0..=Self::MAX).map(KeySignatureCount)
    }
}

impl TryFrom<u8> for KeySignatureCount {
    type Error = PitchPipeError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<KeySignatureCount> for u8 {
    fn from(count: KeySignatureCount) -> u8 {
        count.0
    }
}

// ============================================================================
// Key signature names
// ============================================================================

/// Canonical key names, in the renderer's vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeySignatureName {
    #[default]
    C,
    G,
    D,
    A,
    E,
    B,
    #[serde(rename = "F#")]
    FSharp,
    #[serde(rename = "C#")]
    CSharp,
    F,
    Bb,
    Eb,
    Ab,
    Db,
    Gb,
    Cb,
}

static KEY_SIGNATURE_TABLE: [[KeySignatureName; 8]; 2] = [
    [
        KeySignatureName::C,
        KeySignatureName::G,
        KeySignatureName::D,
        KeySignatureName::A,
        KeySignatureName::E,
        KeySignatureName::B,
        KeySignatureName::FSharp,
        KeySignatureName::CSharp,
    ],
    [
        KeySignatureName::C,
        KeySignatureName::F,
        KeySignatureName::Bb,
        KeySignatureName::Eb,
        KeySignatureName::Ab,
        KeySignatureName::Db,
        KeySignatureName::Gb,
        KeySignatureName::Cb,
    ],
];

impl KeySignatureName {
    pub const ALL: [KeySignatureName; 15] = [
        KeySignatureName::C,
        KeySignatureName::G,
        KeySignatureName::D,
        KeySignatureName::A,
        KeySignatureName::E,
        KeySignatureName::B,
        KeySignatureName::FSharp,
        KeySignatureName::CSharp,
        KeySignatureName::F,
        KeySignatureName::Bb,
        KeySignatureName::Eb,
        KeySignatureName::Ab,
        KeySignatureName::Db,
        KeySignatureName::Gb,
        KeySignatureName::Cb,
    ];

    /// Key named by `count` accidentals of `family`; zero is always C
    ///
    /// # Examples
    /// ```
    /// use pitch_pipe_wasm::models::key_signature::{KeySignatureCount, KeySignatureFamily, KeySignatureName};
    ///
    /// let three = KeySignatureCount::new(3).unwrap();
    /// assert_eq!(KeySignatureName::resolve(KeySignatureFamily::Sharp, three).as_str(), "A");
    /// assert_eq!(KeySignatureName::resolve(KeySignatureFamily::Flat, three).as_str(), "Eb");
    /// ```
    pub fn resolve(family: KeySignatureFamily, count: KeySignatureCount) -> KeySignatureName {
        KEY_SIGNATURE_TABLE[family as usize][count.get() as usize]
    }

    /// Back-compute the family and count that select this key
    ///
    /// C is found in the sharp row first, so it resolves to zero sharps.
    pub fn family_and_count(self) -> (KeySignatureFamily, KeySignatureCount) {
        for family in KeySignatureFamily::ALL {
            for count in KeySignatureCount::all() {
                if Self::resolve(family, count) == self {
                    return (family, count);
                }
            }
        }
        // Every name appears in the table
        (KeySignatureFamily::Sharp, KeySignatureCount::default())
    }

    pub fn family(self) -> KeySignatureFamily {
        self.family_and_count().0
    }

    pub fn accidental_count(self) -> u8 {
        self.family_and_count().1.get()
    }

    /// Letters the key signature sharps or flats, in signature order
    pub fn altered_letters(self) -> &'static [Letter] {
        let (family, count) = self.family_and_count();
        &family.order()[..count.get() as usize]
    }

    pub fn alters(self, letter: Letter) -> bool {
        self.altered_letters().contains(&letter)
    }

    /// Canonical name, also used by the renderer ("F#", "Bb", ...)
    pub fn as_str(self) -> &'static str {
        match self {
            KeySignatureName::C => "C",
            KeySignatureName::G => "G",
            KeySignatureName::D => "D",
            KeySignatureName::A => "A",
            KeySignatureName::E => "E",
            KeySignatureName::B => "B",
            KeySignatureName::FSharp => "F#",
            KeySignatureName::CSharp => "C#",
            KeySignatureName::F => "F",
            KeySignatureName::Bb => "Bb",
            KeySignatureName::Eb => "Eb",
            KeySignatureName::Ab => "Ab",
            KeySignatureName::Db => "Db",
            KeySignatureName::Gb => "Gb",
            KeySignatureName::Cb => "Cb",
        }
    }

    /// Presentation form with ♯/♭ glyphs
    pub fn display(self) -> String {
        self.as_str().replace('#', "♯").replace('b', "♭")
    }
}

impl fmt::Display for KeySignatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeySignatureName {
    type Err = PitchPipeError;

    fn from_str(s: &str) -> Result<Self> {
        let canonical = s.trim().replace('♯', "#").replace('♭', "b");
        KeySignatureName::ALL
            .into_iter()
            .find(|name| name.as_str() == canonical)
            .ok_or_else(|| PitchPipeError::InvalidInput(format!("Unknown key signature: '{}'", s)))
    }
}

// ============================================================================
// Selector options
// ============================================================================

/// One entry of the key-name selector
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KeySignatureOption {
    /// Value submitted when chosen; empty for group headers
    pub value: String,
    pub label: String,
    /// Group headers ("Sharp", "Flat") are shown but not selectable
    pub disabled: bool,
}

/// Entries for the key-name selector: C, then each family under a header
pub fn key_signature_options() -> Vec<KeySignatureOption> {
    let mut options = vec![KeySignatureOption {
        value: KeySignatureName::C.as_str().to_string(),
        label: KeySignatureName::C.as_str().to_string(),
        disabled: false,
    }];

    for family in KeySignatureFamily::ALL {
        options.push(KeySignatureOption {
            value: String::new(),
            label: family.display_name().to_string(),
            disabled: true,
        });
        options.extend(
            KeySignatureCount::all()
                .map(|count| KeySignatureName::resolve(family, count))
                .filter(|name| *name != KeySignatureName::C)
                .map(|name| KeySignatureOption {
                    value: name.as_str().to_string(),
                    label: name.as_str().to_string(),
                    disabled: false,
                }),
        );
    }

    options
}
