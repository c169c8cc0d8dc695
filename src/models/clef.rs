//! Clefs, staff positions and the clef pitch tables
//!
//! A staff position counts diatonic steps from the bottom space of the staff
//! (position 0). Each clef maps every position in its domain to exactly one
//! pitch name, so the table is an array per clef rather than a string-keyed
//! map. The arrays are built at compile time from the pitch of the bottom
//! space.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{PitchPipeError, Result};

/// Lowest staff position with a table entry (two octaves below the bottom space)
pub const MIN_POSITION: i32 = -14;

/// Highest staff position with a table entry
pub const MAX_POSITION: i32 = 20;

const POSITION_COUNT: usize = (MAX_POSITION - MIN_POSITION + 1) as usize;

// ============================================================================
// Letter
// ============================================================================

/// Natural note letter, ordered from C upwards as octaves are numbered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Diatonic index within the octave (C = 0, B = 6)
    pub const fn index(self) -> u8 {
        self as u8
    }

    const fn from_index(index: i32) -> Letter {
        match index {
            0 => Letter::C,
            1 => Letter::D,
            2 => Letter::E,
            3 => Letter::F,
            4 => Letter::G,
            5 => Letter::A,
            _ => Letter::B,
        }
    }

    /// Semitones above C of the natural letter
    pub fn semitone(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Letter::C => "C",
            Letter::D => "D",
            Letter::E => "E",
            Letter::F => "F",
            Letter::G => "G",
            Letter::A => "A",
            Letter::B => "B",
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Letter {
    type Err = PitchPipeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "C" => Ok(Letter::C),
            "D" => Ok(Letter::D),
            "E" => Ok(Letter::E),
            "F" => Ok(Letter::F),
            "G" => Ok(Letter::G),
            "A" => Ok(Letter::A),
            "B" => Ok(Letter::B),
            _ => Err(PitchPipeError::InvalidInput(format!("Invalid note letter: '{}'", s))),
        }
    }
}

// ============================================================================
// PitchName
// ============================================================================

/// A natural pitch: letter plus octave number (C4 is middle C)
///
/// Displays in the renderer's `Letter/Octave` form.
///
/// # Examples
/// ```
/// use pitch_pipe_wasm::models::clef::{Letter, PitchName};
///
/// let pitch: PitchName = "F/4".parse().unwrap();
/// assert_eq!(pitch, PitchName::new(Letter::F, 4));
/// assert_eq!(pitch.to_string(), "F/4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PitchName {
    pub letter: Letter,
    pub octave: i8,
}

impl PitchName {
    pub const fn new(letter: Letter, octave: i8) -> Self {
        Self { letter, octave }
    }

    /// Number of diatonic steps above C0
    pub const fn diatonic_index(self) -> i32 {
        self.octave as i32 * 7 + self.letter.index() as i32
    }

    pub const fn from_diatonic_index(index: i32) -> Self {
        Self {
            letter: Letter::from_index(index.rem_euclid(7)),
            octave: index.div_euclid(7) as i8,
        }
    }
}

impl fmt::Display for PitchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.letter, self.octave)
    }
}

impl FromStr for PitchName {
    type Err = PitchPipeError;

    fn from_str(s: &str) -> Result<Self> {
        let (letter, octave) = s
            .split_once('/')
            .ok_or_else(|| PitchPipeError::InvalidInput(format!("Invalid pitch name: '{}'", s)))?;
        let octave = octave
            .trim()
            .parse::<i8>()
            .map_err(|_| PitchPipeError::InvalidInput(format!("Invalid octave in pitch name: '{}'", s)))?;
        Ok(Self::new(letter.parse()?, octave))
    }
}

// ============================================================================
// StaffPosition
// ============================================================================

/// Vertical slot on the staff, 0 being the bottom space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffPosition(pub i32);

impl StaffPosition {
    pub fn value(self) -> i32 {
        self.0
    }

    /// Candidate position `delta` slots away (may fall outside every table)
    pub fn offset(self, delta: i32) -> StaffPosition {
        StaffPosition(self.0.saturating_add(delta))
    }
}

impl fmt::Display for StaffPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Clef
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clef {
    #[default]
    Treble,
    Bass,
    Alto,
    Tenor,
}

static PITCH_TABLE: [[PitchName; POSITION_COUNT]; 4] = [
    build_column(PitchName::new(Letter::F, 4)),
    build_column(PitchName::new(Letter::A, 2)),
    build_column(PitchName::new(Letter::G, 3)),
    build_column(PitchName::new(Letter::E, 3)),
];

const fn build_column(bottom_space: PitchName) -> [PitchName; POSITION_COUNT] {
    let mut column = [bottom_space; POSITION_COUNT];
    let lowest = bottom_space.diatonic_index() + MIN_POSITION;
    let mut slot = 0;
    while slot < POSITION_COUNT {
        column[slot] = PitchName::from_diatonic_index(lowest + slot as i32);
        slot += 1;
    }
    column
}

impl Clef {
    pub const ALL: [Clef; 4] = [Clef::Treble, Clef::Bass, Clef::Alto, Clef::Tenor];

    fn table(self) -> &'static [PitchName; POSITION_COUNT] {
        &PITCH_TABLE[self as usize]
    }

    /// Identifier shared with the notation renderer ("treble", "bass", ...)
    pub fn as_str(self) -> &'static str {
        match self {
            Clef::Treble => "treble",
            Clef::Bass => "bass",
            Clef::Alto => "alto",
            Clef::Tenor => "tenor",
        }
    }

    /// Label for the clef selector
    pub fn display_name(self) -> &'static str {
        match self {
            Clef::Treble => "Treble",
            Clef::Bass => "Bass",
            Clef::Alto => "Alto",
            Clef::Tenor => "Tenor",
        }
    }

    /// Staff positions that have a pitch in this clef's table
    pub fn position_range(self) -> RangeInclusive<i32> {
        MIN_POSITION..=MAX_POSITION
    }

    pub fn contains(self, position: StaffPosition) -> bool {
        self.pitch_at(position).is_some()
    }

    /// Pitch drawn at `position`, or `None` outside the table's domain
    pub fn pitch_at(self, position: StaffPosition) -> Option<PitchName> {
        let slot = position.0.checked_sub(MIN_POSITION)?;
        let slot = usize::try_from(slot).ok()?;
        self.table().get(slot).copied()
    }

    /// Like [`Clef::pitch_at`], but a miss is an `OutOfRange` error
    pub fn pitch_name(self, position: StaffPosition) -> Result<PitchName> {
        self.pitch_at(position).ok_or(PitchPipeError::OutOfRange {
            clef: self,
            position: position.0,
        })
    }
}

impl fmt::Display for Clef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Clef {
    type Err = PitchPipeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "treble" => Ok(Clef::Treble),
            "bass" => Ok(Clef::Bass),
            "alto" => Ok(Clef::Alto),
            "tenor" => Ok(Clef::Tenor),
            _ => Err(PitchPipeError::InvalidInput(format!(
                "Invalid clef: '{}'. Expected one of: treble, bass, alto, tenor",
                s
            ))),
        }
    }
}
