//! Pitch pipe configuration
//!
//! The page may pass a partial configuration object to the `PitchPipe`
//! constructor; missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::audio::frequency::DEFAULT_REFERENCE_HZ;
use crate::audio::synth::Waveform;

/// Default tone length in seconds
pub const DEFAULT_TONE_DURATION_SECS: f64 = 1.0;

/// Default tone gain (0.0 - 1.0)
pub const DEFAULT_TONE_GAIN: f32 = 0.5;

/// Default rendering surface height in pixels
pub const DEFAULT_STAVE_HEIGHT: f64 = 200.0;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PitchPipeConfig {
    pub tone: ToneConfig,
    pub staff: StaffConfig,
}

/// Settings for the played tone
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ToneConfig {
    pub duration_secs: f64,
    pub gain: f32,
    pub waveform: Waveform,
    /// Frequency of A4
    pub reference_hz: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_TONE_DURATION_SECS,
            gain: DEFAULT_TONE_GAIN,
            waveform: Waveform::Sine,
            reference_hz: DEFAULT_REFERENCE_HZ,
        }
    }
}

/// Geometry used when laying out the staff and its sliders
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffConfig {
    /// Height of the rendering surface
    pub height: f64,
    /// Top of the stave within the surface
    pub stave_y: f64,
    /// Space kept to the right of the note
    pub note_padding: f64,
    /// Leftward shift that centers the overlay slider on the note
    pub overlay_nudge: f64,
    /// Gap between the stave and the visible slider
    pub slider_gap: f64,
}

impl Default for StaffConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_STAVE_HEIGHT,
            stave_y: 40.0,
            note_padding: 12.0,
            overlay_nudge: 10.0,
            slider_gap: 16.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PitchPipeConfig::default();
        assert_eq!(config.tone.duration_secs, 1.0);
        assert_eq!(config.tone.gain, 0.5);
        assert_eq!(config.tone.waveform, Waveform::Sine);
        assert_eq!(config.tone.reference_hz, 440.0);
        assert_eq!(config.staff.height, 200.0);
        assert_eq!(config.staff.note_padding, 12.0);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: PitchPipeConfig =
            serde_json::from_str(r#"{ "tone": { "durationSecs": 2.5 }, "staff": { "height": 150 } }"#).unwrap();
        assert_eq!(config.tone.duration_secs, 2.5);
        assert_eq!(config.tone.gain, 0.5);
        assert_eq!(config.staff.height, 150.0);
        assert_eq!(config.staff.stave_y, 40.0);
    }

    #[test]
    fn test_empty_config() {
        let config: PitchPipeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PitchPipeConfig::default());
    }
}
