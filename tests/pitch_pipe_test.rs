// Pitch pipe behavior through the controller: note calculation, key
// signatures, stepping limits, playback and staff layout

use pitch_pipe_wasm::audio::{Tone, ToneGenerator};
use pitch_pipe_wasm::config::{PitchPipeConfig, ToneConfig};
use pitch_pipe_wasm::models::clef::{MAX_POSITION, MIN_POSITION};
use pitch_pipe_wasm::renderers::{NotationSurface, NoteGeometry, StaffRenderRequest};
use pitch_pipe_wasm::{
    calculate_note, AccidentalOverride, Clef, EffectiveAccidental, KeySignatureCount, KeySignatureFamily,
    KeySignatureName, Letter, PitchPipeController, PitchPipeError, StaffPosition, StepDirection,
};

#[derive(Default)]
struct RecordingGenerator {
    tones: Vec<Tone>,
}

impl ToneGenerator for RecordingGenerator {
    fn play_tone(&mut self, tone: &Tone) -> pitch_pipe_wasm::Result<()> {
        self.tones.push(tone.clone());
        Ok(())
    }
}

struct NoAudio;

impl ToneGenerator for NoAudio {
    fn play_tone(&mut self, _tone: &Tone) -> pitch_pipe_wasm::Result<()> {
        Err(PitchPipeError::AudioUnavailable)
    }
}

#[derive(Default)]
struct RecordingSurface {
    requests: Vec<StaffRenderRequest>,
    size: (f64, f64),
}

impl NotationSurface for RecordingSurface {
    fn clear(&mut self) -> pitch_pipe_wasm::Result<()> {
        Ok(())
    }

    fn draw(&mut self, request: &StaffRenderRequest, _stave_width: f64) -> pitch_pipe_wasm::Result<NoteGeometry> {
        self.requests.push(request.clone());
        // Wider when an accidental is attached
        let width = if request.accidental.is_some() { 24.0 } else { 14.0 };
        Ok(NoteGeometry { absolute_x: 100.0, x: 5.0, width })
    }

    fn resize(&mut self, width: f64, height: f64) -> pitch_pipe_wasm::Result<()> {
        self.size = (width, height);
        Ok(())
    }
}

#[test]
fn test_treble_f_in_g_major_plays_f_sharp_4() {
    let mut controller = PitchPipeController::default();
    let view = controller.select_key_signature(KeySignatureName::G).unwrap();

    assert_eq!(view.pitch_name, "F/4");
    assert_eq!(view.note.effective_accidental, EffectiveAccidental::Sharp);
    assert_eq!(view.note_display, "F♯");

    let mut generator = RecordingGenerator::default();
    let tone = controller.play(&mut generator).unwrap();
    assert_eq!(tone.note, "F#");
    assert_eq!(tone.octave, 4);
    assert_eq!(tone.pitch_index, 66);
    assert!((tone.frequency - 369.99).abs() < 0.01);
}

#[test]
fn test_bass_a_in_c_plays_110_hz() {
    let mut controller = PitchPipeController::default();
    let view = controller.set_clef(Clef::Bass).unwrap();

    assert_eq!(view.pitch_name, "A/2");
    assert_eq!(view.note.effective_accidental, EffectiveAccidental::None);

    let mut generator = RecordingGenerator::default();
    let tone = controller.play(&mut generator).unwrap();
    assert!((tone.frequency - 110.0).abs() < 0.01);
    assert_eq!(tone.duration_secs, 1.0);
}

#[test]
fn test_every_position_yields_a_letter_and_table_octave() {
    for clef in Clef::ALL {
        for position in MIN_POSITION..=MAX_POSITION {
            let position = StaffPosition(position);
            let note = calculate_note(
                clef,
                position,
                AccidentalOverride::None,
                KeySignatureFamily::Sharp,
                KeySignatureCount::new(0).unwrap(),
            )
            .unwrap();
            let table = clef.pitch_at(position).unwrap();
            assert!(Letter::ALL.contains(&note.letter));
            assert_eq!(note.octave, table.octave);
            assert_eq!(note.letter, table.letter);
        }
    }
}

#[test]
fn test_key_signature_alteration_matches_altered_letters() {
    // Walk one octave in each key; exactly the key's letters pick up its accidental
    for family in KeySignatureFamily::ALL {
        for count in KeySignatureCount::all() {
            let key = KeySignatureName::resolve(family, count);
            let mut altered = 0;
            for position in 0..7 {
                let note = calculate_note(Clef::Treble, StaffPosition(position), AccidentalOverride::None, family, count)
                    .unwrap();
                if note.effective_accidental != EffectiveAccidental::None {
                    assert_eq!(note.effective_accidental, family.accidental());
                    assert!(key.alters(note.letter));
                    altered += 1;
                }
            }
            assert_eq!(altered, count.get() as usize, "key {}", key);
        }
    }
}

#[test]
fn test_stepping_stops_at_table_edges() {
    let mut controller = PitchPipeController::default();
    controller.set_position(StaffPosition(MAX_POSITION)).unwrap();

    let view = controller.step(StepDirection::NoteUp).unwrap();
    assert_eq!(view.state.position, StaffPosition(MAX_POSITION));
    assert!(!view.can_step_up);
    assert!(!view.can_step_octave_up);

    controller.set_position(StaffPosition(MIN_POSITION + 3)).unwrap();
    let view = controller.step(StepDirection::OctaveDown).unwrap();
    assert_eq!(view.state.position, StaffPosition(MIN_POSITION + 3));

    let view = controller.step(StepDirection::NoteDown).unwrap();
    assert_eq!(view.state.position, StaffPosition(MIN_POSITION + 2));
}

#[test]
fn test_octave_step_moves_one_octave() {
    let mut controller = PitchPipeController::default();
    let view = controller.step(StepDirection::OctaveUp).unwrap();
    assert_eq!(view.pitch_name, "F/5");
    let view = controller.step(StepDirection::OctaveDown).unwrap();
    let view_down = controller.step(StepDirection::OctaveDown).unwrap();
    assert_eq!(view.pitch_name, "F/4");
    assert_eq!(view_down.pitch_name, "F/3");
}

#[test]
fn test_direct_key_selection_sets_family_and_count() {
    let mut controller = PitchPipeController::default();
    let view = controller.select_key_signature(KeySignatureName::Db).unwrap();
    assert_eq!(view.state.key_signature_family, KeySignatureFamily::Flat);
    assert_eq!(view.state.key_signature_count.get(), 5);
    assert_eq!(view.key_signature_display, "D♭");

    // Changing the family keeps the count
    let view = controller.set_key_signature_family(KeySignatureFamily::Sharp).unwrap();
    assert_eq!(view.key_signature, KeySignatureName::B);
}

#[test]
fn test_natural_override_in_flat_key() {
    let mut controller = PitchPipeController::default();
    controller.select_key_signature(KeySignatureName::F).unwrap();
    controller.set_position(StaffPosition(3)).unwrap();

    let view = controller.view().unwrap();
    assert_eq!(view.note_identifier, "Bb");

    let view = controller.set_accidental(AccidentalOverride::Natural).unwrap();
    assert_eq!(view.note_identifier, "B");

    let mut generator = RecordingGenerator::default();
    let tone = controller.play(&mut generator).unwrap();
    assert_eq!(tone.pitch_index, 71);
}

#[test]
fn test_cb_key_plays_across_octave_line() {
    // C on the third space in Cb major sounds as B4
    let mut controller = PitchPipeController::default();
    controller.select_key_signature(KeySignatureName::Cb).unwrap();
    let view = controller.set_position(StaffPosition(4)).unwrap();
    assert_eq!(view.pitch_name, "C/5");
    assert_eq!(view.note_identifier, "Cb");
    assert_eq!(view.pitch_index, 71);
}

#[test]
fn test_b_sharp_in_c_sharp_major_sounds_as_next_octave_c() {
    // B on the middle line in C# major is B#4, the same pitch as C5
    let mut controller = PitchPipeController::default();
    controller.select_key_signature(KeySignatureName::CSharp).unwrap();
    let view = controller.set_position(StaffPosition(3)).unwrap();
    assert_eq!(view.pitch_name, "B/4");
    assert_eq!(view.note_identifier, "B#");
    assert_eq!(view.pitch_index, 72);

    let mut generator = RecordingGenerator::default();
    let tone = controller.play(&mut generator).unwrap();
    assert_eq!(tone.note, "B#");
    assert_eq!(tone.octave, 4);
    assert!((tone.frequency - 523.25).abs() < 0.01);
}

#[test]
fn test_play_without_audio_reports_error() {
    let controller = PitchPipeController::default();
    assert_eq!(controller.play(&mut NoAudio), Err(PitchPipeError::AudioUnavailable));
}

#[test]
fn test_configured_tone() {
    let config = PitchPipeConfig {
        tone: ToneConfig {
            duration_secs: 2.0,
            gain: 0.25,
            reference_hz: 442.0,
            ..ToneConfig::default()
        },
        ..PitchPipeConfig::default()
    };
    let mut controller = PitchPipeController::new(config);
    controller.set_position(StaffPosition(2)).unwrap();

    let mut generator = RecordingGenerator::default();
    let tone = controller.play(&mut generator).unwrap();
    // A4 against a 442 Hz reference
    assert_eq!(tone.note, "A");
    assert!((tone.frequency - 442.0).abs() < 1e-9);
    assert_eq!(tone.gain, 0.25);
    assert_eq!(tone.duration_secs, 2.0);
}

#[test]
fn test_render_through_surface() {
    let mut controller = PitchPipeController::default();
    controller.set_accidental(AccidentalOverride::Sharp).unwrap();

    let mut surface = RecordingSurface::default();
    let layout = controller.render(&mut surface, 500.0).unwrap();

    // 100 - 5 + 24
    assert_eq!(layout.note_right_edge, 119.0);
    assert_eq!(layout.stave_width, 131.0);
    assert_eq!(surface.size, (132.0, 200.0));
    assert_eq!(surface.requests.len(), 2);
    assert_eq!(surface.requests[0].accidental.as_deref(), Some("#"));
    assert_eq!(surface.requests[0].keys, vec!["F/4".to_string()]);
}

#[test]
fn test_rerender_is_idempotent() {
    let controller = PitchPipeController::default();
    let mut first = RecordingSurface::default();
    let mut second = RecordingSurface::default();
    let a = controller.render(&mut first, 320.0).unwrap();
    let b = controller.render(&mut second, 320.0).unwrap();
    assert_eq!(a, b);
    assert_eq!(first.requests, second.requests);
}
