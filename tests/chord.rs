use std::sync::Once;

use approx::assert_relative_eq;
use sound_of_you::{
    note, render, resolve, synth, synthesize, ChordConfig, Playback, PlaybackResult,
};

static INIT: Once = Once::new();

fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Collects whatever it is asked to play
#[derive(Default)]
struct Recorder {
    played: Vec<(Vec<f64>, u32)>,
}

impl Playback for Recorder {
    fn play_blocking(&mut self, samples: &[f64], sample_rate: u32) -> PlaybackResult<()> {
        self.played.push((samples.to_vec(), sample_rate));
        Ok(())
    }
}

#[test]
fn e_major_triad() {
    init_logger();
    let config = ChordConfig::default()
        .sample_rate(44100)
        .duration(1.0)
        .notes(["E4", "G#4", "B4"])
        .amplitudes([0.7, 0.7, 0.7]);
    let synthesis = synthesize(&config).unwrap();

    for (freq, expected) in synthesis.frequencies.iter().zip([329.63, 415.30, 493.88]) {
        assert!((freq - expected).abs() < 0.01, "{freq} != {expected}");
    }
    assert_eq!(synthesis.combined.len(), 44100);
    assert_eq!(synthesis.time_axis.len(), 44100);
    assert_eq!(synthesis.frequency_bins.len(), 44100);
}

#[test]
fn default_chord() {
    init_logger();
    let config = ChordConfig::default();
    let synthesis = synthesize(&config).unwrap();
    assert_eq!(synthesis.len(), 88200);
    assert_eq!(synthesis.note_count(), 9);
    assert_eq!(synthesis.frequencies[0], 329.63);
    assert_eq!(synthesis.frequencies[8], 1567.98);
    let names: Vec<String> = synthesis.notes.iter().map(|n| n.to_string()).collect();
    assert_eq!(names, config.notes);
}

#[test]
fn time_axis_length() {
    let cases = [
        (44100, 2.0),
        (8000, 0.3),
        (22050, 0.01),
        (48000, 1.00001),
        (3, 0.5),
    ];
    for (rate, duration) in cases {
        let config = ChordConfig::default()
            .sample_rate(rate)
            .duration(duration)
            .notes(["A4"]);
        let synthesis = synthesize(&config).unwrap();
        let expected = (rate as f64 * duration).round() as usize;
        assert_eq!(synthesis.time_axis.len(), expected);
        assert_eq!(synthesis.combined.len(), expected);
        assert!(synthesis.time_axis.iter().all(|&t| (0.0..duration).contains(&t)));
    }
}

#[test]
fn combined_is_sum_of_rows() {
    let config = ChordConfig::default()
        .sample_rate(11025)
        .duration(0.5)
        .notes(["C4", "Eb4", "G4", "Bb4"])
        .amplitudes([0.7, 0.2, 0.5, 1.0]);
    let synthesis = synthesize(&config).unwrap();
    for s in 0..synthesis.len() {
        let sum: f64 = synthesis.waveforms.iter().map(|row| row[s]).sum();
        assert_eq!(synthesis.combined[s], sum);
    }
}

#[test]
fn spectra_round_trip() {
    let config = ChordConfig::default()
        .sample_rate(8000)
        .duration(0.37)
        .notes(["D#5", "F#5", "A#5"]);
    let synthesis = synthesize(&config).unwrap();
    for (i, waveform) in synthesis.waveforms.iter().enumerate() {
        let peak = waveform.iter().fold(0.0f64, |m, s| m.max(s.abs()));
        for (a, b) in synthesis.inverse(i).iter().zip(waveform) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9 * peak);
        }
    }
}

#[test]
fn amplitudes_scale_rows() {
    let config = ChordConfig::default()
        .sample_rate(8000)
        .duration(0.1)
        .notes(["A4", "A4"])
        .amplitudes([0.5, 1.0]);
    let synthesis = synthesize(&config).unwrap();
    for (a, b) in synthesis.waveforms[0].iter().zip(&synthesis.waveforms[1]) {
        assert_relative_eq!(a * 2.0, *b, epsilon = 1e-12);
    }
}

#[test]
fn errors() {
    assert_eq!(
        synthesize(&ChordConfig::default().notes(Vec::<&str>::new())),
        Err(synth::Error::EmptyChord)
    );
    assert_eq!(
        resolve("H4"),
        Err(note::Error::UnknownPitchClass("H".into()))
    );
    assert!(matches!(
        synthesize(&ChordConfig::default().notes(["E4", "G#"])),
        Err(synth::Error::Note {
            index: 1,
            source: note::Error::InvalidOctave(_),
            ..
        })
    ));
    let err = synthesize(&ChordConfig::default().notes(["H4"])).unwrap_err();
    assert_eq!(err.to_string(), "note 0 (\"H4\"): unknown pitch class \"H\"");
}

#[test]
fn playback_receives_combined_buffer() {
    let config = ChordConfig::default().sample_rate(16000).duration(0.25);
    let synthesis = synthesize(&config).unwrap();
    let mut recorder = Recorder::default();
    recorder
        .play_blocking(&synthesis.combined, synthesis.sample_rate)
        .unwrap();
    assert_eq!(recorder.played.len(), 1);
    assert_eq!(recorder.played[0].0, synthesis.combined);
    assert_eq!(recorder.played[0].1, 16000);
}

#[test]
fn default_figures() {
    let config = ChordConfig::default().sample_rate(8000).duration(0.5);
    let synthesis = synthesize(&config).unwrap();
    let figure = render::frequency_domain_figure(&synthesis, &config.captions);
    assert_eq!(figure.series.len(), 9);
    assert_eq!(figure.annotations.len(), 9);
    assert_eq!(figure.annotations[8].text, "what a 9.81m/s");
    let (lo, hi) = figure.x_limits.unwrap();
    for series in &figure.series {
        assert!(series.points.iter().all(|&[x, _]| lo <= x && x <= hi));
    }
}
