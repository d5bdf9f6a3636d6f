//! Chord synthesis parameters

/// The sample rate used when none is given
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
/// The chord duration used when none is given
pub const DEFAULT_DURATION_SECS: f64 = 2.0;
/// The per-note amplitude used when none is given
pub const DEFAULT_AMPLITUDE: f64 = 0.7;

/// E major 13
const DEFAULT_NOTES: [&str; 9] = ["E4", "G#4", "B4", "D#5", "F#5", "A#5", "C#6", "E6", "G6"];

const DEFAULT_CAPTIONS: [&str; 9] = [
    "enthousiasm",
    "generosity",
    "rechtvaardig",
    "high EQ",
    "funny",
    "A baller",
    "brave",
    "epic",
    "what a 9.81m/s",
];

/**
Parameters for [`synthesize`](crate::synthesize)

`notes` and `amplitudes` are row-aligned. `captions` is purely presentational
and may be shorter than `notes`.
*/
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "ChordConfigFile"))]
pub struct ChordConfig {
    /// Samples per second
    pub sample_rate: u32,
    /// Length of the chord in seconds
    pub duration_secs: f64,
    /// Note names in voicing order
    pub notes: Vec<String>,
    /// Amplitude of each note
    pub amplitudes: Vec<f64>,
    /// Text shown next to each note's spectral peak
    pub captions: Vec<String>,
}

impl Default for ChordConfig {
    fn default() -> Self {
        ChordConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration_secs: DEFAULT_DURATION_SECS,
            notes: DEFAULT_NOTES.iter().map(|s| s.to_string()).collect(),
            amplitudes: vec![DEFAULT_AMPLITUDE; DEFAULT_NOTES.len()],
            captions: DEFAULT_CAPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ChordConfig {
    /// Set the sample rate
    pub fn sample_rate(self, sample_rate: u32) -> Self {
        ChordConfig {
            sample_rate,
            ..self
        }
    }
    /// Set the duration in seconds
    pub fn duration(self, duration_secs: f64) -> Self {
        ChordConfig {
            duration_secs,
            ..self
        }
    }
    /// Set the notes
    ///
    /// Amplitudes are reset to the default amplitude for every note
    /// and captions are cleared.
    pub fn notes<I>(self, notes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let notes: Vec<String> = notes.into_iter().map(Into::into).collect();
        ChordConfig {
            amplitudes: vec![DEFAULT_AMPLITUDE; notes.len()],
            captions: Vec::new(),
            notes,
            ..self
        }
    }
    /// Use the same amplitude for every note
    pub fn uniform_amplitude(self, amp: f64) -> Self {
        ChordConfig {
            amplitudes: vec![amp; self.notes.len()],
            ..self
        }
    }
    /// Set the amplitude of each note
    pub fn amplitudes(self, amplitudes: impl Into<Vec<f64>>) -> Self {
        ChordConfig {
            amplitudes: amplitudes.into(),
            ..self
        }
    }
    /// Set the caption of each note
    pub fn captions<I>(self, captions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        ChordConfig {
            captions: captions.into_iter().map(Into::into).collect(),
            ..self
        }
    }
    /// Load a config from JSON
    ///
    /// Missing fields take their default values. If `notes` is given without
    /// `amplitudes`, every note gets the default amplitude, and without
    /// `captions` there are none.
    #[cfg(feature = "serde")]
    pub fn from_json<R>(reader: R) -> Result<Self, serde_json::Error>
    where
        R: std::io::Read,
    {
        serde_json::from_reader(reader)
    }
}

/// [`ChordConfig`] as written in a file, where any field may be left out
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ChordConfigFile {
    sample_rate: Option<u32>,
    duration_secs: Option<f64>,
    notes: Option<Vec<String>>,
    amplitudes: Option<Vec<f64>>,
    captions: Option<Vec<String>>,
}

#[cfg(feature = "serde")]
impl From<ChordConfigFile> for ChordConfig {
    fn from(file: ChordConfigFile) -> Self {
        let mut config = match file.notes {
            Some(notes) => ChordConfig::default().notes(notes),
            None => ChordConfig::default(),
        };
        if let Some(sample_rate) = file.sample_rate {
            config.sample_rate = sample_rate;
        }
        if let Some(duration_secs) = file.duration_secs {
            config.duration_secs = duration_secs;
        }
        if let Some(amplitudes) = file.amplitudes {
            config.amplitudes = amplitudes;
        }
        if let Some(captions) = file.captions {
            config.captions = captions;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ChordConfig::default();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.duration_secs, 2.0);
        assert_eq!(config.notes.len(), 9);
        assert_eq!(config.notes[0], "E4");
        assert_eq!(config.notes[8], "G6");
        assert_eq!(config.amplitudes, vec![0.7; 9]);
        assert_eq!(config.captions.len(), 9);
    }

    #[test]
    fn builder() {
        let config = ChordConfig::default()
            .sample_rate(8000)
            .duration(0.5)
            .notes(["C4", "E4", "G4"])
            .uniform_amplitude(0.25)
            .captions(["root"]);
        assert_eq!(config.sample_rate, 8000);
        assert_eq!(config.duration_secs, 0.5);
        assert_eq!(config.notes, vec!["C4", "E4", "G4"]);
        assert_eq!(config.amplitudes, vec![0.25; 3]);
        assert_eq!(config.captions, vec!["root"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_fills_missing_fields() {
        let json = r#"{ "notes": ["A4", "C#5"], "amplitudes": [0.5, 0.4], "duration_secs": 1.0 }"#;
        let config = ChordConfig::from_json(json.as_bytes()).unwrap();
        assert_eq!(config.sample_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(config.duration_secs, 1.0);
        assert_eq!(config.notes, vec!["A4", "C#5"]);
        assert_eq!(config.amplitudes, vec![0.5, 0.4]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_notes_only() {
        let config = ChordConfig::from_json(r#"{ "notes": ["E4", "G#4", "B4"] }"#.as_bytes())
            .unwrap();
        assert_eq!(config.amplitudes, vec![DEFAULT_AMPLITUDE; 3]);
        assert!(config.captions.is_empty());
        assert_eq!(config.sample_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(config.duration_secs, DEFAULT_DURATION_SECS);
        let synthesis = crate::synthesize(&config).unwrap();
        assert_eq!(synthesis.frequencies, [329.63, 415.3, 493.88]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_empty_object_is_default() {
        let config = ChordConfig::from_json("{}".as_bytes()).unwrap();
        assert_eq!(config, ChordConfig::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_keeps_given_captions() {
        let json = r#"{ "notes": ["A4"], "captions": ["root"], "sample_rate": 8000 }"#;
        let config = ChordConfig::from_json(json.as_bytes()).unwrap();
        assert_eq!(config.captions, vec!["root"]);
        assert_eq!(config.amplitudes, vec![DEFAULT_AMPLITUDE]);
        assert_eq!(config.sample_rate, 8000);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_rejects_wrong_types() {
        assert!(ChordConfig::from_json(r#"{ "sample_rate": "fast" }"#.as_bytes()).is_err());
    }
}
