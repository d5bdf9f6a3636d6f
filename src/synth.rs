//! Additive chord synthesis and spectral analysis

use rustfft::{num_complex::Complex, FftPlanner};

use crate::{note, ChordConfig, NoteName, SineWave};

/// An error encountered when synthesizing a chord
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// No notes were given
    #[error("chord has no notes")]
    EmptyChord,
    /// A parameter that must be strictly positive was not
    #[error("{name} must be positive, got {value}")]
    NonPositiveParameter {
        /// The parameter's name
        name: &'static str,
        /// The rejected value
        value: f64,
    },
    /// The number of amplitudes does not match the number of notes
    #[error("{notes} notes but {amplitudes} amplitudes")]
    AmplitudeCountMismatch {
        /// The number of notes
        notes: usize,
        /// The number of amplitudes
        amplitudes: usize,
    },
    /// An amplitude was not a finite number
    #[error("amplitude of note {note} is {value}")]
    InvalidAmplitude {
        /// The index of the note in the chord
        note: usize,
        /// The rejected value
        value: f64,
    },
    /// A note name could not be resolved
    #[error("note {index} ({name:?}): {source}")]
    Note {
        /// The index of the note in the chord
        index: usize,
        /// The note name as given
        name: String,
        /// Why the name was rejected
        #[source]
        source: note::Error,
    },
}

/// A result type for chord synthesis
pub type SynthResult<T> = Result<T, Error>;

/// The output of [`synthesize`]
///
/// All per-note vectors are row-aligned with [`Synthesis::notes`].
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    /// The sample rate the chord was rendered at
    pub sample_rate: u32,
    /// The resolved note names
    pub notes: Vec<NoteName>,
    /// Sample instants in seconds, covering `[0, duration)`
    pub time_axis: Vec<f64>,
    /// One sine wave per note
    pub waveforms: Vec<Vec<f64>>,
    /// The elementwise sum of all waveforms
    pub combined: Vec<f64>,
    /// The frequency of each note in Hz
    pub frequencies: Vec<f64>,
    /// The unnormalized DFT of each waveform
    pub spectra: Vec<Vec<Complex<f64>>>,
    /// The frequency in Hz of each spectrum bin
    pub frequency_bins: Vec<f64>,
}

impl Synthesis {
    /// Get the number of samples per waveform
    pub fn len(&self) -> usize {
        self.time_axis.len()
    }
    /// Check if there are no samples
    pub fn is_empty(&self) -> bool {
        self.time_axis.is_empty()
    }
    /// Get the number of notes
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }
    /// Get the magnitude of each bin of a note's spectrum
    pub fn magnitudes(&self, note: usize) -> Vec<f64> {
        self.spectra[note].iter().map(|c| c.norm()).collect()
    }
    /// Get the frequency and magnitude of the strongest non-negative bin of a note's spectrum
    pub fn peak(&self, note: usize) -> Option<(f64, f64)> {
        self.spectra[note]
            .iter()
            .zip(&self.frequency_bins)
            .filter(|(_, freq)| **freq >= 0.0)
            .map(|(c, &freq)| (freq, c.norm()))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
    /// Reconstruct a note's waveform from its spectrum with a normalized inverse DFT
    pub fn inverse(&self, note: usize) -> Vec<f64> {
        let mut buffer = self.spectra[note].clone();
        let n = buffer.len();
        FftPlanner::new().plan_fft_inverse(n).process(&mut buffer);
        buffer.into_iter().map(|c| c.re / n as f64).collect()
    }
}

/// Build `n` evenly spaced instants covering `[0, duration)`
pub fn time_axis(n: usize, duration_secs: f64) -> Vec<f64> {
    (0..n)
        .map(|i| i as f64 * duration_secs / n as f64)
        .collect()
}

/// Get the frequency of each DFT bin for `n` samples at the given sample rate
///
/// Bins are laid out as `0, 1, ..., ceil(n/2) - 1, -floor(n/2), ..., -1`
/// multiples of `sample_rate / n`.
pub fn frequency_bins(n: usize, sample_rate: f64) -> Vec<f64> {
    let step = sample_rate / n as f64;
    let positive = (n + 1) / 2;
    (0..positive as i64)
        .chain(-((n / 2) as i64)..0)
        .map(|k| k as f64 * step)
        .collect()
}

/// Compute the unnormalized forward DFT of a real signal
pub fn spectrum(planner: &mut FftPlanner<f64>, samples: &[f64]) -> Vec<Complex<f64>> {
    let mut buffer: Vec<Complex<f64>> = samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    planner.plan_fft_forward(buffer.len()).process(&mut buffer);
    buffer
}

fn check_positive(name: &'static str, value: f64) -> SynthResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::NonPositiveParameter { name, value })
    }
}

/// Synthesize a chord as a sum of sine waves and analyze each note's spectrum
///
/// Every note is resolved before anything is rendered, so an invalid note
/// fails the whole chord.
pub fn synthesize(config: &ChordConfig) -> SynthResult<Synthesis> {
    if config.notes.is_empty() {
        return Err(Error::EmptyChord);
    }
    check_positive("sample rate", config.sample_rate as f64)?;
    check_positive("duration", config.duration_secs)?;
    if config.amplitudes.len() != config.notes.len() {
        return Err(Error::AmplitudeCountMismatch {
            notes: config.notes.len(),
            amplitudes: config.amplitudes.len(),
        });
    }
    if let Some((note, &value)) = config
        .amplitudes
        .iter()
        .enumerate()
        .find(|(_, a)| !a.is_finite())
    {
        return Err(Error::InvalidAmplitude { note, value });
    }
    let sample_count = (config.sample_rate as f64 * config.duration_secs).round();
    check_positive("sample count", sample_count)?;
    let sample_count = sample_count as usize;

    let notes = config
        .notes
        .iter()
        .enumerate()
        .map(|(index, name)| {
            name.parse::<NoteName>().map_err(|source| Error::Note {
                index,
                name: name.clone(),
                source,
            })
        })
        .collect::<SynthResult<Vec<_>>>()?;
    let frequencies: Vec<f64> = notes.iter().map(NoteName::frequency).collect();
    for (note, freq) in notes.iter().zip(&frequencies) {
        log::debug!("{note}: {freq} Hz");
    }

    let time_axis = time_axis(sample_count, config.duration_secs);
    let waveforms: Vec<Vec<f64>> = frequencies
        .iter()
        .zip(&config.amplitudes)
        .map(|(&freq, &amp)| SineWave::new(freq, amp).sample(&time_axis))
        .collect();
    let combined = crate::mix(&waveforms);

    let mut planner = FftPlanner::new();
    let spectra = waveforms
        .iter()
        .map(|waveform| spectrum(&mut planner, waveform))
        .collect();
    let frequency_bins = frequency_bins(sample_count, config.sample_rate as f64);
    log::debug!(
        "synthesized {} notes, {} samples at {} Hz",
        notes.len(),
        sample_count,
        config.sample_rate
    );

    Ok(Synthesis {
        sample_rate: config.sample_rate,
        notes,
        time_axis,
        waveforms,
        combined,
        frequencies,
        spectra,
        frequency_bins,
    })
}
