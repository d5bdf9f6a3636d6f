//! Wave generation

use std::f64::consts::TAU;

/// Defines a waveform
pub trait Waveform {
    /// Get the amplitude of a 1 Hz wave at the given time
    ///
    /// This should be in the range [-1.0, 1.0]
    fn one_hz(&self, time: f64) -> f64;
}

/// A sine waveform
#[derive(Debug, Clone, Copy, Default)]
pub struct Sine;
impl Waveform for Sine {
    fn one_hz(&self, time: f64) -> f64 {
        (time * TAU).sin()
    }
}

/// A single partial of an additive tone: a waveform at a fixed frequency and amplitude
#[derive(Debug, Clone, Copy)]
pub struct Wave<W> {
    waveform: W,
    freq: f64,
    amp: f64,
}

impl<W> Wave<W>
where
    W: Default,
{
    /// Create a new wave with the given frequency and amplitude
    pub fn new(freq: f64, amp: f64) -> Self {
        Wave {
            waveform: W::default(),
            freq,
            amp,
        }
    }
}

impl<W> Wave<W>
where
    W: Waveform,
{
    /// Get the amplitude of the wave at the given time in seconds
    pub fn at(&self, time: f64) -> f64 {
        self.amp * self.waveform.one_hz(self.freq * time)
    }
    /// Sample the wave at every instant of a time axis
    pub fn sample(&self, times: &[f64]) -> Vec<f64> {
        times.iter().map(|&t| self.at(t)).collect()
    }
}

/// A sine wave partial
pub type SineWave = Wave<Sine>;

/// Sum equal-length rows elementwise
///
/// Returns an empty buffer if there are no rows.
pub fn mix<R>(rows: &[R]) -> Vec<f64>
where
    R: AsRef<[f64]>,
{
    let mut rows = rows.iter().map(AsRef::as_ref);
    let Some(first) = rows.next() else {
        return Vec::new();
    };
    let mut mixed = first.to_vec();
    for row in rows {
        for (acc, s) in mixed.iter_mut().zip(row) {
            *acc += s;
        }
    }
    mixed
}
