#[cfg(feature = "output")]
mod output;

#[cfg(feature = "output")]
use cpal::{
    BuildStreamError, DefaultStreamConfigError, PlayStreamError, StreamError,
    SupportedStreamConfigsError,
};
#[cfg(feature = "output")]
pub use output::*;

#[cfg(feature = "output")]
pub use cpal;

use crate::lerp;

/// A error encountered when trying to play a buffer
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// An error building the audio stream
    #[cfg(feature = "output")]
    #[error("{0}")]
    Stream(#[from] BuildStreamError),
    /// An error starting the audio stream
    #[cfg(feature = "output")]
    #[error("{0}")]
    Play(#[from] PlayStreamError),
    /// An error reported by the stream while it was playing
    #[cfg(feature = "output")]
    #[error("{0}")]
    Runtime(#[from] StreamError),
    /// An error querying stream configurations
    #[cfg(feature = "output")]
    #[error("{0}")]
    SupportedConfigs(#[from] SupportedStreamConfigsError),
    /// An error getting a default stream configuration
    #[cfg(feature = "output")]
    #[error("{0}")]
    DefaultConfig(#[from] DefaultStreamConfigError),
    /// The device only offers a sample format that cannot be written
    #[error("Unsupported sample format {0}")]
    UnsupportedSampleFormat(String),
    /// The buffer's sample rate was zero
    #[error("Sample rate must be positive")]
    ZeroSampleRate,
    /// No default output device is available
    #[error("No device available")]
    NoDevice,
}

/// A result type for playing a buffer
pub type PlaybackResult<T> = Result<T, PlaybackError>;

/// Something that can play a mono buffer of samples
pub trait Playback {
    /// Play the samples at the given sample rate, blocking the thread until they have finished
    ///
    /// Samples are not clipped before they are handed to the device.
    fn play_blocking(&mut self, samples: &[f64], sample_rate: u32) -> PlaybackResult<()>;
}

/// Linearly resample a mono buffer from one sample rate to another
pub fn resample(samples: &[f64], from: u32, to: u32) -> Vec<f64> {
    if from == to || samples.is_empty() {
        return samples.to_vec();
    }
    let ratio = from as f64 / to as f64;
    let len = (samples.len() as f64 / ratio).round() as usize;
    (0..len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let index = pos.floor() as usize;
            let a = samples[index.min(samples.len() - 1)];
            let b = samples[(index + 1).min(samples.len() - 1)];
            lerp(a, b, pos.fract())
        })
        .collect()
}
