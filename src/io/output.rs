use std::sync::Arc;

use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    SizedSample,
};
use parking_lot::{Condvar, Mutex};

use crate::{resample, Playback, PlaybackError, PlaybackResult};

/// Get the default output device
pub fn default_output_device() -> Option<cpal::Device> {
    cpal::default_host().default_output_device()
}

trait Amplitude: SizedSample + 'static {
    const MIDPOINT: Self;
    fn from_f64(f: f64) -> Self;
}

impl Amplitude for f32 {
    const MIDPOINT: Self = 0.0;
    fn from_f64(f: f64) -> Self {
        f as f32
    }
}

impl Amplitude for u16 {
    const MIDPOINT: Self = u16::MAX / 2;
    fn from_f64(f: f64) -> Self {
        const HALF_U16_MAX: f64 = u16::MAX as f64 * 0.5;
        (f.clamp(-1.0, 1.0) * HALF_U16_MAX + HALF_U16_MAX) as u16
    }
}

impl Amplitude for i16 {
    const MIDPOINT: Self = 0;
    fn from_f64(f: f64) -> Self {
        const I16_MAX: f64 = i16::MAX as f64;
        (f.clamp(-1.0, 1.0) * I16_MAX) as i16
    }
}

/// The outcome of a playback, set once by whichever of the stream callbacks ends it first
#[derive(Clone, Default)]
struct Finished(Arc<(Mutex<Option<Result<(), cpal::StreamError>>>, Condvar)>);

impl Finished {
    fn finish(&self, outcome: Result<(), cpal::StreamError>) {
        let (state, cvar) = &*self.0;
        let mut state = state.lock();
        if state.is_none() {
            *state = Some(outcome);
            cvar.notify_all();
        }
    }
    fn wait(&self) -> PlaybackResult<()> {
        let (state, cvar) = &*self.0;
        let mut state = state.lock();
        loop {
            if let Some(outcome) = state.take() {
                return outcome.map_err(PlaybackError::from);
            }
            cvar.wait(&mut state);
        }
    }
}

/// Reads a buffer out frame by frame
struct Cursor {
    samples: Arc<[f64]>,
    position: usize,
}

impl Cursor {
    fn new(samples: Arc<[f64]>) -> Self {
        Cursor {
            samples,
            position: 0,
        }
    }
    /// Fill a device buffer, padding with silence past the end
    ///
    /// Returns `true` once every sample was handed out by an earlier call,
    /// so the device has had a full callback period to play the last of them.
    fn fill<A>(&mut self, buffer: &mut [A], channels: usize) -> bool
    where
        A: Amplitude,
    {
        let drained = self.position == self.samples.len();
        for frame in buffer.chunks_mut(channels) {
            let amp = self
                .samples
                .get(self.position)
                .map_or(A::MIDPOINT, |&s| A::from_f64(s));
            frame.fill(amp);
            self.position = (self.position + 1).min(self.samples.len());
        }
        drained
    }
}

/// Plays buffers on an output device
pub struct DeviceOutput {
    device: cpal::Device,
}

impl DeviceOutput {
    /// Create a new [`DeviceOutput`] that will play on the given device
    pub fn new(device: cpal::Device) -> Self {
        DeviceOutput { device }
    }
    /// Create a new [`DeviceOutput`] that will play on the default output device
    pub fn with_default_device() -> PlaybackResult<Self> {
        default_output_device()
            .map(Self::new)
            .ok_or(PlaybackError::NoDevice)
    }
    /// Get the name of the device
    pub fn device_name(&self) -> Option<String> {
        self.device.name().ok()
    }
    /// Get a stream config for the given sample rate
    ///
    /// If the device does not support the rate, its default config is returned.
    pub fn config_for(&self, sample_rate: u32) -> PlaybackResult<cpal::SupportedStreamConfig> {
        let rate = cpal::SampleRate(sample_rate);
        let matching = self
            .device
            .supported_output_configs()?
            .filter(|range| {
                matches!(
                    range.sample_format(),
                    cpal::SampleFormat::F32 | cpal::SampleFormat::I16 | cpal::SampleFormat::U16
                )
            })
            .find(|range| range.min_sample_rate() <= rate && rate <= range.max_sample_rate())
            .map(|range| range.with_sample_rate(rate));
        match matching {
            Some(config) => Ok(config),
            None => Ok(self.device.default_output_config()?),
        }
    }
}

impl Playback for DeviceOutput {
    fn play_blocking(&mut self, samples: &[f64], sample_rate: u32) -> PlaybackResult<()> {
        if sample_rate == 0 {
            return Err(PlaybackError::ZeroSampleRate);
        }
        if samples.is_empty() {
            return Ok(());
        }
        let config = self.config_for(sample_rate)?;
        let device_rate = config.sample_rate().0;
        let samples: Arc<[f64]> = if device_rate == sample_rate {
            samples.into()
        } else {
            log::warn!("device does not support {sample_rate} Hz, resampling to {device_rate} Hz");
            resample(samples, sample_rate, device_rate).into()
        };
        let sample_format = config.sample_format();
        let config = cpal::StreamConfig::from(config);
        let channels = config.channels as usize;
        log::info!(
            "playing {} samples at {} Hz on {} channel(s) of {}",
            samples.len(),
            device_rate,
            channels,
            self.device_name().as_deref().unwrap_or("unknown device")
        );

        let finished = Finished::default();
        macro_rules! output_stream {
            ($sample:ty) => {
                self.device.build_output_stream(
                    &config,
                    write_samples::<$sample>(Arc::clone(&samples), channels, finished.clone()),
                    stream_error(finished.clone()),
                    None,
                )
            };
        }
        let stream = match sample_format {
            cpal::SampleFormat::F32 => output_stream!(f32),
            cpal::SampleFormat::I16 => output_stream!(i16),
            cpal::SampleFormat::U16 => output_stream!(u16),
            other => return Err(PlaybackError::UnsupportedSampleFormat(format!("{other:?}"))),
        }?;
        stream.play()?;
        let outcome = finished.wait();
        drop(stream);
        if outcome.is_ok() {
            log::info!("playback finished");
        }
        outcome
    }
}

fn stream_error(finished: Finished) -> impl FnMut(cpal::StreamError) + Send + 'static {
    move |err| {
        log::error!("an error occurred on the output audio stream: {}", err);
        finished.finish(Err(err));
    }
}

fn write_samples<A>(
    samples: Arc<[f64]>,
    channels: usize,
    finished: Finished,
) -> impl FnMut(&mut [A], &cpal::OutputCallbackInfo) + Send + 'static
where
    A: Amplitude,
{
    let mut cursor = Cursor::new(samples);
    move |buffer, _| {
        if cursor.fill(buffer, channels) {
            finished.finish(Ok(()));
        }
    }
}
