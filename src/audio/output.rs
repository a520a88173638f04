// SPDX-License-Identifier: MPL-2.0
//! Cue playback through the default output device, using cpal.

use super::synth::synthesize;
use super::{AudioCue, CuePlayer, Volume};
use crate::error::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// Samples waiting to be pulled by the device callback.
type SampleBuffer = Arc<Mutex<Vec<f32>>>;

/// Plays pre-synthesized cues on an always-running output stream.
///
/// Starting a cue replaces whatever is still playing, so rapid turns never
/// pile up.
pub struct CpalCuePlayer {
    buffer: SampleBuffer,
    volume_bits: Arc<AtomicU32>,
    flip: Arc<[f32]>,
    restart: Arc<[f32]>,
    sample_rate: u32,
    channels: u16,
    /// The audio stream (kept alive to maintain playback).
    _stream: cpal::Stream,
}

impl std::fmt::Debug for CpalCuePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpalCuePlayer")
            .field("sample_rate", &self.sample_rate)
            .field("channels", &self.channels)
            .field("volume", &self.volume())
            .finish_non_exhaustive()
    }
}

/// Sample rate in Hz and channel count of a device configuration.
fn stream_format(config: &cpal::SupportedStreamConfig) -> (u32, u16) {
    (config.sample_rate().0, config.channels())
}

impl CpalCuePlayer {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Audio`] if no output device is found, if its
    /// configuration cannot be read, or if the stream fails to start.
    pub fn new(volume: Volume) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("No audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Audio(format!("Failed to get audio config: {e}")))?;

        let (sample_rate, channels) = stream_format(&supported_config);

        let buffer: SampleBuffer = Arc::new(Mutex::new(Vec::new()));
        let volume_bits = Arc::new(AtomicU32::new(volume.value().to_bits()));

        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(
                &device,
                &supported_config.into(),
                Arc::clone(&buffer),
                Arc::clone(&volume_bits),
            )?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(
                &device,
                &supported_config.into(),
                Arc::clone(&buffer),
                Arc::clone(&volume_bits),
            )?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(
                &device,
                &supported_config.into(),
                Arc::clone(&buffer),
                Arc::clone(&volume_bits),
            )?,
            other => {
                return Err(Error::Audio(format!(
                    "Unsupported audio sample format: {other:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|e| Error::Audio(format!("Failed to start audio stream: {e}")))?;

        log::debug!("audio output ready: {sample_rate} Hz, {channels} channel(s)");

        Ok(Self {
            buffer,
            volume_bits,
            flip: synthesize(AudioCue::Flip, sample_rate, channels).into(),
            restart: synthesize(AudioCue::Restart, sample_rate, channels).into(),
            sample_rate,
            channels,
            _stream: stream,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        buffer: SampleBuffer,
        volume_bits: Arc<AtomicU32>,
    ) -> Result<cpal::Stream> {
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let volume = f32::from_bits(volume_bits.load(Ordering::Relaxed));

                    let Ok(mut buf) = buffer.lock() else {
                        // Mutex poisoned, output silence
                        for sample in data.iter_mut() {
                            *sample = T::from_sample(0.0f32);
                        }
                        return;
                    };

                    for (i, sample) in data.iter_mut().enumerate() {
                        let value = buf.get(i).map_or(0.0, |s| s * volume);
                        // Stay just below 1.0: i16 conversion overflows at exactly 1.0.
                        *sample = T::from_sample(value.clamp(-1.0, 0.999_999_9));
                    }

                    let consumed = data.len().min(buf.len());
                    buf.drain(..consumed);
                },
                |err| {
                    log::warn!("audio output error: {err}");
                },
                None,
            )
            .map_err(|e| Error::Audio(format!("Failed to build audio stream: {e}")))
    }

    #[must_use]
    pub fn volume(&self) -> Volume {
        Volume::new(f32::from_bits(self.volume_bits.load(Ordering::Relaxed)))
    }

    pub fn set_volume(&self, volume: Volume) {
        self.volume_bits
            .store(volume.value().to_bits(), Ordering::Relaxed);
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub fn channels(&self) -> u16 {
        self.channels
    }
}

impl CuePlayer for CpalCuePlayer {
    fn play(&self, cue: AudioCue) -> Result<()> {
        let samples = match cue {
            AudioCue::Flip => &self.flip,
            AudioCue::Restart => &self.restart,
        };
        let mut buf = self
            .buffer
            .lock()
            .map_err(|_| Error::Audio("audio buffer poisoned".to_string()))?;
        buf.clear();
        buf.extend_from_slice(samples);
        Ok(())
    }
}
