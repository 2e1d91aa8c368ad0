//! WAV carrier loading and writing.
//!
//! Samples are held as normalized `f64` in `[-1.0, 1.0)` regardless of the
//! on-disk sample format, interleaved when the source has multiple channels.
//! Output is always written as 16-bit PCM.

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{Cursor, Read};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading or writing carrier audio.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Audio load error: {0}")]
    AudioLoadError(String),

    #[error("Audio save error: {0}")]
    AudioSaveError(String),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A decoded audio signal.
#[derive(Clone)]
pub struct AudioSignal {
    /// Interleaved normalized samples.
    samples: Vec<f64>,
    /// Channel count of the source.
    channels: u16,
    /// Sample rate in Hz.
    sample_rate: u32,
}

impl std::fmt::Debug for AudioSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioSignal")
            .field("frames", &self.frame_count())
            .field("channels", &self.channels)
            .field("sample_rate", &self.sample_rate)
            .finish()
    }
}

impl AudioSignal {
    /// Creates a signal from raw normalized samples.
    ///
    /// `samples` is interleaved when `channels > 1`; `channels` must be at
    /// least one.
    pub fn new(samples: Vec<f64>, channels: u16, sample_rate: u32) -> Self {
        debug_assert!(channels >= 1);
        Self {
            samples,
            channels,
            sample_rate,
        }
    }

    /// Creates a mono signal of all-zero samples.
    pub fn silence(duration_secs: f64, sample_rate: u32) -> Self {
        let frames = (duration_secs * sample_rate as f64).round() as usize;
        Self {
            samples: vec![0.0; frames],
            channels: 1,
            sample_rate,
        }
    }

    /// Loads a signal from a WAV file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AudioError> {
        let reader =
            WavReader::open(path).map_err(|e| AudioError::AudioLoadError(e.to_string()))?;

        Self::from_wav_reader(reader)
    }

    /// Loads a signal from in-memory WAV bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AudioError> {
        let cursor = Cursor::new(bytes);
        let reader =
            WavReader::new(cursor).map_err(|e| AudioError::AudioLoadError(e.to_string()))?;

        Self::from_wav_reader(reader)
    }

    fn from_wav_reader<R: Read>(reader: WavReader<R>) -> Result<Self, AudioError> {
        let spec = reader.spec();
        let channels = spec.channels.max(1);
        let sample_rate = spec.sample_rate;

        let samples = match spec.sample_format {
            SampleFormat::Int => {
                // hound widens any integer width up to 32 bits into i32.
                let full_scale = (1i64 << (spec.bits_per_sample - 1)) as f64;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f64 / full_scale))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| AudioError::AudioLoadError(e.to_string()))?
            }
            SampleFormat::Float if spec.bits_per_sample == 32 => reader
                .into_samples::<f32>()
                .map(|s| s.map(f64::from))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| AudioError::AudioLoadError(e.to_string()))?,
            SampleFormat::Float => {
                return Err(AudioError::UnsupportedFormat(format!(
                    "{}-bit float WAV",
                    spec.bits_per_sample
                )));
            }
        };

        Ok(Self {
            samples,
            channels,
            sample_rate,
        })
    }

    /// Returns the interleaved normalized samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Returns the channel count.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Returns the number of frames (samples per channel).
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Returns the duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Collapses the signal to mono by averaging each frame across channels.
    ///
    /// A signal that is already mono is copied as-is.
    pub fn to_mono(&self) -> Vec<f64> {
        if self.channels <= 1 {
            return self.samples.clone();
        }

        self.samples
            .chunks(self.channels as usize)
            .map(|frame| frame.iter().sum::<f64>() / frame.len() as f64)
            .collect()
    }

    /// Saves the signal to a WAV file as 16-bit PCM.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AudioError> {
        let mut writer = WavWriter::create(path, self.wav_spec())
            .map_err(|e| AudioError::AudioSaveError(e.to_string()))?;

        for &sample in &self.samples {
            writer
                .write_sample(to_i16(sample))
                .map_err(|e| AudioError::AudioSaveError(e.to_string()))?;
        }

        writer
            .finalize()
            .map_err(|e| AudioError::AudioSaveError(e.to_string()))?;

        Ok(())
    }

    /// Returns the signal as 16-bit PCM WAV bytes.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, AudioError> {
        let mut bytes = Vec::new();
        {
            let cursor = Cursor::new(&mut bytes);
            let mut writer = WavWriter::new(cursor, self.wav_spec())
                .map_err(|e| AudioError::AudioSaveError(e.to_string()))?;

            for &sample in &self.samples {
                writer
                    .write_sample(to_i16(sample))
                    .map_err(|e| AudioError::AudioSaveError(e.to_string()))?;
            }

            writer
                .finalize()
                .map_err(|e| AudioError::AudioSaveError(e.to_string()))?;
        }
        Ok(bytes)
    }

    fn wav_spec(&self) -> WavSpec {
        WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }
}

fn to_i16(sample: f64) -> i16 {
    (sample * 32768.0).round().clamp(-32768.0, 32767.0) as i16
}

/// Creates a simple sine-wave signal for tests.
#[cfg(test)]
fn create_test_signal(frames: usize) -> AudioSignal {
    let samples: Vec<f64> = (0..frames)
        .map(|i| {
            let t = i as f64 / 44100.0;
            let freq = 440.0; // A4 note
            f64::sin(2.0 * std::f64::consts::PI * freq * t) * 0.5
        })
        .collect();

    AudioSignal::new(samples, 1, 44100)
}
