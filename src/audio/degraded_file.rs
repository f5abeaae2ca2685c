// Host audio - the buffer a degradation chain mutates
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use super::decode::{load_audio, AudioDecoder};
use super::processing::to_stereo;
use super::{AudioBuffer, AudioHost};
use crate::config::{HOST_CHANNELS, OUTPUT_BITS_PER_SAMPLE};
use crate::error::DegradationError;

/// Stereo samples plus their sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct DegradedAudioFile {
    samples: AudioBuffer,
    sample_rate: u32,
}

impl DegradedAudioFile {
    pub fn from_samples(samples: AudioBuffer, sample_rate: u32) -> Result<Self> {
        if samples.nrows() != HOST_CHANNELS {
            return Err(DegradationError::UnsupportedChannelLayout(samples.nrows()).into());
        }
        if sample_rate == 0 {
            return Err(DegradationError::InvalidParameter {
                name: "sample_rate".to_string(),
                value: sample_rate.to_string(),
            }
            .into());
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Load any decodable file as stereo, optionally resampled
    pub fn load(
        path: &Path,
        decoder: &dyn AudioDecoder,
        target_sample_rate: Option<u32>,
    ) -> Result<Self> {
        let decoded = load_audio(decoder, path, target_sample_rate)?;
        Self::from_samples(to_stereo(decoded.samples)?, decoded.sample_rate)
    }

    pub fn num_samples(&self) -> usize {
        self.samples.ncols()
    }

    pub fn duration_secs(&self) -> f64 {
        self.num_samples() as f64 / self.sample_rate as f64
    }

    /// Write the buffer as a 32-bit float WAV
    pub fn write_wav(&self, path: &Path) -> Result<()> {
        let spec = hound::WavSpec {
            channels: HOST_CHANNELS as u16,
            sample_rate: self.sample_rate,
            bits_per_sample: OUTPUT_BITS_PER_SAMPLE,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        for frame in self.samples.columns() {
            for &sample in frame.iter() {
                writer.write_sample(sample)?;
            }
        }
        writer.finalize()?;

        info!(
            "Wrote {} frames ({:.2} seconds) to {}",
            self.num_samples(),
            self.duration_secs(),
            path.display()
        );
        Ok(())
    }
}

impl AudioHost for DegradedAudioFile {
    fn samples(&self) -> &AudioBuffer {
        &self.samples
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn set_samples(&mut self, samples: AudioBuffer) {
        self.samples = samples;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::FileDecoder;
    use ndarray::{array, Array2};
    use tempfile::TempDir;

    #[test]
    fn test_rejects_non_stereo_buffer() {
        let err = DegradedAudioFile::from_samples(Array2::zeros((1, 10)), 44100).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DegradationError>(),
            Some(&DegradationError::UnsupportedChannelLayout(1))
        );
    }

    #[test]
    fn test_rejects_zero_sample_rate() {
        assert!(DegradedAudioFile::from_samples(Array2::zeros((2, 10)), 0).is_err());
    }

    #[test]
    fn test_duration() {
        let file = DegradedAudioFile::from_samples(Array2::zeros((2, 22050)), 44100).unwrap();
        assert_eq!(file.num_samples(), 22050);
        assert!((file.duration_secs() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_written_wav_loads_back_interleaved_correctly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.wav");
        let samples = array![[0.25f32, 0.5, -0.25], [-0.75, 0.0, 0.125]];
        let file = DegradedAudioFile::from_samples(samples.clone(), 8000).unwrap();
        file.write_wav(&path).unwrap();

        let loaded = DegradedAudioFile::load(&path, &FileDecoder, None).unwrap();
        assert_eq!(loaded.sample_rate(), 8000);
        assert_eq!(loaded.samples(), &samples);
    }

    #[test]
    fn test_mono_file_loads_as_stereo() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mono.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for s in [0.1f32, 0.2, 0.3] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let loaded = DegradedAudioFile::load(&path, &FileDecoder, None).unwrap();
        assert_eq!(loaded.samples().dim(), (2, 3));
        assert_eq!(loaded.samples().row(0), loaded.samples().row(1));
    }
}
