// Audio decoding - files to (C, N) float samples
use anyhow::Result;
use log::{debug, info};
use ndarray::Array2;
use rodio::{Decoder, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::processing::resample_channels;
use crate::error::DegradationError;

/// Decoded audio at its native sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Samples with shape (channels, frames)
    pub samples: Array2<f32>,
    pub sample_rate: u32,
}

/// Turns an audio file into float samples without downmixing.
pub trait AudioDecoder: Send + Sync {
    fn decode(&self, path: &Path) -> Result<DecodedAudio>;
}

/// Default decoder: WAV through hound, other formats through rodio/symphonia.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDecoder;

impl AudioDecoder for FileDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedAudio> {
        if !path.exists() {
            return Err(DegradationError::ResourceNotFound(path.to_path_buf()).into());
        }

        let is_wav = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("wav"))
            .unwrap_or(false);

        let decoded = if is_wav {
            decode_wav(path)
        } else {
            decode_compressed(path)
        }
        .map_err(|e| DegradationError::DecodeFailed(format!("{}: {}", path.display(), e)))?;

        info!(
            "Decoded {} frames x {} channel(s) at {}Hz from {}",
            decoded.samples.ncols(),
            decoded.samples.nrows(),
            decoded.sample_rate,
            path.display()
        );
        Ok(decoded)
    }
}

fn decode_wav(path: &Path) -> Result<DecodedAudio> {
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    debug!("WAV spec for {}: {:?}", path.display(), spec);

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok(DecodedAudio {
        samples: deinterleave(&interleaved, spec.channels as usize)?,
        sample_rate: spec.sample_rate,
    })
}

fn decode_compressed(path: &Path) -> Result<DecodedAudio> {
    let source = Decoder::new(BufReader::new(File::open(path)?))?;
    let sample_rate = source.sample_rate();
    let channels = source.channels() as usize;

    // rodio decodes to i16
    let interleaved: Vec<f32> = source.map(i16_to_f32).collect();

    Ok(DecodedAudio {
        samples: deinterleave(&interleaved, channels)?,
        sample_rate,
    })
}

/// 16-bit PCM to [-1, 1), same scale as the WAV path
pub fn i16_to_f32(sample: i16) -> f32 {
    sample as f32 / 32768.0
}

/// Split interleaved frames into a (C, N) matrix. A trailing partial frame is dropped.
pub fn deinterleave(interleaved: &[f32], channels: usize) -> Result<Array2<f32>> {
    if channels == 0 {
        return Err(DegradationError::UnsupportedChannelLayout(0).into());
    }
    let frames = interleaved.len() / channels;
    Ok(Array2::from_shape_fn((channels, frames), |(ch, i)| {
        interleaved[i * channels + ch]
    }))
}

/// Decode `path` and resample it to `target_sample_rate` when one is given.
pub fn load_audio(
    decoder: &dyn AudioDecoder,
    path: &Path,
    target_sample_rate: Option<u32>,
) -> Result<DecodedAudio> {
    let decoded = decoder.decode(path)?;
    match target_sample_rate {
        Some(rate) if rate != decoded.sample_rate => Ok(DecodedAudio {
            samples: resample_channels(decoded.samples, decoded.sample_rate, rate)?,
            sample_rate: rate,
        }),
        _ => Ok(decoded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_int16_wav(path: &Path, channels: u16, sample_rate: u32, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_deinterleave() {
        let got = deinterleave(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0], 2).unwrap();
        assert_eq!(got, ndarray::array![[1.0f32, 3.0, 5.0], [2.0, 4.0, 6.0]]);
    }

    #[test]
    fn test_i16_scale_matches_wav_decoding() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scale.wav");
        let raw = [i16::MIN, -16384, 0, 16384, i16::MAX];
        write_int16_wav(&path, 1, 8000, &raw);

        let decoded = FileDecoder.decode(&path).unwrap();
        for (i, &s) in raw.iter().enumerate() {
            assert_eq!(decoded.samples[[0, i]], i16_to_f32(s));
        }
        assert_eq!(i16_to_f32(i16::MIN), -1.0);
        assert_eq!(i16_to_f32(16384), 0.5);
    }

    #[test]
    fn test_decode_mono_int_wav() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mono.wav");
        write_int16_wav(&path, 1, 16000, &[0, 16384, -16384, 32767]);

        let decoded = FileDecoder.decode(&path).unwrap();
        assert_eq!(decoded.sample_rate, 16000);
        assert_eq!(decoded.samples.dim(), (1, 4));
        assert!((decoded.samples[[0, 1]] - 0.5).abs() < 1e-4);
        assert!((decoded.samples[[0, 2]] + 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_decode_stereo_float_wav_keeps_channels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stereo.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..10 {
            writer.write_sample(i as f32 * 0.01).unwrap();
            writer.write_sample(-(i as f32) * 0.01).unwrap();
        }
        writer.finalize().unwrap();

        let decoded = FileDecoder.decode(&path).unwrap();
        assert_eq!(decoded.samples.dim(), (2, 10));
        assert!((decoded.samples[[0, 9]] - 0.09).abs() < 1e-6);
        assert!((decoded.samples[[1, 9]] + 0.09).abs() < 1e-6);
    }

    #[test]
    fn test_missing_file_is_resource_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.wav");
        let err = FileDecoder.decode(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DegradationError>(),
            Some(&DegradationError::ResourceNotFound(path))
        );
    }

    #[test]
    fn test_garbage_file_is_decode_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("noise.wav");
        std::fs::write(&path, b"definitely not a RIFF header").unwrap();
        let err = FileDecoder.decode(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DegradationError>(),
            Some(DegradationError::DecodeFailed(_))
        ));
    }

    #[test]
    fn test_load_audio_resamples_to_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("short.wav");
        let samples: Vec<i16> = (0..8000).map(|i| ((i % 50) * 200) as i16).collect();
        write_int16_wav(&path, 1, 8000, &samples);

        let loaded = load_audio(&FileDecoder, &path, Some(16000)).unwrap();
        assert_eq!(loaded.sample_rate, 16000);
        assert_eq!(loaded.samples.dim(), (1, 16000));

        let native = load_audio(&FileDecoder, &path, None).unwrap();
        assert_eq!(native.sample_rate, 8000);
        assert_eq!(native.samples.ncols(), 8000);
    }
}
