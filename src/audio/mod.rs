// src/audio/mod.rs
//
// Audio collaborators used by degradations:
// - decode.rs: file decoding into (C, N) float samples
// - degraded_file.rs: default host buffer with WAV output
// - processing/: levels, stereo layout and resampling

pub mod decode;
pub mod degraded_file;
pub mod processing;

use ndarray::Array2;

/// Stereo working buffer with shape (2, N)
pub type AudioBuffer = Array2<f32>;

/// Owner of the buffer a degradation mutates.
///
/// The sample rate is fixed for the lifetime of an `apply` call; the samples
/// are replaced wholesale through `set_samples`.
pub trait AudioHost {
    fn samples(&self) -> &AudioBuffer;
    fn sample_rate(&self) -> u32;
    fn set_samples(&mut self, samples: AudioBuffer);
}

pub use decode::{load_audio, AudioDecoder, DecodedAudio, FileDecoder};
pub use degraded_file::DegradedAudioFile;
