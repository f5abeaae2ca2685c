// Audio Processing - Levels and channel layout
use anyhow::Result;
use ndarray::{concatenate, Array2, ArrayBase, Axis, Data, Ix2};

use crate::audio::AudioBuffer;
use crate::config::HOST_CHANNELS;
use crate::error::DegradationError;

/// Root mean square over every sample of every channel.
///
/// Accumulates in f64. A buffer with no samples yields NaN, the mean of zero
/// elements, rather than an error.
pub fn rms<S>(buffer: &ArrayBase<S, Ix2>) -> f32
where
    S: Data<Elem = f32>,
{
    let sum_squares: f64 = buffer.iter().map(|&x| (x as f64) * (x as f64)).sum();
    (sum_squares / buffer.len() as f64).sqrt() as f32
}

/// Amplitude ratio for a level in dB (20 * log10 convention)
pub fn db_to_linear(db: f32) -> f32 {
    10_f32.powf(db / 20.0)
}

/// Bring a (C, N) buffer to the (2, N) host layout.
///
/// Mono is duplicated into both channels, stereo passes through.
pub fn to_stereo(samples: Array2<f32>) -> Result<AudioBuffer> {
    match samples.nrows() {
        1 => Ok(concatenate(Axis(0), &[samples.view(), samples.view()])?),
        HOST_CHANNELS => Ok(samples),
        channels => Err(DegradationError::UnsupportedChannelLayout(channels).into()),
    }
}
