// Audio Processing - Resampling
use anyhow::{Context, Result};
use log::debug;
use ndarray::Array2;
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::config::{RESAMPLE_F_CUTOFF, RESAMPLE_MAX_RATIO_RELATIVE};

/// Sinc length, interpolation and oversampling picked from the conversion ratio
fn interpolation_for_ratio(ratio: f64) -> (usize, SincInterpolationType, usize) {
    if ratio >= 2.0 || ratio <= 0.5 {
        (512, SincInterpolationType::Cubic, 512)
    } else if ratio >= 1.5 {
        (384, SincInterpolationType::Cubic, 384)
    } else if ratio > 1.0 {
        (256, SincInterpolationType::Linear, 256)
    } else {
        (384, SincInterpolationType::Linear, 384)
    }
}

/// Resample every channel of a (C, N) buffer from one rate to another.
///
/// All channels go through a single resampler so they stay the same length.
/// The output is aligned to the input (filter delay removed) and holds
/// `ceil(frames * to / from)` frames.
/// Identical rates or an empty buffer are returned unchanged.
pub fn resample_channels(
    samples: Array2<f32>,
    from_sample_rate: u32,
    to_sample_rate: u32,
) -> Result<Array2<f32>> {
    let (channels, frames) = samples.dim();
    if channels == 0 || frames == 0 || from_sample_rate == to_sample_rate {
        return Ok(samples);
    }

    let ratio = to_sample_rate as f64 / from_sample_rate as f64;
    let (sinc_len, interpolation, oversampling_factor) = interpolation_for_ratio(ratio);
    debug!(
        "Resampling {} channel(s): {}Hz → {}Hz (ratio: {:.2}x, sinc_len: {})",
        channels, from_sample_rate, to_sample_rate, ratio, sinc_len
    );

    let params = SincInterpolationParameters {
        sinc_len,
        f_cutoff: RESAMPLE_F_CUTOFF,
        interpolation,
        oversampling_factor,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(
        ratio,
        RESAMPLE_MAX_RATIO_RELATIVE,
        params,
        frames,
        channels,
    )
    .context("Failed to create resampler")?;

    let expected_frames =
        (frames as u64 * to_sample_rate as u64).div_ceil(from_sample_rate as u64) as usize;
    let delay = resampler.output_delay();

    let waves_in: Vec<Vec<f32>> = samples.rows().into_iter().map(|row| row.to_vec()).collect();
    let mut waves_out = resampler
        .process(&waves_in, None)
        .context("Failed to resample audio")?;

    // Flush the frames still held back by the sinc filter
    while waves_out[0].len() < delay + expected_frames {
        let tail = resampler
            .process_partial(None::<&[Vec<f32>]>, None)
            .context("Failed to flush resampler")?;
        if tail[0].is_empty() {
            break;
        }
        for (wave, flushed) in waves_out.iter_mut().zip(tail) {
            wave.extend(flushed);
        }
    }

    debug!(
        "Resampling complete: {} frames → {} frames (delay: {})",
        frames, expected_frames, delay
    );

    Ok(Array2::from_shape_fn((channels, expected_frames), |(ch, i)| {
        waves_out[ch].get(delay + i).copied().unwrap_or(0.0)
    }))
}
