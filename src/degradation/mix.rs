//! Noise mixing at a target signal-to-noise ratio
//!
//! The noise is decoded without downmixing, resampled to the host rate, forced
//! to stereo and looped to the host length. It is scaled so that the RMS ratio
//! between input and noise matches the requested SNR, summed with the input,
//! and the sum is rescaled to the input RMS so overall loudness is unchanged.
//!
//! Silent or empty noise is not guarded: the gain becomes inf/NaN and the
//! output buffer carries those values.

use anyhow::Result;
use log::debug;
use ndarray::{concatenate, s, Axis};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{Degradation, ParameterInfo, ParameterValues};
use crate::audio::processing::{db_to_linear, rms, to_stereo};
use crate::audio::{load_audio, AudioBuffer, AudioDecoder, AudioHost, FileDecoder};
use crate::config::{DEFAULT_NOISE, DEFAULT_SNR_DB, HOST_CHANNELS};
use crate::error::DegradationError;
use crate::resources::ResourceResolver;

pub const NAME: &str = "mix";
pub const DESCRIPTION: &str = "Mix input with a specified noise. \
    The noise can be specified with its full path or relative to the resources directory";

pub const PARAMETERS_INFO: &[ParameterInfo] = &[
    ParameterInfo {
        name: "noise",
        default: DEFAULT_NOISE,
        description: "Full or relative path (to resources dir) of noise",
    },
    ParameterInfo {
        name: "snr",
        default: DEFAULT_SNR_DB,
        description: "Desired Signal-to-Noise-Ratio [dB]",
    },
];

/// Intermediate values of one `apply` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixDiagnostics {
    pub rms_noise: f32,
    pub rms_input: f32,
    pub snr_db: f32,
    pub snr_linear: f32,
    pub gain: f32,
}

/// Observer for mix diagnostics that is Send + Sync
pub type DiagnosticsCallback = Arc<dyn Fn(&MixDiagnostics) + Send + Sync>;

fn log_diagnostics(diagnostics: &MixDiagnostics) {
    debug!("RMS noise: {}", diagnostics.rms_noise);
    debug!("RMS input: {}", diagnostics.rms_input);
    debug!(
        "SNR, SNR linear: {}, {}",
        diagnostics.snr_db, diagnostics.snr_linear
    );
    debug!("Noise gain factor: {}", diagnostics.gain);
}

/// Linear gain to apply to the noise so that input/noise hits `target_snr_db`.
///
/// Uses the amplitude convention (20 in the exponent). Zero `rms_noise` gives
/// inf (or NaN when `rms_input` is zero too).
pub fn compute_gain(target_snr_db: f32, rms_noise: f32, rms_input: f32) -> f32 {
    rms_input / rms_noise / db_to_linear(target_snr_db)
}

/// Loop `noise` by doubling until it covers `target_length`, then trim.
pub fn adjust_duration(noise: AudioBuffer, target_length: usize) -> Result<AudioBuffer> {
    if noise.ncols() == 0 && target_length > 0 {
        return Err(DegradationError::EmptyNoise.into());
    }

    let mut noise = noise;
    while noise.ncols() < target_length {
        noise = concatenate(Axis(1), &[noise.view(), noise.view()])?;
    }
    Ok(noise.slice(s![.., ..target_length]).to_owned())
}

pub struct DegradationMix {
    parameters: ParameterValues,
    resolver: ResourceResolver,
    decoder: Arc<dyn AudioDecoder>,
    diagnostics: DiagnosticsCallback,
}

impl Default for DegradationMix {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationMix {
    pub fn new() -> Self {
        Self {
            parameters: ParameterValues::from_info(PARAMETERS_INFO),
            resolver: ResourceResolver::default(),
            decoder: Arc::new(FileDecoder),
            diagnostics: Arc::new(log_diagnostics),
        }
    }

    pub fn with_resolver(mut self, resolver: ResourceResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_decoder(mut self, decoder: Arc<dyn AudioDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: DiagnosticsCallback) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    fn parameter(&self, name: &str) -> Result<&str> {
        self.parameters
            .get(name)
            .ok_or_else(|| DegradationError::UnknownParameter(name.to_string()).into())
    }

    fn snr_db(&self) -> Result<f32> {
        let value = self.parameter("snr")?;
        value.trim().parse::<f32>().map_err(|_| {
            DegradationError::InvalidParameter {
                name: "snr".to_string(),
                value: value.to_string(),
            }
            .into()
        })
    }

    pub fn resolve_noise_path(&self) -> Result<PathBuf> {
        Ok(self.resolver.resolve(self.parameter("noise")?))
    }

    /// Noise at `target_sample_rate` as a (2, M) buffer
    pub fn load_noise(&self, path: &Path, target_sample_rate: u32) -> Result<AudioBuffer> {
        let decoded = load_audio(self.decoder.as_ref(), path, Some(target_sample_rate))?;
        to_stereo(decoded.samples)
    }
}

impl Degradation for DegradationMix {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn parameters_info(&self) -> &'static [ParameterInfo] {
        PARAMETERS_INFO
    }

    fn parameters(&self) -> &ParameterValues {
        &self.parameters
    }

    fn parameters_mut(&mut self) -> &mut ParameterValues {
        &mut self.parameters
    }

    fn apply(&self, host: &mut dyn AudioHost) -> Result<()> {
        let input = host.samples();
        if input.nrows() != HOST_CHANNELS {
            return Err(DegradationError::UnsupportedChannelLayout(input.nrows()).into());
        }

        let noise_path = self.resolve_noise_path()?;
        let noise = adjust_duration(
            self.load_noise(&noise_path, host.sample_rate())?,
            input.ncols(),
        )?;

        let rms_noise = rms(&noise);
        let rms_input = rms(input);
        let snr_db = self.snr_db()?;
        let gain = compute_gain(snr_db, rms_noise, rms_input);
        (self.diagnostics)(&MixDiagnostics {
            rms_noise,
            rms_input,
            snr_db,
            snr_linear: db_to_linear(snr_db),
            gain,
        });

        let mixed = noise * gain + input;

        // Normalize output RMS to fit input RMS
        let rms_mixed = rms(&mixed);
        let output = mixed * (rms_input / rms_mixed);

        host.set_samples(output);
        Ok(())
    }
}
