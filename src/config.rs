//! Degradation Configuration and Constants

// Mix parameters
pub const DEFAULT_NOISE: &str = "sounds/ambience-pub.wav";
pub const DEFAULT_SNR_DB: &str = "6";

// Bundled resources
pub const RESOURCES_DIR_NAME: &str = "resources";
pub const RESOURCES_DIR_ENV: &str = "AUDIO_DEGRADER_RESOURCES";

// Host buffers are always stereo
pub const HOST_CHANNELS: usize = 2;

// Output encoding
pub const OUTPUT_BITS_PER_SAMPLE: u16 = 32;

// Resampler
pub const RESAMPLE_F_CUTOFF: f32 = 0.95;
pub const RESAMPLE_MAX_RATIO_RELATIVE: f64 = 2.0;
