// Audio Processing Module
//
// Split into focused files:
// - levels.rs: RMS, dB conversion, stereo layout
// - resampling.rs: Sample rate conversion

pub mod levels;
pub mod resampling;

pub use levels::{db_to_linear, rms, to_stereo};
pub use resampling::resample_channels;
