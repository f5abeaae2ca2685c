// audio-degrader - controlled audio degradations
//
// Currently provides one degradation:
// - mix: noise mixing at a target signal-to-noise ratio
//
// The library only logs through the `log` facade; installing a logger is left
// to the binary.

// Core modules
pub mod audio;
pub mod config;
pub mod degradation;
pub mod error;
pub mod resources;

pub use audio::{AudioBuffer, AudioDecoder, AudioHost, DegradedAudioFile, FileDecoder};
pub use degradation::{
    available_degradations, create_degradation, Degradation, DegradationMix, ParameterInfo,
};
pub use error::DegradationError;
pub use resources::ResourceResolver;
