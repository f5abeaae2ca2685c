//! Error types for degradations
//!
//! Every variant is fatal for the `apply` call that produced it. Numeric
//! degeneracy (silent or empty noise) is deliberately not represented here:
//! it shows up as inf/NaN samples in the output instead.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum DegradationError {
    /// Audio file does not exist at the resolved path
    ResourceNotFound(PathBuf),
    /// File exists but could not be decoded as audio
    DecodeFailed(String),
    /// Channel count that cannot be mapped onto a stereo buffer
    UnsupportedChannelLayout(usize),
    /// Noise with zero samples cannot be looped to a non-zero length
    EmptyNoise,
    /// Parameter value that cannot be parsed into the required type
    InvalidParameter { name: String, value: String },
    /// Parameter name not declared by the degradation
    UnknownParameter(String),
    /// No degradation registered under this name
    UnknownDegradation(String),
}

impl fmt::Display for DegradationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradationError::ResourceNotFound(path) => {
                write!(f, "Audio file does not exist: {}", path.display())
            }
            DegradationError::DecodeFailed(msg) => write!(f, "Failed to decode audio: {}", msg),
            DegradationError::UnsupportedChannelLayout(channels) => {
                write!(f, "Unsupported channel layout: {} channels", channels)
            }
            DegradationError::EmptyNoise => write!(f, "Noise signal has no samples"),
            DegradationError::InvalidParameter { name, value } => {
                write!(f, "Invalid value for parameter '{}': {}", name, value)
            }
            DegradationError::UnknownParameter(name) => write!(f, "Unknown parameter: {}", name),
            DegradationError::UnknownDegradation(name) => {
                write!(f, "Unknown degradation: {}", name)
            }
        }
    }
}

impl std::error::Error for DegradationError {}
