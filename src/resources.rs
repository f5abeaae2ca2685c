//! Bundled resource lookup
//!
//! Noise files can be given as a literal path or relative to the bundled
//! `resources` directory. The directory defaults to the one shipped next to
//! the crate and can be moved with `AUDIO_DEGRADER_RESOURCES`.

use log::debug;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};

use crate::config::{RESOURCES_DIR_ENV, RESOURCES_DIR_NAME};

/// Bundled resource directory, read once
pub static RESOURCES_DIR: Lazy<PathBuf> = Lazy::new(|| {
    std::env::var_os(RESOURCES_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join(RESOURCES_DIR_NAME))
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceResolver {
    resources_dir: PathBuf,
}

impl Default for ResourceResolver {
    fn default() -> Self {
        Self::new(RESOURCES_DIR.clone())
    }
}

impl ResourceResolver {
    pub fn new(resources_dir: impl Into<PathBuf>) -> Self {
        Self {
            resources_dir: resources_dir.into(),
        }
    }

    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    /// Literal path if it is an existing file, otherwise joined onto the resource dir.
    ///
    /// The joined path is not checked; a missing file surfaces when it is decoded.
    pub fn resolve(&self, value: &str) -> PathBuf {
        let literal = Path::new(value);
        if literal.is_file() {
            return literal.to_path_buf();
        }
        let joined = self.resources_dir.join(value);
        debug!("{} is not a file, using resource path {}", value, joined.display());
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_NOISE;
    use tempfile::TempDir;

    #[test]
    fn test_existing_absolute_path_is_used_verbatim() {
        let dir = TempDir::new().unwrap();
        let noise = dir.path().join("hum.wav");
        std::fs::write(&noise, b"").unwrap();

        let resolver = ResourceResolver::new("/nonexistent/resources");
        let value = noise.to_str().unwrap();
        assert_eq!(resolver.resolve(value), noise);
    }

    #[test]
    fn test_bare_name_falls_back_to_resources_dir() {
        let dir = TempDir::new().unwrap();
        let resolver = ResourceResolver::new(dir.path());
        assert_eq!(
            resolver.resolve("not-in-cwd-7f3a.wav"),
            dir.path().join("not-in-cwd-7f3a.wav")
        );
    }

    #[test]
    fn test_default_noise_is_bundled() {
        if std::env::var_os(RESOURCES_DIR_ENV).is_some() {
            return;
        }
        let path = ResourceResolver::default().resolve(DEFAULT_NOISE);
        assert!(path.is_file(), "missing bundled noise at {}", path.display());
    }
}
