//! Save-path configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! create_note = "Created"
//! reorder_note = "Mandalart reorder"
//! skip_identity_reorder = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("io error reading {}: {source}", path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid configuration TOML
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration of [`crate::VersionService`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Note attached to the first version of a project
    pub create_note: String,
    /// Note attached to reorder versions
    pub reorder_note: String,
    /// Refuse to save a reorder that moves nothing
    pub skip_identity_reorder: bool,
}

impl ServiceConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With reorder note
    #[inline]
    #[must_use]
    pub fn with_reorder_note(mut self, note: impl Into<String>) -> Self {
        self.reorder_note = note.into();
        self
    }

    /// With create note
    #[inline]
    #[must_use]
    pub fn with_create_note(mut self, note: impl Into<String>) -> Self {
        self.create_note = note.into();
        self
    }

    /// With identity-reorder handling
    #[inline]
    #[must_use]
    pub fn with_skip_identity_reorder(mut self, skip: bool) -> Self {
        self.skip_identity_reorder = skip;
        self
    }

    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            create_note: "Created".to_string(),
            reorder_note: "Mandalart reorder".to_string(),
            skip_identity_reorder: true,
        }
    }
}
