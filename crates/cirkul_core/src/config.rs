//! World configuration
//!
//! Static limits for one `World`. They are read once at construction and
//! never change; every table in the world is sized from them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest number of distinct component ids a `ComponentId` can address.
pub const COMPONENT_ID_SPACE: usize = u16::MAX as usize + 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Capacity limits of a world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcsConfig {
    /// Size of the single arena every column is carved from.
    pub arena_bytes: usize,
    /// Entity ids per scene are `0..max_entities`.
    pub max_entities: u32,
    /// Distinct component sets per scene.
    pub max_archetypes: usize,
    /// Component ids are `0..max_components`.
    pub max_components: usize,
    /// Capacity of each scene's recycled-id ring.
    pub max_free_ids: usize,
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            arena_bytes: 20_000_000,
            max_entities: 10_000,
            max_archetypes: 256,
            max_components: 128,
            max_free_ids: 1024,
        }
    }
}

impl EcsConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arena_bytes == 0 {
            return Err(invalid("arena_bytes", "must be non-zero"));
        }
        if self.max_entities == 0 {
            return Err(invalid("max_entities", "must be non-zero"));
        }
        if self.max_archetypes == 0 {
            return Err(invalid("max_archetypes", "must be non-zero"));
        }
        if self.max_archetypes > u32::MAX as usize {
            return Err(invalid("max_archetypes", format!("must be at most {}", u32::MAX)));
        }
        if self.max_components == 0 || self.max_components > COMPONENT_ID_SPACE {
            return Err(invalid(
                "max_components",
                format!("must be between 1 and {COMPONENT_ID_SPACE}"),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
