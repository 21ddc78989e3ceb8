//! Runtime configuration for ingestion.
//!
//! [`Settings`] is the shared chunk-size handle read by the content accessor.
//! [`IngestConfig`] is the serializable form, loadable from JSON or from
//! environment variables, that builds settings and identity models.

use std::env;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::{EvictionPolicy, HashCache};
use crate::identity::IdentityModel;

pub const ENV_CHUNK_SIZE: &str = "CONTEXT_INGEST_CHUNK_SIZE";
pub const ENV_HASH_CACHE_MAX_ENTRIES: &str = "CONTEXT_INGEST_HASH_CACHE_MAX_ENTRIES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Shared handle to the chunk-size threshold.
///
/// Clones point at the same value: a change made through any clone is seen by
/// every holder on its next read. Unset (`None`) means no truncation.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    chunk_size: Arc<RwLock<Option<usize>>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Settings {
            chunk_size: Arc::new(RwLock::new(Some(chunk_size))),
        }
    }

    pub fn chunk_size(&self) -> Option<usize> {
        *self.chunk_size.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_chunk_size(&self, chunk_size: Option<usize>) {
        *self.chunk_size.write().unwrap_or_else(PoisonError::into_inner) = chunk_size;
    }
}

/// Serializable ingestion configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Maximum displayed content length in characters; `None` disables truncation.
    #[serde(default)]
    pub chunk_size: Option<usize>,

    /// Eviction policy for the identity hash cache.
    #[serde(default)]
    pub hash_cache: EvictionPolicy,
}

impl IngestConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Defaults overridden by `CONTEXT_INGEST_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = IngestConfig::default();

        if let Some(chunk_size) = read_usize_var(ENV_CHUNK_SIZE)? {
            config.chunk_size = Some(chunk_size);
        }
        if let Some(max) = read_usize_var(ENV_HASH_CACHE_MAX_ENTRIES)? {
            config.hash_cache = EvictionPolicy::MaxEntries(max);
        }

        Ok(config)
    }

    /// A fresh settings handle seeded from this config.
    pub fn settings(&self) -> Settings {
        match self.chunk_size {
            Some(n) => Settings::with_chunk_size(n),
            None => Settings::new(),
        }
    }

    pub fn identity_model(&self) -> IdentityModel {
        IdentityModel::with_cache(self.settings(), HashCache::with_policy(self.hash_cache))
    }
}

fn read_usize_var(key: &str) -> Result<Option<usize>, ConfigError> {
    match env::var(key) {
        Ok(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<usize>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: raw,
                })
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(raw)) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}
