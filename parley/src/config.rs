//! Application-level settings, read from the environment or built in code.

use std::path::PathBuf;
use std::time::Duration;

use pcommon::TranscriptKey;
use pmemory::TranscriptStoreConfig;
use pprovider::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};

use crate::ParleyError;

pub const ENV_API_KEY: &str = "PARLEY_API_KEY";
pub const ENV_BASE_URL: &str = "PARLEY_BASE_URL";
pub const ENV_MODEL: &str = "PARLEY_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "PARLEY_TIMEOUT_SECS";
pub const ENV_STORE_BACKEND: &str = "PARLEY_STORE_BACKEND";
pub const ENV_STORE_PATH: &str = "PARLEY_STORE_PATH";
pub const ENV_TRANSCRIPT_KEY: &str = "PARLEY_TRANSCRIPT_KEY";

#[derive(Debug, Clone)]
pub struct ParleyConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
    pub store: TranscriptStoreConfig,
    pub transcript_key: TranscriptKey,
}

impl Default for ParleyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            store: TranscriptStoreConfig::default(),
            transcript_key: TranscriptKey::default(),
        }
    }
}

impl ParleyConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(api_key)
    }

    /// Reads `PARLEY_*` variables; unset or blank variables keep their defaults.
    pub fn from_env() -> Result<Self, ParleyError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ParleyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(api_key) = read(ENV_API_KEY) {
            config.api_key = Some(api_key);
        }
        if let Some(base_url) = read(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(model) = read(ENV_MODEL) {
            config.model = model;
        }
        if let Some(raw) = read(ENV_TIMEOUT_SECS) {
            let seconds = raw
                .parse::<u64>()
                .ok()
                .filter(|seconds| *seconds > 0)
                .ok_or_else(|| {
                    ParleyError::configuration(format!(
                        "{ENV_TIMEOUT_SECS} must be a positive number of seconds, got '{raw}'"
                    ))
                })?;
            config.timeout = Duration::from_secs(seconds);
        }
        if let Some(key) = read(ENV_TRANSCRIPT_KEY) {
            config.transcript_key = TranscriptKey::new(key);
        }

        let path = read(ENV_STORE_PATH).map(PathBuf::from);
        config.store = match read(ENV_STORE_BACKEND).map(|value| value.to_ascii_lowercase()) {
            None => match path {
                Some(path) => TranscriptStoreConfig::Sqlite { path },
                None => TranscriptStoreConfig::default(),
            },
            Some(backend) => parse_store_backend(&backend, path)?,
        };

        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_store(mut self, store: TranscriptStoreConfig) -> Self {
        self.store = store;
        self
    }

    pub fn with_transcript_key(mut self, key: impl Into<TranscriptKey>) -> Self {
        self.transcript_key = key.into();
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::default()
            .with_base_url(self.base_url.clone())
            .with_model(self.model.clone())
            .with_timeout(self.timeout);
        match &self.api_key {
            Some(api_key) => config.with_api_key(api_key.clone()),
            None => config,
        }
    }
}

pub fn parse_store_backend(
    backend: &str,
    path: Option<PathBuf>,
) -> Result<TranscriptStoreConfig, ParleyError> {
    match backend {
        "memory" | "in-memory" | "in_memory" => Ok(TranscriptStoreConfig::InMemory),
        "sqlite" => Ok(match path {
            Some(path) => TranscriptStoreConfig::Sqlite { path },
            None => TranscriptStoreConfig::default(),
        }),
        "filesystem" | "fs" | "file" => path
            .map(|root| TranscriptStoreConfig::Filesystem { root })
            .ok_or_else(|| {
                ParleyError::configuration(format!(
                    "{ENV_STORE_PATH} is required for the filesystem store"
                ))
            }),
        other => Err(ParleyError::configuration(format!(
            "unknown transcript store backend '{other}'"
        ))),
    }
}
