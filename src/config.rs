//! Configuration management for Taskora
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, TaskoraError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Taskora
///
/// This structure holds all configuration needed by the client,
/// including API gateway settings and repository selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API gateway configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Todo repository configuration
    #[serde(default)]
    pub repository: RepositoryConfig,
}

/// API gateway configuration
///
/// Specifies the base URL the gateway wrapper builds request URLs from,
/// and the per-request timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the task service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_request_timeout(),
        }
    }
}

/// Todo repository configuration
///
/// Selects which [`crate::todos::TodoRepository`] implementation is
/// composed at startup, and tunes the in-memory one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Repository kind: "memory" or "remote"
    #[serde(default = "default_repository_kind")]
    pub kind: String,

    /// Artificial latency for the in-memory repository (milliseconds)
    ///
    /// Simulates network round trips so the memory path exercises the
    /// same suspension points as the remote one. Zero disables it.
    #[serde(default)]
    pub mock_latency_ms: u64,
}

fn default_repository_kind() -> String {
    "memory".to_string()
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            kind: default_repository_kind(),
            mock_latency_ms: 0,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TaskoraError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| TaskoraError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("TASKORA_API_BASE_URL") {
            tracing::debug!(base_url = %base_url, "Env override: TASKORA_API_BASE_URL");
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("TASKORA_API_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid TASKORA_API_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(kind) = std::env::var("TASKORA_REPOSITORY") {
            tracing::debug!(kind = %kind, "Env override: TASKORA_REPOSITORY");
            self.repository.kind = kind;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(base_url) = &cli.api_base_url {
            self.api.base_url = base_url.clone();
        }

        if let Some(kind) = &cli.repository {
            self.repository.kind = kind.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL does not parse, the timeout is zero,
    /// or the repository kind is unknown
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url).map_err(|e| {
            TaskoraError::Config(format!("Invalid api.base_url '{}': {}", self.api.base_url, e))
        })?;

        if self.api.timeout_seconds == 0 {
            return Err(
                TaskoraError::Config("api.timeout_seconds must be greater than zero".into())
                    .into(),
            );
        }

        match self.repository.kind.as_str() {
            "memory" | "remote" => {}
            other => {
                return Err(TaskoraError::Config(format!(
                    "Unknown repository kind: {} (expected 'memory' or 'remote')",
                    other
                ))
                .into());
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            repository: RepositoryConfig::default(),
        }
    }
}
