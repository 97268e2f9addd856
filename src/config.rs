//! Configuration file support for maven-versions
//!
//! Supports `.maven-versions.toml` and `maven-versions.toml`, searched from
//! the working directory upward.
//!
//! Example configuration:
//! ```toml
//! # Default repository (URL or alias)
//! repository = "internal"
//!
//! # Extra repository aliases; these win over the built-in ones
//! [aliases]
//! internal = "https://nexus.example.com/repository/maven-public/"
//!
//! [retry]
//! attempts = 5
//! base_delay_ms = 250
//! ```

use crate::registry::{BASE_DELAY_MS, MAX_RETRIES, RetryPolicy};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Maximum size for config files (1 MB)
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

const CONFIG_NAMES: [&str; 2] = [".maven-versions.toml", "maven-versions.toml"];

/// Configuration loaded from .maven-versions.toml or maven-versions.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MavenVersionsConfig {
    /// Default repository URL or alias
    #[serde(default)]
    pub repository: Option<String>,

    /// Repository aliases (name -> URL)
    #[serde(default)]
    pub aliases: HashMap<String, String>,

    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_attempts() -> u32 {
    MAX_RETRIES
}

fn default_base_delay_ms() -> u64 {
    BASE_DELAY_MS
}

impl MavenVersionsConfig {
    /// Load configuration by searching for config files in the given directory and parents
    pub fn discover(start_dir: &Path) -> Option<(Self, PathBuf)> {
        let mut current = Some(start_dir);
        while let Some(dir) = current {
            for name in &CONFIG_NAMES {
                let config_path = dir.join(name);
                if config_path.exists()
                    && let Some(config) = Self::load_from_path(&config_path)
                {
                    return Some((config, config_path));
                }
            }
            current = dir.parent();
        }

        None
    }

    /// Load configuration from a specific file path (silent failure for auto-discovery)
    pub fn load_from_path(path: &Path) -> Option<Self> {
        Self::load_from_path_with_error(path).ok()
    }

    /// Load configuration from a specific file path with detailed error messages
    pub fn load_from_path_with_error(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Err(format!("Config file not found: {}", path.display()));
        }

        match std::fs::metadata(path) {
            Ok(metadata) if metadata.len() > MAX_CONFIG_FILE_SIZE => {
                return Err(format!(
                    "Config file too large: {} bytes (max {} MB).",
                    metadata.len(),
                    MAX_CONFIG_FILE_SIZE / 1024 / 1024
                ));
            }
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "Cannot read config file metadata: {}. Check file permissions.",
                    e
                ));
            }
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                format!(
                    "Permission denied reading config file: {}. Check file permissions.",
                    path.display()
                )
            } else {
                format!("Failed to read config file {}: {}", path.display(), e)
            }
        })?;

        // toml::de::Error carries line/column info
        toml::from_str(&content)
            .map_err(|e| format!("Invalid TOML in config file {}:\n  {}", path.display(), e))
    }

    /// Discovered config (from `start_dir` upward) with an explicit file
    /// layered on top. Returns the files that were read, lowest precedence
    /// first. Only the explicit file's errors are reported.
    pub fn load_layered(
        start_dir: &Path,
        explicit: Option<&Path>,
    ) -> Result<(Self, Vec<PathBuf>), String> {
        let mut sources = Vec::new();
        let mut config = match Self::discover(start_dir) {
            Some((config, path)) => {
                sources.push(path);
                config
            }
            None => Self::default(),
        };

        if let Some(path) = explicit {
            let overlay = Self::load_from_path_with_error(path)?;
            config.merge(overlay);
            sources.push(path.to_path_buf());
        }

        Ok((config, sources))
    }

    /// Retry settings, falling back to the built-in defaults.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self.retry {
            Some(retry) => {
                RetryPolicy::new(retry.attempts, Duration::from_millis(retry.base_delay_ms))
            }
            None => RetryPolicy::default(),
        }
    }

    /// Check if any configuration is present
    pub fn has_config(&self) -> bool {
        self.repository.is_some() || !self.aliases.is_empty() || self.retry.is_some()
    }

    /// Merge another configuration into this one (other takes precedence)
    pub fn merge(&mut self, other: Self) {
        if other.repository.is_some() {
            self.repository = other.repository;
        }
        for (alias, url) in other.aliases {
            self.aliases.insert(alias, url);
        }
        if other.retry.is_some() {
            self.retry = other.retry;
        }
    }
}
