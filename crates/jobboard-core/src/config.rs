//! Configuration management for the job board client.
//!
//! Loads configuration from ${JOBBOARD_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api.base_url`.
pub const BASE_URL_ENV: &str = "JOBBOARD_API_URL";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for configuration and log directories.
    //!
    //! JOBBOARD_HOME resolution order:
    //! 1. JOBBOARD_HOME environment variable (if set)
    //! 2. ~/.config/jobboard (default)
    //! 3. ./.jobboard when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the client's home directory.
    pub fn jobboard_home() -> PathBuf {
        if let Ok(home) = std::env::var("JOBBOARD_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".jobboard"),
            |h| h.join(".config").join("jobboard"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        jobboard_home().join("config.toml")
    }

    /// Returns the directory rolling log files are written to.
    pub fn logs_dir() -> PathBuf {
        jobboard_home().join("logs")
    }
}

/// HTTP API settings shared by the public and credentialed adapters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL including the API prefix, e.g. `http://localhost:3001/api/v1`.
    pub base_url: String,
    /// Per-request timeout in seconds (0 falls back to the default).
    pub timeout_secs: u64,
    /// Base URL given on the command line. Wins over the env var and the file.
    #[serde(skip)]
    pub base_url_override: Option<String>,
}

impl ApiConfig {
    pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api/v1";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Creates a config pointing at `base_url` with the default timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        let secs = if self.timeout_secs == 0 {
            Self::DEFAULT_TIMEOUT_SECS
        } else {
            self.timeout_secs
        };
        Duration::from_secs(secs)
    }

    /// Resolves the base URL with precedence: override > env > config > default.
    pub fn effective_base_url(&self) -> Result<String> {
        if let Some(url) = self.base_url_override.as_deref().and_then(non_blank) {
            return normalize_url(url);
        }
        resolve_base_url(Some(&self.base_url), BASE_URL_ENV, Self::DEFAULT_BASE_URL)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
            base_url_override: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level used when RUST_LOG is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    /// Listings per page on the home page.
    pub page_size: u32,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self { page_size: 12 }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub log: LogConfig,
    pub jobs: JobsConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

/// Resolves a base URL with precedence: env > config > default.
///
/// Blank values are treated as unset. Any URL that is used must parse.
pub fn resolve_base_url(
    config_base_url: Option<&str>,
    env_var: &str,
    default_url: &str,
) -> Result<String> {
    if let Ok(env_url) = std::env::var(env_var)
        && let Some(url) = non_blank(&env_url)
    {
        return normalize_url(url);
    }

    if let Some(url) = config_base_url.and_then(non_blank) {
        return normalize_url(url);
    }

    Ok(default_url.to_string())
}

fn non_blank(url: &str) -> Option<&str> {
    let trimmed = url.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn normalize_url(url: &str) -> Result<String> {
    url::Url::parse(url).with_context(|| format!("Invalid API base URL: {url}"))?;
    Ok(url.trim_end_matches('/').to_string())
}
