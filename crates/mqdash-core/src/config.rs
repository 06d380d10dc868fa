//! Configuration management for mqdash.
//!
//! Loads configuration from ${MQDASH_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure.
///
/// One structure covers every deployment variant: pointing the client at a
/// different backend is a `base_url` change, and running against a backend
/// without authentication is `enable_token_auth = false`, never a separate
/// bootstrap file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the device-management backend
    pub base_url: String,

    /// Send and store backend cookies with every call
    pub with_credentials: bool,

    /// Attach the stored session token as a bearer credential and
    /// enforce authorization on guarded views
    pub enable_token_auth: bool,

    /// Per-request timeout in seconds (0 disables)
    pub request_timeout_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            with_credentials: true,
            enable_token_auth: true,
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://localhost:8000";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 30;

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

    /// Resolves the effective base URL with precedence: env > config.
    ///
    /// `MQDASH_BASE_URL` overrides the config file, matching how deployments
    /// point a single build at different backends.
    ///
    /// # Errors
    /// Returns an error if the resolved value is not a well-formed URL.
    pub fn effective_base_url(&self) -> Result<String> {
        if let Ok(env_url) = std::env::var("MQDASH_BASE_URL") {
            let trimmed = env_url.trim();
            if !trimmed.is_empty() {
                validate_url(trimmed)?;
                return Ok(trimmed.trim_end_matches('/').to_string());
            }
        }

        let trimmed = self.base_url.trim();
        validate_url(trimmed)?;
        Ok(trimmed.trim_end_matches('/').to_string())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }

    /// Initializes a config file with the default template.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config already exists at {}", path.display());
        }
        Self::write_config(path, default_config_template())
    }

    /// Saves only the base_url field to the config file.
    ///
    /// Creates the file if it doesn't exist.
    /// Preserves existing fields and comments using toml_edit.
    pub fn save_base_url(base_url: &str) -> Result<()> {
        Self::save_base_url_to(&paths::config_path(), base_url)
    }

    /// Saves only the base_url field to a specific config file path.
    pub fn save_base_url_to(path: &Path, base_url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        validate_url(base_url)?;

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["base_url"] = value(base_url);

        Self::write_config(path, &doc.to_string())
    }

    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid base URL: {url}"))?;
    Ok(())
}

/// Default config.toml template with comments.
fn default_config_template() -> &'static str {
    r#"# mqdash configuration

# Base URL of the device-management backend.
# Overridden by the MQDASH_BASE_URL environment variable.
base_url = "http://localhost:8000"

# Send and store backend cookies with every call.
with_credentials = true

# Attach the stored session token as a bearer credential and
# enforce authorization on guarded views.
enable_token_auth = true

# Per-request timeout in seconds (0 disables).
request_timeout_secs = 30
"#
}

pub mod paths {
    //! Path resolution for mqdash configuration and session state.
    //!
    //! MQDASH_HOME resolution order:
    //! 1. MQDASH_HOME environment variable (if set)
    //! 2. ~/.config/mqdash (default)

    use std::path::PathBuf;

    /// Returns the mqdash home directory.
    ///
    /// Checks MQDASH_HOME env var first, falls back to ~/.config/mqdash
    pub fn mqdash_home() -> PathBuf {
        if let Ok(home) = std::env::var("MQDASH_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("mqdash"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        mqdash_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        mqdash_home().join("session.json")
    }
}
