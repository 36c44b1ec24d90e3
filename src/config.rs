//! Configuration for the research assistant.
//!
//! Values come from built-in defaults, optionally overlaid by a TOML file
//! (`research_assistant.toml` in the working directory) and finally by the
//! `PORT` environment variable.

use crate::error::{ResearchError, Result};
use research_sources::LookupConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default research log location, relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "research_output.txt";

/// Optional config file read by [`AppConfig::from_environment`].
pub const DEFAULT_CONFIG_FILE: &str = "research_assistant.toml";

/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "PORT";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Interface the form server binds to.
    pub host: String,
    /// Port the form server listens on.
    pub port: u16,
    /// Append-only research log.
    pub log_path: PathBuf,
    /// Lookup settings shared by Wikipedia and DuckDuckGo.
    pub lookup: LookupConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            lookup: LookupConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Io`] if the file cannot be read, or
    /// [`ResearchError::Config`] if it is not valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| ResearchError::Config(format!("invalid {}: {e}", path.display())))
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Defaults, then [`DEFAULT_CONFIG_FILE`], then the `PORT` variable.
    pub fn from_environment() -> Result<Self> {
        Self::resolve(
            Path::new(DEFAULT_CONFIG_FILE),
            std::env::var(PORT_ENV).ok().as_deref(),
        )
    }

    /// Defaults, overlaid by `path` if it exists, then by `port`; validated.
    pub fn resolve(path: &Path, port: Option<&str>) -> Result<Self> {
        let mut config = Self::load_or_default(path)?;
        config.apply_port_override(port)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply a `PORT` value when one is set.
    pub fn apply_port_override(&mut self, value: Option<&str>) -> Result<()> {
        let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(());
        };
        self.port = raw.parse().map_err(|_| {
            ResearchError::Config(format!("{PORT_ENV} must be a port number, got {raw:?}"))
        })?;
        Ok(())
    }

    /// Validate the lookup section and the log path.
    pub fn validate(&self) -> Result<()> {
        if self.log_path.as_os_str().is_empty() {
            return Err(ResearchError::Config("log_path must not be empty".into()));
        }
        self.lookup
            .validate()
            .map_err(|e| ResearchError::Config(e.to_string()))
    }

    /// `host:port` string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
