//! Configuration loading from a TOML file with environment variable overrides.
//!
//! Looks for `medtrack.toml` in the working directory. The file is optional,
//! but the authority principal must come from somewhere: either the
//! `[authority]` table or `MEDTRACK_AUTHORITY`. Environment variables take
//! precedence over file values.

use std::path::Path;

use serde::Deserialize;

use medtrack_domain::principal::Principal;

/// Default location of the configuration file.
pub const CONFIG_FILE: &str = "medtrack.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Who may mutate the registries.
    pub authority: AuthorityConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Authority configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthorityConfig {
    /// Identity of the single principal allowed to mutate.
    pub principal: String,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl LedgerConfig {
    /// Load configuration from [`CONFIG_FILE`] (if present), then apply
    /// environment-variable overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if no authority principal is configured.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration for the given authority with default settings.
    #[must_use]
    pub fn with_authority(principal: impl Into<String>) -> Self {
        Self {
            authority: AuthorityConfig {
                principal: principal.into(),
            },
            ..Self::default()
        }
    }

    /// Read a configuration file, falling back to defaults when it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MEDTRACK_AUTHORITY") {
            self.authority.principal = val;
        }
        if let Ok(val) = std::env::var("MEDTRACK_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("MEDTRACK_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    /// Check semantic constraints the file format cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the authority or the
    /// database URL is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.authority.principal.trim().is_empty() {
            return Err(ConfigError::Validation(
                "authority principal must be set".to_string(),
            ));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "database url must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured authority as a domain principal.
    #[must_use]
    pub fn authority(&self) -> Principal {
        Principal::new(self.authority.principal.trim())
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:medtrack.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "medtrack=info,medtrackd=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
