//! Issuer validation configuration
//!
//! A [`ValidationConfig`] is owned by the caller and treated as immutable for
//! the duration of a validation call. It can be built programmatically, or
//! loaded from a TOML / YAML / JSON file with environment overrides.
//!
//! ```rust
//! use wildcard_issuer::ValidationConfig;
//!
//! let config = ValidationConfig::builder()
//!     .trusted_issuer("https://abp.io")
//!     .trusted_issuer_pattern("https://{0}.abp.io")
//!     .build();
//!
//! assert!(config.validate_issuer);
//! assert_eq!(config.trusted_issuers, vec!["https://{0}.abp.io".to_string()]);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default environment variable prefix for configuration overrides
pub const DEFAULT_ENV_PREFIX: &str = "ISSUER";

/// Issuer validation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Validate the issuer at all. When `false` every claimed issuer is accepted.
    pub validate_issuer: bool,
    /// Single trusted issuer, literal or wildcard pattern
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted_issuer: Option<String>,
    /// Ordered trusted issuers, each a literal issuer or a wildcard pattern
    /// such as `https://{0}.abp.io`
    pub trusted_issuers: Vec<String>,
    /// Log mismatches before returning them
    pub log_rejections: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            validate_issuer: true,
            trusted_issuer: None,
            trusted_issuers: Vec::new(),
            log_rejections: true,
        }
    }
}

impl ValidationConfig {
    /// Create a configuration builder
    pub fn builder() -> ValidationConfigBuilder {
        ValidationConfigBuilder::new()
    }

    /// Configuration with issuer validation turned off
    pub fn disabled() -> Self {
        Self {
            validate_issuer: false,
            ..Self::default()
        }
    }

    /// The static trusted issuer, if it is non-blank
    pub fn trusted_issuer(&self) -> Option<&str> {
        self.trusted_issuer
            .as_deref()
            .filter(|issuer| !issuer.trim().is_empty())
    }

    /// Load configuration from a file (TOML, YAML, or JSON)
    ///
    /// The format is picked from the file extension. Environment variables
    /// prefixed with `ISSUER_` override file settings, e.g.
    /// `ISSUER_TRUSTED_ISSUER=https://abp.io`. List values are comma-separated.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file doesn't exist
    /// - The file format is unsupported
    /// - The file contains invalid configuration
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_file_with_prefix(path, DEFAULT_ENV_PREFIX)
    }

    /// Load configuration from a file with a custom environment prefix
    ///
    /// # Errors
    ///
    /// Same as [`ValidationConfig::from_file`].
    pub fn from_file_with_prefix(
        path: impl AsRef<Path>,
        env_prefix: &str,
    ) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File, FileFormat};

        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let format = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => return Err(ConfigError::UnsupportedFormat),
        };

        let config = Config::builder()
            .add_source(File::new(
                path.to_str().ok_or(ConfigError::UnsupportedFormat)?,
                format,
            ))
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("trusted_issuers"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Builder for [`ValidationConfig`]
#[derive(Debug, Clone, Default)]
pub struct ValidationConfigBuilder {
    config: ValidationConfig,
}

impl ValidationConfigBuilder {
    /// Start from the default configuration (validation on, no trust sources)
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable issuer validation
    pub fn validate_issuer(mut self, enabled: bool) -> Self {
        self.config.validate_issuer = enabled;
        self
    }

    /// Set the static trusted issuer
    pub fn trusted_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.config.trusted_issuer = Some(issuer.into());
        self
    }

    /// Append one entry to the trusted issuer list
    pub fn trusted_issuer_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.trusted_issuers.push(pattern.into());
        self
    }

    /// Replace the trusted issuer list
    pub fn trusted_issuers<I, S>(mut self, issuers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.trusted_issuers = issuers.into_iter().map(Into::into).collect();
        self
    }

    /// Log mismatches before returning them
    pub fn log_rejections(mut self, enabled: bool) -> Self {
        self.config.log_rejections = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ValidationConfig {
        self.config
    }
}
