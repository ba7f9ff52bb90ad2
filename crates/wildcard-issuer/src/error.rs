//! Issuer validation errors
//!
//! Every failure is surfaced to the immediate caller. Nothing here is
//! retryable: an issuer that fails validation is never a transient condition.

use std::path::PathBuf;

use thiserror::Error;

/// Placeholder rendered for absent values in diagnostic messages
pub(crate) const NULL_PLACEHOLDER: &str = "null";

/// Rendering of an empty trusted issuer list in diagnostic messages
pub(crate) const EMPTY_PLACEHOLDER: &str = "empty";

/// Issuer validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssuerValidationError {
    /// No validation configuration was supplied by the host
    #[error("Unable to validate issuer: no validation configuration was supplied")]
    MissingConfiguration,

    /// The claimed issuer is missing or blank while validation is enabled
    #[error("Unable to validate issuer: the claimed issuer is null or whitespace")]
    EmptyIssuer {
        /// The claimed issuer as supplied (absent or blank)
        issuer: Option<String>,
    },

    /// Validation is enabled but there is nothing to validate against
    #[error(
        "Unable to validate issuer '{issuer}': trusted_issuer is null or whitespace, \
         trusted_issuers is empty and no issuer metadata was supplied"
    )]
    NoTrustedIssuersConfigured {
        /// The claimed issuer
        issuer: String,
    },

    /// The claimed issuer matched none of the configured trust sources
    #[error("{}", mismatch_message(.issuer, .trusted_issuer, .trusted_issuers, .dynamic_issuer))]
    IssuerMismatch {
        /// The claimed issuer
        issuer: String,
        /// The configured static trusted issuer
        trusted_issuer: Option<String>,
        /// The configured trusted issuer list, comma-delimited
        trusted_issuers: String,
        /// The issuer of the dynamic metadata document, if one was supplied
        dynamic_issuer: Option<String>,
    },
}

/// Error kinds, for callers that only branch on the category of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssuerErrorKind {
    /// See [`IssuerValidationError::MissingConfiguration`]
    MissingConfiguration,
    /// See [`IssuerValidationError::EmptyIssuer`]
    EmptyIssuer,
    /// See [`IssuerValidationError::NoTrustedIssuersConfigured`]
    NoTrustedIssuersConfigured,
    /// See [`IssuerValidationError::IssuerMismatch`]
    IssuerMismatch,
}

impl IssuerValidationError {
    /// The kind of this error
    pub fn kind(&self) -> IssuerErrorKind {
        match self {
            Self::MissingConfiguration => IssuerErrorKind::MissingConfiguration,
            Self::EmptyIssuer { .. } => IssuerErrorKind::EmptyIssuer,
            Self::NoTrustedIssuersConfigured { .. } => IssuerErrorKind::NoTrustedIssuersConfigured,
            Self::IssuerMismatch { .. } => IssuerErrorKind::IssuerMismatch,
        }
    }

    /// The rejected claimed issuer, when one was supplied
    pub fn invalid_issuer(&self) -> Option<&str> {
        match self {
            Self::MissingConfiguration => None,
            Self::EmptyIssuer { issuer } => issuer.as_deref(),
            Self::NoTrustedIssuersConfigured { issuer } | Self::IssuerMismatch { issuer, .. } => {
                Some(issuer)
            }
        }
    }

    /// Whether the failure points at a deployment defect rather than a bad token
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingConfiguration | Self::NoTrustedIssuersConfigured { .. }
        )
    }
}

fn mismatch_message(
    issuer: &str,
    trusted_issuer: &Option<String>,
    trusted_issuers: &str,
    dynamic_issuer: &Option<String>,
) -> String {
    let mut message = format!(
        "Issuer validation failed. Issuer: '{issuer}'. Did not match: trusted_issuer: '{}' or trusted_issuers: '{trusted_issuers}'",
        trusted_issuer.as_deref().unwrap_or(NULL_PLACEHOLDER),
    );
    if let Some(dynamic) = dynamic_issuer {
        message.push_str(&format!(" or metadata issuer: '{dynamic}'"));
    }
    message.push('.');
    message
}

/// Render a trusted issuer list as a single comma-delimited string
///
/// Blank entries are rendered as `null`; an empty list is rendered as `empty`.
pub fn format_trusted_issuers<S: AsRef<str>>(issuers: &[S]) -> String {
    if issuers.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    issuers
        .iter()
        .map(|issuer| {
            let issuer = issuer.as_ref();
            if issuer.trim().is_empty() {
                NULL_PLACEHOLDER
            } else {
                issuer
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// Unsupported file format
    #[error("Unsupported configuration file format. Use .toml, .yaml, .yml, or .json")]
    UnsupportedFormat,

    /// Configuration parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] config::ConfigError),
}

/// Result type for issuer validation
pub type Result<T> = std::result::Result<T, IssuerValidationError>;
