//! Issuer validation
//!
//! Two entry points share one resolution routine:
//!
//! - [`IssuerValidator::validate`] checks the static configuration: the
//!   trusted issuer first, then the trusted issuer list in order.
//! - [`IssuerValidator::validate_with_metadata`] checks a dynamically supplied
//!   issuer (e.g. from discovery metadata) before falling back to the static
//!   configuration.
//!
//! Each trusted issuer is compared by ordinal equality, then as a wildcard
//! pattern (see [`crate::matcher`]). The accepted issuer is returned exactly as
//! it was claimed.
//!
//! # Example
//!
//! ```rust
//! use wildcard_issuer::{IssuerErrorKind, IssuerValidator, ValidationConfig};
//!
//! let validator = IssuerValidator::new(
//!     ValidationConfig::builder()
//!         .trusted_issuer("https://abp.io")
//!         .trusted_issuer_pattern("https://{0}.abp.io")
//!         .build(),
//! );
//!
//! let accepted = validator.validate("https://t1.api.abp.io")?;
//! assert_eq!(accepted.issuer(), Some("https://t1.api.abp.io"));
//!
//! let err = validator.validate("https://abp.io.evil.com").unwrap_err();
//! assert_eq!(err.kind(), IssuerErrorKind::IssuerMismatch);
//! # Ok::<(), wildcard_issuer::IssuerValidationError>(())
//! ```

use tracing::{error, info, warn};

use crate::claims::ClaimedIssuer;
use crate::config::ValidationConfig;
use crate::document::IssuerMetadata;
use crate::error::{IssuerValidationError, Result, format_trusted_issuers};
use crate::source::{
    self, IssuerMatch, MetadataSource, TrustSource, TrustedIssuerSource, TrustedIssuersSource,
};

/// A claimed issuer that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedIssuer<'a> {
    /// Validation is disabled; the claimed issuer is passed through untouched
    Unchecked(Option<&'a str>),
    /// The claimed issuer matched a trust source
    Trusted {
        /// The claimed issuer, unchanged
        issuer: &'a str,
        /// Which source and rule accepted it
        matched: IssuerMatch,
    },
}

impl<'a> ValidatedIssuer<'a> {
    /// The claimed issuer, exactly as supplied
    pub fn issuer(&self) -> Option<&'a str> {
        match self {
            Self::Unchecked(issuer) => *issuer,
            Self::Trusted { issuer, .. } => Some(issuer),
        }
    }

    /// The match that accepted the issuer, if validation ran
    pub fn matched(&self) -> Option<&IssuerMatch> {
        match self {
            Self::Unchecked(_) => None,
            Self::Trusted { matched, .. } => Some(matched),
        }
    }

    /// Whether the issuer was actually checked against a trust source
    pub fn is_trusted(&self) -> bool {
        matches!(self, Self::Trusted { .. })
    }
}

/// Stateless issuer validator over a [`ValidationConfig`]
///
/// Cheap to clone and safe to share between threads; validation borrows
/// `&self` and keeps no state between calls.
#[derive(Debug, Clone)]
pub struct IssuerValidator {
    config: ValidationConfig,
}

impl IssuerValidator {
    /// Create a validator over `config`
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a validator builder
    pub fn builder() -> IssuerValidatorBuilder {
        IssuerValidatorBuilder::default()
    }

    /// The configuration this validator checks against
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate against the static configuration
    ///
    /// # Errors
    ///
    /// - [`IssuerValidationError::EmptyIssuer`] if the claimed issuer is
    ///   missing or blank
    /// - [`IssuerValidationError::NoTrustedIssuersConfigured`] if neither a
    ///   trusted issuer nor a trusted issuer list is configured
    /// - [`IssuerValidationError::IssuerMismatch`] if nothing matched
    pub fn validate<'a, I>(&self, claimed: &'a I) -> Result<ValidatedIssuer<'a>>
    where
        I: ClaimedIssuer + ?Sized,
    {
        validate_issuer(claimed, Some(&self.config))
    }

    /// Validate against issuer metadata first, then the static configuration
    ///
    /// A metadata issuer counts as a trust source on its own, so a validator
    /// with no static trusted issuers accepts issuers matching the metadata.
    ///
    /// # Errors
    ///
    /// Same as [`IssuerValidator::validate`]; `NoTrustedIssuersConfigured` is
    /// only returned when the metadata issuer is absent or blank as well.
    pub fn validate_with_metadata<'a, I, M>(
        &self,
        claimed: &'a I,
        metadata: Option<&M>,
    ) -> Result<ValidatedIssuer<'a>>
    where
        I: ClaimedIssuer + ?Sized,
        M: IssuerMetadata + ?Sized,
    {
        validate_issuer_with_metadata(claimed, Some(&self.config), metadata)
    }
}

impl From<ValidationConfig> for IssuerValidator {
    fn from(config: ValidationConfig) -> Self {
        Self::new(config)
    }
}

/// Builder for [`IssuerValidator`]
#[derive(Debug, Clone, Default)]
pub struct IssuerValidatorBuilder {
    config: Option<ValidationConfig>,
}

impl IssuerValidatorBuilder {
    /// Set the validation configuration
    pub fn config(mut self, config: ValidationConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the validator
    ///
    /// # Errors
    ///
    /// Returns [`IssuerValidationError::MissingConfiguration`] if no
    /// configuration was set.
    pub fn build(self) -> Result<IssuerValidator> {
        self.config
            .map(IssuerValidator::new)
            .ok_or_else(missing_configuration)
    }
}

/// Validate a claimed issuer against an optional host configuration
///
/// This is the shape of a host pipeline hook, where the configuration object
/// may not have been supplied at all.
///
/// # Errors
///
/// [`IssuerValidationError::MissingConfiguration`] when `config` is `None`,
/// otherwise as [`IssuerValidator::validate`].
pub fn validate_issuer<'a, I>(
    claimed: &'a I,
    config: Option<&ValidationConfig>,
) -> Result<ValidatedIssuer<'a>>
where
    I: ClaimedIssuer + ?Sized,
{
    let config = config.ok_or_else(missing_configuration)?;
    let trusted_issuer = TrustedIssuerSource::new(config.trusted_issuer.as_deref());
    let trusted_issuers = TrustedIssuersSource::new(&config.trusted_issuers);

    validate_against(
        config,
        claimed.claimed_issuer(),
        None,
        &[&trusted_issuer, &trusted_issuers],
    )
}

/// Validate a claimed issuer against issuer metadata and an optional host configuration
///
/// # Errors
///
/// [`IssuerValidationError::MissingConfiguration`] when `config` is `None`,
/// otherwise as [`IssuerValidator::validate_with_metadata`].
pub fn validate_issuer_with_metadata<'a, I, M>(
    claimed: &'a I,
    config: Option<&ValidationConfig>,
    metadata: Option<&M>,
) -> Result<ValidatedIssuer<'a>>
where
    I: ClaimedIssuer + ?Sized,
    M: IssuerMetadata + ?Sized,
{
    let config = config.ok_or_else(missing_configuration)?;
    let metadata_source = MetadataSource::new(metadata.and_then(IssuerMetadata::issuer));
    let trusted_issuer = TrustedIssuerSource::new(config.trusted_issuer.as_deref());
    let trusted_issuers = TrustedIssuersSource::new(&config.trusted_issuers);

    validate_against(
        config,
        claimed.claimed_issuer(),
        metadata_source.issuer(),
        &[&metadata_source, &trusted_issuer, &trusted_issuers],
    )
}

fn missing_configuration() -> IssuerValidationError {
    error!("Unable to validate issuer: no validation configuration was supplied");
    IssuerValidationError::MissingConfiguration
}

/// Resolve `issuer` against `sources` in order
///
/// `metadata_issuer` is only carried into the mismatch diagnostics.
fn validate_against<'a>(
    config: &ValidationConfig,
    issuer: Option<&'a str>,
    metadata_issuer: Option<&str>,
    sources: &[&dyn TrustSource],
) -> Result<ValidatedIssuer<'a>> {
    if !config.validate_issuer {
        warn!("validate_issuer is set to false, exiting without validating the issuer");
        return Ok(ValidatedIssuer::Unchecked(issuer));
    }

    let Some(issuer) = issuer.filter(|issuer| !issuer.trim().is_empty()) else {
        error!("Unable to validate issuer: the claimed issuer is null or whitespace");
        return Err(IssuerValidationError::EmptyIssuer {
            issuer: issuer.map(str::to_string),
        });
    };

    if !source::any_configured(sources) {
        error!(
            issuer = %issuer,
            "Unable to validate issuer: no trusted issuer, trusted issuer list or issuer metadata"
        );
        return Err(IssuerValidationError::NoTrustedIssuersConfigured {
            issuer: issuer.to_string(),
        });
    }

    if let Some(matched) = source::resolve(issuer, sources) {
        info!(
            issuer = %issuer,
            source = %matched.source,
            rule = %matched.rule,
            pattern = %matched.pattern,
            "Issuer validated"
        );
        return Ok(ValidatedIssuer::Trusted { issuer, matched });
    }

    let err = IssuerValidationError::IssuerMismatch {
        issuer: issuer.to_string(),
        trusted_issuer: config.trusted_issuer.clone(),
        trusted_issuers: format_trusted_issuers(&config.trusted_issuers),
        dynamic_issuer: metadata_issuer.map(str::to_string),
    };

    if config.log_rejections {
        error!(issuer = %issuer, error = %err, "Issuer validation failed");
    }

    Err(err)
}
