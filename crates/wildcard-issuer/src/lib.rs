//! # Wildcard Issuer - Token Issuer Validation with Wildcard Subdomains
//!
//! Validates the `iss` claim of a security token against trusted issuers,
//! extending exact matching with wildcard-subdomain patterns. A trusted
//! pattern `https://{0}.abp.io` accepts `https://api.abp.io` and
//! `https://t1.api.abp.io`, but neither `https://abp.io` nor
//! `https://abp.io.evil.com`.
//!
//! Signature verification, claim schema validation and fetching issuer
//! metadata belong to the surrounding token pipeline. This crate only decides
//! whether a claimed issuer is trusted.
//!
//! ## Architecture
//!
//! - [`matcher`] - Exact and wildcard-subdomain comparison
//! - [`source`] - Ordered trust sources (metadata, trusted issuer, trusted issuer list)
//! - [`validator`] - Static and metadata-aware validation entry points
//! - [`config`] - [`ValidationConfig`] and file / environment loading
//! - [`claims`] / [`document`] - Narrow traits for host-supplied inputs
//! - [`error`] - Typed rejections
//! - [`logging`] - Optional stderr subscriber setup
//!
//! ## Quick Start
//!
//! ```rust
//! use wildcard_issuer::{IssuerValidator, TrustedIssuerDocument, ValidationConfig};
//!
//! let validator = IssuerValidator::new(
//!     ValidationConfig::builder()
//!         .trusted_issuer("https://abp.io")
//!         .trusted_issuer_pattern("https://{0}.abp.io")
//!         .build(),
//! );
//!
//! assert!(validator.validate("https://abp.io").is_ok());
//! assert!(validator.validate("https://api.abp.io").is_ok());
//! assert!(validator.validate("http://abp.io").is_err());
//!
//! // Issuer metadata resolved at runtime is consulted first
//! let metadata = TrustedIssuerDocument::new("https://{0}.example.com");
//! let accepted = validator.validate_with_metadata("https://tenant1.example.com", Some(&metadata))?;
//! assert_eq!(accepted.issuer(), Some("https://tenant1.example.com"));
//! # Ok::<(), wildcard_issuer::IssuerValidationError>(())
//! ```

pub mod claims;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod source;
pub mod validator;

#[doc(inline)]
pub use claims::{ClaimedIssuer, IssuerClaims};
#[doc(inline)]
pub use config::{ValidationConfig, ValidationConfigBuilder};
#[doc(inline)]
pub use document::{IssuerMetadata, TrustedIssuerDocument};
#[doc(inline)]
pub use error::{ConfigError, IssuerErrorKind, IssuerValidationError, Result, format_trusted_issuers};
#[doc(inline)]
pub use matcher::{DomainPattern, MatchRule, PLACEHOLDER, WILDCARD};
#[doc(inline)]
pub use source::{IssuerMatch, TrustSource, TrustSourceKind};
#[doc(inline)]
pub use validator::{
    IssuerValidator, IssuerValidatorBuilder, ValidatedIssuer, validate_issuer,
    validate_issuer_with_metadata,
};
