//! Dynamic trust anchors
//!
//! Issuer metadata resolved at validation time (for example the `issuer` of an
//! OpenID Connect discovery document) takes precedence over static
//! configuration. Fetching and caching the metadata is the host's job; the
//! validator only reads the issuer value.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Anything exposing an issuer-bearing configuration
pub trait IssuerMetadata {
    /// The trusted issuer carried by this metadata, literal or wildcard pattern
    fn issuer(&self) -> Option<&str>;
}

impl IssuerMetadata for str {
    fn issuer(&self) -> Option<&str> {
        Some(self)
    }
}

impl IssuerMetadata for String {
    fn issuer(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: IssuerMetadata + ?Sized> IssuerMetadata for &T {
    fn issuer(&self) -> Option<&str> {
        (**self).issuer()
    }
}

/// Trusted issuer document
///
/// Deserializes directly from an RFC 8414 authorization server metadata or
/// OIDC discovery document; fields other than `issuer` are kept in
/// `additional`.
///
/// ```rust
/// use wildcard_issuer::{IssuerMetadata, TrustedIssuerDocument};
///
/// let doc: TrustedIssuerDocument = serde_json::from_str(
///     r#"{ "issuer": "https://{0}.abp.io", "jwks_uri": "https://abp.io/jwks" }"#,
/// ).unwrap();
/// assert_eq!(doc.issuer(), Some("https://{0}.abp.io"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustedIssuerDocument {
    /// The trusted issuer, literal or wildcard pattern
    pub issuer: String,

    /// All other metadata fields
    #[serde(flatten)]
    pub additional: HashMap<String, serde_json::Value>,
}

impl TrustedIssuerDocument {
    /// Document carrying only an issuer
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            additional: HashMap::new(),
        }
    }
}

impl IssuerMetadata for TrustedIssuerDocument {
    fn issuer(&self) -> Option<&str> {
        Some(self.issuer.as_str())
    }
}
