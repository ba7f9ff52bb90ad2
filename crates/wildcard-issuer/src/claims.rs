//! Claimed issuer input
//!
//! The validator never parses tokens. Hosts hand over anything that exposes
//! the claimed `iss` value: a plain string, an optional string, or a decoded
//! claims payload.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Anything exposing the issuer claimed by a token
pub trait ClaimedIssuer {
    /// The claimed issuer, if the token carries one
    fn claimed_issuer(&self) -> Option<&str>;
}

impl ClaimedIssuer for str {
    fn claimed_issuer(&self) -> Option<&str> {
        Some(self)
    }
}

impl ClaimedIssuer for String {
    fn claimed_issuer(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: ClaimedIssuer + ?Sized> ClaimedIssuer for &T {
    fn claimed_issuer(&self) -> Option<&str> {
        (**self).claimed_issuer()
    }
}

impl<T: ClaimedIssuer> ClaimedIssuer for Option<T> {
    fn claimed_issuer(&self) -> Option<&str> {
        self.as_ref().and_then(ClaimedIssuer::claimed_issuer)
    }
}

/// Decoded token claims, as far as issuer validation is concerned
///
/// Only `iss` is interpreted. Everything else is kept in `additional` so a
/// full JWT payload deserializes without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssuerClaims {
    /// Issuer (iss) - identifies who issued the token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// All other claims
    #[serde(flatten)]
    pub additional: HashMap<String, serde_json::Value>,
}

impl IssuerClaims {
    /// Claims carrying only an issuer
    pub fn new(iss: impl Into<String>) -> Self {
        Self {
            iss: Some(iss.into()),
            additional: HashMap::new(),
        }
    }
}

impl ClaimedIssuer for IssuerClaims {
    fn claimed_issuer(&self) -> Option<&str> {
        self.iss.as_deref()
    }
}
