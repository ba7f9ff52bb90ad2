//! Trust sources
//!
//! Issuer resolution walks an ordered list of trust sources and stops at the
//! first one that accepts the claimed issuer. The static validator consults
//! the configured trusted issuer, then the trusted issuer list; the dynamic
//! validator puts the issuer metadata document in front of both.

use std::fmt;

use tracing::warn;

use crate::matcher::{self, MatchRule};

/// Where an accepted issuer was trusted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrustSourceKind {
    /// Issuer metadata supplied at validation time
    Metadata,
    /// The static `trusted_issuer` setting
    TrustedIssuer,
    /// The static `trusted_issuers` list
    TrustedIssuers,
}

impl fmt::Display for TrustSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metadata => f.write_str("metadata"),
            Self::TrustedIssuer => f.write_str("trusted_issuer"),
            Self::TrustedIssuers => f.write_str("trusted_issuers"),
        }
    }
}

/// A successful match of a claimed issuer against a trust source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerMatch {
    /// The source that accepted the issuer
    pub source: TrustSourceKind,
    /// Exact or wildcard
    pub rule: MatchRule,
    /// The trusted issuer or pattern that matched
    pub pattern: String,
    /// Position within the trusted issuer list, for list matches
    pub index: Option<usize>,
}

/// One place a trusted issuer can come from
pub trait TrustSource: fmt::Debug {
    /// Which kind of source this is
    fn kind(&self) -> TrustSourceKind;

    /// Whether the source holds anything to validate against
    fn is_configured(&self) -> bool;

    /// Match the claimed issuer, exact before wildcard
    fn find_match(&self, issuer: &str) -> Option<IssuerMatch>;
}

/// Issuer from a metadata document supplied by the host
#[derive(Debug, Clone, Copy)]
pub struct MetadataSource<'a> {
    issuer: Option<&'a str>,
}

impl<'a> MetadataSource<'a> {
    /// Wrap the metadata issuer; blank values are not a usable source
    pub fn new(issuer: Option<&'a str>) -> Self {
        Self {
            issuer: non_blank(issuer),
        }
    }

    /// The metadata issuer, if it is usable
    pub fn issuer(&self) -> Option<&'a str> {
        self.issuer
    }
}

impl TrustSource for MetadataSource<'_> {
    fn kind(&self) -> TrustSourceKind {
        TrustSourceKind::Metadata
    }

    fn is_configured(&self) -> bool {
        self.issuer.is_some()
    }

    fn find_match(&self, issuer: &str) -> Option<IssuerMatch> {
        single_match(self.kind(), self.issuer?, issuer)
    }
}

/// The static single trusted issuer
#[derive(Debug, Clone, Copy)]
pub struct TrustedIssuerSource<'a> {
    issuer: Option<&'a str>,
}

impl<'a> TrustedIssuerSource<'a> {
    /// Wrap the configured trusted issuer; blank values are not a usable source
    pub fn new(issuer: Option<&'a str>) -> Self {
        Self {
            issuer: non_blank(issuer),
        }
    }
}

impl TrustSource for TrustedIssuerSource<'_> {
    fn kind(&self) -> TrustSourceKind {
        TrustSourceKind::TrustedIssuer
    }

    fn is_configured(&self) -> bool {
        self.issuer.is_some()
    }

    fn find_match(&self, issuer: &str) -> Option<IssuerMatch> {
        single_match(self.kind(), self.issuer?, issuer)
    }
}

/// The static ordered trusted issuer list
#[derive(Debug, Clone, Copy)]
pub struct TrustedIssuersSource<'a> {
    issuers: &'a [String],
}

impl<'a> TrustedIssuersSource<'a> {
    /// Wrap the configured trusted issuer list
    pub fn new(issuers: &'a [String]) -> Self {
        Self { issuers }
    }
}

impl TrustSource for TrustedIssuersSource<'_> {
    fn kind(&self) -> TrustSourceKind {
        TrustSourceKind::TrustedIssuers
    }

    // A list of only blank entries still counts as configured; the entries
    // are skipped with a warning and the issuer is then rejected as a mismatch.
    fn is_configured(&self) -> bool {
        !self.issuers.is_empty()
    }

    fn find_match(&self, issuer: &str) -> Option<IssuerMatch> {
        let scan = matcher::match_any(issuer, self.issuers);

        for index in &scan.skipped {
            warn!(
                index = *index,
                "One of the entries in trusted_issuers was null or an empty string, skipping"
            );
        }

        scan.matched.map(|matched| IssuerMatch {
            source: self.kind(),
            rule: matched.rule,
            pattern: matched.pattern.to_string(),
            index: Some(matched.index),
        })
    }
}

/// Walk `sources` in order and return the first match
pub fn resolve(issuer: &str, sources: &[&dyn TrustSource]) -> Option<IssuerMatch> {
    sources.iter().find_map(|source| source.find_match(issuer))
}

/// Whether any of `sources` holds something to validate against
pub fn any_configured(sources: &[&dyn TrustSource]) -> bool {
    sources.iter().any(|source| source.is_configured())
}

fn single_match(source: TrustSourceKind, pattern: &str, issuer: &str) -> Option<IssuerMatch> {
    matcher::match_pattern(issuer, pattern).map(|rule| IssuerMatch {
        source,
        rule,
        pattern: pattern.to_string(),
        index: None,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_single_sources_are_unconfigured() {
        assert!(!MetadataSource::new(None).is_configured());
        assert!(!MetadataSource::new(Some(" ")).is_configured());
        assert!(!TrustedIssuerSource::new(Some("")).is_configured());
        assert!(TrustedIssuerSource::new(Some("https://abp.io")).is_configured());
    }

    #[test]
    fn test_list_with_only_blank_entries_is_configured() {
        let issuers = vec![String::new(), "  ".to_string()];
        let source = TrustedIssuersSource::new(&issuers);
        assert!(source.is_configured());
        assert!(source.find_match("https://abp.io").is_none());

        assert!(!TrustedIssuersSource::new(&[]).is_configured());
    }

    #[test]
    fn test_resolve_respects_source_order() {
        let issuers = vec!["https://{0}.abp.io".to_string()];
        let single = TrustedIssuerSource::new(Some("https://{0}.abp.io"));
        let list = TrustedIssuersSource::new(&issuers);

        let matched = resolve("https://api.abp.io", &[&single, &list]).unwrap();
        assert_eq!(matched.source, TrustSourceKind::TrustedIssuer);
        assert_eq!(matched.rule, MatchRule::Wildcard);
        assert_eq!(matched.index, None);

        let matched = resolve("https://api.abp.io", &[&list, &single]).unwrap();
        assert_eq!(matched.source, TrustSourceKind::TrustedIssuers);
        assert_eq!(matched.index, Some(0));
    }

    #[test]
    fn test_resolve_no_match() {
        let metadata = MetadataSource::new(Some("https://abp.io"));
        assert!(resolve("https://api.abp.io", &[&metadata]).is_none());
        assert!(resolve("https://api.abp.io", &[]).is_none());
    }

    #[test]
    fn test_any_configured() {
        let empty: Vec<String> = Vec::new();
        let metadata = MetadataSource::new(Some("https://abp.io"));
        let single = TrustedIssuerSource::new(None);
        let list = TrustedIssuersSource::new(&empty);

        assert!(!any_configured(&[&single, &list]));
        assert!(any_configured(&[&metadata, &single, &list]));
    }
}
