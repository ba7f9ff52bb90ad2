//! Domain matching for trusted issuer patterns
//!
//! A trusted issuer such as `https://{0}.abp.io` carries one placeholder in
//! its leftmost host label. Substituting the wildcard marker yields the domain
//! expression `https://*.abp.io`, which accepts strict subdomains only:
//!
//! | Claimed issuer                      | Result |
//! |-------------------------------------|--------|
//! | `https://api.abp.io`                | match  |
//! | `https://t1.api.abp.io`             | match  |
//! | `https://abp.io`                    | no (no label captured) |
//! | `https://abp.io.test.mydomain.com`  | no (suffix mismatch) |
//! | `http://api.abp.io`                 | no (scheme mismatch) |
//! | `https://api.abp.io/`               | no (path differs from pattern) |
//!
//! [`matches`] is wildcard-only. Exact equality is a separate rule, applied
//! first by [`match_pattern`] and [`match_any`].

use tracing::debug;
use url::{Host, Url};

/// Placeholder token marking the wildcarded subdomain position
pub const PLACEHOLDER: &str = "{0}";

/// Wildcard marker substituted for [`PLACEHOLDER`]
pub const WILDCARD: &str = "*";

const WILDCARD_LABEL: &str = "*.";

/// Which comparison accepted a claimed issuer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchRule {
    /// Ordinal string equality
    Exact,
    /// Strict subdomain of a wildcard pattern
    Wildcard,
}

impl std::fmt::Display for MatchRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Wildcard => f.write_str("wildcard"),
        }
    }
}

/// Parsed wildcard domain expression, e.g. `https://*.abp.io`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPattern {
    scheme: String,
    suffix: String,
    port: Option<u16>,
    tail: String,
}

impl DomainPattern {
    /// Parse a domain expression whose leftmost host label is `*`
    ///
    /// Returns `None` when the expression has no leading wildcard label, more
    /// than one wildcard, userinfo, or a fixed part that is not a domain name.
    pub fn parse(expression: &str) -> Option<Self> {
        if !is_verbatim(expression) {
            return None;
        }
        let (scheme, authority, tail) = split_issuer(expression)?;
        let fixed_authority = authority.strip_prefix(WILDCARD_LABEL)?;

        if fixed_authority.contains(WILDCARD) || fixed_authority.contains('@') {
            return None;
        }

        let fixed = Url::parse(&format!("{scheme}://{fixed_authority}")).ok()?;
        let suffix = match fixed.host()? {
            Host::Domain(domain) => domain.to_string(),
            Host::Ipv4(_) | Host::Ipv6(_) => return None,
        };

        if suffix.is_empty() || suffix.starts_with('.') || suffix.contains("..") {
            return None;
        }

        Some(Self {
            scheme: fixed.scheme().to_string(),
            suffix,
            port: fixed.port_or_known_default(),
            tail: tail.to_string(),
        })
    }

    /// The fixed host suffix below the wildcard, e.g. `abp.io`
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The URL scheme the claimed issuer must carry
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Whether `claimed` is a strict subdomain of this pattern
    pub fn contains(&self, claimed: &str) -> bool {
        if !is_verbatim(claimed) {
            return false;
        }

        let Some((_, authority, tail)) = split_issuer(claimed) else {
            return false;
        };

        // Path, query and fragment compare raw, so `https://api.abp.io/`
        // does not match a pattern without a trailing slash.
        if tail != self.tail || authority.contains('@') {
            return false;
        }

        let Ok(url) = Url::parse(claimed) else {
            return false;
        };

        if url.scheme() != self.scheme || url.port_or_known_default() != self.port {
            return false;
        }

        let Some(Host::Domain(host)) = url.host() else {
            return false;
        };

        host.strip_suffix(self.suffix.as_str())
            .and_then(|prefix| prefix.strip_suffix('.'))
            .is_some_and(|captured| {
                !captured.is_empty() && captured.split('.').all(|label| !label.is_empty())
            })
    }
}

/// Turn a trusted issuer pattern into its domain expression
///
/// Only patterns with exactly one placeholder are wildcard patterns.
pub fn wildcard_expression(pattern: &str) -> Option<String> {
    match pattern.matches(PLACEHOLDER).count() {
        0 => None,
        1 => Some(pattern.replacen(PLACEHOLDER, WILDCARD, 1)),
        count => {
            debug!(
                pattern = pattern,
                placeholders = count,
                "Ignoring trusted issuer pattern with more than one placeholder"
            );
            None
        }
    }
}

/// Whether `claimed` is a strict subdomain of the wildcard `pattern`
///
/// Patterns without a placeholder never match here; equality is checked by
/// the caller.
pub fn matches(claimed: &str, pattern: &str) -> bool {
    let Some(expression) = wildcard_expression(pattern) else {
        return false;
    };

    match DomainPattern::parse(&expression) {
        Some(domain) => domain.contains(claimed),
        None => {
            debug!(pattern = pattern, "Ignoring malformed wildcard issuer pattern");
            false
        }
    }
}

/// Compare `claimed` against one trusted issuer: exact first, then wildcard
pub fn match_pattern(claimed: &str, pattern: &str) -> Option<MatchRule> {
    if claimed == pattern {
        Some(MatchRule::Exact)
    } else if matches(claimed, pattern) {
        Some(MatchRule::Wildcard)
    } else {
        None
    }
}

/// First entry of a pattern list that accepted the claimed issuer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch<'p> {
    /// Position of the entry in the list
    pub index: usize,
    /// The entry itself
    pub pattern: &'p str,
    /// How it matched
    pub rule: MatchRule,
}

/// Outcome of scanning an ordered pattern list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternScan<'p> {
    /// The first matching entry, if any
    pub matched: Option<PatternMatch<'p>>,
    /// Indices of blank entries skipped before the scan stopped
    pub skipped: Vec<usize>,
}

/// Scan `patterns` in order and stop at the first exact or wildcard match
///
/// Blank entries are skipped and reported in [`PatternScan::skipped`] so the
/// caller can warn about them; they never fail the scan.
pub fn match_any<'p, S: AsRef<str>>(claimed: &str, patterns: &'p [S]) -> PatternScan<'p> {
    let mut scan = PatternScan::default();

    for (index, pattern) in patterns.iter().enumerate() {
        let pattern = pattern.as_ref();
        if pattern.trim().is_empty() {
            scan.skipped.push(index);
            continue;
        }

        if let Some(rule) = match_pattern(claimed, pattern) {
            scan.matched = Some(PatternMatch {
                index,
                pattern,
                rule,
            });
            break;
        }
    }

    scan
}

/// Whether URL parsing keeps the issuer's structure as written
///
/// The URL parser strips whitespace and control characters and reads `\` as
/// a path separator, which would hide a path from the raw tail comparison.
fn is_verbatim(issuer: &str) -> bool {
    !issuer
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || c == '\\')
}

/// Split an issuer into scheme, authority and the raw remainder
fn split_issuer(issuer: &str) -> Option<(&str, &str, &str)> {
    let (scheme, rest) = issuer.split_once("://")?;
    if scheme.is_empty() {
        return None;
    }
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some((scheme, &rest[..end], &rest[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERN: &str = "https://{0}.abp.io";

    #[test]
    fn test_wildcard_accepts_subdomains() {
        assert!(matches("https://api.abp.io", PATTERN));
        assert!(matches("https://www.abp.io", PATTERN));
        assert!(matches("https://t1.api.abp.io", PATTERN));
    }

    #[test]
    fn test_wildcard_requires_captured_label() {
        assert!(!matches("https://abp.io", PATTERN));
        assert!(!matches("https://.abp.io", PATTERN));
    }

    #[test]
    fn test_wildcard_rejects_suffix_and_scheme_mismatch() {
        assert!(!matches("https://abp.io.test.mydomain.com", PATTERN));
        assert!(!matches("https://api.abp.com", PATTERN));
        assert!(!matches("https://evilabp.io", PATTERN));
        assert!(!matches("http://api.abp.io", PATTERN));
        assert!(!matches("http://www.abp.io", PATTERN));
    }

    #[test]
    fn test_wildcard_is_path_sensitive() {
        assert!(!matches("https://api.abp.io/", PATTERN));
        assert!(!matches("https://api.abp.io/tenant", PATTERN));
        assert!(!matches("https://api.abp.io?x=1", PATTERN));

        assert!(matches("https://api.abp.io/auth", "https://{0}.abp.io/auth"));
        assert!(!matches("https://api.abp.io", "https://{0}.abp.io/auth"));
    }

    #[test]
    fn test_wildcard_rejects_parser_normalised_input() {
        assert!(!matches("https://api.abp.io\\tenant", PATTERN));
        assert!(!matches("https://api.abp.io\\..\\x", PATTERN));
        assert!(!matches("https://api.abp.io\n", PATTERN));
        assert!(!matches("https://api.abp.io\t", PATTERN));
        assert!(!matches("https://api.abp.io ", PATTERN));
        assert!(!matches(" https://api.abp.io", PATTERN));
        assert!(!matches("https://api.\tabp.io", PATTERN));
        assert!(!matches("https://api.abp.io\u{0}", PATTERN));

        assert!(DomainPattern::parse("https://*.abp.io\\auth").is_none());
        assert!(DomainPattern::parse(" https://*.abp.io").is_none());
    }

    #[test]
    fn test_wildcard_ports() {
        assert!(matches("https://api.abp.io:443", PATTERN));
        assert!(!matches("https://api.abp.io:8443", PATTERN));
        assert!(matches("https://api.abp.io:8443", "https://{0}.abp.io:8443"));
    }

    #[test]
    fn test_wildcard_host_is_case_insensitive() {
        assert!(matches("https://API.Abp.IO", PATTERN));
        assert!(matches("HTTPS://api.abp.io", PATTERN));
    }

    #[test]
    fn test_wildcard_rejects_userinfo_and_ip_hosts() {
        assert!(!matches("https://user@api.abp.io", PATTERN));
        assert!(!matches("https://127.0.0.1", "https://{0}.0.0.1"));
        assert!(!matches("https://[::1]", PATTERN));
    }

    #[test]
    fn test_plain_pattern_never_matches_as_wildcard() {
        assert!(!matches("https://abp.io", "https://abp.io"));
        assert!(!matches("https://api.abp.io", "https://abp.io"));
    }

    #[test]
    fn test_malformed_patterns() {
        assert!(!matches("https://api.abp.io", "https://api.{0}.io"));
        assert!(!matches("https://a.b.abp.io", "https://{0}.{0}.abp.io"));
        assert!(!matches("https://api.abp.io", "{0}.abp.io"));
        assert!(!matches("https://api.abp.io", "https://{0}"));
        assert!(DomainPattern::parse("https://*.abp.*.io").is_none());
        assert!(DomainPattern::parse("https://*.10.0.0.1").is_none());
    }

    #[test]
    fn test_domain_pattern_parts() {
        let pattern = DomainPattern::parse("https://*.ABP.io").unwrap();
        assert_eq!(pattern.scheme(), "https");
        assert_eq!(pattern.suffix(), "abp.io");
    }

    #[test]
    fn test_match_pattern_prefers_exact() {
        assert_eq!(match_pattern("https://abp.io", "https://abp.io"), Some(MatchRule::Exact));
        assert_eq!(match_pattern("https://api.abp.io", PATTERN), Some(MatchRule::Wildcard));
        assert_eq!(match_pattern(PATTERN, PATTERN), Some(MatchRule::Exact));
        assert_eq!(match_pattern("http://abp.io/", "http://abp.io"), None);
    }

    #[test]
    fn test_match_any_first_match_wins() {
        let patterns = [
            "".to_string(),
            "https://{0}.abp.io".to_string(),
            "https://api.abp.io".to_string(),
        ];

        let scan = match_any("https://api.abp.io", &patterns);
        let matched = scan.matched.unwrap();
        assert_eq!(matched.index, 1);
        assert_eq!(matched.pattern, "https://{0}.abp.io");
        assert_eq!(matched.rule, MatchRule::Wildcard);
        assert_eq!(scan.skipped, vec![0]);
    }

    #[test]
    fn test_match_any_reports_all_skipped_on_miss() {
        let patterns = ["  ", "https://{0}.abp.io", ""];
        let scan = match_any("https://abp.io.test.mydomain.com", &patterns);
        assert!(scan.matched.is_none());
        assert_eq!(scan.skipped, vec![0, 2]);
    }
}
