//! Common fixtures for issuer validation integration tests

#![allow(dead_code)]

use wildcard_issuer::ValidationConfig;

/// Parent domain used throughout the tests
pub const PARENT: &str = "https://abp.io";

/// Wildcard pattern over [`PARENT`]
pub const PATTERN: &str = "https://{0}.abp.io";

/// Issuers accepted by [`abp_config`]
pub const VALID_ISSUERS: &[&str] = &[
    "https://abp.io",
    "https://www.abp.io",
    "https://api.abp.io",
    "https://t1.api.abp.io",
];

/// Issuers rejected by [`abp_config`]
pub const INVALID_ISSUERS: &[&str] = &[
    "http://abp.io",
    "http://abp.io/",
    "https://api.abp.com",
    "http://www.abp.io",
    "https://abp.io.test.mydomain.com",
];

/// Static configuration: the parent domain plus its wildcard pattern
pub fn abp_config() -> ValidationConfig {
    ValidationConfig::builder()
        .trusted_issuer(PARENT)
        .trusted_issuer_pattern(PATTERN)
        .log_rejections(false)
        .build()
}

/// Validation on, no static trust sources
pub fn empty_config() -> ValidationConfig {
    ValidationConfig::builder().log_rejections(false).build()
}
