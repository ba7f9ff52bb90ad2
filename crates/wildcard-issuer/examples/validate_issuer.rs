//! # Validate Issuer - Wildcard Subdomain Trust
//!
//! **What this example demonstrates:**
//! - Configuring a parent domain plus a `{0}` subdomain pattern
//! - Static validation of claimed issuers
//! - Metadata-aware validation with a discovery document
//! - Structured rejection diagnostics
//!
//! Pass a config file (TOML / YAML / JSON) as the first argument to use it
//! instead of the built-in configuration. Set `RUST_LOG=debug` for more detail.
//!
//! **Run with:** `cargo run --example validate_issuer [config.toml]`

use wildcard_issuer::{IssuerValidator, TrustedIssuerDocument, ValidationConfig, logging};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_stderr("info", false)?;

    let config = match std::env::args().nth(1) {
        Some(path) => ValidationConfig::from_file(path)?,
        None => ValidationConfig::builder()
            .trusted_issuer("https://abp.io")
            .trusted_issuer_pattern("https://{0}.abp.io")
            .log_rejections(false)
            .build(),
    };
    let validator = IssuerValidator::new(config);

    println!("Static configuration:");
    for issuer in [
        "https://abp.io",
        "https://api.abp.io",
        "https://t1.api.abp.io",
        "http://abp.io",
        "https://abp.io/",
        "https://abp.io.test.mydomain.com",
    ] {
        match validator.validate(issuer) {
            Ok(accepted) => match accepted.matched() {
                Some(m) => println!("  accept {issuer:<36} via {} ({})", m.source, m.rule),
                None => println!("  accept {issuer:<36} unchecked"),
            },
            Err(e) => println!("  reject {issuer:<36} {e}"),
        }
    }

    let metadata: TrustedIssuerDocument = serde_json::from_value(serde_json::json!({
        "issuer": "https://{0}.tenants.example.com",
        "jwks_uri": "https://tenants.example.com/.well-known/jwks.json"
    }))?;

    println!("\nWith discovery metadata '{}':", metadata.issuer);
    for issuer in [
        "https://acme.tenants.example.com",
        "https://tenants.example.com",
        "https://api.abp.io",
    ] {
        match validator.validate_with_metadata(issuer, Some(&metadata)) {
            Ok(accepted) => {
                let source = accepted.matched().map(|m| m.source.to_string());
                println!("  accept {issuer:<36} via {}", source.unwrap_or_default());
            }
            Err(e) => println!("  reject {issuer:<36} {:?}", e.kind()),
        }
    }

    Ok(())
}
