//! Logging initialization
//!
//! The validator only emits `tracing` events; installing a subscriber is up to
//! the host. [`init_stderr`] is a convenience for hosts without their own
//! logging setup. Logs go to stderr so stdout stays free for the host.
//!
//! ```rust,no_run
//! // Plain text at info, overridable with RUST_LOG
//! wildcard_issuer::logging::init_stderr("info", false)?;
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Install a global stderr subscriber
///
/// `RUST_LOG` takes precedence over `level` when set. With `structured`, each
/// event is written as one JSON object.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_stderr(level: &str, structured: bool) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(filter);

    if structured {
        subscriber
            .with(fmt::layer().json().with_writer(io::stderr))
            .try_init()
            .map_err(|e| io::Error::other(e.to_string()))
    } else {
        subscriber
            .with(fmt::layer().with_writer(io::stderr))
            .try_init()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}
