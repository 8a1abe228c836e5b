// src/logging.rs
// =============================================================================
// Logging setup.
//
// Logs go to stderr through tracing-subscriber so stdout only carries the
// run summary (which may be JSON meant for another program).
// RUST_LOG takes precedence over --log-level when it is set.
// =============================================================================

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .or_else(|_| EnvFilter::try_new("info"))
            .context("failed to parse log level")?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .ok(); // Already initialized (tests)

    Ok(())
}
