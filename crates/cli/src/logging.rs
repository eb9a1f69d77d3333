//! Logging setup for the qzipctl binary

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FORMAT_VAR: &str = "QZIPCTL_LOG_FORMAT";
const DEFAULT_FILTER: &str = "qzipctl=info";

/// Install the global subscriber
///
/// `RUST_LOG` wins over the default filter. `QZIPCTL_LOG_FORMAT=json` selects
/// structured output; anything else is human-readable. Logs go to stderr so
/// stdout stays parseable.
pub fn init_logging() -> Result<()> {
    let log_format = std::env::var(LOG_FORMAT_VAR).unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Failed to create env filter")?;

    match log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
    }
    .context("Failed to install tracing subscriber")
}
