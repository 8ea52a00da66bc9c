//! Logging setup for the pricing binary.
//!
//! Filter priority, highest first:
//! 1. CLI flags (`-v/-q`)
//! 2. `RUST_LOG`
//! 3. The configured default filter

use anyhow::Result;
use clap_verbosity_flag::{LogLevel, Verbosity};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives for the given flags, `RUST_LOG` value and configured default
pub fn filter_directives<L: LogLevel>(
    verbosity: &Verbosity<L>,
    rust_log: Option<&str>,
    default_filter: &str,
) -> String {
    if verbosity.is_present() {
        return verbosity.log_level_filter().to_string().to_lowercase();
    }

    match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_string(),
        _ => default_filter.to_string(),
    }
}

/// Resolve the filter without installing a subscriber
pub fn build_filter<L: LogLevel>(
    verbosity: &Verbosity<L>,
    default_filter: &str,
) -> Result<EnvFilter> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(verbosity, rust_log.as_deref(), default_filter);
    Ok(EnvFilter::try_new(directives)?)
}

/// Install the global subscriber. Logs go to stderr so stdout stays machine-readable.
pub fn init_logging<L: LogLevel>(verbosity: &Verbosity<L>, default_filter: &str) -> Result<()> {
    let filter = build_filter(verbosity, default_filter)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
