//! Tracing subscriber setup for the binary.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! caller's decision.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "CODEATLAS_LOG";

/// Build the filter: explicit env directive first, then verbosity.
pub fn filter_for(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "codeatlas=debug" } else { "codeatlas=warn" };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install a stderr fmt layer. Safe to call more than once.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(filter_for(verbose))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }

    #[test]
    fn test_filter_for_verbose() {
        if std::env::var(LOG_ENV).is_err() {
            assert!(filter_for(true).to_string().contains("debug"));
            assert!(filter_for(false).to_string().contains("warn"));
        }
    }
}
