//! Logging setup for the binary.
//!
//! Installs a global tracing subscriber writing to stderr, so stdout stays
//! reserved for the version string.

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn";
/// Filter used with `--verbose`
pub const VERBOSE_FILTER: &str = "debug";

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Initialize tracing on stderr.
///
/// `verbose` forces debug output; otherwise `RUST_LOG` applies, falling back
/// to warnings only.
pub fn init(verbose: bool) -> Result<(), LoggingError> {
    let subscriber = Registry::default().with(build_env_filter(verbose)).with(
        fmt::layer()
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr),
    );
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_FILTER);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
