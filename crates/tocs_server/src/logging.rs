//! Log output.

use tocs_foundation::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG` wins over `level`; `debug` forces the `debug` level.
///
/// # Errors
///
/// Returns `Config` if the filter does not parse or a subscriber is
/// already installed.
pub fn init(level: &str, debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::try_new("debug")
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))
    }
    .map_err(|err| Error::config(format!("invalid log level \"{level}\": {err}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| Error::config(err.to_string()))
}
