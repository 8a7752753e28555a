use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Default directive when `RUST_LOG` is not set
pub const DEFAULT_DIRECTIVE: &str = "rusty_etl=info";

/// Installs the global subscriber: `RUST_LOG` filtering, human readable lines on stderr.
///
/// Stdout stays free for the program output. Calling it twice is a no-op.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
