//! Logging setup for the pagesmith CLI.
//!
//! Verbosity is resolved in this order:
//! 1. `--verbose`: DEBUG for all pagesmith crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG` environment variable
//! 4. Default: INFO for pagesmith crates
//!
//! ```rust,no_run
//! use pagesmith_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("starting build");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 4] = [
    "pagesmith_cli",
    "pagesmith_core",
    "pagesmith_config",
    "pagesmith_plugins",
];

/// Filter directive string for all pagesmith crates at `level`.
pub fn directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new(directives("debug"))
    } else if quiet {
        EnvFilter::new(directives("error"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives("info")))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
