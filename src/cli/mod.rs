//! CLI infrastructure for the overflow binary
//!
//! Subcommands play headless matches, replay a chain reaction step by step,
//! and explain the AI's evaluation and search for a given position.

pub mod commands;
pub mod output;

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` over the
/// default `warn`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be installed by an embedding host.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
