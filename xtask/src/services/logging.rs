use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs the global console subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over the default level.
///
/// # Errors
/// Returns an error if a global subscriber has already been set.
pub fn init(verbose: bool) -> Result<()> {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let env_filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let console = layer()
        .compact()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .try_init()
        .context("Failed to initialize logging")
}
