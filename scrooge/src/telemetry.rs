// Copyright (c) 2024 Botho Foundation

//! Log output for hosts embedding the engine.
//!
//! The library only emits `tracing` events; nothing is printed until a host
//! installs a subscriber, for example with [`init_tracing`]:
//!
//! ```toml
//! [logging]
//! level = "scrooge=debug"
//! ```

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Build the event filter: `RUST_LOG` when set, otherwise the configured
/// level.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    filter_from(config, std::env::var(EnvFilter::DEFAULT_ENV).ok())
}

fn filter_from(config: &LoggingConfig, from_env: Option<String>) -> Result<EnvFilter> {
    match from_env {
        Some(directives) if !directives.is_empty() => EnvFilter::try_new(&directives)
            .with_context(|| format!("Invalid {} filter: {directives}", EnvFilter::DEFAULT_ENV)),
        _ => EnvFilter::try_new(&config.level)
            .with_context(|| format!("Invalid log level: {}", config.level)),
    }
}

/// Install a global console subscriber.
///
/// Fails if the level does not parse or a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}
