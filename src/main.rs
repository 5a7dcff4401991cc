//! TgRelay - Telegram chat relay
//!
//! Main entry point: configuration is read from the environment once, and
//! any configuration error terminates the process before serving traffic.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tgrelay::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing();

    // Load and validate configuration; failure here is fatal.
    let config = Config::from_env()?;

    tgrelay::bot::run(config).await
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tgrelay=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
