mod api;
mod audit;
mod cli;
mod config;
mod crypto;
mod engine;
mod grants;
mod loader;
mod login;
mod resolve;
mod resolver;
mod scope;
mod session;
mod store;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rolegate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    cli::run().await
}
