use clap::Parser;
use tracing_subscriber::EnvFilter;

use conditional_http::config::Config;
use conditional_http::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::parse();

    tokio::select! {
        res = server::listener::run(&cfg) => {
            if let Err(e) = res {
                tracing::error!("Startup error: {:#}", e);
                return Err(e);
            }
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
