use std::path::PathBuf;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Config;
use crate::error::StartupError;
use crate::http::connection::Connection;

/// Binds the configured port, prints the startup banner and serves forever.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let addr = cfg.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;

    println!(
        "Web server listening on port {} (press CTRL-C to quit)",
        cfg.port
    );
    info!("Listening on {}, serving {}", addr, cfg.root.display());

    serve(listener, cfg.root.clone()).await
}

/// Accept loop. Every connection gets its own task; the loop never waits on one.
pub async fn serve(listener: TcpListener, root: PathBuf) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let root = root.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, root);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
