pub mod error;
mod modules;
pub mod proxy; // Proxy service module

pub use modules::config::Args;

use error::AppResult;
use modules::{config, logger};
use tracing::{error, info};

/// Run the relay until Ctrl-C or SIGTERM
pub async fn run(args: Args) -> AppResult<()> {
    // Initialize logger
    logger::init_logger(args.log_dir.as_deref());

    let proxy_config = config::load_proxy_config(&args)?;
    info!(
        "Starting API relay: {}",
        serde_json::to_string(&proxy_config).unwrap_or_default()
    );
    if proxy_config.claude_key().is_none() {
        error!("CLAUDE_API_KEY is not set, /api/claude will answer 500");
    }
    if proxy_config.pinecone_key().is_none() {
        error!("PINECONE_API_KEY is not set, /api/pinecone/query will answer 500");
    }

    let (server, handle) = proxy::AxumServer::start(proxy_config).await?;

    shutdown_signal().await;
    info!("Shutdown signal received");
    server.stop();

    if let Err(e) = handle.await {
        error!("Server task ended abnormally: {}", e);
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
