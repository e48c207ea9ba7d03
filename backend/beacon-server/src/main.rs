use beacon_server::logger::{self, LogTarget};
use beacon_server::{ServerResult, serve};
use beacon_ws::ShutdownCoordinator;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ServerResult<()> {
    // Load and validate configuration
    let config = beacon_config::Config::load()?;
    config.validate()?;

    let log_file_path = config.log_file_path()?;
    if let Some(log_dir) = log_file_path.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(log_dir)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        LogTarget::from_config(log_file_path, config.logging.colored),
    )?;

    info!("Starting beacon-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let shutdown = ShutdownCoordinator::new();

    let shutdown_for_signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                shutdown_for_signal.shutdown();
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    let listener = TcpListener::bind(config.bind_addr()).await?;
    serve(listener, &config, shutdown).await?;

    Ok(())
}
