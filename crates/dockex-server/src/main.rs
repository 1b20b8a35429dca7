use std::sync::Arc;

use clap::Parser;
use dockex_collector::DockerCollector;
use dockex_runtime::{ContainerRuntime, DockerClient};
use dockex_server::{Cli, ExporterState, exporter_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter)
        .init();

    let client = DockerClient::from_host(&cli.docker_host)?;
    info!(endpoint = %client.endpoint(), "using docker engine");

    let config = cli.collector_config();
    info!(
        max_concurrency = config.max_concurrency,
        call_timeout = ?config.call_timeout,
        network_interfaces = ?config.network_interfaces,
        "collector configured"
    );
    let runtime: Arc<dyn ContainerRuntime> = Arc::new(client);
    let collector = DockerCollector::new(runtime, config);

    let telemetry_path = cli.telemetry_path();
    let app = exporter_router(Arc::new(ExporterState::new(collector, telemetry_path.clone())));

    let addr = cli.listen_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(path = %telemetry_path, "server is ready to handle requests at {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for interrupt signal");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for terminate signal");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("server is shutting down");
}
