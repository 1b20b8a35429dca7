use std::time::Duration;

use clap::Parser;
use dockex_collector::{
    CollectorConfig, NetworkInterfaces,
    config::{DEFAULT_MAX_CONCURRENCY, DEFAULT_NETWORK_INTERFACE},
};
use dockex_runtime::docker::DEFAULT_DOCKER_HOST;

#[derive(Debug, Parser)]
#[command(
    name = "docker-exporter",
    about = "Prometheus exporter for Docker container and volume metrics"
)]
pub struct Cli {
    /// Address to listen on for web interface and telemetry.
    #[arg(
        long = "web.listen-address",
        env = "EXPORTER_WEB_LISTEN_ADDRESS",
        default_value = ":8089"
    )]
    pub listen_address: String,

    /// Path under which to expose metrics.
    #[arg(
        long = "web.telemetry-path",
        env = "EXPORTER_WEB_TELEMETRY_PATH",
        default_value = "/metrics"
    )]
    pub telemetry_path: String,

    /// Output verbose debug information.
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Docker engine address (unix://, tcp:// or http://).
    #[arg(long = "docker.host", env = "DOCKER_HOST", default_value = DEFAULT_DOCKER_HOST)]
    pub docker_host: String,

    /// Deadline in seconds for each Docker API call; 0 disables it.
    #[arg(
        long = "docker.timeout",
        env = "EXPORTER_DOCKER_TIMEOUT",
        default_value_t = 10
    )]
    pub docker_timeout_secs: u64,

    /// Maximum concurrent per-container and per-volume tasks; 0 means unbounded.
    #[arg(
        long = "collector.max-concurrency",
        env = "EXPORTER_MAX_CONCURRENCY",
        default_value_t = DEFAULT_MAX_CONCURRENCY
    )]
    pub max_concurrency: usize,

    /// Network interface to report, or `*` to sum all interfaces.
    #[arg(
        long = "collector.network-interface",
        env = "EXPORTER_NETWORK_INTERFACE",
        default_value = DEFAULT_NETWORK_INTERFACE
    )]
    pub network_interface: String,
}

impl Cli {
    /// Socket address to bind; a bare `:port` binds every interface.
    pub fn listen_address(&self) -> String {
        let address = self.listen_address.trim();
        if address.starts_with(':') {
            format!("0.0.0.0{address}")
        } else {
            address.to_string()
        }
    }

    pub fn telemetry_path(&self) -> String {
        let path = self.telemetry_path.trim();
        if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        }
    }

    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            max_concurrency: self.max_concurrency,
            call_timeout: (self.docker_timeout_secs > 0)
                .then(|| Duration::from_secs(self.docker_timeout_secs)),
            network_interfaces: NetworkInterfaces::parse(&self.network_interface),
        }
    }
}
