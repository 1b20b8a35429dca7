use std::time::Duration;

pub const DEFAULT_MAX_CONCURRENCY: usize = 32;
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_NETWORK_INTERFACE: &str = "eth0";

/// Which interfaces feed `network_rx_bytes` / `network_tx_bytes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkInterfaces {
    /// A single interface; containers without it report zero.
    Named(String),
    /// The sum over every interface the runtime reports.
    All,
}

impl NetworkInterfaces {
    /// `*` selects every interface, anything else names one.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "*" => Self::All,
            "" => Self::default(),
            name => Self::Named(name.to_string()),
        }
    }
}

impl Default for NetworkInterfaces {
    fn default() -> Self {
        Self::Named(DEFAULT_NETWORK_INTERFACE.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Upper bound on per-container and per-volume tasks running at once; `0` disables the bound.
    pub max_concurrency: usize,
    /// Deadline applied to every runtime call; `None` waits as long as the runtime does.
    pub call_timeout: Option<Duration>,
    pub network_interfaces: NetworkInterfaces,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            call_timeout: Some(DEFAULT_CALL_TIMEOUT),
            network_interfaces: NetworkInterfaces::default(),
        }
    }
}
