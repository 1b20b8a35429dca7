use async_trait::async_trait;
use dockex_common::error::Result;

use crate::types::{ContainerSnapshot, StatsSample, VolumeSnapshot};

/// Query surface of a container runtime.
///
/// Implementations are shared across every task of a scrape, so all methods take `&self`
/// and must tolerate concurrent calls.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Lists containers; `all` includes containers that are not running.
    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerSnapshot>>;

    /// Volumes from the runtime's disk usage report.
    async fn disk_usage(&self) -> Result<Vec<VolumeSnapshot>>;

    /// A single, non-streaming stats read for one container.
    async fn container_stats(&self, container_id: &str) -> Result<StatsSample>;
}
