//! Docker Engine API payloads, decoded leniently: fields the engine omits (or sends as
//! `null`) fall back to their defaults.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer};

use crate::types::{
    BlockIoEntry, ContainerSnapshot, ContainerState, CpuCounters, MemoryCounters, MountPoint,
    NetworkCounters, StatsSample, VolumeSnapshot, display_name,
};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ContainerSummary {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub names: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mounts: Vec<MountSummary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct MountSummary {
    #[serde(default, rename = "Type")]
    pub mount_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub driver: String,
    #[serde(default)]
    pub mode: String,
    #[serde(default, rename = "RW")]
    pub rw: bool,
    #[serde(default)]
    pub propagation: String,
}

impl From<ContainerSummary> for ContainerSnapshot {
    fn from(summary: ContainerSummary) -> Self {
        Self {
            name: display_name(&summary.names),
            state: ContainerState::from_runtime_state(&summary.state),
            id: summary.id,
            image: summary.image,
            mounts: summary.mounts.into_iter().map(MountPoint::from).collect(),
        }
    }
}

impl From<MountSummary> for MountPoint {
    fn from(mount: MountSummary) -> Self {
        Self {
            name: mount.name,
            mount_type: mount.mount_type,
            source: mount.source,
            destination: mount.destination,
            driver: mount.driver,
            mode: mount.mode,
            rw: mount.rw,
            propagation: mount.propagation,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DiskUsage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub volumes: Vec<VolumeSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct VolumeSummary {
    pub name: String,
    #[serde(default)]
    pub driver: String,
    #[serde(default)]
    pub mountpoint: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub usage_data: Option<VolumeUsageData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct VolumeUsageData {
    #[serde(default = "not_computed")]
    pub size: i64,
    #[serde(default = "not_computed")]
    pub ref_count: i64,
}

fn not_computed() -> i64 {
    -1
}

impl From<VolumeSummary> for VolumeSnapshot {
    fn from(volume: VolumeSummary) -> Self {
        let (usage_size, ref_count) = volume
            .usage_data
            .map(|usage| (usage.size, usage.ref_count))
            .unwrap_or((-1, -1));

        Self {
            name: volume.name,
            driver: volume.driver,
            mountpoint: volume.mountpoint,
            scope: volume.scope,
            usage_size,
            ref_count,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatsResponse {
    #[serde(default)]
    pub cpu_stats: CpuStats,
    #[serde(default)]
    pub precpu_stats: CpuStats,
    #[serde(default)]
    pub memory_stats: MemoryStats,
    #[serde(default, deserialize_with = "null_as_default")]
    pub networks: BTreeMap<String, NetworkStats>,
    #[serde(default)]
    pub blkio_stats: BlkioStats,
    #[serde(default)]
    pub pids_stats: PidsStats,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CpuStats {
    #[serde(default)]
    pub cpu_usage: CpuUsage,
    #[serde(default)]
    pub system_cpu_usage: u64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CpuUsage {
    #[serde(default)]
    pub total_usage: u64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MemoryStats {
    #[serde(default)]
    pub usage: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stats: HashMap<String, u64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct NetworkStats {
    #[serde(default)]
    pub rx_bytes: u64,
    #[serde(default)]
    pub tx_bytes: u64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BlkioStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub io_service_bytes_recursive: Vec<BlkioEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BlkioEntry {
    #[serde(default)]
    pub op: String,
    #[serde(default)]
    pub value: u64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PidsStats {
    #[serde(default)]
    pub current: u64,
}

impl From<CpuStats> for CpuCounters {
    fn from(stats: CpuStats) -> Self {
        Self {
            total_usage: stats.cpu_usage.total_usage,
            system_usage: stats.system_cpu_usage,
        }
    }
}

impl From<StatsResponse> for StatsSample {
    fn from(response: StatsResponse) -> Self {
        let memory = MemoryCounters {
            usage: response.memory_stats.usage,
            cache: response.memory_stats.stats.get("cache").copied(),
            limit: response.memory_stats.limit,
        };

        Self {
            cpu: response.cpu_stats.into(),
            prior_cpu: response.precpu_stats.into(),
            memory,
            networks: response
                .networks
                .into_iter()
                .map(|(name, stats)| {
                    (
                        name,
                        NetworkCounters {
                            rx_bytes: stats.rx_bytes,
                            tx_bytes: stats.tx_bytes,
                        },
                    )
                })
                .collect(),
            block_io: response
                .blkio_stats
                .io_service_bytes_recursive
                .into_iter()
                .map(|entry| BlockIoEntry::new(entry.op, entry.value))
                .collect(),
            pids_current: response.pids_stats.current,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorMessage {
    pub message: String,
}
