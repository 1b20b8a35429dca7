use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Running,
    NotRunning,
}

impl ContainerState {
    /// Collapses the runtime's lifecycle state (`created`, `restarting`, `paused`, ...) into
    /// running or not.
    pub fn from_runtime_state(state: &str) -> Self {
        if state == "running" {
            Self::Running
        } else {
            Self::NotRunning
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountPoint {
    /// Volume name; empty for bind and tmpfs mounts.
    pub name: String,
    pub mount_type: String,
    pub source: String,
    pub destination: String,
    pub driver: String,
    pub mode: String,
    pub rw: bool,
    pub propagation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSnapshot {
    pub id: String,
    pub name: String,
    pub image: String,
    pub state: ContainerState,
    pub mounts: Vec<MountPoint>,
}

impl ContainerSnapshot {
    pub fn is_running(&self) -> bool {
        self.state == ContainerState::Running
    }

    pub fn mounts_volume(&self, volume_name: &str) -> bool {
        self.mounts.iter().any(|mount| mount.name == volume_name)
    }
}

/// Joins every alias of a container with `;` and strips the single leading `/` the runtime
/// prefixes names with.
pub fn display_name(names: &[String]) -> String {
    let joined = names.join(";");
    match joined.strip_prefix('/') {
        Some(stripped) => stripped.to_string(),
        None => joined,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuCounters {
    /// Cumulative CPU time consumed by the container, in nanoseconds.
    pub total_usage: u64,
    /// Cumulative host CPU time, in nanoseconds.
    pub system_usage: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryCounters {
    pub usage: u64,
    pub cache: Option<u64>,
    pub limit: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkCounters {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockIoOp {
    Read,
    Write,
    Other,
}

impl BlockIoOp {
    pub fn parse(op: &str) -> Self {
        if op.eq_ignore_ascii_case("read") {
            Self::Read
        } else if op.eq_ignore_ascii_case("write") {
            Self::Write
        } else {
            Self::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockIoEntry {
    pub op: String,
    pub value: u64,
}

impl BlockIoEntry {
    pub fn new(op: impl Into<String>, value: u64) -> Self {
        Self {
            op: op.into(),
            value,
        }
    }

    pub fn kind(&self) -> BlockIoOp {
        BlockIoOp::parse(&self.op)
    }
}

/// One non-streaming stats read: the current counters plus the runtime's previous reading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSample {
    pub cpu: CpuCounters,
    pub prior_cpu: CpuCounters,
    pub memory: MemoryCounters,
    pub networks: BTreeMap<String, NetworkCounters>,
    pub block_io: Vec<BlockIoEntry>,
    pub pids_current: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSnapshot {
    pub name: String,
    pub driver: String,
    pub mountpoint: String,
    pub scope: String,
    /// Bytes used by the volume, or `-1` when the runtime has not computed it.
    pub usage_size: i64,
    pub ref_count: i64,
}
