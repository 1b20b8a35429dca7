pub mod docker;
pub mod traits;
pub mod types;

pub use docker::{DockerClient, DockerEndpoint};
pub use traits::ContainerRuntime;
pub use types::{
    BlockIoEntry, BlockIoOp, ContainerSnapshot, ContainerState, CpuCounters, MemoryCounters,
    MountPoint, NetworkCounters, StatsSample, VolumeSnapshot, display_name,
};
