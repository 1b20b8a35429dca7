use dockex_metrics::{MetricRecord, catalog};
use dockex_runtime::{ContainerSnapshot, VolumeSnapshot};

/// Usage records for one volume: one `container_volume_usage_bytes` per container that
/// mounts it, then exactly one `volume_usage_bytes`.
pub fn volume_metrics(
    volume: &VolumeSnapshot,
    containers: &[ContainerSnapshot],
) -> Vec<MetricRecord> {
    let size = volume.usage_size as f64;

    let mut records: Vec<MetricRecord> = containers
        .iter()
        .filter(|container| container.mounts_volume(&volume.name))
        .map(|container| {
            catalog::CONTAINER_VOLUME_USAGE_BYTES
                .record(size, &[volume.name.as_str(), container.name.as_str()])
        })
        .collect();

    records.push(catalog::VOLUME_USAGE_BYTES.record(size, &[volume.name.as_str()]));
    records
}
