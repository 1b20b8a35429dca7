//! Every metric family the exporter can emit.

use crate::types::{MetricDescriptor, MetricType};

pub const CONTAINER_LABELS: &[&str] = &["container_name", "image"];
pub const CONTAINER_VOLUME_LABELS: &[&str] = &["volume_name", "container_name"];
pub const VOLUME_LABELS: &[&str] = &["volume_name"];

pub static UP: MetricDescriptor = MetricDescriptor::new(
    "up",
    "docker exporter up status",
    MetricType::Gauge,
    &[],
);

pub static CONTAINER_RUNNING: MetricDescriptor = MetricDescriptor::new(
    "container_running",
    "1 if docker container is running, 0 otherwise",
    MetricType::Gauge,
    CONTAINER_LABELS,
);

pub static CPU_UTILIZATION_PERCENT: MetricDescriptor = MetricDescriptor::new(
    "cpu_utilization_percent",
    "CPU utilization in percent",
    MetricType::Gauge,
    CONTAINER_LABELS,
);

pub static CPU_UTILIZATION_SECONDS_TOTAL: MetricDescriptor = MetricDescriptor::new(
    "cpu_utilization_seconds_total",
    "Cumulative CPU utilization in seconds",
    MetricType::Counter,
    CONTAINER_LABELS,
);

// Memory and pids families keep the counter type existing dashboards were built against,
// although the values can go down.
pub static MEMORY_USAGE_BYTES: MetricDescriptor = MetricDescriptor::new(
    "memory_usage_bytes",
    "Total memory usage bytes",
    MetricType::Counter,
    CONTAINER_LABELS,
);

pub static MEMORY_TOTAL_BYTES: MetricDescriptor = MetricDescriptor::new(
    "memory_total_bytes",
    "Total memory bytes",
    MetricType::Counter,
    CONTAINER_LABELS,
);

pub static MEMORY_UTILIZATION_PERCENT: MetricDescriptor = MetricDescriptor::new(
    "memory_utilization_percent",
    "Memory utilization percent",
    MetricType::Gauge,
    CONTAINER_LABELS,
);

pub static NETWORK_RX_BYTES: MetricDescriptor = MetricDescriptor::new(
    "network_rx_bytes",
    "Network received bytes total",
    MetricType::Counter,
    CONTAINER_LABELS,
);

pub static NETWORK_TX_BYTES: MetricDescriptor = MetricDescriptor::new(
    "network_tx_bytes",
    "Network sent bytes total",
    MetricType::Counter,
    CONTAINER_LABELS,
);

pub static BLOCK_IO_READ_BYTES: MetricDescriptor = MetricDescriptor::new(
    "block_io_read_bytes",
    "Block I/O read bytes",
    MetricType::Counter,
    CONTAINER_LABELS,
);

pub static BLOCK_IO_WRITE_BYTES: MetricDescriptor = MetricDescriptor::new(
    "block_io_write_bytes",
    "Block I/O write bytes",
    MetricType::Counter,
    CONTAINER_LABELS,
);

pub static PIDS_CURRENT: MetricDescriptor = MetricDescriptor::new(
    "pids_current",
    "Current number of pids in the cgroup",
    MetricType::Counter,
    CONTAINER_LABELS,
);

pub static CONTAINER_VOLUME_USAGE_BYTES: MetricDescriptor = MetricDescriptor::new(
    "container_volume_usage_bytes",
    "container volume usage in bytes",
    MetricType::Gauge,
    CONTAINER_VOLUME_LABELS,
);

pub static VOLUME_USAGE_BYTES: MetricDescriptor = MetricDescriptor::new(
    "volume_usage_bytes",
    "volume usage in bytes",
    MetricType::Gauge,
    VOLUME_LABELS,
);

pub static CATALOG: [&MetricDescriptor; 14] = [
    &UP,
    &CONTAINER_RUNNING,
    &CPU_UTILIZATION_PERCENT,
    &CPU_UTILIZATION_SECONDS_TOTAL,
    &MEMORY_USAGE_BYTES,
    &MEMORY_TOTAL_BYTES,
    &MEMORY_UTILIZATION_PERCENT,
    &NETWORK_RX_BYTES,
    &NETWORK_TX_BYTES,
    &BLOCK_IO_READ_BYTES,
    &BLOCK_IO_WRITE_BYTES,
    &PIDS_CURRENT,
    &CONTAINER_VOLUME_USAGE_BYTES,
    &VOLUME_USAGE_BYTES,
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::CATALOG;
    use crate::types::MetricDescriptor;
    use crate::types::MetricType;

    fn find(name: &str) -> Option<&'static MetricDescriptor> {
        CATALOG
            .iter()
            .copied()
            .find(|descriptor| descriptor.name == name)
    }

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = CATALOG.iter().map(|descriptor| descriptor.name).collect();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn kinds_and_labels_match_published_schema() {
        let expected = [
            ("up", MetricType::Gauge, &[][..]),
            ("container_running", MetricType::Gauge, &["container_name", "image"][..]),
            ("cpu_utilization_seconds_total", MetricType::Counter, &["container_name", "image"][..]),
            ("memory_usage_bytes", MetricType::Counter, &["container_name", "image"][..]),
            ("memory_utilization_percent", MetricType::Gauge, &["container_name", "image"][..]),
            ("pids_current", MetricType::Counter, &["container_name", "image"][..]),
            ("container_volume_usage_bytes", MetricType::Gauge, &["volume_name", "container_name"][..]),
            ("volume_usage_bytes", MetricType::Gauge, &["volume_name"][..]),
        ];

        for (name, kind, labels) in expected {
            let descriptor = find(name).expect("catalog entry");
            assert_eq!(descriptor.metric_type, kind, "{name}");
            assert_eq!(descriptor.variable_labels, labels, "{name}");
        }
    }

    #[test]
    fn catalog_has_every_family() {
        assert_eq!(CATALOG.len(), 14);
        assert!(find("container_restarts_total").is_none());
    }
}
