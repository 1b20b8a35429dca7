//! Metrics derived from a single stats sample. Everything here is pure.

use dockex_metrics::{MetricRecord, catalog};
use dockex_runtime::{BlockIoEntry, BlockIoOp, MemoryCounters, NetworkCounters, StatsSample};

use crate::config::NetworkInterfaces;

const NANOS_PER_SECOND: f64 = 1e9;

/// Label values shared by every per-container family.
#[derive(Debug, Clone, Copy)]
pub struct ContainerLabels<'a> {
    pub container_name: &'a str,
    pub image: &'a str,
}

impl<'a> ContainerLabels<'a> {
    pub fn new(container_name: &'a str, image: &'a str) -> Self {
        Self {
            container_name,
            image,
        }
    }

    fn values(&self) -> [&'a str; 2] {
        [self.container_name, self.image]
    }
}

/// All stats-derived records for one container, in emission order.
pub fn stats_metrics(
    sample: &StatsSample,
    labels: ContainerLabels<'_>,
    interfaces: &NetworkInterfaces,
) -> Vec<MetricRecord> {
    let mut records = Vec::with_capacity(10);
    records.extend(block_io_metrics(&sample.block_io, labels));
    records.extend(memory_metrics(&sample.memory, labels));
    records.extend(network_metrics(sample, interfaces, labels));
    records.extend(cpu_metrics(sample, labels));
    records.push(pids_metric(sample, labels));
    records
}

/// Share of host CPU time spent in the container between the two readings, in percent.
/// A zero host delta (first read, or counters not advancing) yields 0.
pub fn cpu_utilization_percent(sample: &StatsSample) -> f64 {
    let cpu_delta = sample
        .cpu
        .total_usage
        .saturating_sub(sample.prior_cpu.total_usage);
    let system_delta = sample
        .cpu
        .system_usage
        .saturating_sub(sample.prior_cpu.system_usage);

    if system_delta == 0 {
        return 0.0;
    }
    cpu_delta as f64 / system_delta as f64 * 100.0
}

pub fn cpu_metrics(sample: &StatsSample, labels: ContainerLabels<'_>) -> [MetricRecord; 2] {
    let values = labels.values();
    [
        catalog::CPU_UTILIZATION_PERCENT.record(cpu_utilization_percent(sample), &values),
        catalog::CPU_UTILIZATION_SECONDS_TOTAL.record(
            sample.cpu.total_usage as f64 / NANOS_PER_SECOND,
            &values,
        ),
    ]
}

/// Memory in use, excluding page cache.
pub fn memory_usage_bytes(memory: &MemoryCounters) -> u64 {
    memory.usage.saturating_sub(memory.cache.unwrap_or(0))
}

pub fn memory_utilization_percent(memory: &MemoryCounters) -> f64 {
    if memory.limit == 0 {
        return 0.0;
    }
    memory_usage_bytes(memory) as f64 / memory.limit as f64 * 100.0
}

pub fn memory_metrics(memory: &MemoryCounters, labels: ContainerLabels<'_>) -> [MetricRecord; 3] {
    let values = labels.values();
    [
        catalog::MEMORY_USAGE_BYTES.record(memory_usage_bytes(memory) as f64, &values),
        catalog::MEMORY_TOTAL_BYTES.record(memory.limit as f64, &values),
        catalog::MEMORY_UTILIZATION_PERCENT.record(memory_utilization_percent(memory), &values),
    ]
}

pub fn network_counters(sample: &StatsSample, interfaces: &NetworkInterfaces) -> NetworkCounters {
    match interfaces {
        NetworkInterfaces::Named(name) => sample.networks.get(name).copied().unwrap_or_default(),
        NetworkInterfaces::All => {
            sample
                .networks
                .values()
                .fold(NetworkCounters::default(), |total, counters| NetworkCounters {
                    rx_bytes: total.rx_bytes.saturating_add(counters.rx_bytes),
                    tx_bytes: total.tx_bytes.saturating_add(counters.tx_bytes),
                })
        }
    }
}

pub fn network_metrics(
    sample: &StatsSample,
    interfaces: &NetworkInterfaces,
    labels: ContainerLabels<'_>,
) -> [MetricRecord; 2] {
    let counters = network_counters(sample, interfaces);
    let values = labels.values();
    [
        catalog::NETWORK_RX_BYTES.record(counters.rx_bytes as f64, &values),
        catalog::NETWORK_TX_BYTES.record(counters.tx_bytes as f64, &values),
    ]
}

/// Read and write byte totals across all recursive entries; other operations are ignored.
pub fn block_io_totals(entries: &[BlockIoEntry]) -> (u64, u64) {
    entries
        .iter()
        .fold((0_u64, 0_u64), |(read, write), entry| match entry.kind() {
            BlockIoOp::Read => (read.saturating_add(entry.value), write),
            BlockIoOp::Write => (read, write.saturating_add(entry.value)),
            BlockIoOp::Other => (read, write),
        })
}

pub fn block_io_metrics(entries: &[BlockIoEntry], labels: ContainerLabels<'_>) -> [MetricRecord; 2] {
    let (read, write) = block_io_totals(entries);
    let values = labels.values();
    [
        catalog::BLOCK_IO_READ_BYTES.record(read as f64, &values),
        catalog::BLOCK_IO_WRITE_BYTES.record(write as f64, &values),
    ]
}

pub fn pids_metric(sample: &StatsSample, labels: ContainerLabels<'_>) -> MetricRecord {
    catalog::PIDS_CURRENT.record(sample.pids_current as f64, &labels.values())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use dockex_runtime::{
        BlockIoEntry, CpuCounters, MemoryCounters, NetworkCounters, StatsSample,
    };

    use super::{
        ContainerLabels, block_io_totals, cpu_metrics, cpu_utilization_percent, memory_metrics,
        memory_usage_bytes, memory_utilization_percent, network_counters, stats_metrics,
    };
    use crate::config::NetworkInterfaces;

    fn labels() -> ContainerLabels<'static> {
        ContainerLabels::new("web", "nginx:1.27")
    }

    fn sample_with_cpu(total: u64, prior_total: u64, system: u64, prior_system: u64) -> StatsSample {
        StatsSample {
            cpu: CpuCounters {
                total_usage: total,
                system_usage: system,
            },
            prior_cpu: CpuCounters {
                total_usage: prior_total,
                system_usage: prior_system,
            },
            ..StatsSample::default()
        }
    }

    fn networks(entries: &[(&str, u64, u64)]) -> BTreeMap<String, NetworkCounters> {
        entries
            .iter()
            .map(|(name, rx, tx)| {
                (
                    name.to_string(),
                    NetworkCounters {
                        rx_bytes: *rx,
                        tx_bytes: *tx,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn cpu_utilization_is_delta_ratio() {
        let sample = sample_with_cpu(1200, 1000, 50_200, 50_000);
        assert_eq!(cpu_utilization_percent(&sample), 100.0);

        let sample = sample_with_cpu(1050, 1000, 50_200, 50_000);
        assert_eq!(cpu_utilization_percent(&sample), 25.0);
    }

    #[test]
    fn zero_system_delta_yields_zero_utilization() {
        let sample = sample_with_cpu(1200, 1000, 50_000, 50_000);
        let utilization = cpu_utilization_percent(&sample);
        assert_eq!(utilization, 0.0);
        assert!(utilization.is_finite());
    }

    #[test]
    fn cpu_seconds_counter_converts_nanoseconds() {
        let sample = sample_with_cpu(2_500_000_000, 0, 10, 0);
        let [percent, seconds] = cpu_metrics(&sample, labels());

        assert_eq!(percent.name(), "cpu_utilization_percent");
        assert_eq!(seconds.name(), "cpu_utilization_seconds_total");
        assert_eq!(seconds.value, 2.5);
    }

    #[test]
    fn memory_usage_excludes_cache() {
        let memory = MemoryCounters {
            usage: 500_000,
            cache: Some(100_000),
            limit: 1_000_000,
        };

        assert_eq!(memory_usage_bytes(&memory), 400_000);
        assert_eq!(memory_utilization_percent(&memory), 40.0);

        let [usage, total, percent] = memory_metrics(&memory, labels());
        assert_eq!(usage.value, 400_000.0);
        assert_eq!(total.value, 1_000_000.0);
        assert_eq!(percent.value, 40.0);
    }

    #[test]
    fn missing_cache_counts_as_zero() {
        let memory = MemoryCounters {
            usage: 300,
            cache: None,
            limit: 600,
        };
        assert_eq!(memory_usage_bytes(&memory), 300);
        assert_eq!(memory_utilization_percent(&memory), 50.0);
    }

    #[test]
    fn memory_edge_cases_stay_finite() {
        let memory = MemoryCounters {
            usage: 100,
            cache: Some(200),
            limit: 0,
        };
        assert_eq!(memory_usage_bytes(&memory), 0);
        assert_eq!(memory_utilization_percent(&memory), 0.0);
    }

    #[test]
    fn block_io_groups_case_insensitively() {
        let entries = vec![
            BlockIoEntry::new("Read", 100),
            BlockIoEntry::new("read", 50),
            BlockIoEntry::new("Write", 30),
            BlockIoEntry::new("other", 99),
        ];
        assert_eq!(block_io_totals(&entries), (150, 30));
        assert_eq!(block_io_totals(&[]), (0, 0));
    }

    #[test]
    fn named_interface_reads_only_that_interface() {
        let sample = StatsSample {
            networks: networks(&[("eth0", 10, 20), ("eth1", 1, 2)]),
            ..StatsSample::default()
        };

        let counters = network_counters(&sample, &NetworkInterfaces::default());
        assert_eq!((counters.rx_bytes, counters.tx_bytes), (10, 20));

        let missing = network_counters(&sample, &NetworkInterfaces::Named("wlan0".to_string()));
        assert_eq!((missing.rx_bytes, missing.tx_bytes), (0, 0));
    }

    #[test]
    fn all_interfaces_are_summed() {
        let sample = StatsSample {
            networks: networks(&[("eth0", 10, 20), ("eth1", 1, 2)]),
            ..StatsSample::default()
        };

        let counters = network_counters(&sample, &NetworkInterfaces::All);
        assert_eq!((counters.rx_bytes, counters.tx_bytes), (11, 22));
    }

    #[test]
    fn stats_metrics_cover_every_family_with_container_labels() {
        let sample = sample_with_cpu(1200, 1000, 50_200, 50_000);
        let records = stats_metrics(&sample, labels(), &NetworkInterfaces::default());

        let names: Vec<_> = records.iter().map(|record| record.name()).collect();
        assert_eq!(
            names,
            vec![
                "block_io_read_bytes",
                "block_io_write_bytes",
                "memory_usage_bytes",
                "memory_total_bytes",
                "memory_utilization_percent",
                "network_rx_bytes",
                "network_tx_bytes",
                "cpu_utilization_percent",
                "cpu_utilization_seconds_total",
                "pids_current",
            ]
        );
        for record in &records {
            assert_eq!(record.label("container_name"), Some("web"));
            assert_eq!(record.label("image"), Some("nginx:1.27"));
        }
    }
}
