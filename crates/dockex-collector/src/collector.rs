use std::{future::Future, sync::Arc, time::Duration, time::Instant};

use dockex_common::error::{DockexError, Result};
use dockex_metrics::{MetricRecord, MetricSink, catalog};
use dockex_runtime::{ContainerRuntime, ContainerSnapshot, VolumeSnapshot};
use tokio::{
    sync::{OwnedSemaphorePermit, Semaphore},
    task::JoinSet,
};
use tracing::{debug, error};

use crate::{
    calculators::{ContainerLabels, stats_metrics},
    config::{CollectorConfig, NetworkInterfaces},
    volumes::volume_metrics,
};

/// Turns the runtime's current state into metric records, one scrape at a time.
///
/// Listing containers and reading disk usage must both succeed for a scrape to report
/// anything beyond `up 0`. After that every container and every volume is processed by its
/// own task; a task that fails only loses its own records.
pub struct DockerCollector {
    runtime: Arc<dyn ContainerRuntime>,
    config: CollectorConfig,
}

/// Everything a per-entity task needs, cheap to clone into each task.
#[derive(Clone)]
struct TaskContext {
    runtime: Arc<dyn ContainerRuntime>,
    sink: MetricSink,
    call_timeout: Option<Duration>,
    network_interfaces: NetworkInterfaces,
}

impl DockerCollector {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, config: CollectorConfig) -> Self {
        Self { runtime, config }
    }

    /// Runs one complete scrape and returns every record it produced.
    pub async fn scrape(&self) -> Vec<MetricRecord> {
        let (sink, scrape) = MetricSink::channel();
        self.collect(sink).await;
        scrape.finish().await
    }

    /// Emits one scrape's records into `sink`, returning once every task has finished.
    pub async fn collect(&self, sink: MetricSink) {
        let started_at = Instant::now();

        let containers = match with_deadline(
            self.config.call_timeout,
            "list containers",
            self.runtime.list_containers(true),
        )
        .await
        {
            Ok(containers) => containers,
            Err(err) => {
                error!(error = %err, kind = err.kind(), "can't list containers");
                sink.emit(catalog::UP.record(0.0, &[]));
                return;
            }
        };

        let volumes = match with_deadline(
            self.config.call_timeout,
            "disk usage",
            self.runtime.disk_usage(),
        )
        .await
        {
            Ok(volumes) => volumes,
            Err(err) => {
                error!(error = %err, kind = err.kind(), "can't read disk usage");
                sink.emit(catalog::UP.record(0.0, &[]));
                return;
            }
        };

        sink.emit(catalog::UP.record(1.0, &[]));

        let container_count = containers.len();
        let volume_count = volumes.len();
        self.fan_out(containers, volumes, &sink).await;

        debug!(
            containers = container_count,
            volumes = volume_count,
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "scrape finished"
        );
    }

    async fn fan_out(
        &self,
        containers: Vec<ContainerSnapshot>,
        volumes: Vec<VolumeSnapshot>,
        sink: &MetricSink,
    ) {
        let limiter = (self.config.max_concurrency > 0)
            .then(|| Arc::new(Semaphore::new(self.config.max_concurrency)));
        let context = TaskContext {
            runtime: Arc::clone(&self.runtime),
            sink: sink.clone(),
            call_timeout: self.config.call_timeout,
            network_interfaces: self.config.network_interfaces.clone(),
        };
        let containers = Arc::new(containers);
        let mut tasks = JoinSet::new();

        for container in containers.iter().cloned() {
            let context = context.clone();
            let limiter = limiter.clone();
            tasks.spawn(async move {
                let _permit = acquire(limiter).await;
                collect_container(context, container).await;
            });
        }

        for volume in volumes {
            let sink = sink.clone();
            let containers = Arc::clone(&containers);
            let limiter = limiter.clone();
            tasks.spawn(async move {
                let _permit = acquire(limiter).await;
                for record in volume_metrics(&volume, &containers) {
                    sink.emit(record);
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                error!(error = %err, "collection task failed");
            }
        }
    }
}

async fn collect_container(context: TaskContext, container: ContainerSnapshot) {
    let labels = ContainerLabels::new(&container.name, &container.image);
    let running = container.is_running();

    context.sink.emit(catalog::CONTAINER_RUNNING.record(
        if running { 1.0 } else { 0.0 },
        &[labels.container_name, labels.image],
    ));

    if !running {
        return;
    }

    let operation = format!("stats for container {}", container.name);
    match with_deadline(
        context.call_timeout,
        &operation,
        context.runtime.container_stats(&container.id),
    )
    .await
    {
        Ok(sample) => {
            for record in stats_metrics(&sample, labels, &context.network_interfaces) {
                context.sink.emit(record);
            }
        }
        Err(err) => {
            error!(
                container = %container.name,
                id = %container.id,
                kind = err.kind(),
                error = %err,
                "can't read container stats"
            );
        }
    }
}

async fn acquire(limiter: Option<Arc<Semaphore>>) -> Option<OwnedSemaphorePermit> {
    limiter?.acquire_owned().await.ok()
}

async fn with_deadline<T>(
    timeout: Option<Duration>,
    operation: &str,
    future: impl Future<Output = Result<T>>,
) -> Result<T> {
    let Some(limit) = timeout else {
        return future.await;
    };

    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => Err(DockexError::Timeout {
            operation: operation.to_string(),
            timeout: limit,
        }),
    }
}
