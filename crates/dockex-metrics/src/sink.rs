use tokio::sync::mpsc;
use tracing::debug;

use crate::types::MetricRecord;

/// Multi-producer handle that collection tasks emit records through.
#[derive(Debug, Clone)]
pub struct MetricSink {
    sender: mpsc::UnboundedSender<MetricRecord>,
}

/// Receiving side of one scrape.
#[derive(Debug)]
pub struct Scrape {
    receiver: mpsc::UnboundedReceiver<MetricRecord>,
}

impl MetricSink {
    pub fn channel() -> (Self, Scrape) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, Scrape { receiver })
    }

    pub fn emit(&self, record: MetricRecord) {
        if let Err(err) = self.sender.send(record) {
            debug!(metric = err.0.name(), "scrape receiver dropped, discarding record");
        }
    }
}

impl Scrape {
    /// Drains records until every sink clone has been dropped.
    pub async fn finish(mut self) -> Vec<MetricRecord> {
        let mut records = Vec::new();
        while let Some(record) = self.receiver.recv().await {
            records.push(record);
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::MetricSink;
    use crate::catalog::{CONTAINER_RUNNING, UP};

    #[tokio::test]
    async fn collects_records_from_concurrent_producers() {
        let (sink, scrape) = MetricSink::channel();

        let mut handles = Vec::new();
        for index in 0..8 {
            let sink = sink.clone();
            handles.push(tokio::spawn(async move {
                let name = format!("c{index}");
                sink.emit(CONTAINER_RUNNING.record(1.0, &[name.as_str(), "img"]));
            }));
        }
        sink.emit(UP.record(1.0, &[]));
        drop(sink);

        for handle in handles {
            handle.await.expect("producer task");
        }

        let records = scrape.finish().await;
        assert_eq!(records.len(), 9);
        assert_eq!(
            records
                .iter()
                .filter(|record| record.name() == "container_running")
                .count(),
            8
        );
    }

    #[test]
    fn emit_after_receiver_dropped_is_silent() {
        let (sink, scrape) = MetricSink::channel();
        drop(scrape);
        sink.emit(UP.record(0.0, &[]));
    }
}
