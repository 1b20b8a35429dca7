#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Gauge,
}

impl MetricType {
    pub fn as_prometheus_type(&self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::Gauge => "gauge",
        }
    }
}

/// Static description of a metric family. Every record of a family is built from its
/// descriptor, which keeps the label key set identical across records.
#[derive(Debug, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub name: &'static str,
    pub help: &'static str,
    pub metric_type: MetricType,
    pub variable_labels: &'static [&'static str],
}

impl MetricDescriptor {
    pub const fn new(
        name: &'static str,
        help: &'static str,
        metric_type: MetricType,
        variable_labels: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            help,
            metric_type,
            variable_labels,
        }
    }

    /// Builds a record; label values are matched to `variable_labels` by position, missing
    /// values become empty strings and extra values are dropped.
    pub fn record(&'static self, value: f64, label_values: &[&str]) -> MetricRecord {
        MetricRecord {
            descriptor: self,
            labels: self
                .variable_labels
                .iter()
                .enumerate()
                .map(|(index, key)| {
                    let value = label_values.get(index).copied().unwrap_or_default();
                    (*key, value.to_string())
                })
                .collect(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub descriptor: &'static MetricDescriptor,
    pub labels: Vec<(&'static str, String)>,
    pub value: f64,
}

impl MetricRecord {
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }
}
