pub mod catalog;
pub mod exposition;
pub mod sink;
pub mod types;

pub use exposition::{CONTENT_TYPE, render_prometheus};
pub use sink::{MetricSink, Scrape};
pub use types::{MetricDescriptor, MetricRecord, MetricType};
