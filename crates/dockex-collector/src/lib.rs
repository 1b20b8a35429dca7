pub mod calculators;
pub mod collector;
pub mod config;
pub mod volumes;

pub use collector::DockerCollector;
pub use config::{CollectorConfig, NetworkInterfaces};
