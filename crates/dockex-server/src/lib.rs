pub mod config;
pub mod handlers;
pub mod router;

pub use config::Cli;
pub use router::{ExporterState, exporter_router};
