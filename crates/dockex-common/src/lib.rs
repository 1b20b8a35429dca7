pub mod error;

pub use error::{DockexError, Result};
