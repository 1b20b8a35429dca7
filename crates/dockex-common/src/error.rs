use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DockexError {
    #[error("runtime transport error: {0}")]
    Transport(String),
    #[error("runtime returned status {status} for {path}: {message}")]
    Status {
        path: String,
        status: u16,
        message: String,
    },
    #[error("failed to decode runtime response for {path}: {message}")]
    Decode { path: String, message: String },
    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        operation: String,
        timeout: Duration,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

impl DockexError {
    /// Short, stable classification used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
            Self::Timeout { .. } => "timeout",
            Self::InvalidConfig(_) => "config",
            Self::InternalError(_) => "internal",
        }
    }
}

pub type Result<T> = std::result::Result<T, DockexError>;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::DockexError;

    #[test]
    fn timeout_message_names_operation() {
        let err = DockexError::Timeout {
            operation: "container stats abc".to_string(),
            timeout: Duration::from_secs(3),
        };

        assert_eq!(err.kind(), "timeout");
        assert_eq!(err.to_string(), "container stats abc timed out after 3s");
    }

    #[test]
    fn engine_status_carries_path_and_message() {
        let err = DockexError::Status {
            path: "/containers/abc/stats?stream=false".to_string(),
            status: 404,
            message: "No such container: abc".to_string(),
        };

        assert_eq!(err.kind(), "status");
        assert_eq!(
            err.to_string(),
            "runtime returned status 404 for /containers/abc/stats?stream=false: No such container: abc"
        );
    }
}
