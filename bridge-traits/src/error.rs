use thiserror::Error;

/// Error type shared by all bridge trait implementations.
///
/// Transport failures are split into `Timeout` and `Connect` so the API layer
/// can classify them as connectivity problems without inspecting platform
/// error types.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Whether this error represents a low-level connectivity failure
    /// (timeout or unreachable host) rather than a logical one.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, BridgeError::Timeout(_) | BridgeError::Connect(_))
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
