use bridge_traits::error::BridgeError;
use thiserror::Error;

/// API errors, reduced to the three kinds the rest of the app reacts to.
///
/// - `NoConnection`: the request never completed (timeout, unreachable
///   host, I/O failure).
/// - `Server`: the backend answered with a 5xx.
/// - `Api`: any other non-success answer, including bodies that failed to
///   decode. 404 stays an `Api` error so episode lookups can translate it
///   into an absent result.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No connection: {0}")]
    NoConnection(String),

    #[error("Server error: HTTP {status}")]
    Server { status: u16 },

    #[error("API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    /// Classify a transport-level failure from the HTTP bridge.
    ///
    /// Everything the bridge reports is a request that never produced a
    /// response, so every variant maps to `NoConnection`.
    pub fn from_transport(error: BridgeError) -> Self {
        ApiError::NoConnection(error.to_string())
    }

    /// True for the `Api` kind with a 404 status.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Api { status: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
