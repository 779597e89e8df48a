use core_api::ApiError;
use core_library::CacheError;
use thiserror::Error;

/// Errors surfaced by the content repository.
///
/// `Api` wraps the three-kind classification from the network layer and is
/// what callers match on; `Cache` only appears when the local database
/// itself fails, which the cache-aside paths treat as unrecoverable.
#[derive(Error, Debug)]
pub enum DataError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

impl DataError {
    /// Whether this is the connectivity kind of API error.
    pub fn is_no_connection(&self) -> bool {
        matches!(self, DataError::Api(ApiError::NoConnection(_)))
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
