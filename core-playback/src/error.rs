use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Errors from the playback layer.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// The episode carries no audio URL in either meta field.
    #[error("Episode {0} has no playable audio")]
    NoAudio(i64),

    /// Failure reported by the native player or the settings store.
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

pub type Result<T> = std::result::Result<T, PlaybackError>;
