//! Media Player Abstraction
//!
//! Control surface for the platform's native media player. The core drives a
//! single active source at a time (episode audio or the live radio stream);
//! session bookkeeping, audio focus, and notification integration stay on the
//! host side.
//!
//! Host implementations: ExoPlayer (Android), AVPlayer (iOS), and a stub
//! player used by the desktop shim and tests.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;

/// Source handed to the native player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// Remote HTTP(S) URL: episode audio or the live stream endpoint.
    Url(String),
    /// Downloaded audio file on local storage.
    LocalFile(PathBuf),
}

impl MediaSource {
    /// Whether the source is fetched over the network.
    pub fn is_remote(&self) -> bool {
        matches!(self, MediaSource::Url(_))
    }
}

/// Player lifecycle state as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Buffering,
    Playing,
    Paused,
    Stopped,
    Completed,
    Error { message: String },
}

/// Native media player control trait.
///
/// The player holds at most one loaded source. `load` replaces whatever was
/// loaded before; `stop` releases the source and resets position. Live
/// streams report no duration, so `duration` is optional.
#[async_trait]
pub trait MediaPlayer: Send + Sync {
    /// Load a source, replacing the current one. Does not start playback.
    async fn load(&self, source: MediaSource) -> Result<()>;

    /// Begin or resume playback of the loaded source.
    async fn play(&self) -> Result<()>;

    /// Pause playback, keeping the source and position.
    async fn pause(&self) -> Result<()>;

    /// Stop playback and release the loaded source.
    async fn stop(&self) -> Result<()>;

    /// Seek to an absolute position. No-op for live streams.
    async fn seek(&self, position: Duration) -> Result<()>;

    /// Current playback position.
    async fn position(&self) -> Result<Duration>;

    /// Total duration of the loaded source, if known (live streams report
    /// `None`).
    async fn duration(&self) -> Result<Option<Duration>>;

    /// Adjust volume, normalized to `0.0..=1.0`.
    async fn set_volume(&self, volume: f32) -> Result<()>;

    /// Current player state.
    async fn state(&self) -> Result<PlayerState>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_source_remote_detection() {
        let url = MediaSource::Url("https://cdn.example.org/ep.mp3".into());
        assert!(url.is_remote());

        let file = MediaSource::LocalFile(PathBuf::from("/data/ep.mp3"));
        assert!(!file.is_remote());
    }
}
