//! Persisted resume state.
//!
//! The last played episode and its position, plus whether the live stream
//! should start on launch. Only this process writes these keys, so there is
//! no conflict resolution: last write wins.

use crate::error::Result;
use bridge_traits::storage::SettingsStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const KEY_EPISODE_ID: &str = "playback.resume_episode_id";
const KEY_POSITION_MS: &str = "playback.resume_position_ms";
const KEY_LIVE_AUTOSTART: &str = "playback.live_autostart";

/// Resume state restored at launch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResumeState {
    /// Last played episode and the position to resume from.
    pub episode: Option<(i64, Duration)>,
    /// Whether the live stream was active when the app last closed.
    pub live_autostart: bool,
}

/// Resume state persistence over the platform settings store.
pub struct ResumeStore {
    settings: Arc<dyn SettingsStore>,
}

impl ResumeStore {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// Load the persisted state. Missing keys mean a fresh install.
    pub async fn load(&self) -> Result<ResumeState> {
        let episode_id = self.settings.get_i64(KEY_EPISODE_ID).await?;
        let position_ms = self.settings.get_i64(KEY_POSITION_MS).await?;
        let live_autostart = self
            .settings
            .get_bool(KEY_LIVE_AUTOSTART)
            .await?
            .unwrap_or(false);

        let episode = match (episode_id, position_ms) {
            (Some(id), Some(ms)) if ms >= 0 => Some((id, Duration::from_millis(ms as u64))),
            (Some(id), None) => Some((id, Duration::ZERO)),
            _ => None,
        };

        Ok(ResumeState {
            episode,
            live_autostart,
        })
    }

    /// Record the episode and position to resume from.
    pub async fn save_episode(&self, episode_id: i64, position: Duration) -> Result<()> {
        self.settings.set_i64(KEY_EPISODE_ID, episode_id).await?;
        self.settings
            .set_i64(KEY_POSITION_MS, position.as_millis() as i64)
            .await?;
        debug!(
            episode_id = episode_id,
            position_ms = position.as_millis() as i64,
            "Saved resume position"
        );
        Ok(())
    }

    /// Forget the episode resume point (e.g. playback completed).
    pub async fn clear_episode(&self) -> Result<()> {
        self.settings.delete(KEY_EPISODE_ID).await?;
        self.settings.delete(KEY_POSITION_MS).await?;
        Ok(())
    }

    pub async fn set_live_autostart(&self, autostart: bool) -> Result<()> {
        self.settings.set_bool(KEY_LIVE_AUTOSTART, autostart).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_desktop::settings::SqliteSettingsStore;

    async fn store() -> ResumeStore {
        let settings = SqliteSettingsStore::in_memory().await.unwrap();
        ResumeStore::new(Arc::new(settings))
    }

    #[tokio::test]
    async fn fresh_install_has_no_state() {
        let resume = store().await;
        assert_eq!(resume.load().await.unwrap(), ResumeState::default());
    }

    #[tokio::test]
    async fn episode_position_roundtrip() {
        let resume = store().await;

        resume
            .save_episode(17, Duration::from_millis(45_000))
            .await
            .unwrap();

        let state = resume.load().await.unwrap();
        assert_eq!(state.episode, Some((17, Duration::from_millis(45_000))));
        assert!(!state.live_autostart);
    }

    #[tokio::test]
    async fn clear_removes_episode_but_keeps_live_flag() {
        let resume = store().await;

        resume.save_episode(17, Duration::from_secs(10)).await.unwrap();
        resume.set_live_autostart(true).await.unwrap();
        resume.clear_episode().await.unwrap();

        let state = resume.load().await.unwrap();
        assert_eq!(state.episode, None);
        assert!(state.live_autostart);
    }
}
