//! Playback controller.
//!
//! Drives the native player with exactly one active source at a time: an
//! episode or the live radio stream, never both. Switching sources always
//! stops the current one first. The controller also owns resume-state
//! persistence, debouncing the periodic position saves so the settings store
//! is not hit on every tick.

use crate::error::{PlaybackError, Result};
use crate::resume::{ResumeState, ResumeStore};
use bridge_traits::player::{MediaPlayer, MediaSource};
use bridge_traits::storage::SettingsStore;
use core_library::models::Episode;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Delay between a reported position tick and the persisted save. A newer
/// tick cancels the scheduled save; pause and stop flush immediately.
pub const POSITION_SAVE_DEBOUNCE: Duration = Duration::from_secs(2);

/// What the player is currently bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveSource {
    None,
    Episode { id: i64 },
    Live,
}

/// Snapshot of the playback state for the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackStatus {
    pub source: ActiveSource,
    pub playing: bool,
    pub position: Duration,
    /// `None` for the live stream.
    pub duration: Option<Duration>,
    /// Position over duration, `0.0..=1.0`; `None` when duration is unknown.
    pub progress: Option<f64>,
    pub volume: f32,
}

/// Single-source playback over the native player bridge.
pub struct PlayerController {
    player: Arc<dyn MediaPlayer>,
    resume: Arc<ResumeStore>,
    live_stream_url: String,
    active: Mutex<ActiveSource>,
    volume: Mutex<f32>,
    pending_save: Mutex<Option<JoinHandle<()>>>,
    save_debounce: Duration,
}

impl PlayerController {
    pub fn new(
        player: Arc<dyn MediaPlayer>,
        settings: Arc<dyn SettingsStore>,
        live_stream_url: impl Into<String>,
    ) -> Self {
        Self {
            player,
            resume: Arc::new(ResumeStore::new(settings)),
            live_stream_url: live_stream_url.into(),
            active: Mutex::new(ActiveSource::None),
            volume: Mutex::new(1.0),
            pending_save: Mutex::new(None),
            save_debounce: POSITION_SAVE_DEBOUNCE,
        }
    }

    /// Override the save debounce window (tests use a short one).
    pub fn with_save_debounce(mut self, debounce: Duration) -> Self {
        self.save_debounce = debounce;
        self
    }

    fn active(&self) -> ActiveSource {
        *self.active.lock().unwrap()
    }

    fn set_active(&self, source: ActiveSource) {
        *self.active.lock().unwrap() = source;
    }

    /// Start an episode, optionally seeking to a resume position.
    ///
    /// Stops whatever was playing before. Fails with
    /// [`PlaybackError::NoAudio`] when the episode has no audio URL.
    pub async fn play_episode(&self, episode: &Episode, resume_from: Option<Duration>) -> Result<()> {
        let url = episode
            .audio_url()
            .ok_or(PlaybackError::NoAudio(episode.id))?
            .to_string();

        self.flush_pending_save().await?;
        if self.active() != ActiveSource::None {
            self.player.stop().await?;
        }

        self.player.load(MediaSource::Url(url)).await?;
        if let Some(position) = resume_from {
            self.player.seek(position).await?;
        }
        self.player.play().await?;

        self.set_active(ActiveSource::Episode { id: episode.id });
        self.resume
            .save_episode(episode.id, resume_from.unwrap_or(Duration::ZERO))
            .await?;
        self.resume.set_live_autostart(false).await?;

        info!(episode_id = episode.id, "Started episode playback");
        Ok(())
    }

    /// Start the live stream, stopping episode playback first.
    pub async fn play_live(&self) -> Result<()> {
        self.flush_pending_save().await?;
        if self.active() != ActiveSource::None {
            self.player.stop().await?;
        }

        self.player
            .load(MediaSource::Url(self.live_stream_url.clone()))
            .await?;
        self.player.play().await?;

        self.set_active(ActiveSource::Live);
        self.resume.set_live_autostart(true).await?;

        info!("Started live stream");
        Ok(())
    }

    /// Resume playback of the current source.
    pub async fn play(&self) -> Result<()> {
        self.player.play().await?;
        Ok(())
    }

    /// Pause and flush the resume position immediately.
    pub async fn pause(&self) -> Result<()> {
        self.player.pause().await?;
        self.flush_pending_save().await?;
        if let ActiveSource::Episode { id } = self.active() {
            let position = self.player.position().await?;
            self.resume.save_episode(id, position).await?;
        }
        Ok(())
    }

    /// Stop playback and release the source.
    ///
    /// Stopping an episode flushes its position; stopping the live stream
    /// clears the autostart flag.
    pub async fn stop(&self) -> Result<()> {
        self.flush_pending_save().await?;
        match self.active() {
            ActiveSource::Episode { id } => {
                let position = self.player.position().await?;
                self.resume.save_episode(id, position).await?;
            }
            ActiveSource::Live => {
                self.resume.set_live_autostart(false).await?;
            }
            ActiveSource::None => {}
        }

        self.player.stop().await?;
        self.set_active(ActiveSource::None);
        Ok(())
    }

    /// Seek within the current episode. Schedules a position save.
    pub async fn seek(&self, position: Duration) -> Result<()> {
        self.player.seek(position).await?;
        self.report_position(position);
        Ok(())
    }

    /// Report a periodic position tick from the host.
    ///
    /// Schedules a debounced save; a newer tick supersedes and cancels the
    /// scheduled one. Ticks while the live stream is active are ignored.
    pub fn report_position(&self, position: Duration) {
        let ActiveSource::Episode { id } = self.active() else {
            return;
        };

        let mut pending = self.pending_save.lock().unwrap();
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let resume = self.resume.clone();
        let debounce = self.save_debounce;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if let Err(error) = resume.save_episode(id, position).await {
                warn!(error = %error, "Debounced position save failed");
            }
        }));
    }

    /// Set volume, clamped to `0.0..=1.0`.
    pub async fn set_volume(&self, volume: f32) -> Result<()> {
        let volume = volume.clamp(0.0, 1.0);
        self.player.set_volume(volume).await?;
        *self.volume.lock().unwrap() = volume;
        Ok(())
    }

    /// Current playback snapshot.
    pub async fn status(&self) -> Result<PlaybackStatus> {
        let source = self.active();
        let state = self.player.state().await?;
        let playing = matches!(
            state,
            bridge_traits::player::PlayerState::Playing
                | bridge_traits::player::PlayerState::Buffering
        );
        let position = self.player.position().await?;
        let duration = self.player.duration().await?;

        let progress = duration.and_then(|total| {
            if total.is_zero() {
                None
            } else {
                Some((position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0))
            }
        });

        Ok(PlaybackStatus {
            source,
            playing,
            position,
            duration,
            progress,
            volume: *self.volume.lock().unwrap(),
        })
    }

    /// Persisted resume state, restored by the host at launch.
    pub async fn restore_state(&self) -> Result<ResumeState> {
        self.resume.load().await
    }

    /// Cancel a scheduled save; the caller persists the authoritative
    /// position right after.
    async fn flush_pending_save(&self) -> Result<()> {
        let pending = self.pending_save.lock().unwrap().take();
        if let Some(pending) = pending {
            pending.abort();
            debug!("Cancelled scheduled position save");
        }
        Ok(())
    }
}

impl Drop for PlayerController {
    fn drop(&mut self) {
        if let Some(pending) = self.pending_save.lock().unwrap().take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_desktop::settings::SqliteSettingsStore;
    use bridge_traits::player::PlayerState;
    use chrono_free::sample_episode;

    /// Minimal episode fixtures without pulling chrono into scope everywhere.
    mod chrono_free {
        use core_library::models::{AudioRef, Episode, DEFAULT_DURATION};

        pub fn sample_episode(id: i64, audio: Option<AudioRef>) -> Episode {
            Episode {
                id,
                title: format!("Episode {}", id),
                content: String::new(),
                excerpt: String::new(),
                slug: format!("episode-{}", id),
                published_at: chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
                audio,
                image_url: None,
                program_ids: vec![42],
                duration: DEFAULT_DURATION.to_string(),
            }
        }
    }

    /// Scripted player recording the calls it receives.
    struct FakePlayer {
        commands: Mutex<Vec<String>>,
        state: Mutex<PlayerState>,
        position: Mutex<Duration>,
        duration: Mutex<Option<Duration>>,
    }

    impl Default for FakePlayer {
        fn default() -> Self {
            Self {
                commands: Mutex::new(Vec::new()),
                state: Mutex::new(PlayerState::Idle),
                position: Mutex::new(Duration::ZERO),
                duration: Mutex::new(None),
            }
        }
    }

    impl FakePlayer {
        fn commands(&self) -> Vec<String> {
            self.commands.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MediaPlayer for FakePlayer {
        async fn load(&self, source: MediaSource) -> bridge_traits::error::Result<()> {
            let label = match source {
                MediaSource::Url(url) => format!("load {}", url),
                MediaSource::LocalFile(path) => format!("load {}", path.display()),
            };
            self.commands.lock().unwrap().push(label);
            Ok(())
        }

        async fn play(&self) -> bridge_traits::error::Result<()> {
            self.commands.lock().unwrap().push("play".into());
            *self.state.lock().unwrap() = PlayerState::Playing;
            Ok(())
        }

        async fn pause(&self) -> bridge_traits::error::Result<()> {
            self.commands.lock().unwrap().push("pause".into());
            *self.state.lock().unwrap() = PlayerState::Paused;
            Ok(())
        }

        async fn stop(&self) -> bridge_traits::error::Result<()> {
            self.commands.lock().unwrap().push("stop".into());
            *self.state.lock().unwrap() = PlayerState::Stopped;
            Ok(())
        }

        async fn seek(&self, position: Duration) -> bridge_traits::error::Result<()> {
            self.commands
                .lock()
                .unwrap()
                .push(format!("seek {}", position.as_millis()));
            *self.position.lock().unwrap() = position;
            Ok(())
        }

        async fn position(&self) -> bridge_traits::error::Result<Duration> {
            Ok(*self.position.lock().unwrap())
        }

        async fn duration(&self) -> bridge_traits::error::Result<Option<Duration>> {
            Ok(*self.duration.lock().unwrap())
        }

        async fn set_volume(&self, _volume: f32) -> bridge_traits::error::Result<()> {
            Ok(())
        }

        async fn state(&self) -> bridge_traits::error::Result<PlayerState> {
            Ok(self.state.lock().unwrap().clone())
        }
    }

    async fn controller(player: Arc<FakePlayer>) -> PlayerController {
        let settings: Arc<dyn SettingsStore> =
            Arc::new(SqliteSettingsStore::in_memory().await.unwrap());
        PlayerController::new(player, settings, "https://stream.example.org/live")
            .with_save_debounce(Duration::from_millis(50))
    }

    fn episode(id: i64) -> Episode {
        sample_episode(
            id,
            Some(core_library::models::AudioRef::Stream(format!(
                "https://cdn/{}.mp3",
                id
            ))),
        )
    }

    #[tokio::test]
    async fn switching_to_live_stops_episode_first() {
        let player = Arc::new(FakePlayer::default());
        let control = controller(player.clone()).await;

        control.play_episode(&episode(17), None).await.unwrap();
        control.play_live().await.unwrap();

        assert_eq!(
            player.commands(),
            vec![
                "load https://cdn/17.mp3",
                "play",
                "stop",
                "load https://stream.example.org/live",
                "play",
            ]
        );
        assert_eq!(control.active(), ActiveSource::Live);
    }

    #[tokio::test]
    async fn switching_to_episode_stops_live_first() {
        let player = Arc::new(FakePlayer::default());
        let control = controller(player.clone()).await;

        control.play_live().await.unwrap();
        control.play_episode(&episode(17), None).await.unwrap();

        let commands = player.commands();
        assert_eq!(commands[2], "stop");
        assert_eq!(commands[3], "load https://cdn/17.mp3");

        // Starting an episode also clears live autostart.
        let state = control.restore_state().await.unwrap();
        assert!(!state.live_autostart);
    }

    #[tokio::test]
    async fn episode_without_audio_is_rejected() {
        let player = Arc::new(FakePlayer::default());
        let control = controller(player.clone()).await;

        let silent = sample_episode(5, None);
        let error = control.play_episode(&silent, None).await.unwrap_err();
        assert!(matches!(error, PlaybackError::NoAudio(5)));
        assert!(player.commands().is_empty());
    }

    #[tokio::test]
    async fn resume_position_is_seeked_before_play() {
        let player = Arc::new(FakePlayer::default());
        let control = controller(player.clone()).await;

        control
            .play_episode(&episode(17), Some(Duration::from_millis(45_000)))
            .await
            .unwrap();

        assert_eq!(
            player.commands(),
            vec!["load https://cdn/17.mp3", "seek 45000", "play"]
        );

        let state = control.restore_state().await.unwrap();
        assert_eq!(state.episode, Some((17, Duration::from_millis(45_000))));
    }

    // Real time rather than a paused clock: the debounced save goes through
    // the sqlite settings pool, whose acquire timeout auto-advances and
    // fires under tokio's paused clock while sqlite connects on a blocking
    // thread.
    #[tokio::test]
    async fn position_ticks_debounce_to_latest() {
        let player = Arc::new(FakePlayer::default());
        let control = controller(player.clone()).await;

        control.play_episode(&episode(17), None).await.unwrap();
        control.report_position(Duration::from_secs(10));
        control.report_position(Duration::from_secs(11));
        control.report_position(Duration::from_secs(12));

        tokio::time::sleep(Duration::from_millis(200)).await;

        let state = control.restore_state().await.unwrap();
        assert_eq!(state.episode, Some((17, Duration::from_secs(12))));
    }

    #[tokio::test]
    async fn pause_flushes_position_immediately() {
        let player = Arc::new(FakePlayer::default());
        let control = controller(player.clone()).await;

        control.play_episode(&episode(17), None).await.unwrap();
        *player.position.lock().unwrap() = Duration::from_secs(90);
        control.pause().await.unwrap();

        let state = control.restore_state().await.unwrap();
        assert_eq!(state.episode, Some((17, Duration::from_secs(90))));
    }

    #[tokio::test]
    async fn stopping_live_clears_autostart() {
        let player = Arc::new(FakePlayer::default());
        let control = controller(player.clone()).await;

        control.play_live().await.unwrap();
        assert!(control.restore_state().await.unwrap().live_autostart);

        control.stop().await.unwrap();
        assert!(!control.restore_state().await.unwrap().live_autostart);
        assert_eq!(control.active(), ActiveSource::None);
    }

    #[tokio::test]
    async fn progress_fraction_from_position_and_duration() {
        let player = Arc::new(FakePlayer::default());
        *player.duration.lock().unwrap() = Some(Duration::from_secs(200));
        *player.position.lock().unwrap() = Duration::from_secs(50);

        let control = controller(player.clone()).await;
        control.play_episode(&episode(17), None).await.unwrap();
        // play_episode overwrote position via no seek; restore the fixture.
        *player.position.lock().unwrap() = Duration::from_secs(50);

        let status = control.status().await.unwrap();
        assert_eq!(status.progress, Some(0.25));
        assert!(status.playing);
    }

    #[tokio::test]
    async fn live_stream_has_no_progress() {
        let player = Arc::new(FakePlayer::default());
        let control = controller(player.clone()).await;

        control.play_live().await.unwrap();
        let status = control.status().await.unwrap();
        assert_eq!(status.duration, None);
        assert_eq!(status.progress, None);
    }
}
