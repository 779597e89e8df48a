//! Core assembly.
//!
//! Wires the configured bridges into the runtime objects the host talks to:
//! resolves the remote configuration, opens the cache database, and builds
//! the repository, search and playback layers.

use crate::config::CoreConfig;
use crate::error::{Error, Result};
use crate::prefs::Preferences;
use core_api::WordPressClient;
use core_data::remote_config::{AppConfig, ConfigLoader};
use core_data::repository::ContentRepository;
use core_data::search::SearchDebouncer;
use core_library::db::{create_pool, DatabaseConfig};
use core_library::repositories::{SqliteEpisodeCacheRepository, SqliteProgramCacheRepository};
use core_playback::controller::PlayerController;
use core_playback::lists::EpisodeIdList;
use core_playback::resume::ResumeState;
use std::sync::Arc;
use tracing::info;

/// The assembled core, handed to the host at launch.
pub struct AppCore {
    /// Resolved launch configuration (remote, persisted or defaults).
    pub app_config: AppConfig,
    pub repository: Arc<ContentRepository>,
    pub search: SearchDebouncer,
    pub player: Arc<PlayerController>,
    pub queued: EpisodeIdList,
    pub downloaded: EpisodeIdList,
    pub prefs: Preferences,
}

impl AppCore {
    /// Initialize the core from a validated [`CoreConfig`].
    ///
    /// Performs the single remote-config fetch, opens (and migrates) the
    /// cache database, and builds every runtime object. Fails only on local
    /// problems; an unreachable network still launches on fallback config.
    pub async fn init(config: CoreConfig) -> Result<Self> {
        config.validate()?;

        let app_config = match &config.config_url {
            Some(url) => {
                ConfigLoader::new(
                    config.http_client.clone(),
                    config.settings_store.clone(),
                    url.clone(),
                )
                .load()
                .await
            }
            None => AppConfig::default(),
        };

        let pool = create_pool(DatabaseConfig::new(&config.database_path))
            .await
            .map_err(|e| Error::Internal(format!("Failed to open cache database: {}", e)))?;

        let api = Arc::new(WordPressClient::new(
            config.http_client.clone(),
            app_config.api_base_url.clone(),
        ));
        let repository = Arc::new(ContentRepository::new(
            api,
            Arc::new(SqliteProgramCacheRepository::new(pool.clone())),
            Arc::new(SqliteEpisodeCacheRepository::new(pool)),
        ));
        let search = SearchDebouncer::new(repository.clone());

        let player = Arc::new(PlayerController::new(
            config.media_player.clone(),
            config.settings_store.clone(),
            app_config.live_stream_url.clone(),
        ));

        let queued = EpisodeIdList::queued(config.settings_store.clone());
        let downloaded = EpisodeIdList::downloaded(config.settings_store.clone());
        let prefs = Preferences::new(config.settings_store.clone());

        info!(
            api_base_url = %app_config.api_base_url,
            "Core initialized"
        );

        Ok(Self {
            app_config,
            repository,
            search,
            player,
            queued,
            downloaded,
            prefs,
        })
    }

    /// Resume state persisted by the previous session.
    pub async fn restore_state(&self) -> Result<ResumeState> {
        self.player
            .restore_state()
            .await
            .map_err(|e| Error::Internal(e.to_string()))
    }
}
