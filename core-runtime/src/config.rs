//! # Core Configuration
//!
//! Builder-pattern configuration for the shared core.
//!
//! ## Overview
//!
//! [`CoreConfig`] holds the bridge implementations and settings the core
//! needs. The builder enforces fail-fast validation: every required bridge
//! must be present (or provided by a platform default) before the config
//! builds.
//!
//! ## Required Dependencies
//!
//! - `MediaPlayer` - always injected by the host; there is no default
//! - `SettingsStore` - required for persisted state
//!
//! ## Optional Dependencies (with desktop defaults)
//!
//! - `HttpClient` - desktop default: reqwest (`desktop-shims` feature)
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .database_path("/path/to/catalog.db")
//!     .config_url("https://radio.example.org/app-config.json")
//!     .media_player(Arc::new(MyPlayer))
//!     .build()
//!     .expect("Failed to build config");
//! ```

use crate::error::{Error, Result};
use bridge_traits::http::HttpClient;
use bridge_traits::log::LoggerSink;
use bridge_traits::player::MediaPlayer;
use bridge_traits::storage::SettingsStore;
use std::path::PathBuf;
use std::sync::Arc;

/// Core configuration.
///
/// Use [`CoreConfig::builder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Path to the SQLite catalog cache database.
    pub database_path: PathBuf,

    /// Remote config endpoint. `None` skips the launch fetch and runs on
    /// persisted/default configuration.
    pub config_url: Option<String>,

    /// HTTP client (optional with desktop default).
    pub http_client: Arc<dyn HttpClient>,

    /// Key-value settings storage (required, desktop default available).
    pub settings_store: Arc<dyn SettingsStore>,

    /// Native media player (required, no default).
    pub media_player: Arc<dyn MediaPlayer>,

    /// Optional host logging sink, mirrored from the tracing pipeline.
    pub logger_sink: Option<Arc<dyn LoggerSink>>,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("database_path", &self.database_path)
            .field("config_url", &self.config_url)
            .field("http_client", &"HttpClient { ... }")
            .field("settings_store", &"SettingsStore { ... }")
            .field("media_player", &"MediaPlayer { ... }")
            .field(
                "logger_sink",
                &self.logger_sink.as_ref().map(|_| "LoggerSink { ... }"),
            )
            .finish()
    }
}

impl CoreConfig {
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Validate the assembled configuration.
    pub fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(Error::Config("Database path cannot be empty".to_string()));
        }

        if let Some(url) = &self.config_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::Config(format!(
                    "Config URL must be http(s), got '{}'",
                    url
                )));
            }
        }

        Ok(())
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::http::ReqwestHttpClient;

    let client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    Ok(client)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    Err(Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "HttpClient implementation is required for API access. \
                 Desktop: enable the 'desktop-shims' feature for the reqwest default. \
                 Mobile: inject the platform HTTP stack (OkHttp/URLSession bridge)."
            .to_string(),
    })
}

#[cfg(feature = "desktop-shims")]
fn provide_default_settings_store(database_path: &std::path::Path) -> Result<Arc<dyn SettingsStore>> {
    use bridge_desktop::settings::SqliteSettingsStore;
    use std::thread;
    use tokio::runtime::{Handle, Runtime};

    let candidate = database_path
        .parent()
        .map(|parent| parent.join("settings.db"))
        .unwrap_or_else(bridge_desktop::settings::default_settings_path);

    let init_store = |path: PathBuf| -> Result<SqliteSettingsStore> {
        let runtime = Runtime::new().map_err(|e| {
            Error::Internal(format!(
                "Failed to create Tokio runtime for default settings store: {}",
                e
            ))
        })?;

        runtime.block_on(SqliteSettingsStore::new(path)).map_err(|e| {
            Error::Internal(format!("Failed to initialize default SettingsStore: {}", e))
        })
    };

    // Blocking on a nested runtime is not allowed from async context, so
    // fall back to a helper thread when one is already running.
    let store = match Handle::try_current() {
        Ok(_) => {
            let path = candidate.clone();
            thread::spawn(move || init_store(path))
                .join()
                .map_err(|_| {
                    Error::Internal(
                        "Worker thread panicked while creating default SettingsStore".to_string(),
                    )
                })??
        }
        Err(_) => init_store(candidate)?,
    };

    let store: Arc<dyn SettingsStore> = Arc::new(store);
    Ok(store)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_settings_store(
    _database_path: &std::path::Path,
) -> Result<Arc<dyn SettingsStore>> {
    Err(Error::CapabilityMissing {
        capability: "SettingsStore".to_string(),
        message: "SettingsStore implementation is required for persisted state. \
                 Desktop: enable the 'desktop-shims' feature for the SQLite default. \
                 Mobile: inject platform-native settings (UserDefaults/DataStore)."
            .to_string(),
    })
}

/// Builder for [`CoreConfig`].
#[derive(Default)]
pub struct CoreConfigBuilder {
    database_path: Option<PathBuf>,
    config_url: Option<String>,
    http_client: Option<Arc<dyn HttpClient>>,
    settings_store: Option<Arc<dyn SettingsStore>>,
    media_player: Option<Arc<dyn MediaPlayer>>,
    logger_sink: Option<Arc<dyn LoggerSink>>,
}

impl CoreConfigBuilder {
    /// Path to the SQLite catalog cache database.
    pub fn database_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// Remote config endpoint fetched once at launch.
    pub fn config_url(mut self, url: impl Into<String>) -> Self {
        self.config_url = Some(url.into());
        self
    }

    /// HTTP client implementation. Falls back to the reqwest default when
    /// the `desktop-shims` feature is enabled.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Settings store implementation. Falls back to the SQLite default when
    /// the `desktop-shims` feature is enabled.
    pub fn settings_store(mut self, store: Arc<dyn SettingsStore>) -> Self {
        self.settings_store = Some(store);
        self
    }

    /// Native media player (always host-provided).
    pub fn media_player(mut self, player: Arc<dyn MediaPlayer>) -> Self {
        self.media_player = Some(player);
        self
    }

    /// Host logging sink, mirrored from the tracing pipeline.
    pub fn logger_sink(mut self, sink: Arc<dyn LoggerSink>) -> Self {
        self.logger_sink = Some(sink);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<CoreConfig> {
        let database_path = self
            .database_path
            .ok_or_else(|| Error::Config("Database path is required".to_string()))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client()?,
        };

        let settings_store = match self.settings_store {
            Some(store) => store,
            None => provide_default_settings_store(&database_path)?,
        };

        let media_player = self.media_player.ok_or_else(|| Error::CapabilityMissing {
            capability: "MediaPlayer".to_string(),
            message: "MediaPlayer implementation is required for playback. \
                     Inject the platform player bridge (ExoPlayer/AVPlayer wrapper)."
                .to_string(),
        })?;

        let config = CoreConfig {
            database_path,
            config_url: self.config_url,
            http_client,
            settings_store,
            media_player,
            logger_sink: self.logger_sink,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::player::{MediaSource, PlayerState};
    use std::time::Duration;

    struct NullPlayer;

    #[async_trait]
    impl MediaPlayer for NullPlayer {
        async fn load(&self, _source: MediaSource) -> bridge_traits::error::Result<()> {
            Ok(())
        }
        async fn play(&self) -> bridge_traits::error::Result<()> {
            Ok(())
        }
        async fn pause(&self) -> bridge_traits::error::Result<()> {
            Ok(())
        }
        async fn stop(&self) -> bridge_traits::error::Result<()> {
            Ok(())
        }
        async fn seek(&self, _position: Duration) -> bridge_traits::error::Result<()> {
            Ok(())
        }
        async fn position(&self) -> bridge_traits::error::Result<Duration> {
            Ok(Duration::ZERO)
        }
        async fn duration(&self) -> bridge_traits::error::Result<Option<Duration>> {
            Ok(None)
        }
        async fn set_volume(&self, _volume: f32) -> bridge_traits::error::Result<()> {
            Ok(())
        }
        async fn state(&self) -> bridge_traits::error::Result<PlayerState> {
            Ok(PlayerState::Idle)
        }
    }

    async fn settings() -> Arc<dyn SettingsStore> {
        Arc::new(
            bridge_desktop::settings::SqliteSettingsStore::in_memory()
                .await
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn missing_media_player_is_rejected() {
        let result = CoreConfig::builder()
            .database_path("/tmp/catalog.db")
            .settings_store(settings().await)
            .http_client(Arc::new(bridge_desktop::http::ReqwestHttpClient::new()))
            .build();

        assert!(matches!(
            result,
            Err(Error::CapabilityMissing { capability, .. }) if capability == "MediaPlayer"
        ));
    }

    #[tokio::test]
    async fn missing_database_path_is_rejected() {
        let result = CoreConfig::builder()
            .settings_store(settings().await)
            .http_client(Arc::new(bridge_desktop::http::ReqwestHttpClient::new()))
            .media_player(Arc::new(NullPlayer))
            .build();

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn non_http_config_url_is_rejected() {
        let result = CoreConfig::builder()
            .database_path("/tmp/catalog.db")
            .config_url("ftp://example.org/config.json")
            .settings_store(settings().await)
            .http_client(Arc::new(bridge_desktop::http::ReqwestHttpClient::new()))
            .media_player(Arc::new(NullPlayer))
            .build();

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn full_config_builds() {
        let config = CoreConfig::builder()
            .database_path("/tmp/catalog.db")
            .config_url("https://radio.example.org/app-config.json")
            .settings_store(settings().await)
            .http_client(Arc::new(bridge_desktop::http::ReqwestHttpClient::new()))
            .media_player(Arc::new(NullPlayer))
            .build()
            .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/catalog.db"));
    }
}
