//! Remote application configuration.
//!
//! The app's base URLs can be swapped server-side without a release: at
//! launch the loader makes a single fetch attempt against the config
//! endpoint. On success the raw JSON blob is persisted to settings for the
//! next offline launch; on failure it falls back to the persisted blob, then
//! to the compiled defaults. Loading never fails and is never retried within
//! a launch.

use bridge_traits::error::BridgeError;
use bridge_traits::http::{HttpClient, HttpRequest};
use bridge_traits::storage::SettingsStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Settings key holding the last successfully fetched config blob.
pub const CONFIG_SETTINGS_KEY: &str = "config.remote_blob";

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Base URLs the app runs against.
///
/// Unknown JSON fields are ignored and missing ones take the compiled
/// default, so old clients survive config schema growth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// WordPress site base URL for the catalog API.
    pub api_base_url: String,
    /// Public website, linked from episode shares.
    pub website_url: String,
    /// Live radio stream URL.
    pub live_stream_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://radio.example.org".to_string(),
            website_url: "https://radio.example.org".to_string(),
            live_stream_url: "https://stream.radio.example.org/live".to_string(),
        }
    }
}

/// Resolves the launch configuration: remote fetch, persisted blob, compiled
/// defaults, in that order.
pub struct ConfigLoader {
    http: Arc<dyn HttpClient>,
    settings: Arc<dyn SettingsStore>,
    config_url: String,
}

impl ConfigLoader {
    pub fn new(
        http: Arc<dyn HttpClient>,
        settings: Arc<dyn SettingsStore>,
        config_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            settings,
            config_url: config_url.into(),
        }
    }

    /// Load the configuration. Never fails; the worst case is the compiled
    /// defaults.
    pub async fn load(&self) -> AppConfig {
        match self.fetch_remote().await {
            Ok((config, raw)) => {
                if let Err(error) = self.settings.set_string(CONFIG_SETTINGS_KEY, &raw).await {
                    warn!(error = %error, "Failed to persist remote config blob");
                }
                info!(url = %self.config_url, "Loaded remote configuration");
                config
            }
            Err(error) => {
                warn!(
                    url = %self.config_url,
                    error = %error,
                    "Remote config fetch failed, falling back"
                );
                match self.persisted().await {
                    Some(config) => {
                        info!("Using persisted configuration from previous launch");
                        config
                    }
                    None => {
                        info!("Using compiled default configuration");
                        AppConfig::default()
                    }
                }
            }
        }
    }

    async fn fetch_remote(&self) -> std::result::Result<(AppConfig, String), BridgeError> {
        let request = HttpRequest::get(&self.config_url).timeout(FETCH_TIMEOUT);
        let response = self.http.execute(request).await?;

        if !response.is_success() {
            return Err(BridgeError::OperationFailed(format!(
                "config endpoint returned HTTP {}",
                response.status
            )));
        }

        let raw = response.text()?;
        let config = serde_json::from_str(&raw)
            .map_err(|e| BridgeError::OperationFailed(format!("bad config body: {}", e)))?;
        Ok((config, raw))
    }

    async fn persisted(&self) -> Option<AppConfig> {
        let raw = self.settings.get_string(CONFIG_SETTINGS_KEY).await.ok()??;
        match serde_json::from_str(&raw) {
            Ok(config) => Some(config),
            Err(error) => {
                warn!(error = %error, "Persisted config blob is unreadable, ignoring");
                None
            }
        }
    }
}
