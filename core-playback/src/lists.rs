//! Queued and downloaded episode id lists.
//!
//! Both lists are small (tens of ids) and persist as JSON arrays in the
//! settings store. Order is preserved: the queue plays in insertion order.

use crate::error::Result;
use bridge_traits::storage::SettingsStore;
use std::sync::Arc;
use tracing::warn;

const KEY_QUEUED: &str = "library.queued_ids";
const KEY_DOWNLOADED: &str = "library.downloaded_ids";

/// A persisted, ordered, duplicate-free list of episode ids.
pub struct EpisodeIdList {
    settings: Arc<dyn SettingsStore>,
    key: &'static str,
}

impl EpisodeIdList {
    /// The play-queue list.
    pub fn queued(settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            settings,
            key: KEY_QUEUED,
        }
    }

    /// Episodes with a completed local download.
    pub fn downloaded(settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            settings,
            key: KEY_DOWNLOADED,
        }
    }

    /// All ids in insertion order.
    pub async fn ids(&self) -> Result<Vec<i64>> {
        let raw = match self.settings.get_string(self.key).await? {
            Some(raw) => raw,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_str(&raw) {
            Ok(ids) => Ok(ids),
            Err(error) => {
                // Only this code writes the key, so a bad blob means the
                // store was tampered with or corrupted. Start over.
                warn!(key = self.key, error = %error, "Unreadable id list, resetting");
                Ok(Vec::new())
            }
        }
    }

    /// Append an id. Adding an id that is already present is a no-op.
    pub async fn add(&self, id: i64) -> Result<()> {
        let mut ids = self.ids().await?;
        if !ids.contains(&id) {
            ids.push(id);
            self.write(&ids).await?;
        }
        Ok(())
    }

    /// Remove an id. Removing a missing id is a no-op.
    pub async fn remove(&self, id: i64) -> Result<()> {
        let mut ids = self.ids().await?;
        let before = ids.len();
        ids.retain(|&existing| existing != id);
        if ids.len() != before {
            self.write(&ids).await?;
        }
        Ok(())
    }

    pub async fn contains(&self, id: i64) -> Result<bool> {
        Ok(self.ids().await?.contains(&id))
    }

    async fn write(&self, ids: &[i64]) -> Result<()> {
        // i64 lists always serialize.
        let raw = serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string());
        self.settings.set_string(self.key, &raw).await?;
        Ok(())
    }
}
