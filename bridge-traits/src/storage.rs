//! Key-Value Settings Storage
//!
//! Abstracts the platform preferences store used for resume state, the
//! persisted remote-config blob, queued/downloaded episode lists, theme and
//! onboarding flags:
//! - Android: SharedPreferences / DataStore
//! - iOS: UserDefaults
//! - Desktop: SQLite-backed store (`bridge-desktop`)

use async_trait::async_trait;

use crate::error::Result;

/// Key-value settings storage trait.
///
/// Values are stored per key with a primitive type; reading a key back with a
/// different type is an error. All operations are async since mobile stores
/// may hit disk.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::storage::SettingsStore;
///
/// async fn save_resume(store: &dyn SettingsStore) -> bridge_traits::error::Result<()> {
///     store.set_i64("playback.resume_episode_id", 17).await?;
///     store.set_i64("playback.resume_position_ms", 45_000).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Store a string value.
    async fn set_string(&self, key: &str, value: &str) -> Result<()>;

    /// Retrieve a string value.
    async fn get_string(&self, key: &str) -> Result<Option<String>>;

    /// Store a boolean value.
    async fn set_bool(&self, key: &str, value: bool) -> Result<()>;

    /// Retrieve a boolean value.
    async fn get_bool(&self, key: &str) -> Result<Option<bool>>;

    /// Store an integer value.
    async fn set_i64(&self, key: &str, value: i64) -> Result<()>;

    /// Retrieve an integer value.
    async fn get_i64(&self, key: &str) -> Result<Option<i64>>;

    /// Store a floating-point value.
    async fn set_f64(&self, key: &str, value: f64) -> Result<()>;

    /// Retrieve a floating-point value.
    async fn get_f64(&self, key: &str) -> Result<Option<f64>>;

    /// Delete a setting. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check if a setting exists.
    async fn has_key(&self, key: &str) -> Result<bool>;

    /// List all setting keys.
    async fn list_keys(&self) -> Result<Vec<String>>;

    /// Clear all settings.
    async fn clear_all(&self) -> Result<()>;
}
