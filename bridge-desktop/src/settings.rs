//! Settings Storage using SQLite

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    storage::SettingsStore,
    time::{Clock, SystemClock},
};
use sqlx::{sqlite::SqlitePoolOptions, Row, SqlitePool};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error};

/// Default on-disk location for the desktop settings database.
pub fn default_settings_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("radiocast")
        .join("settings.db")
}

/// SQLite-backed settings store implementation.
///
/// Persistent typed key-value storage. Values are stored as text with a type
/// tag; reading a key back with a different type is an error.
pub struct SqliteSettingsStore {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl SqliteSettingsStore {
    /// Open (or create) a settings store at the given database path.
    pub async fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(BridgeError::Io)?;
        }

        // SQLite URLs want forward slashes, also on Windows.
        let path_str = db_path.to_string_lossy().replace('\\', "/");
        let db_url = format!("sqlite://{}?mode=rwc", path_str);

        let pool = SqlitePoolOptions::new()
            .max_connections(2)
            .connect(&db_url)
            .await
            .map_err(|e| BridgeError::Storage(format!("Failed to open settings DB: {}", e)))?;

        Self::init_schema(&pool).await?;

        debug!(path = ?db_path, "Initialized settings store");

        Ok(Self {
            pool,
            clock: Arc::new(SystemClock),
        })
    }

    /// Create an in-memory settings store (for testing).
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .map_err(|e| BridgeError::Storage(format!("Failed to open settings DB: {}", e)))?;

        Self::init_schema(&pool).await?;

        Ok(Self {
            pool,
            clock: Arc::new(SystemClock),
        })
    }

    /// Use an explicit time source for `updated_at` stamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    async fn init_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                kind TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(|e| BridgeError::Storage(format!("Failed to create settings table: {}", e)))?;

        Ok(())
    }

    async fn set_value(&self, key: &str, value: &str, kind: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value, kind, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                kind = excluded.kind,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(kind)
        .bind(self.clock.unix_timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| BridgeError::Storage(format!("Failed to set setting: {}", e)))?;

        debug!(key = key, kind = kind, "Stored setting");
        Ok(())
    }

    async fn get_value(&self, key: &str, expected_kind: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value, kind FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| BridgeError::Storage(format!("Failed to get setting: {}", e)))?;

        match row {
            Some(row) => {
                let value: String = row.get(0);
                let kind: String = row.get(1);

                if kind != expected_kind {
                    error!(key = key, expected = expected_kind, actual = %kind, "Type mismatch");
                    return Err(BridgeError::Storage(format!(
                        "Type mismatch for '{}': expected {}, got {}",
                        key, expected_kind, kind
                    )));
                }

                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn parse<T: std::str::FromStr>(key: &str, raw: String) -> Result<T>
    where
        T::Err: std::fmt::Display,
    {
        raw.parse().map_err(|e| {
            BridgeError::Storage(format!("Corrupt value for '{}': {}", key, e))
        })
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, value, "string").await
    }

    async fn get_string(&self, key: &str) -> Result<Option<String>> {
        self.get_value(key, "string").await
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set_value(key, &value.to_string(), "bool").await
    }

    async fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get_value(key, "bool").await? {
            Some(raw) => Ok(Some(Self::parse(key, raw)?)),
            None => Ok(None),
        }
    }

    async fn set_i64(&self, key: &str, value: i64) -> Result<()> {
        self.set_value(key, &value.to_string(), "i64").await
    }

    async fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        match self.get_value(key, "i64").await? {
            Some(raw) => Ok(Some(Self::parse(key, raw)?)),
            None => Ok(None),
        }
    }

    async fn set_f64(&self, key: &str, value: f64) -> Result<()> {
        self.set_value(key, &value.to_string(), "f64").await
    }

    async fn get_f64(&self, key: &str) -> Result<Option<f64>> {
        match self.get_value(key, "f64").await? {
            Some(raw) => Ok(Some(Self::parse(key, raw)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM settings WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| BridgeError::Storage(format!("Failed to delete setting: {}", e)))?;

        debug!(key = key, "Deleted setting");
        Ok(())
    }

    async fn has_key(&self, key: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| BridgeError::Storage(format!("Failed to check key: {}", e)))?;

        Ok(row.is_some())
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT key FROM settings ORDER BY key")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| BridgeError::Storage(format!("Failed to list keys: {}", e)))?;

        Ok(rows.into_iter().map(|row| row.get(0)).collect())
    }

    async fn clear_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM settings")
            .execute(&self.pool)
            .await
            .map_err(|e| BridgeError::Storage(format!("Failed to clear settings: {}", e)))?;

        debug!("Cleared all settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn string_roundtrip_and_delete() {
        let store = SqliteSettingsStore::in_memory().await.unwrap();

        store.set_string("theme", "dark").await.unwrap();
        assert_eq!(
            store.get_string("theme").await.unwrap(),
            Some("dark".to_string())
        );

        store.delete("theme").await.unwrap();
        assert_eq!(store.get_string("theme").await.unwrap(), None);
    }

    #[tokio::test]
    async fn updated_at_stamped_from_injected_clock() {
        use bridge_traits::time::Clock;
        use chrono::{DateTime, TimeZone, Utc};

        struct FixedClock(DateTime<Utc>);

        impl Clock for FixedClock {
            fn now(&self) -> DateTime<Utc> {
                self.0
            }
        }

        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let store = SqliteSettingsStore::in_memory()
            .await
            .unwrap()
            .with_clock(Arc::new(FixedClock(at)));

        store.set_string("theme", "dark").await.unwrap();

        let updated_at: i64 =
            sqlx::query_scalar("SELECT updated_at FROM settings WHERE key = 'theme'")
                .fetch_one(&store.pool)
                .await
                .unwrap();
        assert_eq!(updated_at, at.timestamp());
    }

    #[tokio::test]
    async fn typed_values_roundtrip() {
        let store = SqliteSettingsStore::in_memory().await.unwrap();

        store.set_bool("live.autostart", true).await.unwrap();
        assert_eq!(store.get_bool("live.autostart").await.unwrap(), Some(true));

        store.set_i64("resume.position_ms", 45_000).await.unwrap();
        assert_eq!(
            store.get_i64("resume.position_ms").await.unwrap(),
            Some(45_000)
        );

        store.set_f64("player.volume", 0.8).await.unwrap();
        assert_eq!(store.get_f64("player.volume").await.unwrap(), Some(0.8));
    }

    #[tokio::test]
    async fn type_mismatch_is_an_error() {
        let store = SqliteSettingsStore::in_memory().await.unwrap();

        store.set_string("resume.position_ms", "oops").await.unwrap();
        assert!(store.get_i64("resume.position_ms").await.is_err());
    }

    #[tokio::test]
    async fn list_keys_sorted() {
        let store = SqliteSettingsStore::in_memory().await.unwrap();

        store.set_string("b", "2").await.unwrap();
        store.set_string("a", "1").await.unwrap();

        assert_eq!(store.list_keys().await.unwrap(), vec!["a", "b"]);

        store.clear_all().await.unwrap();
        assert!(store.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn overwrite_replaces_value() {
        let store = SqliteSettingsStore::in_memory().await.unwrap();

        store.set_i64("resume.episode_id", 17).await.unwrap();
        store.set_i64("resume.episode_id", 18).await.unwrap();
        assert_eq!(
            store.get_i64("resume.episode_id").await.unwrap(),
            Some(18)
        );
    }
}
