//! Program cache repository trait and SQLite implementation.

use crate::error::{CacheError, Result};
use crate::models::Program;
use async_trait::async_trait;
use bridge_traits::time::{Clock, SystemClock};
use sqlx::{query_as, SqlitePool};
use std::sync::Arc;
use tracing::debug;

/// Cached-program access.
#[async_trait]
pub trait ProgramCacheRepository: Send + Sync {
    /// All cached programs, ordered by name.
    async fn all(&self) -> Result<Vec<Program>>;

    /// Atomically replace the entire cached program set.
    ///
    /// Deletes every row and reinserts `programs` in one transaction; after a
    /// successful call the cache equals `programs` exactly.
    async fn replace_all(&self, programs: &[Program]) -> Result<()>;

    /// Number of cached programs.
    async fn count(&self) -> Result<i64>;
}

/// SQLite implementation of [`ProgramCacheRepository`].
pub struct SqliteProgramCacheRepository {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl SqliteProgramCacheRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    /// Use an explicit time source for `cached_at` stamps.
    pub fn with_clock(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl ProgramCacheRepository for SqliteProgramCacheRepository {
    async fn all(&self) -> Result<Vec<Program>> {
        let programs = query_as::<_, Program>(
            "SELECT id, name, slug, description, episode_count, image_url \
             FROM programs ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(programs)
    }

    async fn replace_all(&self, programs: &[Program]) -> Result<()> {
        for program in programs {
            program.validate().map_err(|msg| CacheError::InvalidInput {
                field: "program".to_string(),
                message: msg,
            })?;
        }

        let cached_at = self.clock.unix_timestamp();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM programs").execute(&mut *tx).await?;

        for program in programs {
            sqlx::query(
                "INSERT INTO programs (id, name, slug, description, episode_count, image_url, cached_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(program.id)
            .bind(&program.name)
            .bind(&program.slug)
            .bind(&program.description)
            .bind(program.episode_count)
            .bind(&program.image_url)
            .bind(cached_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(count = programs.len(), "Replaced cached program set");
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM programs")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    fn program(id: i64, name: &str) -> Program {
        Program {
            id,
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            description: Some(format!("{} description", name)),
            episode_count: Some(10),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn replace_all_and_read_back() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteProgramCacheRepository::new(pool);

        let programs = vec![program(1, "Alpha"), program(2, "Beta")];
        repo.replace_all(&programs).await.unwrap();

        let cached = repo.all().await.unwrap();
        assert_eq!(cached, programs);
    }

    #[tokio::test]
    async fn replace_all_stamps_rows_from_injected_clock() {
        use chrono::{DateTime, TimeZone, Utc};

        struct FixedClock(DateTime<Utc>);

        impl Clock for FixedClock {
            fn now(&self) -> DateTime<Utc> {
                self.0
            }
        }

        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let pool = create_test_pool().await.unwrap();
        let repo =
            SqliteProgramCacheRepository::with_clock(pool.clone(), Arc::new(FixedClock(at)));

        repo.replace_all(&[program(1, "Alpha")]).await.unwrap();

        let cached_at: i64 = sqlx::query_scalar("SELECT cached_at FROM programs WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(cached_at, at.timestamp());
    }

    #[tokio::test]
    async fn replace_all_discards_stale_rows() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteProgramCacheRepository::new(pool);

        repo.replace_all(&[program(1, "Alpha"), program(2, "Beta")])
            .await
            .unwrap();
        repo.replace_all(&[program(3, "Gamma")]).await.unwrap();

        let cached = repo.all().await.unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, 3);
    }

    #[tokio::test]
    async fn replace_all_with_empty_set_clears_cache() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteProgramCacheRepository::new(pool);

        repo.replace_all(&[program(1, "Alpha")]).await.unwrap();
        repo.replace_all(&[]).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn replace_all_rejects_invalid_program() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteProgramCacheRepository::new(pool);

        repo.replace_all(&[program(1, "Alpha")]).await.unwrap();

        let result = repo.replace_all(&[program(2, " ")]).await;
        assert!(result.is_err());

        // Failed validation must not have touched the existing rows.
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn all_orders_by_name() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqliteProgramCacheRepository::new(pool);

        repo.replace_all(&[program(5, "Zulu"), program(9, "Alpha")])
            .await
            .unwrap();

        let names: Vec<_> = repo
            .all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Zulu"]);
    }
}
