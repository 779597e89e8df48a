//! Episode cache repository trait and SQLite implementation.
//!
//! Episodes are cached per owning program id: the rows for a program are the
//! page-1 snapshot of the last successful refresh and are replaced wholesale.

use crate::error::{CacheError, Result};
use crate::models::{AudioRef, Episode};
use async_trait::async_trait;
use bridge_traits::time::{Clock, SystemClock};
use chrono::NaiveDateTime;
use sqlx::{query_as, FromRow, SqlitePool};
use std::sync::Arc;
use tracing::debug;

/// Cached-episode access.
#[async_trait]
pub trait EpisodeCacheRepository: Send + Sync {
    /// Cached episodes for a program, newest first.
    async fn for_program(&self, program_id: i64) -> Result<Vec<Episode>>;

    /// Atomically replace the cached episodes for `program_id`.
    ///
    /// Deletes the program's rows and reinserts `episodes` in one
    /// transaction. Rows belonging to other programs are untouched.
    async fn replace_for_program(&self, program_id: i64, episodes: &[Episode]) -> Result<()>;

    /// Number of cached episodes for a program.
    async fn count_for_program(&self, program_id: i64) -> Result<i64>;
}

/// Flat row shape; `program_ids` is a JSON array column and audio is split
/// into kind + url.
#[derive(FromRow)]
struct EpisodeRow {
    id: i64,
    title: String,
    content: String,
    excerpt: String,
    slug: String,
    published_at: NaiveDateTime,
    audio_kind: Option<String>,
    audio_url: Option<String>,
    image_url: Option<String>,
    program_ids: String,
    duration: String,
}

impl EpisodeRow {
    fn into_episode(self) -> Result<Episode> {
        let program_ids: Vec<i64> = serde_json::from_str(&self.program_ids).map_err(|e| {
            CacheError::Corrupt(format!("episode {}: bad program_ids: {}", self.id, e))
        })?;

        Ok(Episode {
            id: self.id,
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            slug: self.slug,
            published_at: self.published_at,
            audio: AudioRef::from_columns(self.audio_kind.as_deref(), self.audio_url),
            image_url: self.image_url,
            program_ids,
            duration: self.duration,
        })
    }
}

/// SQLite implementation of [`EpisodeCacheRepository`].
pub struct SqliteEpisodeCacheRepository {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl SqliteEpisodeCacheRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    /// Use an explicit time source for `cached_at` stamps.
    pub fn with_clock(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

#[async_trait]
impl EpisodeCacheRepository for SqliteEpisodeCacheRepository {
    async fn for_program(&self, program_id: i64) -> Result<Vec<Episode>> {
        let rows = query_as::<_, EpisodeRow>(
            "SELECT id, title, content, excerpt, slug, published_at, \
                    audio_kind, audio_url, image_url, program_ids, duration \
             FROM episodes WHERE program_id = ? ORDER BY published_at DESC",
        )
        .bind(program_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(EpisodeRow::into_episode).collect()
    }

    async fn replace_for_program(&self, program_id: i64, episodes: &[Episode]) -> Result<()> {
        for episode in episodes {
            episode.validate().map_err(|msg| CacheError::InvalidInput {
                field: "episode".to_string(),
                message: msg,
            })?;
        }

        let cached_at = self.clock.unix_timestamp();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM episodes WHERE program_id = ?")
            .bind(program_id)
            .execute(&mut *tx)
            .await?;

        for episode in episodes {
            let (audio_kind, audio_url) = match &episode.audio {
                Some(audio) => {
                    let (kind, url) = audio.as_columns();
                    (Some(kind), Some(url.to_string()))
                }
                None => (None, None),
            };
            let program_ids = serde_json::to_string(&episode.program_ids).map_err(|e| {
                CacheError::InvalidInput {
                    field: "program_ids".to_string(),
                    message: e.to_string(),
                }
            })?;

            sqlx::query(
                "INSERT INTO episodes (program_id, id, title, content, excerpt, slug, \
                                       published_at, audio_kind, audio_url, image_url, \
                                       program_ids, duration, cached_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(program_id)
            .bind(episode.id)
            .bind(&episode.title)
            .bind(&episode.content)
            .bind(&episode.excerpt)
            .bind(&episode.slug)
            .bind(episode.published_at)
            .bind(audio_kind)
            .bind(audio_url)
            .bind(&episode.image_url)
            .bind(program_ids)
            .bind(&episode.duration)
            .bind(cached_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(
            program_id = program_id,
            count = episodes.len(),
            "Replaced cached episodes for program"
        );
        Ok(())
    }

    async fn count_for_program(&self, program_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM episodes WHERE program_id = ?")
            .bind(program_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
