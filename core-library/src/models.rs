//! Domain models for the program/episode catalog.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Placeholder shown until a real episode duration is known.
pub const DEFAULT_DURATION: &str = "--:--";

/// A radio show/series, backed by a WordPress taxonomy term.
///
/// Identity is the numeric WordPress term id. Cached rows are replaced
/// wholesale on every successful refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Program {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub episode_count: Option<i64>,
    pub image_url: Option<String>,
}

impl Program {
    /// Validate invariants before the row is written to the cache.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.id <= 0 {
            return Err(format!("program id must be positive, got {}", self.id));
        }
        if self.name.trim().is_empty() {
            return Err("program name cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Where an episode's audio URL came from.
///
/// WordPress installs carry the URL either in the dedicated audio meta field
/// or in the legacy enclosure meta; callers only ever need [`AudioRef::url`],
/// the origin is kept for diagnostics and cache round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum AudioRef {
    /// URL from the current audio meta field.
    Stream(String),
    /// URL recovered from the legacy enclosure meta.
    Enclosure(String),
}

impl AudioRef {
    /// The playable URL, regardless of origin.
    pub fn url(&self) -> &str {
        match self {
            AudioRef::Stream(url) | AudioRef::Enclosure(url) => url,
        }
    }

    /// Column pair `(kind, url)` for cache storage.
    pub fn as_columns(&self) -> (&'static str, &str) {
        match self {
            AudioRef::Stream(url) => ("stream", url),
            AudioRef::Enclosure(url) => ("enclosure", url),
        }
    }

    /// Rebuild from cache columns. Unknown kinds are treated as absent.
    pub fn from_columns(kind: Option<&str>, url: Option<String>) -> Option<Self> {
        match (kind, url) {
            (Some("stream"), Some(url)) => Some(AudioRef::Stream(url)),
            (Some("enclosure"), Some(url)) => Some(AudioRef::Enclosure(url)),
            _ => None,
        }
    }
}

/// A single audio post, associated with zero or more programs.
///
/// Title/content/excerpt are the rendered HTML strings straight from the
/// API. Identity is the numeric post id; the cache additionally keys rows by
/// the owning program id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub slug: String,
    pub published_at: NaiveDateTime,
    pub audio: Option<AudioRef>,
    pub image_url: Option<String>,
    pub program_ids: Vec<i64>,
    /// Mutable display duration, updated once the player knows the real one.
    pub duration: String,
}

impl Episode {
    /// Validate invariants before the row is written to the cache.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.id <= 0 {
            return Err(format!("episode id must be positive, got {}", self.id));
        }
        if self.title.trim().is_empty() {
            return Err("episode title cannot be empty".to_string());
        }
        Ok(())
    }

    /// The playable audio URL, if the post carries one in either meta field.
    pub fn audio_url(&self) -> Option<&str> {
        self.audio.as_ref().map(AudioRef::url)
    }
}
