//! # Cache Repositories
//!
//! Repository traits and SQLite implementations for the cached catalog.
//!
//! ## Architecture
//!
//! - Traits define the interface, SQLite implementations use sqlx
//! - Writes always replace the affected row set wholesale inside a single
//!   transaction, so a reader sees either the old set or the new one
//! - The cache holds no partial pages: episode rows for a program are the
//!   page-1 snapshot of the last successful refresh

pub mod episode;
pub mod program;

pub use episode::{EpisodeCacheRepository, SqliteEpisodeCacheRepository};
pub use program::{ProgramCacheRepository, SqliteProgramCacheRepository};
