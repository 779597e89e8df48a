//! Cache-aside content repository.
//!
//! Combines the [`CatalogApi`] network client with the SQLite cache
//! repositories from `core-library`. The network is authoritative whenever it
//! is reachable: a successful fetch replaces the affected cached rows and its
//! result is returned as-is. The cache only answers when the network fails,
//! and search never touches it at all.

use crate::error::{DataError, Result};
use core_api::CatalogApi;
use core_library::models::{Episode, Program};
use core_library::repositories::{EpisodeCacheRepository, ProgramCacheRepository};
use std::sync::Arc;
use tracing::{debug, warn};

/// Search terms shorter than this never reach the network.
pub const MIN_SEARCH_LEN: usize = 3;

/// Read-through access to the program/episode catalog.
pub struct ContentRepository {
    api: Arc<dyn CatalogApi>,
    programs: Arc<dyn ProgramCacheRepository>,
    episodes: Arc<dyn EpisodeCacheRepository>,
}

impl ContentRepository {
    pub fn new(
        api: Arc<dyn CatalogApi>,
        programs: Arc<dyn ProgramCacheRepository>,
        episodes: Arc<dyn EpisodeCacheRepository>,
    ) -> Self {
        Self {
            api,
            programs,
            episodes,
        }
    }

    /// All programs.
    ///
    /// On network success the cached set is replaced wholesale and the fresh
    /// list returned. On any network error the snapshot taken before the call
    /// is returned unmodified, even when it is empty.
    pub async fn programs(&self) -> Result<Vec<Program>> {
        let snapshot = self.programs.all().await?;

        match self.api.programs().await {
            Ok(fresh) => {
                self.programs.replace_all(&fresh).await?;
                debug!(count = fresh.len(), "Refreshed program catalog");
                Ok(fresh)
            }
            Err(error) => {
                warn!(
                    error = %error,
                    cached = snapshot.len(),
                    "Program refresh failed, serving cached set"
                );
                Ok(snapshot)
            }
        }
    }

    /// A single program by id.
    ///
    /// Filters the result of [`programs`](Self::programs), so every lookup
    /// also refreshes the cached program set.
    pub async fn program(&self, id: i64) -> Result<Option<Program>> {
        let programs = self.programs().await?;
        Ok(programs.into_iter().find(|p| p.id == id))
    }

    /// One page of a program's episodes, newest first.
    ///
    /// Page 1 successes replace the program's cached episodes; later pages
    /// are returned without caching. On network error the cached episodes are
    /// returned if there are any, otherwise the classified error propagates.
    pub async fn episodes_for_program(
        &self,
        program_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Episode>> {
        match self
            .api
            .episodes_for_program(program_id, page, per_page)
            .await
        {
            Ok(fresh) => {
                if page == 1 {
                    self.episodes.replace_for_program(program_id, &fresh).await?;
                }
                Ok(fresh)
            }
            Err(error) => {
                let cached = self.episodes.for_program(program_id).await?;
                if cached.is_empty() {
                    Err(error.into())
                } else {
                    warn!(
                        program_id = program_id,
                        error = %error,
                        cached = cached.len(),
                        "Episode refresh failed, serving cached episodes"
                    );
                    Ok(cached)
                }
            }
        }
    }

    /// One page across all episodes. Network only, errors propagate.
    pub async fn all_episodes(&self, page: u32, per_page: u32) -> Result<Vec<Episode>> {
        Ok(self.api.all_episodes(page, per_page).await?)
    }

    /// A single episode by id. Network only; a missing id is `Ok(None)`.
    pub async fn episode(&self, id: i64) -> Result<Option<Episode>> {
        match self.api.episode(id).await {
            Ok(episode) => Ok(Some(episode)),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    /// Full-text search. Network only, never cached; terms below
    /// [`MIN_SEARCH_LEN`] return empty without issuing a request.
    pub async fn search_episodes(
        &self,
        term: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Episode>> {
        if term.chars().count() < MIN_SEARCH_LEN {
            return Ok(Vec::new());
        }
        Ok(self.api.search_episodes(term, page, per_page).await?)
    }
}
