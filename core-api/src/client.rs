//! WordPress REST API client.
//!
//! Talks to the standard `/wp-json/wp/v2/` endpoints: the `posts` collection
//! for episodes and the `programa` taxonomy for programs. All requests are
//! plain GETs; responses are classified into the three [`ApiError`] kinds.
//! There is no automatic retry: a failed request surfaces immediately.

use crate::error::{ApiError, Result};
use crate::models::{WpErrorBody, WpPost, WpTerm};
use async_trait::async_trait;
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use core_library::models::{Episode, Program};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const PROGRAMS_PATH: &str = "/wp-json/wp/v2/programa";
const POSTS_PATH: &str = "/wp-json/wp/v2/posts";

/// Taxonomy query parameter used to filter posts by program.
const PROGRAM_FILTER_PARAM: &str = "programa";

/// Timeout for API requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size used when listing programs; the taxonomy is small enough that
/// one maximal page always covers it.
pub const PROGRAMS_PER_PAGE: u32 = 100;

/// Remote catalog operations.
///
/// Implemented by [`WordPressClient`]; the repository layer depends on this
/// trait so tests can substitute a scripted backend.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// All programs, ordered by name.
    async fn programs(&self) -> Result<Vec<Program>>;

    /// One page of a program's episodes, newest first.
    async fn episodes_for_program(
        &self,
        program_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Episode>>;

    /// One page of all episodes, newest first.
    async fn all_episodes(&self, page: u32, per_page: u32) -> Result<Vec<Episode>>;

    /// A single episode by post id. Missing ids surface as a 404-classified
    /// [`ApiError::Api`]; the caller decides whether that is an error.
    async fn episode(&self, id: i64) -> Result<Episode>;

    /// One page of full-text search results.
    async fn search_episodes(&self, term: &str, page: u32, per_page: u32) -> Result<Vec<Episode>>;
}

/// HTTP client for a WordPress-backed catalog.
pub struct WordPressClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl WordPressClient {
    /// Create a client for the given site base URL (scheme + host, no
    /// trailing slash required).
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn posts_request(&self, page: u32, per_page: u32) -> HttpRequest {
        HttpRequest::get(format!("{}{}", self.base_url, POSTS_PATH))
            .query("page", page)
            .query("per_page", per_page)
            .query("orderby", "date")
            .query("order", "desc")
            .query("_embed", "wp:featuredmedia")
            .timeout(REQUEST_TIMEOUT)
    }

    /// Execute a request and decode the JSON body.
    ///
    /// Transport failures become `NoConnection`, 5xx becomes `Server`, any
    /// other non-2xx becomes `Api` with the message from the WordPress error
    /// body when one is present. A 2xx body that fails to decode is also an
    /// `Api` error carrying the upstream status.
    async fn get_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        let url = request.url.clone();
        debug!(url = %url, "API request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(ApiError::from_transport)?;

        check_status(&response)?;

        serde_json::from_slice(&response.body).map_err(|e| {
            warn!(url = %url, error = %e, "Failed to decode API response");
            ApiError::Api {
                status: response.status,
                message: format!("malformed response body: {}", e),
            }
        })
    }
}

fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    if response.is_server_error() {
        return Err(ApiError::Server {
            status: response.status,
        });
    }

    let message = match serde_json::from_slice::<WpErrorBody>(&response.body) {
        Ok(body) if !body.message.is_empty() => body.message,
        Ok(body) if !body.code.is_empty() => body.code,
        _ => format!("HTTP {}", response.status),
    };
    Err(ApiError::Api {
        status: response.status,
        message,
    })
}

#[async_trait]
impl CatalogApi for WordPressClient {
    async fn programs(&self) -> Result<Vec<Program>> {
        let request = HttpRequest::get(format!("{}{}", self.base_url, PROGRAMS_PATH))
            .query("per_page", PROGRAMS_PER_PAGE)
            .query("orderby", "name")
            .query("order", "asc")
            .query("hide_empty", "false")
            .timeout(REQUEST_TIMEOUT);

        let terms: Vec<WpTerm> = self.get_json(request).await?;
        Ok(terms.into_iter().map(WpTerm::into_program).collect())
    }

    async fn episodes_for_program(
        &self,
        program_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Episode>> {
        let request = self
            .posts_request(page, per_page)
            .query(PROGRAM_FILTER_PARAM, program_id);

        let posts: Vec<WpPost> = self.get_json(request).await?;
        Ok(posts.into_iter().map(WpPost::into_episode).collect())
    }

    async fn all_episodes(&self, page: u32, per_page: u32) -> Result<Vec<Episode>> {
        let posts: Vec<WpPost> = self.get_json(self.posts_request(page, per_page)).await?;
        Ok(posts.into_iter().map(WpPost::into_episode).collect())
    }

    async fn episode(&self, id: i64) -> Result<Episode> {
        let request = HttpRequest::get(format!("{}{}/{}", self.base_url, POSTS_PATH, id))
            .query("_embed", "wp:featuredmedia")
            .timeout(REQUEST_TIMEOUT);

        let post: WpPost = self.get_json(request).await?;
        Ok(post.into_episode())
    }

    async fn search_episodes(&self, term: &str, page: u32, per_page: u32) -> Result<Vec<Episode>> {
        let request = self.posts_request(page, per_page).query("search", term);

        let posts: Vec<WpPost> = self.get_json(request).await?;
        Ok(posts.into_iter().map(WpPost::into_episode).collect())
    }
}
