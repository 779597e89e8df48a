//! Debounced episode search.
//!
//! Sits between a text field and [`ContentRepository::search_episodes`]:
//! every keystroke replaces the pending search, and only a query that
//! survives the debounce window reaches the network. Queries below the
//! minimum length clear the results immediately without any request.

use crate::repository::{ContentRepository, MIN_SEARCH_LEN};
use core_library::models::Episode;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Delay between the last keystroke and the network request.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(450);

/// Observable search state, published through a watch channel.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// No active query (empty or below the minimum length).
    Idle,
    /// The debounce window elapsed and a request is in flight.
    Searching,
    Results(Vec<Episode>),
    /// The request failed; the message is the classified error rendered
    /// for display.
    Failed(String),
}

/// Debounces query updates and runs at most one search at a time.
pub struct SearchDebouncer {
    repository: Arc<ContentRepository>,
    state: watch::Sender<SearchState>,
    pending: Mutex<Option<JoinHandle<()>>>,
    debounce: Duration,
    per_page: u32,
}

impl SearchDebouncer {
    pub fn new(repository: Arc<ContentRepository>) -> Self {
        let (state, _) = watch::channel(SearchState::Idle);
        Self {
            repository,
            state,
            pending: Mutex::new(None),
            debounce: SEARCH_DEBOUNCE,
            per_page: 20,
        }
    }

    /// Override the debounce window (tests use a short one).
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Subscribe to search state updates.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Report a new query value from the text field.
    ///
    /// Cancels any pending search. Short queries publish `Idle` right away;
    /// longer ones schedule a request after the debounce window.
    pub fn query_changed(&self, term: &str) {
        if let Some(previous) = self.pending.lock().unwrap().take() {
            previous.abort();
        }

        if term.chars().count() < MIN_SEARCH_LEN {
            let _ = self.state.send(SearchState::Idle);
            return;
        }

        let repository = self.repository.clone();
        let state = self.state.clone();
        let term = term.to_string();
        let debounce = self.debounce;
        let per_page = self.per_page;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            debug!(term = %term, "Running debounced search");
            let _ = state.send(SearchState::Searching);

            match repository.search_episodes(&term, 1, per_page).await {
                Ok(episodes) => {
                    let _ = state.send(SearchState::Results(episodes));
                }
                Err(error) => {
                    let _ = state.send(SearchState::Failed(error.to_string()));
                }
            }
        });

        *self.pending.lock().unwrap() = Some(handle);
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.lock().unwrap().take() {
            pending.abort();
        }
    }
}
