//! # Content Data Layer
//!
//! The shared data layer between the catalog API and the local cache.
//!
//! ## Components
//!
//! - **Content Repository** (`repository`): cache-aside read-through access
//!   to programs and episodes; the network wins when reachable, the cache
//!   answers when it is not
//! - **Remote Configuration** (`remote_config`): one fetch per launch with
//!   fallback to the persisted blob and then compiled defaults
//! - **Search** (`search`): debounced, minimum-length-gated network search

pub mod error;
pub mod remote_config;
pub mod repository;
pub mod search;

pub use error::{DataError, Result};
pub use remote_config::{AppConfig, ConfigLoader, CONFIG_SETTINGS_KEY};
pub use repository::{ContentRepository, MIN_SEARCH_LEN};
pub use search::{SearchDebouncer, SearchState, SEARCH_DEBOUNCE};
