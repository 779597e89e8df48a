//! # Desktop Bridge Implementations
//!
//! Default implementations of the bridge traits for desktop platforms
//! (macOS, Windows, Linux), used for development and integration testing of
//! the shared core. Mobile hosts ship their own adapters instead.
//!
//! - `HttpClient` using `reqwest`
//! - `SettingsStore` using a SQLite-backed key-value store
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{ReqwestHttpClient, SqliteSettingsStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let http = ReqwestHttpClient::new();
//!     let settings = SqliteSettingsStore::in_memory().await.unwrap();
//!     // Hand both to CoreConfig.
//! }
//! ```

pub mod http;
pub mod settings;

pub use http::ReqwestHttpClient;
pub use settings::{default_settings_path, SqliteSettingsStore};
