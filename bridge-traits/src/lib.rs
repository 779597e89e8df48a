//! # Host Bridge Traits
//!
//! Platform abstraction traits that each host platform implements for the
//! RadioCast core.
//!
//! ## Overview
//!
//! This crate defines the contract between the shared core and the
//! platform-specific host (Android, iOS, or the desktop development shim).
//! Each trait represents a capability the core requires but that must be
//! implemented differently per platform.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - async HTTP GET against the REST API
//! - [`SettingsStore`](storage::SettingsStore) - key-value preferences storage
//!   (SharedPreferences / UserDefaults / SQLite on desktop)
//! - [`MediaPlayer`](player::MediaPlayer) - native media player control
//!   surface (ExoPlayer / AVPlayer / dev stub)
//! - [`LoggerSink`](log::LoggerSink) - forward structured logs to the host
//!   (Logcat / os_log)
//! - [`Clock`](time::Clock) - injectable time source for deterministic
//!   timestamps
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Transport
//! failures carry enough classification (timeout vs. connect failure) for the
//! API layer to map them onto user-facing error kinds. Platform
//! implementations should convert native errors to `BridgeError` and include
//! context (URLs, keys) in the message.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` so they can be shared across async tasks.

pub mod error;
pub mod http;
pub mod log;
pub mod player;
pub mod storage;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use log::{LogEntry, LogLevel, LoggerSink};
pub use player::{MediaPlayer, MediaSource, PlayerState};
pub use storage::SettingsStore;
pub use time::{Clock, SystemClock};
