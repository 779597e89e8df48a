//! # Core Runtime
//!
//! Runtime wiring for the shared core:
//! - Configuration management with fail-fast validation (`config`)
//! - Core assembly at launch (`app`)
//! - Logging and tracing infrastructure (`logging`)
//! - User preferences (`prefs`)

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod prefs;

pub use app::AppCore;
pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use prefs::{Preferences, ThemePreference};
