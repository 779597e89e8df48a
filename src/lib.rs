//! Workspace facade crate.
//!
//! Exposes feature flags that map to the individual workspace crates so host
//! applications can depend on `radiocast-workspace` and enable the documented
//! features without wiring each crate individually. Mobile hosts should use
//! the `mobile` feature and inject their own bridge implementations; the
//! default `desktop-shims` feature pulls in the reqwest/SQLite dev bridges.

#[cfg(any(feature = "desktop-shims", feature = "mobile"))]
pub use core_data;
#[cfg(any(feature = "desktop-shims", feature = "mobile"))]
pub use core_playback;
#[cfg(any(feature = "desktop-shims", feature = "mobile"))]
pub use core_runtime;
