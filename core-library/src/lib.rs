//! # Local Catalog Cache
//!
//! Owns the SQLite cache of programs and episodes that backs the cache-aside
//! repository in `core-data`.
//!
//! ## Overview
//!
//! This crate manages:
//! - SQLite pool configuration and embedded migrations
//! - Domain models (`Program`, `Episode`, `AudioRef`)
//! - Cache repositories with transactional wholesale replacement: a network
//!   refresh always deletes and reinserts the affected rows in a single
//!   transaction so readers never observe a partial set

pub mod db;
pub mod error;
pub mod models;
pub mod repositories;

pub use error::{CacheError, Result};
pub use models::{AudioRef, Episode, Program};
