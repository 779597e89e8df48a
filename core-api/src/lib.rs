//! # Catalog API Client
//!
//! WordPress REST API client for the program/episode catalog.
//!
//! ## Overview
//!
//! This crate manages:
//! - The [`CatalogApi`] trait and its [`WordPressClient`] implementation
//! - Wire models for posts, taxonomy terms and error bodies
//! - Error classification into the three kinds the app reacts to:
//!   `NoConnection`, `Server` (5xx) and `Api` (everything else)
//!
//! Requests go through the `bridge_traits::http::HttpClient` abstraction so
//! hosts control the actual transport.

pub mod client;
pub mod error;
pub mod models;

pub use client::{CatalogApi, WordPressClient, PROGRAMS_PER_PAGE};
pub use error::{ApiError, Result};
