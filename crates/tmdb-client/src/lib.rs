//! Movie metadata client for The Movie Database (TMDB).
//!
//! This crate turns a bare movie id into displayable details:
//! - Fetching `GET /movie/{id}` with the configured API key
//! - Filling absent fields with defaults so callers never null-check
//! - Composing poster URLs against the image host
//! - Containing failures: the infallible fetch methods log and return
//!   placeholder data instead of an error
//!
//! The API key comes from configuration (`TMDB_API_KEY`, optionally via a
//! `.env` file) and is kept out of logs and error messages.

pub mod client;
pub mod config;
pub mod types;

use async_trait::async_trait;
use data_loader::MovieId;

pub use client::{MetadataError, TmdbClient};
pub use config::TmdbConfig;
pub use types::{
    MovieDetail, MovieMetadata, TmdbMovie, DETAILS_UNAVAILABLE, NO_OVERVIEW, NO_POSTER_URL,
    POSTER_ERROR_URL, UNKNOWN_RELEASE_DATE,
};

/// Source of per-movie metadata
///
/// Implementations must always return usable data: failures are expected to
/// be logged and replaced with `MovieMetadata::unavailable()`.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch_metadata(&self, movie_id: MovieId) -> MovieMetadata;
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    async fn fetch_metadata(&self, movie_id: MovieId) -> MovieMetadata {
        TmdbClient::fetch_metadata(self, movie_id).await
    }
}
