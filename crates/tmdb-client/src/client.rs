//! HTTP client for the TMDB movie endpoint.
//!
//! `try_*` methods report failures. The other fetch methods never fail: any
//! transport, status or decoding problem is logged and replaced by
//! placeholder data, so rendering code never has to handle an error.

use crate::config::TmdbConfig;
use crate::types::{MovieDetail, MovieMetadata, TmdbMovie};
use data_loader::MovieId;
use reqwest::Client as HttpClient;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Errors that can occur while fetching metadata from TMDB
#[derive(Error, Debug)]
pub enum MetadataError {
    /// Connection, TLS or body-read failure. The URL (and with it the API
    /// key) is stripped before the error is stored.
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    #[error("TMDB returned status {status} for movie {movie_id}")]
    Status { movie_id: MovieId, status: u16 },

    #[error("Malformed TMDB response for movie {movie_id}: {source}")]
    Decode {
        movie_id: MovieId,
        #[source]
        source: serde_json::Error,
    },
}

impl From<reqwest::Error> for MetadataError {
    fn from(e: reqwest::Error) -> Self {
        MetadataError::Http(e.without_url())
    }
}

/// Client for TMDB's `GET /movie/{id}` endpoint
#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Self {
        Self {
            http_client: HttpClient::new(),
            config,
        }
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    fn movie_url(&self, movie_id: MovieId) -> String {
        format!(
            "{}/movie/{}",
            self.config.api_url.trim_end_matches('/'),
            movie_id
        )
    }

    /// Fetch and decode the raw TMDB record for a movie
    pub async fn try_fetch_movie(&self, movie_id: MovieId) -> Result<TmdbMovie, MetadataError> {
        let response = self
            .http_client
            .get(self.movie_url(movie_id))
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("language", self.config.language.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Status {
                movie_id,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| MetadataError::Decode { movie_id, source })
    }

    /// Detail and poster for a movie, or the error that prevented it
    pub async fn try_fetch_metadata(&self, movie_id: MovieId) -> Result<MovieMetadata, MetadataError> {
        let movie = self.try_fetch_movie(movie_id).await?;
        Ok(MovieMetadata::from_response(&movie, &self.config.image_base_url))
    }

    /// Detail and poster for a movie; placeholders if the request fails
    #[instrument(skip(self))]
    pub async fn fetch_metadata(&self, movie_id: MovieId) -> MovieMetadata {
        match self.try_fetch_metadata(movie_id).await {
            Ok(metadata) => {
                debug!("Fetched metadata for movie {}", movie_id);
                metadata
            }
            Err(e) => {
                warn!(movie_id, error = %e, "Error fetching movie metadata");
                MovieMetadata::unavailable()
            }
        }
    }

    /// Details for a movie; fully defaulted if the request fails
    pub async fn fetch_details(&self, movie_id: MovieId) -> MovieDetail {
        self.fetch_metadata(movie_id).await.detail
    }

    /// Poster URL for a movie; a placeholder if there is none or the request fails
    pub async fn fetch_poster(&self, movie_id: MovieId) -> String {
        self.fetch_metadata(movie_id).await.poster_url
    }
}
