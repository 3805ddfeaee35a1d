//! # Recommendation Orchestrator
//!
//! Coordinates the two halves of a recommendation request:
//! 1. Rank neighbours of the selected title (pure, in memory)
//! 2. Fetch metadata for every neighbour concurrently
//! 3. Join the fetches in ranking order and return the complete batch
//!
//! The selected movie is never stored here. Callers hold that state and pass
//! the title in on every call.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, instrument};

use data_loader::{DataIndex, Movie, MovieId, SEARCH_RESULT_LIMIT};
use recommender::{RecommendError, SimilarityRecommender};
use tmdb_client::{MetadataProvider, MovieDetail, MovieMetadata};

/// A movie ready to display: catalog entry plus fetched metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    /// Similarity to the selected movie; `None` for the selected movie itself
    pub score: Option<f32>,
    pub poster_url: String,
    pub detail: MovieDetail,
}

impl MovieRecommendation {
    fn new(movie: &Movie, score: Option<f32>, metadata: MovieMetadata) -> Self {
        Self {
            movie_id: movie.id,
            title: movie.title.clone(),
            score,
            poster_url: metadata.poster_url,
            detail: metadata.detail,
        }
    }
}

/// Main orchestrator that coordinates recommendation and enrichment
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    data_index: Arc<DataIndex>,
    recommender: SimilarityRecommender,
    metadata: Arc<dyn MetadataProvider>,
}

impl RecommendationOrchestrator {
    /// Create a new orchestrator
    ///
    /// # Arguments
    /// * `data_index` - Shared, validated catalog and similarity matrix
    /// * `metadata` - Metadata source, usually a `TmdbClient`
    pub fn new(data_index: Arc<DataIndex>, metadata: Arc<dyn MetadataProvider>) -> Self {
        let recommender = SimilarityRecommender::new(data_index.clone());
        Self {
            data_index,
            recommender,
            metadata,
        }
    }

    /// Catalog titles containing `query`, case-insensitively (at most 8)
    pub fn search(&self, query: &str) -> Vec<Movie> {
        self.data_index
            .catalog()
            .search(query, SEARCH_RESULT_LIMIT)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Details of the selected movie
    ///
    /// Fails with `RecommendError::MovieNotFound` before any network call if
    /// the title is not in the catalog.
    #[instrument(skip(self))]
    pub async fn selected_movie(&self, title: &str) -> Result<MovieRecommendation> {
        let movie = self
            .data_index
            .catalog()
            .find_by_title(title)
            .ok_or_else(|| RecommendError::MovieNotFound {
                title: title.to_string(),
            })?;

        let metadata = self.metadata.fetch_metadata(movie.id).await;
        Ok(MovieRecommendation::new(movie, None, metadata))
    }

    /// Main entry point: recommendations for a selected title, with metadata
    ///
    /// # Returns
    /// Up to five recommendations, most similar first. Either every
    /// recommendation is returned with its metadata or an error is.
    #[instrument(skip(self))]
    pub async fn get_recommendations(&self, title: &str) -> Result<Vec<MovieRecommendation>> {
        let start_time = Instant::now();

        let ranked = self.recommender.recommend(title)?;
        debug!("Ranked {} neighbours for '{}'", ranked.len(), title);

        let movie_ids: Vec<MovieId> = ranked.iter().map(|rec| rec.movie.id).collect();
        let metadata = self.fetch_metadata_ordered(movie_ids).await?;

        let recommendations: Vec<MovieRecommendation> = ranked
            .iter()
            .zip(metadata)
            .map(|(rec, metadata)| MovieRecommendation::new(&rec.movie, Some(rec.score), metadata))
            .collect();

        info!(
            "Built {} recommendations for '{}' in {:.2?}",
            recommendations.len(),
            title,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Fetch metadata for every id concurrently, preserving input order
    async fn fetch_metadata_ordered(&self, movie_ids: Vec<MovieId>) -> Result<Vec<MovieMetadata>> {
        let handles: Vec<_> = movie_ids
            .into_iter()
            .map(|movie_id| {
                let metadata = Arc::clone(&self.metadata);
                tokio::spawn(async move { metadata.fetch_metadata(movie_id).await })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await.context("Metadata task panicked")?);
        }
        Ok(results)
    }
}
