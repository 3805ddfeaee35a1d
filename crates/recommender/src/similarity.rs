//! Similarity Recommender - nearest neighbours from a precomputed matrix
//!
//! ## Algorithm
//! 1. Resolve the selected title to its catalog row (first exact match)
//! 2. Read that row of the similarity matrix as (index, score) pairs
//! 3. Stable sort by score, highest first; equal scores keep catalog order
//! 4. Drop the selected movie itself and keep the next `limit`
//! 5. Map each index back to its catalog entry

use crate::error::{RecommendError, Result};
use crate::types::{DEFAULT_RECOMMENDATION_LIMIT, Recommendation};
use data_loader::DataIndex;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Recommends the movies most similar to a selected title
#[derive(Debug, Clone)]
pub struct SimilarityRecommender {
    /// Shared reference to the data index
    data_index: Arc<DataIndex>,

    /// Maximum number of neighbours returned
    limit: usize,
}

impl SimilarityRecommender {
    /// Create a new recommender returning up to five neighbours
    pub fn new(data_index: Arc<DataIndex>) -> Self {
        Self {
            data_index,
            limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }

    /// Configure the number of neighbours returned (default: 5)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Recommend the movies most similar to `title`
    ///
    /// Returns `min(limit, catalog size - 1)` movies, best first. Fails with
    /// `MovieNotFound` when the title is not in the catalog.
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str) -> Result<Vec<Recommendation>> {
        let catalog = self.data_index.catalog();

        let row = catalog
            .position(title)
            .ok_or_else(|| RecommendError::MovieNotFound {
                title: title.to_string(),
            })?;

        // DataIndex guarantees every catalog row has a matrix row
        let scores = self.data_index.similarity().row(row).unwrap_or(&[]);

        let recommendations: Vec<Recommendation> = rank_neighbors(scores, row, self.limit)
            .into_iter()
            .filter_map(|(index, score)| {
                catalog.get(index).map(|movie| Recommendation {
                    movie: movie.clone(),
                    row: index,
                    score,
                })
            })
            .collect();

        debug!(
            "Found {} neighbours for '{}' (row {})",
            recommendations.len(),
            title,
            row
        );
        Ok(recommendations)
    }

    /// Titles of the recommended movies, best first
    pub fn recommend_titles(&self, title: &str) -> Result<Vec<String>> {
        Ok(self
            .recommend(title)?
            .into_iter()
            .map(|rec| rec.movie.title)
            .collect())
    }
}

/// Rank a similarity row, excluding the `exclude` column
///
/// Returns up to `limit` (index, score) pairs sorted by descending score.
/// The sort is stable, so equal scores come out in ascending index order.
/// NaN ranks below every other score and `-0.0` ties with `0.0`.
pub fn rank_neighbors(scores: &[f32], exclude: usize, limit: usize) -> Vec<(usize, f32)> {
    let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| rank_key(b.1).total_cmp(&rank_key(a.1)));

    ranked
        .into_iter()
        .filter(|&(index, _)| index != exclude)
        .take(limit)
        .collect()
}

fn rank_key(score: f32) -> f32 {
    // + 0.0 folds -0.0 into 0.0
    if score.is_nan() { f32::NEG_INFINITY } else { score + 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{Catalog, Movie, SimilarityMatrix};

    fn build_index(titles: &[&str], rows: Vec<Vec<f32>>) -> Arc<DataIndex> {
        let movies = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Movie::new(i as u32 + 1, *title))
            .collect();
        let matrix = SimilarityMatrix::from_rows(rows).unwrap();
        Arc::new(DataIndex::new(Catalog::new(movies), matrix).unwrap())
    }

    #[test]
    fn test_three_movie_example() {
        let index = build_index(
            &["Alpha", "Beta", "Gamma"],
            vec![
                vec![1.0, 0.8, 0.3],
                vec![0.8, 1.0, 0.5],
                vec![0.3, 0.5, 1.0],
            ],
        );
        let recommender = SimilarityRecommender::new(index);

        let titles = recommender.recommend_titles("Alpha").unwrap();
        assert_eq!(titles, vec!["Beta", "Gamma"]);
    }

    #[test]
    fn test_unknown_title() {
        let index = build_index(&["Alpha"], vec![vec![1.0]]);
        let recommender = SimilarityRecommender::new(index);

        let err = recommender.recommend("alpha").unwrap_err();
        assert_eq!(
            err,
            RecommendError::MovieNotFound {
                title: "alpha".to_string()
            }
        );
    }

    #[test]
    fn test_single_movie_catalog_returns_nothing() {
        let index = build_index(&["Alpha"], vec![vec![1.0]]);
        let recommender = SimilarityRecommender::new(index);

        assert!(recommender.recommend("Alpha").unwrap().is_empty());
    }

    #[test]
    fn test_self_excluded_even_when_not_maximal() {
        let index = build_index(
            &["Alpha", "Beta", "Gamma"],
            vec![
                vec![0.1, 0.9, 0.4],
                vec![0.9, 1.0, 0.2],
                vec![0.4, 0.2, 1.0],
            ],
        );
        let recommender = SimilarityRecommender::new(index);

        let recs = recommender.recommend("Alpha").unwrap();
        let rows: Vec<usize> = recs.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn test_scores_carried_through() {
        let index = build_index(
            &["Alpha", "Beta", "Gamma"],
            vec![
                vec![1.0, 0.8, 0.3],
                vec![0.8, 1.0, 0.5],
                vec![0.3, 0.5, 1.0],
            ],
        );
        let recs = SimilarityRecommender::new(index).recommend("Gamma").unwrap();

        assert_eq!(recs[0].title(), "Beta");
        assert_eq!(recs[0].score, 0.5);
        assert_eq!(recs[0].movie_id(), 2);
        assert_eq!(recs[1].score, 0.3);
    }

    #[test]
    fn test_rank_neighbors_ties_keep_index_order() {
        let ranked = rank_neighbors(&[1.0, 0.5, 0.7, 0.5, 0.7], 0, 5);
        let order: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_rank_neighbors_signed_zeros_tie() {
        let ranked = rank_neighbors(&[1.0, -0.0, 0.0], 0, 5);
        let order: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![1, 2]);

        let ranked = rank_neighbors(&[0.0, 0.3, -0.0, 0.0, -0.1], 1, 5);
        let order: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![0, 2, 3, 4]);
    }

    #[test]
    fn test_rank_neighbors_nan_sorts_last() {
        let ranked = rank_neighbors(&[1.0, f32::NAN, 0.2, -0.5], 0, 5);
        let order: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_rank_neighbors_respects_limit() {
        let scores: Vec<f32> = (0..10).map(|i| i as f32 / 10.0).collect();
        let ranked = rank_neighbors(&scores, 9, 5);
        let order: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![8, 7, 6, 5, 4]);
    }

    #[test]
    fn test_with_limit() {
        let index = build_index(
            &["Alpha", "Beta", "Gamma"],
            vec![
                vec![1.0, 0.8, 0.3],
                vec![0.8, 1.0, 0.5],
                vec![0.3, 0.5, 1.0],
            ],
        );
        let recommender = SimilarityRecommender::new(index).with_limit(1);

        assert_eq!(recommender.limit(), 1);
        assert_eq!(recommender.recommend_titles("Alpha").unwrap(), vec!["Beta"]);
    }
}
