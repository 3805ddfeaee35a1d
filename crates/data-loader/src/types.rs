//! Core domain types for the movie catalog.
//!
//! The catalog and the similarity matrix are loaded once and never mutated.
//! Row `i` of the catalog and row/column `i` of the matrix describe the same
//! movie; `DataIndex` is the only type that ties the two together, and it can
//! only be built when their sizes agree.

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// =============================================================================
// Type Aliases
// =============================================================================

/// TMDB identifier of a movie, used as the key for metadata lookups
pub type MovieId = u32;

/// Maximum number of matches returned by a title search
pub const SEARCH_RESULT_LIMIT: usize = 8;

// =============================================================================
// Movie
// =============================================================================

/// Represents a movie in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    /// Display title. Not guaranteed unique across the catalog.
    pub title: String,
    /// Precomputed feature text the similarity matrix was built from.
    /// Carried along for completeness, never read by the recommender.
    pub tags: String,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            tags: String::new(),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Ordered table of known movies. Row order is fixed at load time.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Get the movie stored at a row
    pub fn get(&self, row: usize) -> Option<&Movie> {
        self.movies.get(row)
    }

    /// Row index of the first movie whose title equals `title` exactly.
    ///
    /// Duplicate titles resolve to the earliest row.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.movies.iter().position(|movie| movie.title == title)
    }

    /// First movie whose title equals `title` exactly
    pub fn find_by_title(&self, title: &str) -> Option<&Movie> {
        self.position(title).map(|row| &self.movies[row])
    }

    /// Case-insensitive substring search over titles, in catalog order.
    ///
    /// Returns at most `limit` movies. A blank query matches nothing; any
    /// other query is matched as given, surrounding spaces included.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Movie> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        self.movies
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter()
    }
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Square matrix of pairwise similarity scores, stored row-major.
///
/// Symmetry is not enforced and self-similarity is not assumed to be the
/// largest value of its row.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    dimension: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from its rows, rejecting anything that is not square
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dimension = rows.len();
        let mut scores = Vec::with_capacity(dimension * dimension);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != dimension {
                return Err(DataLoadError::MatrixNotSquare {
                    row,
                    expected: dimension,
                    found: values.len(),
                });
            }
            scores.extend(values);
        }

        Ok(Self { dimension, scores })
    }

    /// Number of rows (and columns)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Similarity of movie `row` to every movie, itself included
    pub fn row(&self, row: usize) -> Option<&[f32]> {
        if row >= self.dimension {
            return None;
        }
        let start = row * self.dimension;
        Some(&self.scores[start..start + self.dimension])
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f32> {
        self.row(row).and_then(|values| values.get(column).copied())
    }
}

// =============================================================================
// DataIndex - validated catalog + matrix pair
// =============================================================================

/// The catalog and its similarity matrix, checked to be row-aligned.
///
/// Both halves sit behind `Arc`, so cloning an index never copies the matrix.
#[derive(Debug, Clone)]
pub struct DataIndex {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) similarity: Arc<SimilarityMatrix>,
}

impl DataIndex {
    /// Pair a catalog with its matrix.
    ///
    /// Fails with `RowCountMismatch` when the two disagree on the number of
    /// movies. This is the only place alignment is checked; queries trust it.
    pub fn new(catalog: Catalog, similarity: SimilarityMatrix) -> Result<Self> {
        if catalog.len() != similarity.dimension() {
            return Err(DataLoadError::RowCountMismatch {
                catalog: catalog.len(),
                matrix: similarity.dimension(),
            });
        }

        Ok(Self {
            catalog: Arc::new(catalog),
            similarity: Arc::new(similarity),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Number of movies
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}
