//! # Recommender Crate
//!
//! Content-based movie recommendations from a precomputed similarity matrix:
//! "movies most similar to the one you picked".
//!
//! The recommender is a pure function of the loaded `DataIndex`. It never
//! touches the network and gives the same answer for the same title every
//! time.
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommender::SimilarityRecommender;
//! use data_loader::DataIndex;
//! use std::sync::Arc;
//!
//! let data_index = Arc::new(DataIndex::load_from_files("data".as_ref())?);
//! let recommender = SimilarityRecommender::new(data_index);
//!
//! for rec in recommender.recommend("Avatar")? {
//!     println!("{} ({:.3})", rec.movie.title, rec.score);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod similarity;

// Re-export commonly used types
pub use error::{RecommendError, Result};
pub use similarity::{SimilarityRecommender, rank_neighbors};
pub use types::{DEFAULT_RECOMMENDATION_LIMIT, Recommendation};
