//! # Data Loader Crate
//!
//! Loads the movie catalog and its precomputed similarity matrix, and keeps
//! them as an immutable, row-aligned pair.
//!
//! ## Main Components
//!
//! - **types**: Movie, Catalog, SimilarityMatrix, DataIndex
//! - **parser**: Parse movies.dat and similarity.dat
//! - **index**: Load and validate the DataIndex from a directory
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{DataIndex, SEARCH_RESULT_LIMIT};
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(Path::new("data"))?;
//!
//! for movie in index.catalog().search("dark knight", SEARCH_RESULT_LIMIT) {
//!     println!("{} ({})", movie.title, movie.id);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::{MOVIES_FILE, SIMILARITY_FILE};
pub use types::{
    Catalog,
    DataIndex,
    Movie,
    MovieId,
    SimilarityMatrix,
    SEARCH_RESULT_LIMIT,
};
