//! Error types for the data-loader crate.
//!
//! Every variant here is a startup integrity failure: if loading the catalog
//! or the similarity matrix returns one of these, no query may be served.

use thiserror::Error;

/// Errors that can occur while loading and validating the catalog artifacts
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in data file couldn't be parsed
    ///
    /// Line numbers are 1-based and refer to the raw file, blank lines included
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A similarity row does not have one score per matrix row
    #[error("Similarity matrix is not square: row {row} has {found} scores, expected {expected}")]
    MatrixNotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Catalog and similarity matrix disagree on the number of movies
    #[error("Catalog has {catalog} movies but similarity matrix has {matrix} rows")]
    RowCountMismatch { catalog: usize, matrix: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
