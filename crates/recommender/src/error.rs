use thiserror::Error;

/// Errors returned by the recommender
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// The selected title is not in the catalog (exact, case-sensitive match)
    #[error("Movie not found: {title}")]
    MovieNotFound { title: String },
}

pub type Result<T> = std::result::Result<T, RecommendError>;
