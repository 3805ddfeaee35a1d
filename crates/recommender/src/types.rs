use data_loader::{Movie, MovieId};

/// Number of neighbours returned when no limit is configured
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;

/// One nearest neighbour of the selected movie
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub movie: Movie,
    /// Catalog row of `movie`
    pub row: usize,
    /// Similarity to the selected movie
    pub score: f32,
}

impl Recommendation {
    pub fn movie_id(&self) -> MovieId {
        self.movie.id
    }

    pub fn title(&self) -> &str {
        &self.movie.title
    }
}
