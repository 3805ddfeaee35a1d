//! Response and display types for movie metadata.
//!
//! `TmdbMovie` mirrors the subset of `GET /movie/{id}` that we read; every
//! field is optional on the wire. `MovieDetail` is what callers see, with
//! every absent field already replaced by its default.

use serde::{Deserialize, Serialize};

/// Overview shown when the API has none for a movie
pub const NO_OVERVIEW: &str = "No overview available";

/// Overview shown when the metadata request itself failed
pub const DETAILS_UNAVAILABLE: &str = "Details not available";

/// Release date shown when the API has none
pub const UNKNOWN_RELEASE_DATE: &str = "Unknown";

/// Poster shown for movies without a poster path
pub const NO_POSTER_URL: &str = "https://via.placeholder.com/500x750.png?text=No+Poster+Available";

/// Poster shown when the metadata request failed
pub const POSTER_ERROR_URL: &str =
    "https://via.placeholder.com/500x750.png?text=Error+Loading+Poster";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbGenre {
    pub name: Option<String>,
}

/// Raw movie record as returned by TMDB
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovie {
    pub genres: Option<Vec<TmdbGenre>>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f32>,
    pub runtime: Option<u32>,
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
}

impl TmdbMovie {
    /// Full poster URL, or the "no poster" placeholder when there is no path
    pub fn poster_url(&self, image_base_url: &str) -> String {
        match self.poster_path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => format!(
                "{}/{}",
                image_base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            _ => NO_POSTER_URL.to_string(),
        }
    }
}

/// Displayable details for one movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetail {
    pub overview: String,
    /// ISO date (`YYYY-MM-DD`) or `"Unknown"`
    pub release_date: String,
    /// Average vote, 0 to 10
    pub rating: f32,
    /// Minutes
    pub runtime: u32,
    pub popularity: f64,
    pub genres: Vec<String>,
}

impl MovieDetail {
    /// Fully defaulted detail used when the request failed
    pub fn unavailable() -> Self {
        Self {
            overview: DETAILS_UNAVAILABLE.to_string(),
            release_date: UNKNOWN_RELEASE_DATE.to_string(),
            rating: 0.0,
            runtime: 0,
            popularity: 0.0,
            genres: Vec::new(),
        }
    }

    /// Year part of the release date, if the date is known
    pub fn release_year(&self) -> Option<&str> {
        if self.release_date == UNKNOWN_RELEASE_DATE {
            return None;
        }
        self.release_date.split('-').next().filter(|year| !year.is_empty())
    }

    /// Rating on a five-star scale, rounded down
    pub fn star_count(&self) -> u8 {
        (self.rating / 2.0).floor().clamp(0.0, 5.0) as u8
    }
}

impl From<&TmdbMovie> for MovieDetail {
    fn from(movie: &TmdbMovie) -> Self {
        let genres = movie
            .genres
            .iter()
            .flatten()
            .filter_map(|genre| genre.name.clone())
            .collect();

        let release_date = movie
            .release_date
            .clone()
            .filter(|date| !date.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_RELEASE_DATE.to_string());

        Self {
            overview: movie
                .overview
                .clone()
                .unwrap_or_else(|| NO_OVERVIEW.to_string()),
            release_date,
            rating: movie.vote_average.unwrap_or(0.0),
            runtime: movie.runtime.unwrap_or(0),
            popularity: movie.popularity.unwrap_or(0.0),
            genres,
        }
    }
}

/// Detail and poster for one movie, from a single API round trip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieMetadata {
    pub detail: MovieDetail,
    pub poster_url: String,
}

impl MovieMetadata {
    pub fn from_response(movie: &TmdbMovie, image_base_url: &str) -> Self {
        Self {
            detail: MovieDetail::from(movie),
            poster_url: movie.poster_url(image_base_url),
        }
    }

    /// Placeholder metadata for a failed request
    pub fn unavailable() -> Self {
        Self {
            detail: MovieDetail::unavailable(),
            poster_url: POSTER_ERROR_URL.to_string(),
        }
    }
}
