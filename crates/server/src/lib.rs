//! Server crate for the movie recommendation browser.
//!
//! This crate contains the orchestrator that combines the similarity
//! recommender with the metadata client.

pub mod orchestrator;

pub use orchestrator::{MovieRecommendation, RecommendationOrchestrator};
