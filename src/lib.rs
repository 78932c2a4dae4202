//! Pezzottify Recommender Library
//!
//! Builds a set of in-memory indexes over tracks, artists and listening
//! interactions, and combines four scoring pillars into ranked track
//! recommendations.

pub mod catalog;
pub mod config;
pub mod index;
pub mod recommender;
pub mod snapshot;

// Re-export commonly used types for convenience
pub use catalog::{Artist, Track, User, UserArtistInteraction, UserTrackInteraction};
pub use config::{AppConfig, PillarWeights, RecommenderSettings};
pub use recommender::{
    EngineStats, Pillar, Recommendation, RecommendationEngine, RecommendationSource,
};
pub use snapshot::{load_engine, Snapshot, SnapshotError, SnapshotProblem};
