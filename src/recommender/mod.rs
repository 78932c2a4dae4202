//! Recommendation engine and the fusion of its scoring pillars.

mod engine;
mod fusion;
mod recommendation;

pub use engine::{EngineStats, RecommendationEngine};
pub use fusion::fuse;
pub use recommendation::{rank, Pillar, Recommendation, RecommendationSource};
