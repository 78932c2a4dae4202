use serde::{Serialize, Serializer};
use std::fmt;

/// Independent scoring strategies feeding the fused ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pillar {
    /// Nearest neighbors of liked tracks in audio feature space.
    Content,
    /// Tracks liked by the most similar users.
    UserCollaborative,
    /// Tracks of the artists the user plays the most.
    ArtistCollaborative,
    /// Tracks liked by the rest of the user's taste community.
    Community,
}

impl Pillar {
    pub const ALL: [Pillar; 4] = [
        Pillar::Content,
        Pillar::UserCollaborative,
        Pillar::ArtistCollaborative,
        Pillar::Community,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Pillar::Content => "content",
            Pillar::UserCollaborative => "actor-collab",
            Pillar::ArtistCollaborative => "category-collab",
            Pillar::Community => "community",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Pillar::Content => 0,
            Pillar::UserCollaborative => 1,
            Pillar::ArtistCollaborative => 2,
            Pillar::Community => 3,
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationSource {
    Pillar(Pillar),
    /// Fused result backed by more than one pillar.
    Hybrid,
}

impl RecommendationSource {
    pub fn tag(&self) -> &'static str {
        match self {
            RecommendationSource::Pillar(pillar) => pillar.tag(),
            RecommendationSource::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for RecommendationSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub track_id: String,
    pub title: String,
    pub score: f64,
    pub source: RecommendationSource,
}

/// Sorts by score descending, ties by track id, and keeps the first `n`.
pub fn rank(recommendations: &mut Vec<Recommendation>, n: usize) {
    recommendations.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.track_id.cmp(&b.track_id))
    });
    recommendations.truncate(n);
}
