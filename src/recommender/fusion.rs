//! Weighted fusion of pillar outputs.
//!
//! Every pillar contributes `raw_score * weight(pillar)` to a track. The
//! contributions are stored per pillar and summed in the fixed order of
//! [`Pillar::ALL`], so the fused score doesn't depend on the order in which
//! pillar results are fed in.

use super::recommendation::{rank, Pillar, Recommendation, RecommendationSource};
use crate::config::PillarWeights;
use std::collections::HashMap;

impl PillarWeights {
    pub fn weight_of(&self, pillar: Pillar) -> f64 {
        match pillar {
            Pillar::Content => self.content,
            Pillar::UserCollaborative => self.user_collaborative,
            Pillar::ArtistCollaborative => self.artist_collaborative,
            Pillar::Community => self.community,
        }
    }
}

struct FusedTrack {
    title: String,
    contributions: [Option<f64>; 4],
}

/// Merges the ranked lists of several pillars into one list of `n` results.
pub fn fuse(
    pillar_results: Vec<(Pillar, Vec<Recommendation>)>,
    weights: &PillarWeights,
    n: usize,
) -> Vec<Recommendation> {
    let mut fused: HashMap<String, FusedTrack> = HashMap::new();

    for (pillar, recommendations) in pillar_results {
        let weight = weights.weight_of(pillar);
        for recommendation in recommendations {
            let entry = fused
                .entry(recommendation.track_id)
                .or_insert_with(|| FusedTrack {
                    title: recommendation.title,
                    contributions: [None; 4],
                });
            let slot = entry.contributions[pillar.index()].get_or_insert(0.0);
            *slot += recommendation.score * weight;
        }
    }

    let mut results: Vec<Recommendation> = fused
        .into_iter()
        .map(|(track_id, track)| {
            let mut contributing = Pillar::ALL
                .iter()
                .filter(|pillar| track.contributions[pillar.index()].is_some());
            let source = match (contributing.next(), contributing.next()) {
                (Some(pillar), None) => RecommendationSource::Pillar(*pillar),
                _ => RecommendationSource::Hybrid,
            };
            let score = track.contributions.iter().flatten().sum();
            Recommendation {
                track_id,
                title: track.title,
                score,
                source,
            }
        })
        .collect();

    rank(&mut results, n);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, score: f64, pillar: Pillar) -> Recommendation {
        Recommendation {
            track_id: id.to_string(),
            title: format!("Title {}", id),
            score,
            source: RecommendationSource::Pillar(pillar),
        }
    }

    fn sample_results() -> Vec<(Pillar, Vec<Recommendation>)> {
        vec![
            (
                Pillar::Content,
                vec![rec("x", 3.0, Pillar::Content), rec("y", 1.0, Pillar::Content)],
            ),
            (
                Pillar::UserCollaborative,
                vec![rec("x", 0.7, Pillar::UserCollaborative)],
            ),
            (
                Pillar::ArtistCollaborative,
                vec![rec("z", 0.3, Pillar::ArtistCollaborative)],
            ),
            (
                Pillar::Community,
                vec![rec("x", 2.0, Pillar::Community), rec("y", 1.0, Pillar::Community)],
            ),
        ]
    }

    #[test]
    fn sums_weighted_contributions() {
        let weights = PillarWeights::default();
        let fused = fuse(sample_results(), &weights, 10);

        let x = fused.iter().find(|r| r.track_id == "x").unwrap();
        assert_eq!(x.score, 3.0 * 1.0 + 0.7 * 1.2 + 2.0 * 0.8);
        assert_eq!(x.source, RecommendationSource::Hybrid);

        let y = fused.iter().find(|r| r.track_id == "y").unwrap();
        assert_eq!(y.score, 1.0 * 1.0 + 1.0 * 0.8);

        let z = fused.iter().find(|r| r.track_id == "z").unwrap();
        assert_eq!(z.score, 0.3 * 1.1);
        assert_eq!(
            z.source,
            RecommendationSource::Pillar(Pillar::ArtistCollaborative)
        );

        let ids: Vec<&str> = fused.iter().map(|r| r.track_id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
    }

    #[test]
    fn two_pillar_contribution_is_exact() {
        let weights = PillarWeights::default();
        let results = vec![
            (Pillar::Content, vec![rec("t", 2.0, Pillar::Content)]),
            (
                Pillar::UserCollaborative,
                vec![rec("t", 0.45, Pillar::UserCollaborative)],
            ),
        ];
        let fused = fuse(results, &weights, 10);
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].score, 2.0 * 1.0 + 0.45 * 1.2);
    }

    #[test]
    fn order_of_pillars_does_not_matter() {
        let weights = PillarWeights::default();
        let forward = fuse(sample_results(), &weights, 10);

        let mut reversed_input = sample_results();
        reversed_input.reverse();
        let reversed = fuse(reversed_input, &weights, 10);

        let mut rotated_input = sample_results();
        rotated_input.rotate_left(2);
        let rotated = fuse(rotated_input, &weights, 10);

        assert_eq!(forward, reversed);
        assert_eq!(forward, rotated);
    }

    #[test]
    fn truncates_to_n() {
        let fused = fuse(sample_results(), &PillarWeights::default(), 1);
        assert_eq!(fused.len(), 1);
        assert_eq!(fused[0].track_id, "x");
        assert!(fuse(Vec::new(), &PillarWeights::default(), 5).is_empty());
    }
}
