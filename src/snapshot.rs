//! JSON snapshot of the catalog and its listening data.

use crate::catalog::{Artist, Track, User, UserArtistInteraction, UserTrackInteraction};
use crate::config::RecommenderSettings;
use crate::recommender::RecommendationEngine;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Non-fatal inconsistency found in a snapshot.
///
/// The engine skips the affected records, these are only reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotProblem {
    DuplicateId { kind: &'static str, id: String },
    UnknownTrackArtist { track_id: String, artist_id: String },
    UnknownUser { user_id: String },
    UnknownTrack { user_id: String, track_id: String },
    UnknownArtist { user_id: String, artist_id: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub tracks: Vec<Track>,
    pub artists: Vec<Artist>,
    pub users: Vec<User>,
    pub track_interactions: Vec<UserTrackInteraction>,
    pub artist_interactions: Vec<UserArtistInteraction>,
}

fn duplicates<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    problems: &mut Vec<SnapshotProblem>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            problems.push(SnapshotProblem::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    seen
}

impl Snapshot {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Snapshot, SnapshotError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let snapshot = Self::parse(&content)?;
        info!(
            "Loaded snapshot {:?} with {} tracks, {} artists, {} users, {} track interactions, {} artist interactions",
            path.as_ref(),
            snapshot.tracks.len(),
            snapshot.artists.len(),
            snapshot.users.len(),
            snapshot.track_interactions.len(),
            snapshot.artist_interactions.len()
        );
        Ok(snapshot)
    }

    pub fn parse(json: &str) -> Result<Snapshot, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Lists duplicate ids and references to missing entities.
    pub fn problems(&self) -> Vec<SnapshotProblem> {
        let mut problems = Vec::new();

        let track_ids = duplicates(
            "track",
            self.tracks.iter().map(|t| t.id.as_str()),
            &mut problems,
        );
        let artist_ids = duplicates(
            "artist",
            self.artists.iter().map(|a| a.id.as_str()),
            &mut problems,
        );
        let user_ids = duplicates(
            "user",
            self.users.iter().map(|u| u.id.as_str()),
            &mut problems,
        );

        // Later copies of a duplicate id are dropped by the engine.
        let mut checked = HashSet::new();
        for track in self.tracks.iter().filter(|t| checked.insert(t.id.as_str())) {
            if !artist_ids.contains(track.artist_id.as_str()) {
                problems.push(SnapshotProblem::UnknownTrackArtist {
                    track_id: track.id.clone(),
                    artist_id: track.artist_id.clone(),
                });
            }
        }

        let mut checked = HashSet::new();
        for user in self.users.iter().filter(|u| checked.insert(u.id.as_str())) {
            for track_id in &user.liked_tracks {
                if !track_ids.contains(track_id.as_str()) {
                    problems.push(SnapshotProblem::UnknownTrack {
                        user_id: user.id.clone(),
                        track_id: track_id.clone(),
                    });
                }
            }
        }

        for interaction in &self.track_interactions {
            if !user_ids.contains(interaction.user_id.as_str()) {
                problems.push(SnapshotProblem::UnknownUser {
                    user_id: interaction.user_id.clone(),
                });
            }
            if !track_ids.contains(interaction.track_id.as_str()) {
                problems.push(SnapshotProblem::UnknownTrack {
                    user_id: interaction.user_id.clone(),
                    track_id: interaction.track_id.clone(),
                });
            }
        }

        for interaction in &self.artist_interactions {
            if !user_ids.contains(interaction.user_id.as_str()) {
                problems.push(SnapshotProblem::UnknownUser {
                    user_id: interaction.user_id.clone(),
                });
            }
            if !artist_ids.contains(interaction.artist_id.as_str()) {
                problems.push(SnapshotProblem::UnknownArtist {
                    user_id: interaction.user_id.clone(),
                    artist_id: interaction.artist_id.clone(),
                });
            }
        }

        problems
    }

    pub fn into_engine(self, settings: RecommenderSettings) -> RecommendationEngine {
        RecommendationEngine::initialize(
            settings,
            self.tracks,
            self.artists,
            self.users,
            &self.track_interactions,
            &self.artist_interactions,
        )
    }
}

/// Loads a snapshot, reports its problems and builds the engine from it.
pub fn load_engine<P: AsRef<Path>>(
    path: P,
    settings: RecommenderSettings,
) -> anyhow::Result<RecommendationEngine> {
    use anyhow::Context;

    let snapshot = Snapshot::load(path.as_ref())
        .with_context(|| format!("Could not load snapshot {:?}", path.as_ref()))?;

    if cfg!(feature = "no_checks") {
        info!("Skipping checks.");
    } else {
        info!("Performing checks...");
        let problems = snapshot.problems();
        if problems.is_empty() {
            info!("Snapshot checked, no issues found.");
        } else {
            info!("Found {} problems:", problems.len());
            for problem in problems.iter() {
                info!("- {:?}", problem);
            }
            info!(
                "The affected records will be skipped, check the {} non-fatal issues above.",
                problems.len()
            );
        }
    }

    Ok(snapshot.into_engine(settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_snapshot() {
        let snapshot = Snapshot::parse(
            r#"
            {
                "artists": [{ "id": "A1", "name": "Solo" }],
                "users": [{ "id": "U1", "username": "alice" }]
            }
            "#,
        )
        .unwrap();
        assert!(snapshot.tracks.is_empty());
        assert_eq!(snapshot.artists.len(), 1);
        assert_eq!(snapshot.users[0].username, "alice");
        assert!(snapshot.problems().is_empty());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Snapshot::parse("{ \"tracks\": 3 }").unwrap_err();
        assert!(matches!(err, SnapshotError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse snapshot"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Snapshot::load("/nonexistent/snapshot.json").unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
    }

    #[test]
    fn reports_dangling_references() {
        let snapshot = Snapshot::parse(
            r#"
            {
                "tracks": [
                    { "id": "S1", "title": "One", "artist_id": "A1", "bpm": 100,
                      "energy": 0.5, "danceability": 0.5, "valence": 0.5 },
                    { "id": "S1", "title": "One again", "artist_id": "A9", "bpm": 100,
                      "energy": 0.5, "danceability": 0.5, "valence": 0.5 }
                ],
                "artists": [{ "id": "A1", "name": "Solo" }],
                "users": [{ "id": "U1", "username": "alice" }],
                "track_interactions": [
                    { "user_id": "U1", "track_id": "S2", "liked": true },
                    { "user_id": "U9", "track_id": "S1" }
                ],
                "artist_interactions": [
                    { "user_id": "U1", "artist_id": "A2", "play_count": 4 }
                ]
            }
            "#,
        )
        .unwrap();

        let problems = snapshot.problems();
        assert_eq!(
            problems,
            vec![
                SnapshotProblem::DuplicateId {
                    kind: "track",
                    id: "S1".to_string()
                },
                SnapshotProblem::UnknownTrack {
                    user_id: "U1".to_string(),
                    track_id: "S2".to_string()
                },
                SnapshotProblem::UnknownUser {
                    user_id: "U9".to_string()
                },
                SnapshotProblem::UnknownArtist {
                    user_id: "U1".to_string(),
                    artist_id: "A2".to_string()
                },
            ]
        );
    }

    #[test]
    fn checks_artist_and_likes_of_first_records_only() {
        let snapshot = Snapshot::parse(
            r#"
            {
                "tracks": [
                    { "id": "S1", "title": "One", "artist_id": "A9", "bpm": 100,
                      "energy": 0.5, "danceability": 0.5, "valence": 0.5 },
                    { "id": "S1", "title": "One again", "artist_id": "A8", "bpm": 100,
                      "energy": 0.5, "danceability": 0.5, "valence": 0.5 }
                ],
                "users": [
                    { "id": "U1", "username": "alice", "liked_tracks": ["S1", "S7"] },
                    { "id": "U1", "username": "alice again", "liked_tracks": ["S8"] }
                ]
            }
            "#,
        )
        .unwrap();

        assert_eq!(
            snapshot.problems(),
            vec![
                SnapshotProblem::DuplicateId {
                    kind: "track",
                    id: "S1".to_string()
                },
                SnapshotProblem::DuplicateId {
                    kind: "user",
                    id: "U1".to_string()
                },
                SnapshotProblem::UnknownTrackArtist {
                    track_id: "S1".to_string(),
                    artist_id: "A9".to_string()
                },
                SnapshotProblem::UnknownTrack {
                    user_id: "U1".to_string(),
                    track_id: "S7".to_string()
                },
            ]
        );
    }
}
