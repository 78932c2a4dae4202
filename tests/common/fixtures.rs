//! Test fixture creation for the catalog and its listening data

use super::constants::*;
use anyhow::Result;
use pezzottify_recommender::{
    Artist, RecommendationEngine, RecommenderSettings, Snapshot, Track, User,
    UserArtistInteraction, UserTrackInteraction,
};
use std::path::PathBuf;
use tempfile::TempDir;

fn track(id: &str, title: &str, artist_id: &str, bpm: u32, features: [f64; 3]) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        artist_id: artist_id.to_string(),
        genre: String::new(),
        bpm,
        energy: features[0],
        danceability: features[1],
        valence: features[2],
        mood: String::new(),
    }
}

fn artist(id: &str, name: &str, genre: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        genre: genre.to_string(),
    }
}

fn interaction(user_id: &str, track_id: &str, liked: bool, play_count: u32) -> UserTrackInteraction {
    UserTrackInteraction {
        user_id: user_id.to_string(),
        track_id: track_id.to_string(),
        liked,
        play_count,
    }
}

fn artist_plays(user_id: &str, artist_id: &str, play_count: u32) -> UserArtistInteraction {
    UserArtistInteraction {
        user_id: user_id.to_string(),
        artist_id: artist_id.to_string(),
        play_count,
    }
}

/// The shared test catalog.
///
/// Users 1 and 2 share two of four liked tracks (Jaccard 0.5), user 3 likes
/// only pop tracks and user 4 has no activity. "Lovely" is played above the
/// popularity threshold twice.
pub fn test_snapshot() -> Snapshot {
    let tracks = vec![
        track(TRACK_1_ID, "Opening Track", ARTIST_1_ID, 120, [0.80, 0.60, 0.50]),
        track(TRACK_2_ID, "Second Song", ARTIST_1_ID, 122, [0.82, 0.62, 0.50]),
        track(TRACK_3_ID, "Closing Time", ARTIST_1_ID, 118, [0.78, 0.58, 0.52]),
        track(TRACK_4_ID, TRACK_4_TITLE, ARTIST_2_ID, 90, [0.30, 0.40, 0.30]),
        track(TRACK_5_ID, "Late Night", ARTIST_2_ID, 88, [0.28, 0.38, 0.32]),
        track(TRACK_6_ID, TRACK_6_TITLE, ARTIST_3_ID, 100, [0.50, 0.70, 0.80]),
        track(TRACK_7_ID, TRACK_7_TITLE, ARTIST_3_ID, 102, [0.52, 0.72, 0.82]),
        track(TRACK_8_ID, TRACK_8_TITLE, ARTIST_3_ID, 111, [0.50, 0.69, 0.79]),
    ];
    let artists = vec![
        artist(ARTIST_1_ID, ARTIST_1_NAME, "rock"),
        artist(ARTIST_2_ID, ARTIST_2_NAME, "jazz"),
        artist(ARTIST_3_ID, ARTIST_3_NAME, "pop"),
    ];
    let users = vec![
        User::new(USER_1_ID, "alice"),
        User::new(USER_2_ID, "bob"),
        User::new(USER_3_ID, "carol"),
        User::new(USER_4_ID, "dave"),
    ];
    let track_interactions = vec![
        interaction(USER_1_ID, TRACK_1_ID, true, 5),
        interaction(USER_1_ID, TRACK_2_ID, true, 3),
        interaction(USER_1_ID, TRACK_3_ID, true, 8),
        interaction(USER_1_ID, TRACK_7_ID, false, 12),
        interaction(USER_2_ID, TRACK_2_ID, true, 2),
        interaction(USER_2_ID, TRACK_3_ID, true, 4),
        interaction(USER_2_ID, TRACK_4_ID, true, 6),
        interaction(USER_3_ID, TRACK_6_ID, true, 1),
        interaction(USER_3_ID, TRACK_7_ID, true, 20),
    ];
    let artist_interactions = vec![
        artist_plays(USER_1_ID, ARTIST_1_ID, 50),
        artist_plays(USER_1_ID, ARTIST_2_ID, 10),
        artist_plays(USER_2_ID, ARTIST_2_ID, 40),
        artist_plays(USER_2_ID, ARTIST_1_ID, 20),
        artist_plays(USER_3_ID, ARTIST_3_ID, 30),
    ];

    Snapshot {
        tracks,
        artists,
        users,
        track_interactions,
        artist_interactions,
    }
}

pub fn test_engine() -> RecommendationEngine {
    test_engine_with(RecommenderSettings::default())
}

pub fn test_engine_with(settings: RecommenderSettings) -> RecommendationEngine {
    test_snapshot().into_engine(settings)
}

/// Writes `snapshot` as JSON into a fresh temporary directory.
/// Returns (temp_dir, snapshot_path); the directory lives as long as `temp_dir`.
pub fn write_snapshot(snapshot: &Snapshot) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, serde_json::to_string_pretty(snapshot)?)?;
    Ok((dir, path))
}
