use serde::{Deserialize, Serialize};

/// Number of audio features describing a track: bpm, energy, danceability, valence.
pub const TRACK_FEATURES: usize = 4;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist_id: String,
    #[serde(default)]
    pub genre: String,
    pub bpm: u32,
    pub energy: f64,
    pub danceability: f64,
    pub valence: f64,
    #[serde(default)]
    pub mood: String,
}

impl Track {
    /// Feature vector used by the spatial index.
    pub fn features(&self) -> [f64; TRACK_FEATURES] {
        [
            self.bpm as f64,
            self.energy,
            self.danceability,
            self.valence,
        ]
    }
}
