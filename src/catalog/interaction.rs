use serde::{Deserialize, Serialize};

#[derive(Clone, Deserialize, Serialize, Debug, PartialEq, Eq)]
pub struct UserTrackInteraction {
    pub user_id: String,
    pub track_id: String,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub play_count: u32,
}

#[derive(Clone, Deserialize, Serialize, Debug, PartialEq, Eq)]
pub struct UserArtistInteraction {
    pub user_id: String,
    pub artist_id: String,
    pub play_count: u32,
}
