use serde::{Deserialize, Serialize};

#[derive(Clone, Deserialize, Serialize, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Liked track ids, snapshot likes first, then interaction likes in order.
    #[serde(default)]
    pub liked_tracks: Vec<String>,
    /// Played track ids in interaction order, filled by the engine.
    #[serde(default)]
    pub play_history: Vec<String>,
    /// Root user id of the taste community, derived at build time.
    #[serde(default)]
    pub community_id: Option<String>,
}

impl User {
    pub fn new<I: Into<String>, N: Into<String>>(id: I, username: N) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            liked_tracks: Vec::new(),
            play_history: Vec::new(),
            community_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_user() {
        let s = r#"{ "id": "U001", "username": "alice" }"#;
        let user: User = serde_json::from_str(s).unwrap();
        assert_eq!(user, User::new("U001", "alice"));
    }
}
