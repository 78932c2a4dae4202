//! Bipartite user/artist affinity graph.
//!
//! Edges are collected as raw play counts in [`AffinityGraphBuilder`] and
//! normalized per user when the builder is turned into an [`AffinityGraph`].
//! Normalization consumes the builder, so weights can't be divided twice and
//! nothing can read them before they are normalized.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct AffinityEdge {
    pub to: String,
    pub weight: f64,
}

#[derive(Debug, Default)]
pub struct AffinityGraphBuilder {
    user_to_artist: HashMap<String, Vec<AffinityEdge>>,
    artist_to_user: HashMap<String, Vec<AffinityEdge>>,
    max_plays_per_user: HashMap<String, f64>,
}

/// Frozen affinity graph, every weight is in `[0, 1]`.
#[derive(Debug, Default)]
pub struct AffinityGraph {
    user_to_artist: HashMap<String, Vec<AffinityEdge>>,
    artist_to_user: HashMap<String, Vec<AffinityEdge>>,
}

fn accumulate(edges: &mut Vec<AffinityEdge>, to: &str, amount: f64) -> f64 {
    match edges.iter_mut().find(|e| e.to == to) {
        Some(edge) => {
            edge.weight += amount;
            edge.weight
        }
        None => {
            edges.push(AffinityEdge {
                to: to.to_string(),
                weight: amount,
            });
            amount
        }
    }
}

fn sorted_by_weight(mut pairs: Vec<(String, f64)>) -> Vec<(String, f64)> {
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

impl AffinityGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `play_count` plays of `artist_id` by `user_id`.
    ///
    /// Repeated pairs add up on the same edge, and the per-user max used by
    /// [`AffinityGraphBuilder::normalize`] is taken over these summed totals.
    pub fn add_edge(&mut self, user_id: &str, artist_id: &str, play_count: u32) {
        let plays = play_count as f64;
        let total = accumulate(
            self.user_to_artist.entry(user_id.to_string()).or_default(),
            artist_id,
            plays,
        );
        accumulate(
            self.artist_to_user.entry(artist_id.to_string()).or_default(),
            user_id,
            plays,
        );

        let max = self
            .max_plays_per_user
            .entry(user_id.to_string())
            .or_insert(0.0);
        if total > *max {
            *max = total;
        }
    }

    /// Divides every edge by the maximum play count of its user endpoint.
    ///
    /// Both directions use the user's maximum, so an artist's view of a user
    /// reports the same weight as the user's view of the artist.
    pub fn normalize(self) -> AffinityGraph {
        let max_plays = self.max_plays_per_user;
        let scale = |user_id: &str, weight: f64| match max_plays.get(user_id) {
            Some(max) if *max > 0.0 => weight / max,
            _ => weight,
        };

        let mut user_to_artist = self.user_to_artist;
        for (user_id, edges) in user_to_artist.iter_mut() {
            for edge in edges.iter_mut() {
                edge.weight = scale(user_id.as_str(), edge.weight);
            }
        }

        let mut artist_to_user = self.artist_to_user;
        for edges in artist_to_user.values_mut() {
            for edge in edges.iter_mut() {
                edge.weight = scale(edge.to.as_str(), edge.weight);
            }
        }

        AffinityGraph {
            user_to_artist,
            artist_to_user,
        }
    }
}

impl AffinityGraph {
    /// The `k` artists `user_id` listens to the most, heaviest first.
    pub fn top_artists_for_user(&self, user_id: &str, k: usize) -> Vec<(String, f64)> {
        let mut artists = self.artists_for_user(user_id);
        artists.truncate(k);
        artists
    }

    pub fn artists_for_user(&self, user_id: &str) -> Vec<(String, f64)> {
        let Some(edges) = self.user_to_artist.get(user_id) else {
            return Vec::new();
        };
        sorted_by_weight(edges.iter().map(|e| (e.to.clone(), e.weight)).collect())
    }

    pub fn users_for_artist(&self, artist_id: &str) -> Vec<(String, f64)> {
        let Some(edges) = self.artist_to_user.get(artist_id) else {
            return Vec::new();
        };
        sorted_by_weight(edges.iter().map(|e| (e.to.clone(), e.weight)).collect())
    }

    pub fn edge_weight(&self, user_id: &str, artist_id: &str) -> f64 {
        self.user_to_artist
            .get(user_id)
            .and_then(|edges| edges.iter().find(|e| e.to == artist_id))
            .map_or(0.0, |e| e.weight)
    }

    /// Scores the tracks of the user's `top_n` artists by artist affinity.
    ///
    /// A track credited to several top artists collects the weight of each.
    pub fn recommend_from_top_artists(
        &self,
        user_id: &str,
        artist_tracks: &HashMap<String, Vec<String>>,
        top_n: usize,
    ) -> Vec<(String, f64)> {
        let mut track_scores: HashMap<&str, f64> = HashMap::new();
        for (artist_id, weight) in self.top_artists_for_user(user_id, top_n) {
            if let Some(tracks) = artist_tracks.get(&artist_id) {
                for track_id in tracks {
                    *track_scores.entry(track_id.as_str()).or_insert(0.0) += weight;
                }
            }
        }

        sorted_by_weight(
            track_scores
                .into_iter()
                .map(|(id, score)| (id.to_string(), score))
                .collect(),
        )
    }

    pub fn user_count(&self) -> usize {
        self.user_to_artist.len()
    }

    pub fn artist_count(&self) -> usize {
        self.artist_to_user.len()
    }

    pub fn edge_count(&self) -> usize {
        self.user_to_artist.values().map(Vec::len).sum()
    }

    pub fn has_user(&self, user_id: &str) -> bool {
        self.user_to_artist.contains_key(user_id)
    }

    pub fn has_artist(&self, artist_id: &str) -> bool {
        self.artist_to_user.contains_key(artist_id)
    }
}
