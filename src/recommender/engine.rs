use super::fusion::fuse;
use super::recommendation::{rank, Pillar, Recommendation, RecommendationSource};
use crate::catalog::{
    Artist, Track, User, UserArtistInteraction, UserTrackInteraction, TRACK_FEATURES,
};
use crate::config::RecommenderSettings;
use crate::index::{
    cosine_similarity, jaccard_similarity, AffinityGraph, AffinityGraphBuilder, KdTree, SimilarityGraph, Trie,
    UnionFind,
};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub tracks: usize,
    pub artists: usize,
    pub users: usize,
    pub similarity_edges: usize,
    pub communities: usize,
    pub affinity_edges: usize,
}

/// Owns every index and answers recommendation queries.
///
/// All indexes are built once by [`RecommendationEngine::initialize`]; every
/// query afterwards borrows the engine immutably.
pub struct RecommendationEngine {
    settings: RecommenderSettings,
    tracks: HashMap<String, Track>,
    artists: HashMap<String, Artist>,
    users: HashMap<String, User>,
    artist_tracks: HashMap<String, Vec<String>>,
    liked: HashMap<String, HashSet<String>>,
    plays: HashMap<String, HashMap<String, u32>>,
    feature_tree: KdTree<TRACK_FEATURES>,
    user_graph: SimilarityGraph,
    affinity: AffinityGraph,
    communities: UnionFind,
    search_index: Trie,
}

impl RecommendationEngine {
    pub fn initialize(
        settings: RecommenderSettings,
        tracks: Vec<Track>,
        artists: Vec<Artist>,
        users: Vec<User>,
        track_interactions: &[UserTrackInteraction],
        artist_interactions: &[UserArtistInteraction],
    ) -> Self {
        let start = Instant::now();
        info!(
            "Initializing recommendation engine with {} tracks, {} artists, {} users...",
            tracks.len(),
            artists.len(),
            users.len()
        );

        let mut search_index = Trie::new();

        let mut track_map: HashMap<String, Track> = HashMap::with_capacity(tracks.len());
        let mut artist_tracks: HashMap<String, Vec<String>> = HashMap::new();
        for track in tracks {
            if track_map.contains_key(&track.id) {
                warn!("Duplicate track id {}, keeping the first one", track.id);
                continue;
            }
            search_index.insert(&track.title);
            artist_tracks
                .entry(track.artist_id.clone())
                .or_default()
                .push(track.id.clone());
            track_map.insert(track.id.clone(), track);
        }

        let mut artist_map: HashMap<String, Artist> = HashMap::with_capacity(artists.len());
        for artist in artists {
            if artist_map.contains_key(&artist.id) {
                warn!("Duplicate artist id {}, keeping the first one", artist.id);
                continue;
            }
            search_index.insert(&artist.name);
            artist_map.insert(artist.id.clone(), artist);
        }

        let mut user_map: HashMap<String, User> = HashMap::with_capacity(users.len());
        for user in users {
            if user_map.contains_key(&user.id) {
                warn!("Duplicate user id {}, keeping the first one", user.id);
                continue;
            }
            user_map.insert(user.id.clone(), user);
        }

        let (liked, plays) = Self::apply_track_interactions(
            &settings,
            &track_map,
            &mut user_map,
            &mut search_index,
            track_interactions,
        );

        let feature_tree = KdTree::build(
            track_map
                .values()
                .map(|track| (track.id.clone(), track.features()))
                .collect(),
        );
        debug!("Built feature tree over {} tracks", feature_tree.len());

        let (user_graph, communities) = Self::build_user_graph(&settings, &mut user_map, &liked);
        info!(
            "Built user similarity graph with {} edges, {} communities",
            user_graph.edge_count(),
            communities.number_of_communities()
        );

        let affinity = Self::build_affinity_graph(&user_map, &artist_map, artist_interactions);
        info!(
            "Built affinity graph with {} edges between {} users and {} artists",
            affinity.edge_count(),
            affinity.user_count(),
            affinity.artist_count()
        );

        info!("Recommendation engine ready in {:.2?}", start.elapsed());

        Self {
            settings,
            tracks: track_map,
            artists: artist_map,
            users: user_map,
            artist_tracks,
            liked,
            plays,
            feature_tree,
            user_graph,
            affinity,
            communities,
            search_index,
        }
    }

    fn apply_track_interactions(
        settings: &RecommenderSettings,
        tracks: &HashMap<String, Track>,
        users: &mut HashMap<String, User>,
        search_index: &mut Trie,
        interactions: &[UserTrackInteraction],
    ) -> (
        HashMap<String, HashSet<String>>,
        HashMap<String, HashMap<String, u32>>,
    ) {
        let mut liked: HashMap<String, HashSet<String>> = HashMap::new();
        let mut plays: HashMap<String, HashMap<String, u32>> = HashMap::new();
        let mut skipped = 0usize;
        let mut dropped = 0usize;

        // Likes already on the user record count like interaction likes.
        for user in users.values_mut() {
            let mut seen = HashSet::new();
            user.liked_tracks.retain(|track_id| {
                if !tracks.contains_key(track_id) {
                    debug!("Dropping like of {} for unknown track {}", user.id, track_id);
                    dropped += 1;
                    return false;
                }
                seen.insert(track_id.clone())
            });
            if !seen.is_empty() {
                liked.insert(user.id.clone(), seen);
            }
        }
        if dropped > 0 {
            info!("Dropped {} liked tracks with dangling references", dropped);
        }

        for interaction in interactions {
            let Some(track) = tracks.get(&interaction.track_id) else {
                debug!(
                    "Skipping interaction of {} with unknown track {}",
                    interaction.user_id, interaction.track_id
                );
                skipped += 1;
                continue;
            };
            let Some(user) = users.get_mut(&interaction.user_id) else {
                debug!(
                    "Skipping interaction of unknown user {} with {}",
                    interaction.user_id, interaction.track_id
                );
                skipped += 1;
                continue;
            };

            user.play_history.push(track.id.clone());
            let count = plays
                .entry(user.id.clone())
                .or_default()
                .entry(track.id.clone())
                .or_insert(0);
            *count = count.saturating_add(interaction.play_count);
            if interaction.liked
                && liked
                    .entry(user.id.clone())
                    .or_default()
                    .insert(track.id.clone())
                && !user.liked_tracks.contains(&track.id)
            {
                user.liked_tracks.push(track.id.clone());
            }
            if interaction.play_count > settings.popularity_threshold {
                search_index.increment_frequency(&track.title);
            }
        }

        if skipped > 0 {
            info!("Skipped {} track interactions with dangling references", skipped);
        }
        (liked, plays)
    }

    fn build_user_graph(
        settings: &RecommenderSettings,
        users: &mut HashMap<String, User>,
        liked: &HashMap<String, HashSet<String>>,
    ) -> (SimilarityGraph, UnionFind) {
        let mut user_ids: Vec<String> = users.keys().cloned().collect();
        user_ids.sort();

        let empty = HashSet::new();
        let liked_sets: Vec<&HashSet<String>> = user_ids
            .iter()
            .map(|id| liked.get(id).unwrap_or(&empty))
            .collect();

        let n = user_ids.len();
        let similarities: Vec<(usize, usize, f64)> = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| ((i + 1)..n).map(move |j| (i, j)))
            .filter_map(|(i, j)| {
                let similarity = jaccard_similarity(liked_sets[i], liked_sets[j]);
                (similarity > 0.0).then_some((i, j, similarity))
            })
            .collect();

        let mut graph = SimilarityGraph::new();
        let mut communities = UnionFind::new();
        for id in &user_ids {
            graph.add_vertex(id);
            communities.make_set(id);
        }
        for (i, j, similarity) in similarities {
            graph.add_edge(&user_ids[i], &user_ids[j], similarity);
            if similarity >= settings.similarity_threshold {
                communities.union(&user_ids[i], &user_ids[j]);
            }
        }
        communities.flatten();

        for (id, user) in users.iter_mut() {
            user.community_id = communities.root(id).map(str::to_string);
        }

        (graph, communities)
    }

    fn build_affinity_graph(
        users: &HashMap<String, User>,
        artists: &HashMap<String, Artist>,
        interactions: &[UserArtistInteraction],
    ) -> AffinityGraph {
        let mut builder = AffinityGraphBuilder::new();
        let mut skipped = 0usize;
        for interaction in interactions {
            if !users.contains_key(&interaction.user_id)
                || !artists.contains_key(&interaction.artist_id)
            {
                debug!(
                    "Skipping artist interaction {} -> {}",
                    interaction.user_id, interaction.artist_id
                );
                skipped += 1;
                continue;
            }
            builder.add_edge(
                &interaction.user_id,
                &interaction.artist_id,
                interaction.play_count,
            );
        }
        if skipped > 0 {
            info!("Skipped {} artist interactions with dangling references", skipped);
        }
        builder.normalize()
    }

    pub fn settings(&self) -> &RecommenderSettings {
        &self.settings
    }

    fn liked_set(&self, user_id: &str) -> Option<&HashSet<String>> {
        self.liked.get(user_id)
    }

    fn is_liked(&self, user_id: &str, track_id: &str) -> bool {
        self.liked_set(user_id)
            .is_some_and(|liked| liked.contains(track_id))
    }

    fn to_recommendations(
        &self,
        scores: HashMap<String, f64>,
        pillar: Pillar,
        n: usize,
    ) -> Vec<Recommendation> {
        let mut recommendations: Vec<Recommendation> = scores
            .into_iter()
            .filter_map(|(track_id, score)| {
                let title = self.tracks.get(&track_id)?.title.clone();
                Some(Recommendation {
                    track_id,
                    title,
                    score,
                    source: RecommendationSource::Pillar(pillar),
                })
            })
            .collect();
        rank(&mut recommendations, n);
        recommendations
    }

    /// Tracks close to the user's liked tracks in feature space.
    pub fn content_based_recommendations(&self, user_id: &str, n: usize) -> Vec<Recommendation> {
        let Some(liked) = self.liked_set(user_id) else {
            return Vec::new();
        };

        let mut scores: HashMap<String, f64> = HashMap::new();
        for track_id in liked {
            let Some(track) = self.tracks.get(track_id) else {
                continue;
            };
            let similar = self.feature_tree.find_similar(
                &track.id,
                &track.features(),
                self.settings.k_nearest,
                None,
            );
            for candidate in similar {
                if !liked.contains(&candidate) {
                    *scores.entry(candidate).or_insert(0.0) += 1.0;
                }
            }
        }

        self.to_recommendations(scores, Pillar::Content, n)
    }

    /// Tracks liked by the users whose likes overlap the most with this user's.
    pub fn user_collaborative_recommendations(
        &self,
        user_id: &str,
        n: usize,
    ) -> Vec<Recommendation> {
        let mut scores: HashMap<String, f64> = HashMap::new();
        for (other_id, similarity) in self
            .user_graph
            .top_k_similar(user_id, self.settings.k_similar_users)
        {
            let Some(other_liked) = self.liked_set(&other_id) else {
                continue;
            };
            for track_id in other_liked {
                if !self.is_liked(user_id, track_id) {
                    *scores.entry(track_id.clone()).or_insert(0.0) += similarity;
                }
            }
        }

        self.to_recommendations(scores, Pillar::UserCollaborative, n)
    }

    /// Tracks of the artists the user listens to the most.
    pub fn artist_based_recommendations(&self, user_id: &str, n: usize) -> Vec<Recommendation> {
        let scores: HashMap<String, f64> = self
            .affinity
            .recommend_from_top_artists(user_id, &self.artist_tracks, self.settings.top_artists)
            .into_iter()
            .filter(|(track_id, _)| !self.is_liked(user_id, track_id))
            .collect();

        self.to_recommendations(scores, Pillar::ArtistCollaborative, n)
    }

    /// Tracks liked across the user's taste community.
    pub fn community_based_recommendations(
        &self,
        user_id: &str,
        n: usize,
    ) -> Vec<Recommendation> {
        if self.communities.size_of(user_id) <= 1 {
            return Vec::new();
        }

        let mut scores: HashMap<String, f64> = HashMap::new();
        for member in self.communities.members_of(user_id) {
            if member == user_id {
                continue;
            }
            let Some(member_liked) = self.liked_set(member) else {
                continue;
            };
            for track_id in member_liked {
                if !self.is_liked(user_id, track_id) {
                    *scores.entry(track_id.clone()).or_insert(0.0) += 1.0;
                }
            }
        }

        self.to_recommendations(scores, Pillar::Community, n)
    }

    pub fn pillar_recommendations(
        &self,
        pillar: Pillar,
        user_id: &str,
        n: usize,
    ) -> Vec<Recommendation> {
        match pillar {
            Pillar::Content => self.content_based_recommendations(user_id, n),
            Pillar::UserCollaborative => self.user_collaborative_recommendations(user_id, n),
            Pillar::ArtistCollaborative => self.artist_based_recommendations(user_id, n),
            Pillar::Community => self.community_based_recommendations(user_id, n),
        }
    }

    /// Weighted fusion of all four pillars.
    pub fn generate_recommendations(&self, user_id: &str, n: usize) -> Vec<Recommendation> {
        let candidates = self.settings.fusion_candidate_limit;
        let pillar_results = Pillar::ALL
            .iter()
            .map(|pillar| {
                (
                    *pillar,
                    self.pillar_recommendations(*pillar, user_id, candidates),
                )
            })
            .collect();
        let fused = fuse(pillar_results, &self.settings.weights, n);
        debug!("Generated {} recommendations for {}", fused.len(), user_id);
        fused
    }

    pub fn search_autocomplete(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.search_index.autocomplete(prefix, limit)
    }

    /// Representative id of the user's community, `None` for unknown users.
    pub fn user_community(&self, user_id: &str) -> Option<&str> {
        self.communities.root(user_id)
    }

    /// Size of the user's community, 0 for unknown users.
    pub fn community_size(&self, user_id: &str) -> usize {
        self.communities.size_of(user_id)
    }

    pub fn community_members(&self, user_id: &str) -> Vec<&str> {
        self.communities.members_of(user_id)
    }

    pub fn number_of_communities(&self) -> usize {
        self.communities.number_of_communities()
    }

    /// Users most similar to `user_id` with their Jaccard similarity.
    pub fn similar_users(&self, user_id: &str, k: usize) -> Vec<(String, f64)> {
        self.user_graph.top_k_similar(user_id, k)
    }

    /// Cosine similarity of the per-track play counts of two users.
    pub fn listening_similarity(&self, a: &str, b: &str) -> f64 {
        match (self.plays.get(a), self.plays.get(b)) {
            (Some(a), Some(b)) => cosine_similarity(a, b),
            _ => 0.0,
        }
    }

    /// Artists with the highest normalized affinity for `user_id`.
    pub fn top_artists(&self, user_id: &str, k: usize) -> Vec<(String, f64)> {
        self.affinity.top_artists_for_user(user_id, k)
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.get(id)
    }

    pub fn artist(&self, id: &str) -> Option<&Artist> {
        self.artists.get(id)
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    pub fn liked_tracks(&self, user_id: &str) -> &[String] {
        self.users
            .get(user_id)
            .map(|user| user.liked_tracks.as_slice())
            .unwrap_or(&[])
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            tracks: self.tracks.len(),
            artists: self.artists.len(),
            users: self.users.len(),
            similarity_edges: self.user_graph.edge_count(),
            communities: self.communities.number_of_communities(),
            affinity_edges: self.affinity.edge_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, title: &str, artist_id: &str, features: [f64; 4]) -> Track {
        Track {
            id: id.to_string(),
            title: title.to_string(),
            artist_id: artist_id.to_string(),
            genre: String::new(),
            bpm: features[0] as u32,
            energy: features[1],
            danceability: features[2],
            valence: features[3],
            mood: String::new(),
        }
    }

    fn artist(id: &str, name: &str) -> Artist {
        Artist {
            id: id.to_string(),
            name: name.to_string(),
            genre: String::new(),
        }
    }

    fn like(user: &str, track: &str) -> UserTrackInteraction {
        UserTrackInteraction {
            user_id: user.to_string(),
            track_id: track.to_string(),
            liked: true,
            play_count: 1,
        }
    }

    fn plays(user: &str, artist: &str, count: u32) -> UserArtistInteraction {
        UserArtistInteraction {
            user_id: user.to_string(),
            artist_id: artist.to_string(),
            play_count: count,
        }
    }

    fn small_engine() -> RecommendationEngine {
        let tracks = vec![
            track("t1", "Morning Light", "a1", [100.0, 0.5, 0.5, 0.5]),
            track("t2", "Morning Dew", "a1", [101.0, 0.5, 0.5, 0.5]),
            track("t3", "Night Drive", "a2", [140.0, 0.9, 0.8, 0.2]),
            track("t4", "Night Shift", "a2", [141.0, 0.9, 0.8, 0.2]),
            track("t5", "Noon", "a3", [120.0, 0.7, 0.6, 0.4]),
        ];
        let artists = vec![
            artist("a1", "Dawn Chorus"),
            artist("a2", "Neon Roads"),
            artist("a3", "Halfway"),
        ];
        let users = vec![
            User::new("u1", "alice"),
            User::new("u2", "bob"),
            User::new("u3", "carol"),
        ];
        let track_interactions = vec![
            like("u1", "t1"),
            like("u1", "t3"),
            like("u2", "t1"),
            like("u2", "t3"),
            like("u2", "t4"),
            like("u3", "t5"),
        ];
        let artist_interactions = vec![plays("u1", "a2", 10), plays("u1", "a1", 5)];

        RecommendationEngine::initialize(
            RecommenderSettings::default(),
            tracks,
            artists,
            users,
            &track_interactions,
            &artist_interactions,
        )
    }

    #[test]
    fn builds_communities_from_overlapping_likes() {
        let engine = small_engine();
        // {t1,t3} vs {t1,t3,t4}: 2/3 >= 0.3
        assert_eq!(engine.community_size("u1"), 2);
        assert_eq!(engine.community_size("u3"), 1);
        assert_eq!(engine.user_community("u1"), engine.user_community("u2"));
        assert_ne!(engine.user_community("u1"), engine.user_community("u3"));
        assert_eq!(engine.number_of_communities(), 2);
        assert_eq!(
            engine.user("u1").unwrap().community_id.as_deref(),
            engine.user_community("u1")
        );
        assert_eq!(engine.user_community("ghost"), None);
        assert_eq!(engine.community_size("ghost"), 0);
    }

    #[test]
    fn collaborative_pillar_uses_similar_users() {
        let engine = small_engine();
        let recs = engine.user_collaborative_recommendations("u1", 10);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].track_id, "t4");
        assert!((recs[0].score - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(
            recs[0].source,
            RecommendationSource::Pillar(Pillar::UserCollaborative)
        );
    }

    #[test]
    fn community_pillar_counts_member_likes() {
        let engine = small_engine();
        let recs = engine.community_based_recommendations("u1", 10);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].track_id, "t4");
        assert_eq!(recs[0].score, 1.0);
        assert!(engine.community_based_recommendations("u3", 10).is_empty());
    }

    #[test]
    fn content_pillar_skips_liked_tracks() {
        let engine = small_engine();
        let recs = engine.content_based_recommendations("u1", 10);
        assert!(!recs.is_empty());
        assert!(recs
            .iter()
            .all(|r| r.track_id != "t1" && r.track_id != "t3"));
        // k_nearest covers the whole catalog, so each liked track votes once for every other track
        assert_eq!(recs[0].score, 2.0);
    }

    #[test]
    fn artist_pillar_follows_affinity() {
        let engine = small_engine();
        let recs = engine.artist_based_recommendations("u1", 10);
        let ids: Vec<&str> = recs.iter().map(|r| r.track_id.as_str()).collect();
        assert_eq!(ids, vec!["t4", "t2"]);
        assert_eq!(recs[0].score, 1.0);
        assert_eq!(recs[1].score, 0.5);
    }

    #[test]
    fn unknown_user_gets_nothing() {
        let engine = small_engine();
        for pillar in Pillar::ALL {
            assert!(engine.pillar_recommendations(pillar, "ghost", 10).is_empty());
        }
        assert!(engine.generate_recommendations("ghost", 10).is_empty());
        assert!(engine.liked_tracks("ghost").is_empty());
    }

    #[test]
    fn fused_results_are_hybrid_when_pillars_agree() {
        let engine = small_engine();
        let recs = engine.generate_recommendations("u1", 10);
        let t4 = recs.iter().find(|r| r.track_id == "t4").unwrap();
        assert_eq!(t4.source, RecommendationSource::Hybrid);
        assert_eq!(recs[0].track_id, "t4");
        assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn search_covers_titles_and_artist_names() {
        let engine = small_engine();
        assert_eq!(
            engine.search_autocomplete("night", 10),
            vec!["Night Drive", "Night Shift"]
        );
        assert_eq!(engine.search_autocomplete("NEON", 10), vec!["Neon Roads"]);
        assert!(engine.search_autocomplete("zzz", 10).is_empty());
    }

    #[test]
    fn popular_tracks_rank_first_in_search() {
        let mut interactions = vec![like("u1", "t2")];
        interactions[0].play_count = 25;
        let engine = RecommendationEngine::initialize(
            RecommenderSettings::default(),
            vec![
                track("t1", "Morning Light", "a1", [100.0, 0.5, 0.5, 0.5]),
                track("t2", "Morning Dew", "a1", [101.0, 0.5, 0.5, 0.5]),
            ],
            vec![artist("a1", "Dawn Chorus")],
            vec![User::new("u1", "alice")],
            &interactions,
            &[],
        );
        assert_eq!(
            engine.search_autocomplete("morning", 10),
            vec!["Morning Dew", "Morning Light"]
        );
    }

    #[test]
    fn dangling_references_are_skipped() {
        let engine = RecommendationEngine::initialize(
            RecommenderSettings::default(),
            vec![track("t1", "Only", "a1", [90.0, 0.1, 0.1, 0.1])],
            vec![artist("a1", "Solo")],
            vec![User::new("u1", "alice")],
            &[like("u1", "missing"), like("ghost", "t1"), like("u1", "t1")],
            &[plays("u1", "missing", 3), plays("ghost", "a1", 3)],
        );
        assert_eq!(engine.liked_tracks("u1").to_vec(), vec!["t1".to_string()]);
        let stats = engine.stats();
        assert_eq!(stats.affinity_edges, 0);
        assert_eq!(stats.users, 1);
        assert_eq!(stats.tracks, 1);
    }

    #[test]
    fn likes_on_the_user_record_are_indexed() {
        let mut u1 = User::new("u1", "alice");
        u1.liked_tracks = vec!["t1".to_string(), "t1".to_string(), "gone".to_string()];
        let engine = RecommendationEngine::initialize(
            RecommenderSettings::default(),
            vec![
                track("t1", "Morning Light", "a1", [100.0, 0.5, 0.5, 0.5]),
                track("t2", "Morning Dew", "a1", [101.0, 0.5, 0.5, 0.5]),
                track("t3", "Night Drive", "a2", [140.0, 0.9, 0.8, 0.2]),
            ],
            vec![artist("a1", "Dawn Chorus"), artist("a2", "Neon Roads")],
            vec![u1, User::new("u2", "bob")],
            &[like("u1", "t2"), like("u2", "t1"), like("u2", "t2")],
            &[],
        );

        assert_eq!(
            engine.liked_tracks("u1").to_vec(),
            vec!["t1".to_string(), "t2".to_string()]
        );
        assert_eq!(engine.similar_users("u1", 5), vec![("u2".to_string(), 1.0)]);
        for pillar in Pillar::ALL {
            for rec in engine.pillar_recommendations(pillar, "u1", 10) {
                assert_ne!(rec.track_id, "t1", "{} recommended a liked track", pillar);
            }
        }
        let fused = engine.generate_recommendations("u1", 10);
        assert!(fused.iter().all(|r| r.track_id == "t3"));
    }

    #[test]
    fn listening_similarity_uses_play_counts() {
        let mut interactions = vec![like("u1", "t1"), like("u2", "t1"), like("u2", "t3")];
        interactions[0].play_count = 4;
        interactions[1].play_count = 2;
        interactions[2].play_count = 2;
        let engine = RecommendationEngine::initialize(
            RecommenderSettings::default(),
            vec![
                track("t1", "Morning Light", "a1", [100.0, 0.5, 0.5, 0.5]),
                track("t3", "Night Drive", "a1", [140.0, 0.9, 0.8, 0.2]),
            ],
            vec![artist("a1", "Dawn Chorus")],
            vec![User::new("u1", "alice"), User::new("u2", "bob")],
            &interactions,
            &[],
        );

        let similarity = engine.listening_similarity("u1", "u2");
        assert!((similarity - 8.0 / (4.0 * 8f64.sqrt())).abs() < 1e-12);
        assert_eq!(similarity, engine.listening_similarity("u2", "u1"));
        assert_eq!(engine.listening_similarity("u1", "ghost"), 0.0);
    }

    #[test]
    fn stats_report_index_sizes() {
        let engine = small_engine();
        let stats = engine.stats();
        assert_eq!(stats.tracks, 5);
        assert_eq!(stats.artists, 3);
        assert_eq!(stats.users, 3);
        assert_eq!(stats.similarity_edges, 1);
        assert_eq!(stats.communities, 2);
        assert_eq!(stats.affinity_edges, 2);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RecommendationEngine>();
    }
}
