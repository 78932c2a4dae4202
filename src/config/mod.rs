mod file_config;

pub use file_config::{FileConfig, RecommenderConfig, WeightsConfig};

use anyhow::{bail, Result};
use std::path::PathBuf;

/// Multipliers applied to each pillar's raw scores during fusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarWeights {
    pub content: f64,
    pub user_collaborative: f64,
    pub artist_collaborative: f64,
    pub community: f64,
}

impl Default for PillarWeights {
    fn default() -> Self {
        Self {
            content: 1.0,
            user_collaborative: 1.2,
            artist_collaborative: 1.1,
            community: 0.8,
        }
    }
}

/// Tuning of the recommendation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderSettings {
    /// Minimum Jaccard similarity for two users to share a community.
    pub similarity_threshold: f64,
    /// Neighbors fetched from the k-d tree for every liked track.
    pub k_nearest: usize,
    /// Similar users consulted by the user collaborative pillar.
    pub k_similar_users: usize,
    /// Artists expanded by the artist collaborative pillar.
    pub top_artists: usize,
    /// Play count above which a track gets an autocomplete boost.
    pub popularity_threshold: u32,
    /// Results requested from each pillar before fusion.
    pub fusion_candidate_limit: usize,
    pub weights: PillarWeights,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.3,
            k_nearest: 10,
            k_similar_users: 5,
            top_artists: 5,
            popularity_threshold: 10,
            fusion_candidate_limit: 50,
            weights: PillarWeights::default(),
        }
    }
}

impl RecommenderSettings {
    /// Applies the values present in the file section on top of `self`.
    pub fn merged_with(&self, file: Option<RecommenderConfig>) -> Self {
        let Some(file) = file else {
            return self.clone();
        };
        let weights_file = file.weights.unwrap_or_default();
        Self {
            similarity_threshold: file
                .similarity_threshold
                .unwrap_or(self.similarity_threshold),
            k_nearest: file.k_nearest.unwrap_or(self.k_nearest),
            k_similar_users: file.k_similar_users.unwrap_or(self.k_similar_users),
            top_artists: file.top_artists.unwrap_or(self.top_artists),
            popularity_threshold: file
                .popularity_threshold
                .unwrap_or(self.popularity_threshold),
            fusion_candidate_limit: file
                .fusion_candidate_limit
                .unwrap_or(self.fusion_candidate_limit),
            weights: PillarWeights {
                content: weights_file.content.unwrap_or(self.weights.content),
                user_collaborative: weights_file
                    .user_collaborative
                    .unwrap_or(self.weights.user_collaborative),
                artist_collaborative: weights_file
                    .artist_collaborative
                    .unwrap_or(self.weights.artist_collaborative),
                community: weights_file.community.unwrap_or(self.weights.community),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            bail!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            );
        }
        if self.k_nearest == 0 {
            bail!("k_nearest must be greater than 0");
        }
        if self.k_similar_users == 0 {
            bail!("k_similar_users must be greater than 0");
        }
        if self.top_artists == 0 {
            bail!("top_artists must be greater than 0");
        }
        if self.fusion_candidate_limit == 0 {
            bail!("fusion_candidate_limit must be greater than 0");
        }
        let weights = [
            ("content", self.weights.content),
            ("user_collaborative", self.weights.user_collaborative),
            ("artist_collaborative", self.weights.artist_collaborative),
            ("community", self.weights.community),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                bail!("Weight {} must be a non-negative number, got {}", name, weight);
            }
        }
        Ok(())
    }
}

/// CLI arguments that can be overridden by the TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub snapshot_path: Option<PathBuf>,
    pub limit: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub snapshot_path: PathBuf,
    /// Default number of results shown per query.
    pub limit: usize,
    pub recommender: RecommenderSettings,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let snapshot_path = file
            .snapshot_path
            .map(PathBuf::from)
            .or_else(|| cli.snapshot_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("snapshot_path must be specified as argument or in config file")
            })?;

        if !snapshot_path.exists() {
            bail!("Snapshot file does not exist: {:?}", snapshot_path);
        }
        if !snapshot_path.is_file() {
            bail!("Snapshot path is not a file: {:?}", snapshot_path);
        }

        let limit = file.limit.unwrap_or(cli.limit);
        if limit == 0 {
            bail!("limit must be greater than 0");
        }

        let recommender = RecommenderSettings::default().merged_with(file.recommender);
        recommender.validate()?;

        Ok(Self {
            snapshot_path,
            limit,
            recommender,
        })
    }
}
