use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub snapshot_path: Option<String>,
    pub limit: Option<usize>,

    // Engine tuning
    pub recommender: Option<RecommenderConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct RecommenderConfig {
    pub similarity_threshold: Option<f64>,
    pub k_nearest: Option<usize>,
    pub k_similar_users: Option<usize>,
    pub top_artists: Option<usize>,
    pub popularity_threshold: Option<u32>,
    pub fusion_candidate_limit: Option<usize>,
    pub weights: Option<WeightsConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct WeightsConfig {
    pub content: Option<f64>,
    pub user_collaborative: Option<f64>,
    pub artist_collaborative: Option<f64>,
    pub community: Option<f64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
