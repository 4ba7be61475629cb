use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::scoring::{HybridWeights, MatchWeights, PredictionWeights};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentumConfig {
    pub ceiling: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self { ceiling: 20.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8900".to_string(),
            timeout_ms: 3000,
            dimension: 384,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoringConfig {
    pub hybrid: HybridWeights,
    pub matching: MatchWeights,
    pub prediction: PredictionWeights,
    pub momentum: MomentumConfig,
    pub embedding: EmbeddingConfig,
}

impl ScoringConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                ScoringConfig::default()
            }
        } else {
            ScoringConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload)
            .map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(ceiling) = env::var("MOMENTUM_CEILING") {
            if let Ok(value) = ceiling.parse::<f64>() {
                if value > 0.0 {
                    self.momentum.ceiling = value;
                }
            }
        }
        if let Ok(endpoint) = env::var("EMBEDDING_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.embedding.endpoint = endpoint;
            }
        }
        if let Ok(timeout) = env::var("EMBEDDING_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.embedding.timeout_ms = value;
            }
        }
        if let Ok(dimension) = env::var("EMBEDDING_DIMENSION") {
            if let Ok(value) = dimension.parse::<usize>() {
                if value > 0 {
                    self.embedding.dimension = value;
                }
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("SCORING_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/scoring.toml")))
}
