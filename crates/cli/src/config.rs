use anyhow::{Context, Result};
use pantry_kv_store::ChunkConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_STORE_DIR: &str = ".pantry/store";

/// Settings loaded from `pantry.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PantryConfig {
    /// Directory backing the secure store
    pub store_dir: PathBuf,

    /// Chunking thresholds for oversized values
    pub chunking: ChunkConfig,
}

impl Default for PantryConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            chunking: ChunkConfig::default(),
        }
    }
}

impl PantryConfig {
    /// Read the config file if given, otherwise use defaults, then validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Cannot read config {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.chunking
            .validate()
            .map_err(|err| anyhow::anyhow!("chunking: {err}"))
    }
}
