use serde::{Deserialize, Serialize};

/// Configuration for splitting oversized values across keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Largest serialized payload (bytes) stored under a single key
    pub single_value_limit: usize,

    /// Maximum bytes per chunk once a payload is split
    pub chunk_size: usize,

    /// Upper bound on chunk indices probed when deleting without a usable count
    pub max_chunk_scan: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            single_value_limit: 2048,
            chunk_size: 1800,
            max_chunk_scan: 256,
        }
    }
}

impl ChunkConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        // A chunk must hold at least one full UTF-8 character.
        if self.chunk_size < 4 {
            return Err(format!("chunk_size ({}) must be >= 4", self.chunk_size));
        }

        if self.chunk_size > self.single_value_limit {
            return Err(format!(
                "chunk_size ({}) cannot exceed single_value_limit ({})",
                self.chunk_size, self.single_value_limit
            ));
        }

        if self.max_chunk_scan == 0 {
            return Err("max_chunk_scan must be > 0".to_string());
        }

        Ok(())
    }
}
