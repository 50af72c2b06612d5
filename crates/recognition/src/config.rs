use serde::{Deserialize, Serialize};

/// Settings for the image-analysis collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// API key sent with every request. `None` or blank disables scanning.
    pub api_key: Option<String>,

    /// Maximum label annotations requested per image
    pub max_labels: u32,

    /// Maximum localized objects requested per image
    pub max_objects: u32,

    /// Also request text detection
    pub detect_text: bool,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            max_labels: 20,
            max_objects: 20,
            detect_text: true,
        }
    }
}

impl VisionConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// The configured key, if it is present and not blank.
    pub fn credentials(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_labels == 0 {
            return Err("max_labels must be > 0".to_string());
        }
        if self.max_objects == 0 {
            return Err("max_objects must be > 0".to_string());
        }
        Ok(())
    }
}
