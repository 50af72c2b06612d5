//! Wire model for the `images:annotate` exchange with the image-analysis service.

use serde::{Deserialize, Serialize};

/// Top-level response. `responses` is required; its absence means the
/// collaborator broke its contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotateResponse {
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default)]
    pub label_annotations: Vec<DetectedLabel>,

    #[serde(default)]
    pub localized_object_annotations: Vec<DetectedObject>,

    #[serde(default)]
    pub text_annotations: Vec<TextBlock>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<AnnotateStatus>,
}

impl AnnotateImageResponse {
    pub fn has_annotations(&self) -> bool {
        !self.label_annotations.is_empty()
            || !self.localized_object_annotations.is_empty()
            || !self.text_annotations.is_empty()
    }
}

/// Raw classifier output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedLabel {
    pub description: String,
    #[serde(default)]
    pub score: f64,
}

/// Raw localization output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub name: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub description: String,
}

/// Error status embedded in a per-image response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotateStatus {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// Request body sent to the image-analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotateRequest {
    pub requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotateImageRequest {
    pub image: ImageContent,
    pub features: Vec<Feature>,
}

/// Base64-encoded image bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeatureType {
    LabelDetection,
    ObjectLocalization,
    TextDetection,
}
