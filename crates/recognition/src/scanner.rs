use crate::aggregator::{recognize, RecognitionResult};
use crate::config::VisionConfig;
use crate::error::{RecognitionError, Result};
use crate::response::{
    AnnotateImageRequest, AnnotateRequest, AnnotateResponse, Feature, FeatureType, ImageContent,
};
use async_trait::async_trait;

/// The external image-analysis service.
///
/// Implementations own the transport; they receive a fully built request and
/// the caller's API key and return the parsed response.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    async fn annotate(&self, api_key: &str, request: &AnnotateRequest) -> Result<AnnotateResponse>;
}

/// Scan a photo for ingredients through an [`ImageAnalyzer`].
pub struct IngredientScanner<A> {
    analyzer: A,
    config: VisionConfig,
}

impl<A: ImageAnalyzer> IngredientScanner<A> {
    pub fn new(analyzer: A, config: VisionConfig) -> Result<Self> {
        config.validate().map_err(RecognitionError::InvalidConfig)?;
        Ok(Self { analyzer, config })
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// Build the annotate request for one base64-encoded image.
    pub fn build_request(&self, image_base64: &str) -> AnnotateRequest {
        let mut features = vec![
            Feature {
                kind: FeatureType::LabelDetection,
                max_results: Some(self.config.max_labels),
            },
            Feature {
                kind: FeatureType::ObjectLocalization,
                max_results: Some(self.config.max_objects),
            },
        ];
        if self.config.detect_text {
            features.push(Feature {
                kind: FeatureType::TextDetection,
                max_results: None,
            });
        }

        AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: image_base64.to_string(),
                },
                features,
            }],
        }
    }

    /// Analyze an image and return the recognized ingredients.
    ///
    /// Missing credentials fail before the analyzer is contacted.
    pub async fn scan(&self, image_base64: &str) -> Result<RecognitionResult> {
        let api_key = self
            .config
            .credentials()
            .ok_or(RecognitionError::MissingCredentials)?;
        if image_base64.trim().is_empty() {
            return Err(RecognitionError::EmptyImage);
        }

        let request = self.build_request(image_base64);
        log::info!("Requesting image analysis ({} bytes)", image_base64.len());
        let response = self.analyzer.annotate(api_key, &request).await?;

        let result = recognize(&response);
        log::info!("Scan recognized {} ingredients", result.ingredients.len());
        Ok(result)
    }
}
