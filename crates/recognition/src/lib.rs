//! # Pantry Recognition
//!
//! Turns a raw image-analysis response into a ranked list of kitchen ingredients.
//!
//! ## Pipeline
//!
//! ```text
//! AnnotateResponse
//!     │
//!     ├──> Labels (collaborator order)
//!     │      └─> generic filter → matcher → dedup (cap 99)
//!     │
//!     ├──> Localized objects
//!     │      └─> generic filter → object matcher → dedup (cap 95)
//!     │
//!     ├──> Text blocks (passed through)
//!     │
//!     └──> Sort by confidence, keep top 15
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pantry_recognition::recognize_json;
//!
//! let raw = r#"{"responses":[{"labelAnnotations":[
//!     {"description":"tomato","score":0.93},
//!     {"description":"food","score":0.99}
//! ]}]}"#;
//!
//! let result = recognize_json(raw).unwrap();
//! assert_eq!(result.ingredients.len(), 1);
//! assert_eq!(result.ingredients[0].name, "Tomato");
//! assert_eq!(result.ingredients[0].confidence, 93);
//! ```

mod aggregator;
mod config;
mod dictionary;
mod error;
mod matcher;
mod response;
mod scanner;

pub use aggregator::{
    recognize, recognize_json, title_case, RecognitionResult, RecognizedIngredient,
    LABEL_CONFIDENCE_CAP, MAX_INGREDIENTS, MAX_LABELS, OBJECT_CONFIDENCE_CAP,
};
pub use config::VisionConfig;
pub use dictionary::{is_generic_label, INGREDIENTS, GENERIC_LABELS};
pub use error::{RecognitionError, Result};
pub use matcher::{match_label, match_object, normalize};
pub use response::{
    AnnotateImageRequest, AnnotateImageResponse, AnnotateRequest, AnnotateResponse,
    AnnotateStatus, DetectedLabel, DetectedObject, Feature, FeatureType, ImageContent,
    TextBlock,
};
pub use scanner::{ImageAnalyzer, IngredientScanner};
