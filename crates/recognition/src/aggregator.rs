use crate::error::Result;
use crate::matcher::{match_label, match_object};
use crate::response::{AnnotateImageResponse, AnnotateResponse};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum ingredients returned from one scan
pub const MAX_INGREDIENTS: usize = 15;

/// Maximum raw labels passed through to the caller
pub const MAX_LABELS: usize = 10;

/// Confidence ceiling for label detections
pub const LABEL_CONFIDENCE_CAP: u8 = 99;

/// Confidence ceiling for object detections
pub const OBJECT_CONFIDENCE_CAP: u8 = 95;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedIngredient {
    /// Title-cased canonical name
    pub name: String,
    /// Percentage confidence, 0..=99
    pub confidence: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Ingredients sorted by confidence descending
    pub ingredients: Vec<RecognizedIngredient>,
    /// First raw label descriptions, in collaborator order
    pub labels: Vec<String>,
    /// Detected text blocks joined with spaces
    pub text: String,
}

impl RecognitionResult {
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

/// Parse a raw response body and recognize ingredients in it.
///
/// A body that does not have the expected shape is an error; an error status or
/// an annotation-free response is an empty result.
pub fn recognize_json(raw: &str) -> Result<RecognitionResult> {
    let response: AnnotateResponse = serde_json::from_str(raw)?;
    Ok(recognize(&response))
}

/// Build the ranked ingredient list for the first image in `response`.
pub fn recognize(response: &AnnotateResponse) -> RecognitionResult {
    let Some(image) = response.responses.first() else {
        log::debug!("Analysis response contains no images");
        return RecognitionResult::default();
    };

    if let Some(status) = &image.error {
        log::warn!(
            "Image analysis returned error status {}: {}",
            status.code,
            status.message
        );
        return RecognitionResult::default();
    }

    if !image.has_annotations() {
        log::debug!("Analysis response has no annotations");
        return RecognitionResult::default();
    }

    let ingredients = collect_ingredients(image);
    log::debug!(
        "Recognized {} ingredients from {} labels and {} objects",
        ingredients.len(),
        image.label_annotations.len(),
        image.localized_object_annotations.len()
    );

    RecognitionResult {
        ingredients,
        labels: image
            .label_annotations
            .iter()
            .take(MAX_LABELS)
            .map(|label| label.description.clone())
            .collect(),
        text: image
            .text_annotations
            .iter()
            .map(|block| block.description.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn collect_ingredients(image: &AnnotateImageResponse) -> Vec<RecognizedIngredient> {
    let mut seen: HashSet<&'static str> = HashSet::new();
    let mut ingredients = Vec::new();

    // Labels go first so an object can never override a label's confidence.
    for label in &image.label_annotations {
        if let Some(canonical) = match_label(&label.description) {
            if seen.insert(canonical) {
                ingredients.push(RecognizedIngredient {
                    name: title_case(canonical),
                    confidence: to_confidence(label.score, LABEL_CONFIDENCE_CAP),
                });
            }
        }
    }

    for object in &image.localized_object_annotations {
        if let Some(canonical) = match_object(&object.name) {
            if seen.insert(canonical) {
                ingredients.push(RecognizedIngredient {
                    name: title_case(canonical),
                    confidence: to_confidence(object.score, OBJECT_CONFIDENCE_CAP),
                });
            }
        }
    }

    // sort_by is stable: equal confidences keep detection order
    ingredients.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    ingredients.truncate(MAX_INGREDIENTS);
    ingredients
}

fn to_confidence(score: f64, cap: u8) -> u8 {
    let score = if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = (score * 100.0).round() as u8;
    percent.min(cap)
}

/// Capitalize the first letter of every space- or hyphen-separated word.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = ch.is_whitespace() || ch == '-';
    }
    out
}
