//! Ingredient detection
//!
//! Sends an uploaded image to a vision model and turns its comma-separated
//! answer into an ordered ingredient list.

use crate::ai::{mime, VisionService};
use crate::models::ImagePayload;
use crate::Result;
use base64::Engine as _;
use std::sync::Arc;

pub const DEFAULT_MAX_TOKENS: u32 = 100;

/// Split a comma-separated list, trimming each item and dropping empty ones.
///
/// Order and duplicates are preserved.
pub fn parse_ingredient_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Encode an image as a `data:<mime>;base64,...` URI.
pub fn image_data_uri(image: &ImagePayload) -> String {
    let mime = mime::image_mime(image.content_type.as_deref(), &image.bytes);
    let encoded = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
    format!("data:{};base64,{}", mime, encoded)
}

pub struct IngredientDetector {
    vision: Arc<dyn VisionService>,
    prompt: String,
    max_tokens: u32,
}

impl IngredientDetector {
    pub fn new(vision: Arc<dyn VisionService>, prompt: String, max_tokens: u32) -> Self {
        Self {
            vision,
            prompt,
            max_tokens,
        }
    }

    pub async fn detect(&self, image: &ImagePayload) -> Result<Vec<String>> {
        tracing::debug!("Detecting ingredients in image ({} bytes)", image.bytes.len());

        let data_uri = image_data_uri(image);
        let raw = self
            .vision
            .complete_with_image(&self.prompt, &data_uri, self.max_tokens)
            .await?;

        let ingredients = parse_ingredient_list(&raw);
        tracing::info!("Detected {} ingredients", ingredients.len());

        Ok(ingredients)
    }
}
