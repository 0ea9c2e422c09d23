//! Recipe generation from a list of ingredients.

use crate::ai::CompletionService;
use crate::{prompts, Result};
use std::sync::Arc;

pub struct RecipeGenerator {
    completion: Arc<dyn CompletionService>,
    template: String,
}

impl RecipeGenerator {
    /// `template` must contain an `{{ingredients}}` placeholder.
    pub fn new(completion: Arc<dyn CompletionService>, template: String) -> Self {
        Self {
            completion,
            template,
        }
    }

    pub fn build_prompt(&self, ingredients: &[String]) -> String {
        prompts::render(&self.template, &[("ingredients", &ingredients.join(", "))])
    }

    /// Returns the model's HTML exactly as received.
    pub async fn generate(&self, ingredients: &[String]) -> Result<String> {
        let prompt = self.build_prompt(ingredients);
        tracing::debug!("Recipe generation prompt:\n{}", prompt);

        let recipe = self.completion.complete(&prompt).await?;
        tracing::info!(
            "Generated recipe ({} chars) from {} ingredients",
            recipe.len(),
            ingredients.len()
        );

        Ok(recipe)
    }
}
