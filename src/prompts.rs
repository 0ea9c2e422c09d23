use crate::{Error, Result};
use std::path::Path;

pub const DETECT_INGREDIENTS: &str = include_str!("../data/prompts/detect_ingredients.txt");
pub const RECIPE: &str = include_str!("../data/prompts/recipe.txt");

const INGREDIENTS_PLACEHOLDER: &str = "{{ingredients}}";

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Prompt text used by the two pipeline stages.
#[derive(Debug, Clone)]
pub struct PromptSet {
    pub detection: String,
    /// Must contain `{{ingredients}}`.
    pub recipe: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            detection: DETECT_INGREDIENTS.trim().to_string(),
            recipe: RECIPE.trim().to_string(),
        }
    }
}

impl PromptSet {
    /// Built-in prompts, with either one replaced by the contents of a file.
    pub fn load(detection_file: Option<&Path>, recipe_file: Option<&Path>) -> Result<Self> {
        let mut prompts = Self::default();

        if let Some(path) = detection_file {
            prompts.detection = read_prompt(path)?;
        }

        if let Some(path) = recipe_file {
            let recipe = read_prompt(path)?;
            if !recipe.contains(INGREDIENTS_PLACEHOLDER) {
                return Err(Error::Config(format!(
                    "Recipe prompt {} is missing the {} placeholder",
                    path.display(),
                    INGREDIENTS_PLACEHOLDER
                )));
            }
            prompts.recipe = recipe;
        }

        Ok(prompts)
    }
}

fn read_prompt(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read prompt {}: {}", path.display(), e))
    })?;
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::Config(format!("Prompt {} is empty", path.display())));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Cook with {{ingredients}}!", &[("ingredients", "eggs")]),
            "Cook with eggs!"
        );
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        assert_eq!(render("{{a}} and {{b}}", &[("a", "milk")]), "milk and {{b}}");
    }

    #[test]
    fn test_prompts_are_non_empty() {
        assert!(!DETECT_INGREDIENTS.trim().is_empty());
        assert!(!RECIPE.trim().is_empty());
    }

    #[test]
    fn test_recipe_has_ingredients_placeholder() {
        assert!(RECIPE.contains("{{ingredients}}"));
    }

    #[test]
    fn test_detection_prompt_asks_for_comma_list() {
        assert!(DETECT_INGREDIENTS.contains("comma-separated"));
    }

    #[test]
    fn test_load_without_overrides_uses_builtins() {
        let prompts = PromptSet::load(None, None).unwrap();
        assert_eq!(prompts.detection, DETECT_INGREDIENTS.trim());
        assert_eq!(prompts.recipe, RECIPE.trim());
    }

    #[test]
    fn test_load_overrides_from_files() {
        let mut detection = tempfile::NamedTempFile::new().unwrap();
        writeln!(detection, "  List the food.  ").unwrap();
        let mut recipe = tempfile::NamedTempFile::new().unwrap();
        writeln!(recipe, "Write a short recipe using {{{{ingredients}}}}.").unwrap();

        let prompts = PromptSet::load(Some(detection.path()), Some(recipe.path())).unwrap();
        assert_eq!(prompts.detection, "List the food.");
        assert_eq!(prompts.recipe, "Write a short recipe using {{ingredients}}.");
    }

    #[test]
    fn test_load_rejects_recipe_without_placeholder() {
        let mut recipe = tempfile::NamedTempFile::new().unwrap();
        writeln!(recipe, "Write any recipe").unwrap();

        let err = PromptSet::load(None, Some(recipe.path())).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_rejects_missing_file() {
        let err = PromptSet::load(Some(Path::new("/nonexistent/prompt.txt")), None).unwrap_err();
        assert!(err.to_string().contains("Failed to read prompt"));
    }
}
