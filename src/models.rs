//! Data models and structures
//!
//! Defines the request/response payloads of the HTTP API, the in-flight
//! image payload and the service configuration.

use crate::ai::openai::client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// An uploaded image for the duration of a single request.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientsResponse {
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeResponse {
    pub recipe: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Form body of `POST /generate-recipe`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRecipeForm {
    pub ingredients: String,
}

// Configuration
const DEFAULT_DETECTION_MODEL: &str = "gpt-4o";
const DEFAULT_RECIPE_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub detection_model: String,
    pub recipe_model: String,
    pub detection_max_tokens: u32,
    pub detection_prompt_file: Option<PathBuf>,
    pub recipe_prompt_file: Option<PathBuf>,
    /// `None` leaves upstream calls without a client-side timeout.
    pub upstream_timeout: Option<Duration>,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = var("OPENAI_API_KEY")
            .or_else(|| var("OPEN_AI_KEY"))
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| crate::Error::Config("OPENAI_API_KEY not set".to_string()))?;

        let upstream_timeout = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_var(
                "UPSTREAM_TIMEOUT_SECS",
                &raw,
            )?)),
            None => None,
        };

        Ok(Self {
            openai_api_key,
            openai_base_url: var("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            detection_model: var("DETECTION_MODEL")
                .unwrap_or_else(|| DEFAULT_DETECTION_MODEL.to_string()),
            recipe_model: var("RECIPE_MODEL").unwrap_or_else(|| DEFAULT_RECIPE_MODEL.to_string()),
            detection_max_tokens: match var("DETECTION_MAX_TOKENS") {
                Some(raw) => parse_var("DETECTION_MAX_TOKENS", &raw)?,
                None => crate::ingredients::DEFAULT_MAX_TOKENS,
            },
            detection_prompt_file: var("DETECTION_PROMPT_FILE").map(PathBuf::from),
            recipe_prompt_file: var("RECIPE_PROMPT_FILE").map(PathBuf::from),
            upstream_timeout,
            upload_dir: var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            max_upload_bytes: match var("MAX_UPLOAD_BYTES") {
                Some(raw) => parse_var("MAX_UPLOAD_BYTES", &raw)?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> crate::Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| crate::Error::Config(format!("Invalid value for {}: '{}'", key, raw)))
}
