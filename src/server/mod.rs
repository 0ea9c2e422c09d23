//! HTTP gateway
//!
//! Exposes the two pipeline stages over HTTP:
//! - GET  /health              - liveness check
//! - POST /detect-ingredients  - multipart `file` upload -> ingredient list
//! - POST /generate-recipe     - form field `ingredients` -> HTML recipe

pub mod error;
pub mod extract;
pub mod handlers;

pub use error::ApiError;

use crate::ai::{
    CompletionService, OpenAiChatClient, OpenAiHttpClient, OpenAiVisionClient, VisionService,
};
use crate::ingredients::IngredientDetector;
use crate::models::{Config, DEFAULT_MAX_UPLOAD_BYTES};
use crate::prompts::PromptSet;
use crate::recipe::RecipeGenerator;
use crate::storage::{TempDirStore, UploadStore};
use crate::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, info_span};

/// Shared, immutable services handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<IngredientDetector>,
    pub generator: Arc<RecipeGenerator>,
    pub uploads: Arc<dyn UploadStore>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        detector: IngredientDetector,
        generator: RecipeGenerator,
        uploads: Arc<dyn UploadStore>,
    ) -> Self {
        Self {
            detector: Arc::new(detector),
            generator: Arc::new(generator),
            uploads,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Wire OpenAI clients, prompts and the temp-dir upload store from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let prompts = PromptSet::load(
            config.detection_prompt_file.as_deref(),
            config.recipe_prompt_file.as_deref(),
        )?;

        // Reuse one HTTP connection pool across provider clients.
        let http = OpenAiHttpClient::new(config.openai_api_key.clone(), config.upstream_timeout)?
            .with_base_url(config.openai_base_url.clone());

        match config.upstream_timeout {
            Some(timeout) => info!("Upstream timeout: {:?}", timeout),
            None => info!("Upstream timeout: none"),
        }
        info!("Detection model: {}", config.detection_model);
        info!("Recipe model: {}", config.recipe_model);

        let vision: Arc<dyn VisionService> = Arc::new(OpenAiVisionClient::new(
            http.clone(),
            config.detection_model.clone(),
        ));
        let completion: Arc<dyn CompletionService> =
            Arc::new(OpenAiChatClient::new(http, config.recipe_model.clone()));

        let uploads = TempDirStore::new(&config.upload_dir)?;
        info!("Upload directory: {}", uploads.dir().display());

        Ok(Self::new(
            IngredientDetector::new(vision, prompts.detection, config.detection_max_tokens),
            RecipeGenerator::new(completion, prompts.recipe),
            Arc::new(uploads),
        )
        .with_max_upload_bytes(config.max_upload_bytes))
    }
}

/// Build the axum router with all endpoints.
pub fn router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::extract::Request| {
            let uri = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/detect-ingredients", post(handlers::detect_ingredients))
        .route("/generate-recipe", post(handlers::generate_recipe))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
