use super::error::ApiError;
use super::extract::{ImageUpload, IngredientsForm};
use super::AppState;
use crate::ingredients::parse_ingredient_list;
use crate::models::{HealthResponse, ImagePayload, IngredientsResponse, RecipeResponse};
use crate::storage::{UploadGuard, UploadHandle};
use crate::Result;
use axum::extract::State;
use axum::Json;
use tracing::{info, warn};

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

pub async fn detect_ingredients(
    State(state): State<AppState>,
    ImageUpload(upload): ImageUpload,
) -> std::result::Result<Json<IngredientsResponse>, ApiError> {
    info!(
        "Detecting ingredients in upload ({} bytes, {})",
        upload.bytes.len(),
        upload.content_type.as_deref().unwrap_or("no content type")
    );

    let ingredients = detect_stored_upload(&state, upload).await?;
    Ok(Json(IngredientsResponse { ingredients }))
}

pub async fn generate_recipe(
    State(state): State<AppState>,
    IngredientsForm(raw): IngredientsForm,
) -> std::result::Result<Json<RecipeResponse>, ApiError> {
    let ingredients = parse_ingredient_list(&raw);
    info!("Generating recipe for {} ingredients", ingredients.len());

    let recipe = state.generator.generate(&ingredients).await?;
    Ok(Json(RecipeResponse { recipe }))
}

/// Stage the upload in the store, run detection on it, then remove it.
///
/// The stored upload is removed on every path once `put` has succeeded,
/// including when the request is cancelled mid-detection.
async fn detect_stored_upload(state: &AppState, upload: ImagePayload) -> Result<Vec<String>> {
    let stored = UploadGuard::put(state.uploads.clone(), &upload.bytes).await?;
    let handle = stored.handle().clone();

    let detected = detect_from_handle(state, &handle, upload.content_type).await;
    let cleanup = stored.delete().await;

    match (detected, cleanup) {
        (Ok(ingredients), Ok(())) => Ok(ingredients),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(cleanup_err)) => {
            warn!("Failed to remove upload {}: {}", handle, cleanup_err);
            Err(e)
        }
    }
}

async fn detect_from_handle(
    state: &AppState,
    handle: &UploadHandle,
    content_type: Option<String>,
) -> Result<Vec<String>> {
    let bytes = state.uploads.read(handle).await?;
    state
        .detector
        .detect(&ImagePayload::new(bytes, content_type))
        .await
}
