use super::error::ApiError;
use crate::models::{GenerateRecipeForm, ImagePayload};
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;

const FILE_FIELD: &str = "file";
const INGREDIENTS_FIELD: &str = "ingredients";

fn multipart_error(e: MultipartError) -> ApiError {
    ApiError::Rejected {
        status: e.status(),
        message: format!("Failed to read multipart body: {}", e.body_text()),
    }
}

fn is_multipart(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

/// The `file` field of a multipart upload.
#[derive(Debug)]
pub struct ImageUpload(pub ImagePayload);

impl<S> FromRequest<S> for ImageUpload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::Rejected {
                status: e.status(),
                message: e.body_text(),
            })?;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(multipart_error)?;
            return Ok(Self(ImagePayload::new(bytes.to_vec(), content_type)));
        }

        Err(ApiError::unprocessable(format!(
            "Missing '{}' field",
            FILE_FIELD
        )))
    }
}

/// The `ingredients` field, from either a urlencoded or a multipart form.
#[derive(Debug)]
pub struct IngredientsForm(pub String);

impl<S> FromRequest<S> for IngredientsForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(&req) {
            let Form(form) = Form::<GenerateRecipeForm>::from_request(req, state)
                .await
                .map_err(|e| ApiError::Rejected {
                    status: e.status(),
                    message: e.body_text(),
                })?;
            return Ok(Self(form.ingredients));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::Rejected {
                status: e.status(),
                message: e.body_text(),
            })?;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() == Some(INGREDIENTS_FIELD) {
                let text = field.text().await.map_err(multipart_error)?;
                return Ok(Self(text));
            }
        }

        Err(ApiError::unprocessable(format!(
            "Missing '{}' field",
            INGREDIENTS_FIELD
        )))
    }
}
