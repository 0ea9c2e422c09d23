use crate::models::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Failure of a request, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// The pipeline or upload store failed.
    Pipeline(crate::Error),
    /// The request was rejected before reaching the pipeline.
    Rejected { status: StatusCode, message: String },
}

impl ApiError {
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected { status, .. } => *status,
        }
    }
}

impl From<crate::Error> for ApiError {
    fn from(e: crate::Error) -> Self {
        Self::Pipeline(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Pipeline(e) => {
                tracing::error!("Request failed: {}", e);
                e.to_string()
            }
            Self::Rejected { message, .. } => {
                tracing::warn!("Request rejected ({}): {}", status, message);
                message
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> ErrorResponse {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_pipeline_error_is_500_with_message() {
        let response =
            ApiError::from(crate::Error::AiProvider("quota exceeded".to_string())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await.error, "AI provider error: quota exceeded");
    }

    #[tokio::test]
    async fn test_rejection_keeps_status() {
        let response = ApiError::unprocessable("Missing 'file' field").into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_of(response).await.error, "Missing 'file' field");
    }
}
