use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use services::services::gemini::GeminiError;
use services::services::generation::GenerationError;
use services::services::store::StoreError;
use thiserror::Error;
use utils::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Gemini(#[from] GeminiError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Generation(_) | ApiError::Gemini(_) | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(%status, error = %self, "request failed");
        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}
