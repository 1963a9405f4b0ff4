use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post},
};
use schema::models::brief::{GeneratePageRequest, GenerationRequest};
use schema::models::graph::PageGraph;
use schema::models::page::PageBuild;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// POST /api/pages/generate
/// Accept a wizard brief and start a background page build
pub async fn generate_page(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<GeneratePageRequest>,
) -> Result<ResponseJson<ApiResponse<PageBuild>>, ApiError> {
    let request = GenerationRequest::from(payload);
    let build = state.generator.start(request);
    Ok(ResponseJson(ApiResponse::success(build)))
}

/// GET /api/pages/{page_id}/status
/// Poll the lifecycle record of one build
pub async fn get_page_status(
    State(state): State<AppState>,
    Path(page_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<PageBuild>>, ApiError> {
    let build = state
        .generator
        .get_status(page_id)
        .ok_or(ApiError::NotFound)?;
    Ok(ResponseJson(ApiResponse::success(build)))
}

/// GET /api/pages/{page_id}
/// Fetch the stored node map, revalidated for the current vocabulary
pub async fn get_page(
    State(state): State<AppState>,
    Path(page_id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<PageGraph>>, ApiError> {
    let graph = state
        .generator
        .load_page(page_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(ResponseJson(ApiResponse::success(graph)))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().nest(
        "/pages",
        Router::new()
            .route("/generate", post(generate_page))
            .route("/{page_id}", get(get_page))
            .route("/{page_id}/status", get(get_page_status)),
    )
}
