// src/api/http/handlers.rs
// REST handlers for the transform API.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::api::error::{ApiError, ApiResult, IntoApiError};
use crate::api::types::{ListQuery, ListResponse, TransformPayload, TransformResponse};
use crate::engine::TransformRequest;
use crate::state::AppState;
use crate::store::{NewTransformation, OwnerFilter, DEFAULT_LIMIT};

/// Owner scope for the request: `x-user-id` header if present,
/// anonymous otherwise.
fn owner_filter(headers: &HeaderMap) -> OwnerFilter {
    match user_id(headers) {
        Some(id) => OwnerFilter::Owner(id),
        None => OwnerFilter::Anonymous,
    }
}

fn user_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// GET /
pub async fn root_handler() -> impl IntoResponse {
    Json(json!({ "message": "API running", "status": "ok" }))
}

/// GET /health
pub async fn health_handler(State(app): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": app.started_at.elapsed().as_secs_f64(),
    }))
}

/// POST /api/transform
pub async fn transform_handler(
    State(app): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<TransformPayload>,
) -> ApiResult<impl IntoResponse> {
    let errors = payload.validation_errors();
    if !errors.is_empty() {
        return Err(ApiError::bad_request(errors.join("; ")));
    }

    info!(deep = payload.deep_humanization, "transforming text");
    let humanized = app
        .engine
        .humanize(&TransformRequest {
            text: payload.original_text.clone(),
            deep_humanization: payload.deep_humanization,
        })
        .await;

    let saved = app
        .store
        .save(NewTransformation {
            user_id: user_id(&headers),
            original_text: payload.original_text,
            humanized_text: humanized,
            mode: payload.mode,
            formality: payload.formality,
            target_audience: payload.target_audience,
            verbosity: payload.verbosity,
        })
        .await
        .into_api_error("Failed to save transformation")?;

    Ok((
        StatusCode::CREATED,
        Json(TransformResponse {
            success: true,
            data: saved,
        }),
    ))
}

/// GET /api/transformations
pub async fn list_transformations_handler(
    State(app): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> ApiResult<impl IntoResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let records = app
        .store
        .list(owner_filter(&headers), limit)
        .await
        .into_api_error("Failed to retrieve transformations")?;

    Ok(Json(ListResponse {
        success: true,
        data: records,
    }))
}

/// GET /api/transformations/{id}
pub async fn get_transformation_handler(
    State(app): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let record = app
        .store
        .get(&id)
        .await
        .into_api_error("Failed to retrieve transformation")?
        .ok_or_else(|| ApiError::not_found("Transformation not found"))?;

    Ok(Json(TransformResponse {
        success: true,
        data: record,
    }))
}

/// DELETE /api/transformations/{id}
pub async fn delete_transformation_handler(
    State(app): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let deleted = app
        .store
        .delete(&id, owner_filter(&headers))
        .await
        .into_api_error("Failed to delete transformation")?;

    if !deleted {
        return Err(ApiError::not_found("Transformation not found"));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Transformation deleted successfully",
    })))
}
