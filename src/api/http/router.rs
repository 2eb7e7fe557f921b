// src/api/http/router.rs
// HTTP router composition.

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers::{
    delete_transformation_handler, get_transformation_handler, health_handler,
    list_transformations_handler, root_handler, transform_handler,
};
use crate::state::AppState;

pub fn http_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/transform", post(transform_handler))
        .route("/api/transformations", get(list_transformations_handler))
        .route("/api/transformations/{id}", get(get_transformation_handler))
        .route("/api/transformations/{id}", delete(delete_transformation_handler))
        .with_state(app_state)
}
