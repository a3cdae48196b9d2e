use axum::{http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::axum_http::error_responses;

pub async fn not_found() -> impl IntoResponse {
    info!("router: not_found handler invoked");
    error_responses::failure(StatusCode::NOT_FOUND, "Route not found")
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK").into_response()
}
