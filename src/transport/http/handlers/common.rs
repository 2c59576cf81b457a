use crate::app::ServiceError;
use crate::domain::query::RankingParams;
use crate::transport::http::types::ApiResponse;
use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub const COUNTRY_NOT_FOUND: &str = "Nie znaleziono takiego kraju.";
pub const PAGE_NOT_FOUND: &str = "Nie znaleziono strony.";

/// Raw query pairs, in request order.
pub type QueryPairs = Vec<(String, String)>;

/// Reads each ranking parameter on its own: a repeated key keeps its first value and a
/// malformed query string is treated like an empty one.
pub fn params_or_default(pairs: Result<Query<QueryPairs>, QueryRejection>) -> RankingParams {
    match pairs {
        Ok(Query(pairs)) => RankingParams::from_pairs(pairs),
        Err(e) => {
            tracing::debug!(error = %e, "unreadable query string, using defaults");
            RankingParams::default()
        }
    }
}

pub fn ok_json<T: Serialize>(data: T) -> Response {
    match serde_json::to_value(data) {
        Ok(value) => (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: Some(value),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => error_json(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to serialize response: {}", e),
        ),
    }
}

pub fn error_json(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }),
    )
        .into_response()
}

pub fn not_found(message: &str) -> Response {
    error_json(StatusCode::NOT_FOUND, message)
}

pub fn service_failure(err: ServiceError) -> Response {
    tracing::error!(error = %err, "request failed");
    error_json(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
