use crate::domain::query::RankingParams;
use crate::domain::record::RecordView;
use crate::presentation::export::{CONTENT_DISPOSITION, CONTENT_TYPE};
use crate::transport::http::handlers::common::{
    ok_json, params_or_default, service_failure, QueryPairs,
};
use crate::transport::http::types::{AppState, RankingResponse, TopResponse};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Ten happiest countries", body = ApiResponse),
        (status = 500, description = "Store failure", body = ApiResponse)
    )
)]
pub async fn home_handler(State(state): State<AppState>) -> Response {
    match state.ranking.top().await {
        Ok(records) => ok_json(TopResponse {
            top10: records.into_iter().map(RecordView::from).collect(),
        }),
        Err(e) => service_failure(e),
    }
}

#[utoipa::path(
    get,
    path = "/ranking",
    params(RankingParams),
    responses(
        (status = 200, description = "Filtered and sorted ranking", body = ApiResponse),
        (status = 500, description = "Store failure", body = ApiResponse)
    )
)]
pub async fn ranking_handler(
    State(state): State<AppState>,
    pairs: Result<Query<QueryPairs>, QueryRejection>,
) -> Response {
    let params = params_or_default(pairs);

    match state.ranking.ranking(&params).await {
        Ok(outcome) => ok_json(RankingResponse {
            count: outcome.records.len(),
            params: outcome.applied,
            records: outcome.records.into_iter().map(RecordView::from).collect(),
        }),
        Err(e) => service_failure(e),
    }
}

#[utoipa::path(
    get,
    path = "/export",
    params(RankingParams),
    responses(
        (status = 200, description = "Ranking as CSV", content_type = "text/csv", body = String),
        (status = 500, description = "Store failure", body = ApiResponse)
    )
)]
pub async fn export_handler(
    State(state): State<AppState>,
    pairs: Result<Query<QueryPairs>, QueryRejection>,
) -> Response {
    let params = params_or_default(pairs);

    match state.ranking.export(&params).await {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, CONTENT_TYPE),
                (header::CONTENT_DISPOSITION, CONTENT_DISPOSITION),
            ],
            csv,
        )
            .into_response(),
        Err(e) => service_failure(e),
    }
}
