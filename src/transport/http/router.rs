use crate::domain::query::{AppliedParams, SortDirection, SortField};
use crate::domain::record::{CountryRecord, DisplayValues, RecordView};
use crate::transport::http::handlers::{country, health, pages, ranking};
use crate::transport::http::types::{
    ApiResponse, AppState, CountryResponse, InfoPage, RankingResponse, TopResponse,
};
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        ranking::home_handler,
        ranking::ranking_handler,
        ranking::export_handler,
        country::country_handler,
        pages::analysis_handler,
        pages::help_handler
    ),
    components(schemas(
        ApiResponse,
        TopResponse,
        RankingResponse,
        CountryResponse,
        InfoPage,
        RecordView,
        DisplayValues,
        CountryRecord,
        AppliedParams,
        SortField,
        SortDirection
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(ranking::home_handler))
        .route("/ranking", get(ranking::ranking_handler))
        .route("/export", get(ranking::export_handler))
        .route("/kraj/:nazwa", get(country::country_handler))
        .route("/analiza", get(pages::analysis_handler))
        .route("/pomoc", get(pages::help_handler))
        .route("/favicon.ico", get(pages::favicon_handler))
        .route("/health", get(health::healthcheck_handler))
        .fallback(pages::fallback_handler)
        .with_state(app_state)
}
