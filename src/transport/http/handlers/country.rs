use crate::domain::record::RecordView;
use crate::transport::http::handlers::common::{
    not_found, ok_json, service_failure, COUNTRY_NOT_FOUND,
};
use crate::transport::http::types::{AppState, CountryResponse};
use axum::extract::{Path, State};
use axum::response::Response;

#[utoipa::path(
    get,
    path = "/kraj/{nazwa}",
    params(("nazwa" = String, Path, description = "Country name, matched case-insensitively")),
    responses(
        (status = 200, description = "Country record", body = ApiResponse),
        (status = 404, description = "No such country", body = ApiResponse),
        (status = 500, description = "Store failure", body = ApiResponse)
    )
)]
pub async fn country_handler(State(state): State<AppState>, Path(nazwa): Path<String>) -> Response {
    match state.ranking.country(&nazwa).await {
        Ok(Some(record)) => ok_json(CountryResponse {
            record: RecordView::from(record),
        }),
        Ok(None) => not_found(COUNTRY_NOT_FOUND),
        Err(e) => service_failure(e),
    }
}
