//! Data-independent routes: informational pages, favicon and the 404 fallback.

use crate::transport::http::handlers::common::{not_found, ok_json, PAGE_NOT_FOUND};
use crate::transport::http::types::InfoPage;
use axum::http::StatusCode;
use axum::response::Response;

#[utoipa::path(
    get,
    path = "/analiza",
    responses((status = 200, description = "About the indicators", body = ApiResponse))
)]
pub async fn analysis_handler() -> Response {
    ok_json(InfoPage {
        title: "Analiza",
        paragraphs: vec![
            "Wynik szczęścia to średnia ocena własnego życia w skali 0-10.",
            "PKB na osobę podano w tysiącach USD, zdrowe życie w latach oczekiwanego życia w zdrowiu.",
            "Kraje o wyższym PKB na osobę i dłuższym zdrowym życiu zwykle zajmują wyższe miejsca, \
             ale zależność nie jest ścisła.",
        ],
    })
}

#[utoipa::path(
    get,
    path = "/pomoc",
    responses((status = 200, description = "Usage help", body = ApiResponse))
)]
pub async fn help_handler() -> Response {
    ok_json(InfoPage {
        title: "Pomoc",
        paragraphs: vec![
            "/ranking przyjmuje parametry sortuj, kierunek, kraj i min_wynik.",
            "sortuj: wynik_szczescia (domyślnie), pkb_na_osobe lub zdrowe_zycie.",
            "kierunek: malejaco (domyślnie) lub rosnaco.",
            "kraj: fragment nazwy kraju, wielkość liter nie ma znaczenia.",
            "min_wynik: minimalny wynik szczęścia; niepoprawna wartość jest pomijana.",
            "/export przyjmuje te same parametry i zwraca plik CSV.",
            "/kraj/{nazwa} pokazuje dane jednego kraju.",
        ],
    })
}

pub async fn favicon_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn fallback_handler() -> Response {
    not_found(PAGE_NOT_FOUND)
}
