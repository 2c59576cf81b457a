use crate::app::RankingService;
use crate::domain::query::AppliedParams;
use crate::domain::record::RecordView;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub ranking: Arc<RankingService>,
}

impl AppState {
    pub fn new(ranking: RankingService) -> Self {
        Self {
            ranking: Arc::new(ranking),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct TopResponse {
    pub top10: Vec<RecordView>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct RankingResponse {
    pub count: usize,
    pub params: AppliedParams,
    pub records: Vec<RecordView>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CountryResponse {
    pub record: RecordView,
}

/// Static informational page.
#[derive(Serialize, Debug, ToSchema)]
pub struct InfoPage {
    pub title: &'static str,
    pub paragraphs: Vec<&'static str>,
}
