use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::debug;

use crate::cafes::CafeTable;

#[derive(Debug, Clone)]
pub struct AppState {
    table: Arc<CafeTable>,
}

impl AppState {
    pub fn new(table: CafeTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/cafe", get(list_cafes))
        .with_state(state)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CafeError {
    #[error("wrong city value")]
    UnknownCity,
    #[error("incorrect count")]
    InvalidCount,
}

impl IntoResponse for CafeError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

#[derive(Debug, Default)]
struct CafeParams {
    city: Option<String>,
    count: Option<String>,
}

impl CafeParams {
    // The first value wins when a key repeats; unknown keys are skipped.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "city" => &mut params.city,
                "count" => &mut params.count,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

// Raw pairs rather than a derived struct, so duplicate or missing keys end
// up in our own error bodies instead of axum's query rejection.
async fn list_cafes(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<String, CafeError> {
    let params = CafeParams::from_pairs(pairs);
    let result = select(&state.table, &params);
    match &result {
        Ok(body) => debug!(
            city = ?params.city,
            count = ?params.count,
            bytes = body.len(),
            "served cafes"
        ),
        Err(err) => debug!(
            city = ?params.city,
            count = ?params.count,
            %err,
            "rejected cafe query"
        ),
    }
    result
}

fn select(table: &CafeTable, params: &CafeParams) -> Result<String, CafeError> {
    let city = params.city.as_deref().ok_or(CafeError::UnknownCity)?;
    let cafes = table.get(city).ok_or(CafeError::UnknownCity)?;

    let count = params
        .count
        .as_deref()
        .and_then(|count| count.parse::<usize>().ok())
        .ok_or(CafeError::InvalidCount)?;

    // A count past the end of the list returns the whole list.
    Ok(cafes[..count.min(cafes.len())].join(","))
}
