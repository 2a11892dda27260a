//! Handlers for reference data passed through from the availability API.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /reference-data/out-of-service-bed-reasons
pub async fn list_out_of_service_bed_reasons(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let reasons = state.availability.list_reasons().await?;
    Ok(Json(DataResponse { data: reasons }))
}
