//! Route definitions for out-of-service bed endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{out_of_service_beds, reference_data};
use crate::state::AppState;

/// Cross-premises dashboard routes, mounted at `/out-of-service-beds`.
///
/// ```text
/// GET /{temporality}   -> list_all
/// ```
pub fn dashboard_router() -> Router<AppState> {
    Router::new().route("/{temporality}", get(out_of_service_beds::list_all))
}

/// Premises-scoped routes, mounted at `/premises`.
///
/// ```text
/// GET  /{premises_id}/out-of-service-beds/{temporality}                          -> list_for_premises
/// POST /{premises_id}/beds/{bed_id}/out-of-service-beds                          -> create_out_of_service_bed
/// GET  /{premises_id}/beds/{bed_id}/out-of-service-beds/{id}                     -> get_out_of_service_bed
/// PUT  /{premises_id}/beds/{bed_id}/out-of-service-beds/{id}                     -> update_out_of_service_bed
/// POST /{premises_id}/beds/{bed_id}/out-of-service-beds/{id}/cancellations       -> cancel_out_of_service_bed
/// ```
pub fn premises_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{premises_id}/out-of-service-beds/{temporality}",
            get(out_of_service_beds::list_for_premises),
        )
        .route(
            "/{premises_id}/beds/{bed_id}/out-of-service-beds",
            post(out_of_service_beds::create_out_of_service_bed),
        )
        .route(
            "/{premises_id}/beds/{bed_id}/out-of-service-beds/{id}",
            get(out_of_service_beds::get_out_of_service_bed)
                .put(out_of_service_beds::update_out_of_service_bed),
        )
        .route(
            "/{premises_id}/beds/{bed_id}/out-of-service-beds/{id}/cancellations",
            post(out_of_service_beds::cancel_out_of_service_bed),
        )
}

/// Reference data routes, mounted at `/reference-data`.
///
/// ```text
/// GET /out-of-service-bed-reasons   -> list_out_of_service_bed_reasons
/// ```
pub fn reference_data_router() -> Router<AppState> {
    Router::new().route(
        "/out-of-service-bed-reasons",
        get(reference_data::list_out_of_service_bed_reasons),
    )
}
