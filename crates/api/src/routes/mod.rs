pub mod health;
pub mod out_of_service_beds;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /out-of-service-beds/{temporality}                                       dashboard list
///
/// /premises/{premises_id}/out-of-service-beds/{temporality}                premises list
/// /premises/{premises_id}/beds/{bed_id}/out-of-service-beds                create (POST)
/// /premises/{premises_id}/beds/{bed_id}/out-of-service-beds/{id}           get, update (PUT)
/// /premises/{premises_id}/beds/{bed_id}/out-of-service-beds/{id}/cancellations   cancel (POST)
///
/// /reference-data/out-of-service-bed-reasons                               reason list
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest(
            "/out-of-service-beds",
            out_of_service_beds::dashboard_router(),
        )
        .nest("/premises", out_of_service_beds::premises_router())
        .nest(
            "/reference-data",
            out_of_service_beds::reference_data_router(),
        )
}
