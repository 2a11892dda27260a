//! Handlers for out-of-service bed endpoints.
//!
//! Each handler reads "today" once, fetches from the availability API, and
//! composes the pure components from `premises_core`: temporality selection
//! and classification, revision ordering, listing query composition, and
//! conflict translation on failed writes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use premises_core::conflict::{self, ConflictContext, DateForm};
use premises_core::dashboard_query::{self, DashboardQuery, QueryDefaults, RawDashboardQuery};
use premises_core::error::CoreError;
use premises_core::out_of_service_bed::{
    NewCancellation, NewOutOfServiceBed, OutOfServiceBed, UpdateOutOfServiceBed,
};
use premises_core::paths;
use premises_core::revision_history::Revision;
use premises_core::temporality::{validate_temporality_selector, Temporality};
use premises_core::types::{Date, ResourceId};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upstream::{PaginationMeta, UpstreamError};

/// Prefix under which the API routes are nested.
const API_PREFIX: &str = "/api/v1";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A record together with its temporality as of the request date.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedOutOfServiceBed {
    #[serde(flatten)]
    pub record: OutOfServiceBed,
    pub temporality: Temporality,
}

/// One page of a listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutOfServiceBedPage {
    pub items: Vec<ClassifiedOutOfServiceBed>,
    pub pagination: PaginationMeta,
    pub query: DashboardQuery,
}

/// Detail view with revisions ordered most recent first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutOfServiceBedDetail {
    pub out_of_service_bed: OutOfServiceBed,
    pub temporality: Temporality,
    pub revisions: Vec<Revision>,
}

/// Body for `POST .../beds/{bed_id}/out-of-service-beds`. The bed comes from
/// the path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutOfServiceBedInput {
    pub start_date: Date,
    pub end_date: Date,
    pub reason_id: ResourceId,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// GET /out-of-service-beds/{temporality}
///
/// Lists out-of-service beds across all premises. An unknown temporality
/// redirects to the `current` tab.
pub async fn list_all(
    State(state): State<AppState>,
    Path(selector): Path<String>,
    Query(raw): Query<RawDashboardQuery>,
) -> AppResult<Response> {
    let base_path = paths::out_of_service_beds_dashboard();
    let Some(temporality) = select_temporality(&selector) else {
        return Ok(redirect_to_current(&base_path));
    };

    let query = compose_query(&state, &raw, temporality, &base_path);
    let page = fetch_page(&state, query, None).await?;

    Ok(Json(DataResponse { data: page }).into_response())
}

/// GET /premises/{premises_id}/out-of-service-beds/{temporality}
///
/// Lists out-of-service beds for one premises. Any premises filter in the
/// query string is ignored in favour of the path.
pub async fn list_for_premises(
    State(state): State<AppState>,
    Path((premises_id, selector)): Path<(ResourceId, String)>,
    Query(mut raw): Query<RawDashboardQuery>,
) -> AppResult<Response> {
    let base_path = paths::premises_out_of_service_beds(premises_id);
    let Some(temporality) = select_temporality(&selector) else {
        return Ok(redirect_to_current(&base_path));
    };

    raw.premises_id = None;
    let query = compose_query(&state, &raw, temporality, &base_path);
    let page = fetch_page(&state, query, Some(premises_id)).await?;

    Ok(Json(DataResponse { data: page }).into_response())
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// GET /premises/{premises_id}/beds/{bed_id}/out-of-service-beds/{id}
pub async fn get_out_of_service_bed(
    State(state): State<AppState>,
    Path((premises_id, bed_id, id)): Path<(ResourceId, ResourceId, ResourceId)>,
) -> AppResult<impl IntoResponse> {
    let today = state.clock.today();
    let record = state
        .availability
        .find_out_of_service_bed(premises_id, id)
        .await?;

    if record.bed.id != bed_id {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "OutOfServiceBed",
            id,
        }));
    }

    let temporality = record.temporality(today).map_err(CoreError::from)?;
    let revisions = record.revision_history.by_recency();

    Ok(Json(DataResponse {
        data: OutOfServiceBedDetail {
            out_of_service_bed: record,
            temporality,
            revisions,
        },
    }))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /premises/{premises_id}/beds/{bed_id}/out-of-service-beds
///
/// Marks a bed out of service. A date overlap reported by the availability
/// API comes back as a 409 carrying a structured conflict report.
pub async fn create_out_of_service_bed(
    State(state): State<AppState>,
    Path((premises_id, bed_id)): Path<(ResourceId, ResourceId)>,
    Json(input): Json<CreateOutOfServiceBedInput>,
) -> AppResult<impl IntoResponse> {
    let payload = NewOutOfServiceBed {
        bed_id,
        start_date: input.start_date,
        end_date: input.end_date,
        reason_id: input.reason_id,
        reference_number: input.reference_number,
        notes: input.notes,
    };
    payload.validate()?;

    let context = ConflictContext {
        premises_id,
        bed_id,
    };
    let form = DateForm::for_dates(payload.start_date, payload.end_date);

    let record = state
        .availability
        .create_out_of_service_bed(premises_id, &payload)
        .await
        .map_err(|err| conflict_error(err, &context, form))?;

    tracing::info!(
        %premises_id,
        %bed_id,
        out_of_service_bed_id = %record.id,
        start_date = %record.start_date,
        end_date = %record.end_date,
        "Out-of-service bed created",
    );

    let data = classify(record, state.clock.today())?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// PUT /premises/{premises_id}/beds/{bed_id}/out-of-service-beds/{id}
pub async fn update_out_of_service_bed(
    State(state): State<AppState>,
    Path((premises_id, bed_id, id)): Path<(ResourceId, ResourceId, ResourceId)>,
    Json(input): Json<UpdateOutOfServiceBed>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let context = ConflictContext {
        premises_id,
        bed_id,
    };
    let form = DateForm::for_dates(input.start_date, input.end_date);

    let record = state
        .availability
        .update_out_of_service_bed(premises_id, id, &input)
        .await
        .map_err(|err| conflict_error(err, &context, form))?;

    tracing::info!(
        %premises_id,
        %bed_id,
        out_of_service_bed_id = %id,
        "Out-of-service bed updated",
    );

    let data = classify(record, state.clock.today())?;
    Ok(Json(DataResponse { data }))
}

/// POST /premises/{premises_id}/beds/{bed_id}/out-of-service-beds/{id}/cancellations
pub async fn cancel_out_of_service_bed(
    State(state): State<AppState>,
    Path((premises_id, bed_id, id)): Path<(ResourceId, ResourceId, ResourceId)>,
    Json(input): Json<NewCancellation>,
) -> AppResult<impl IntoResponse> {
    let cancellation = state
        .availability
        .cancel_out_of_service_bed(premises_id, id, &input)
        .await?;

    tracing::info!(
        %premises_id,
        %bed_id,
        out_of_service_bed_id = %id,
        "Out-of-service bed cancelled",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: cancellation })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn select_temporality(selector: &str) -> Option<Temporality> {
    match validate_temporality_selector(selector) {
        Ok(temporality) => Some(temporality),
        Err(err) => {
            tracing::debug!(error = %err, "Redirecting to the current tab");
            None
        }
    }
}

fn redirect_to_current(base_path: &str) -> Response {
    Redirect::to(&format!("{API_PREFIX}{base_path}/{}", Temporality::Current)).into_response()
}

fn compose_query(
    state: &AppState,
    raw: &RawDashboardQuery,
    temporality: Temporality,
    base_path: &str,
) -> DashboardQuery {
    let defaults = QueryDefaults {
        sort_by: state.config.default_sort_by.clone(),
    };
    dashboard_query::compose(raw, temporality, &defaults, base_path)
}

async fn fetch_page(
    state: &AppState,
    query: DashboardQuery,
    premises_id: Option<ResourceId>,
) -> AppResult<OutOfServiceBedPage> {
    let today = state.clock.today();

    let mut params = query.upstream_params();
    if let Some(premises_id) = premises_id {
        params.push(("premisesId", premises_id.to_string()));
    }

    let page = state.availability.list_out_of_service_beds(&params).await?;

    let items = page
        .items
        .into_iter()
        .map(|record| classify(record, today))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(OutOfServiceBedPage {
        items,
        pagination: page.pagination,
        query,
    })
}

fn classify(record: OutOfServiceBed, today: Date) -> AppResult<ClassifiedOutOfServiceBed> {
    let temporality = record.temporality(today).map_err(CoreError::from)?;
    Ok(ClassifiedOutOfServiceBed {
        record,
        temporality,
    })
}

/// Turn a remote 409 into a structured conflict when its wording is known.
///
/// Unrecognised wording degrades to a plain conflict carrying the remote
/// text; no resource reference is invented.
fn conflict_error(err: UpstreamError, context: &ConflictContext, form: DateForm) -> AppError {
    let UpstreamError::Conflict { detail } = err else {
        return AppError::Upstream(err);
    };

    match conflict::translate(&detail, context, form) {
        Ok(report) => {
            tracing::info!(
                premises_id = %context.premises_id,
                bed_id = %context.bed_id,
                conflicting_resource_id = %report.conflicting_resource_id,
                conflicting_resource_kind = ?report.conflicting_resource_kind,
                "Write rejected by availability API: date overlap",
            );
            AppError::Conflict(report)
        }
        Err(unrecognized) => {
            tracing::warn!(
                premises_id = %context.premises_id,
                bed_id = %context.bed_id,
                detail = %unrecognized.detail,
                "Unrecognised conflict from availability API",
            );
            AppError::Core(CoreError::Conflict(unrecognized.detail))
        }
    }
}
