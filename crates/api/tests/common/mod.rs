#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{NaiveDate, TimeZone, Utc};
use http_body_util::BodyExt;
use premises_api::clock::FixedClock;
use premises_api::config::ServerConfig;
use premises_api::router::build_app_router;
use premises_api::state::AppState;
use premises_api::upstream::{AvailabilityApi, Paginated, PaginationMeta, UpstreamError};
use premises_core::out_of_service_bed::{
    BedSummary, Cancellation, NewCancellation, NewOutOfServiceBed, OutOfServiceBed,
    OutOfServiceBedReason, ReferenceType, UpdateOutOfServiceBed,
};
use premises_core::revision_history::{Revision, RevisionHistory, RevisionType};
use premises_core::types::ResourceId;
use tower::ServiceExt;
use uuid::Uuid;

pub const PREMISES_ID: Uuid = Uuid::from_u128(0x3f7c3a4e_1b2d_4c5e_8f90_123456789abc);
pub const BED_ID: Uuid = Uuid::from_u128(0xb1a2c3d4_0000_4000_8000_000000000001);
pub const OTHER_BED_ID: Uuid = Uuid::from_u128(0xb1a2c3d4_0000_4000_8000_000000000002);
pub const REASON_ID: Uuid = Uuid::from_u128(0xa1b2c3d4_0000_4000_8000_000000000002);

pub const CURRENT_ID: Uuid = Uuid::from_u128(0x220a71da_bf5c_424d_94ff_254ecac5b857);
pub const FUTURE_ID: Uuid = Uuid::from_u128(0x330a71da_bf5c_424d_94ff_254ecac5b857);
pub const PAST_ID: Uuid = Uuid::from_u128(0x440a71da_bf5c_424d_94ff_254ecac5b857);

pub const REVISION_CREATED: Uuid = Uuid::from_u128(1);
pub const REVISION_END_DATE: Uuid = Uuid::from_u128(2);
pub const REVISION_NOTES: Uuid = Uuid::from_u128(3);
pub const REVISION_REASON: Uuid = Uuid::from_u128(4);

/// Date every test request treats as "today".
pub fn today() -> NaiveDate {
    date(2024, 10, 7)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// In-memory availability API
// ---------------------------------------------------------------------------

/// Stand-in for the remote availability API.
///
/// Holds a fixed set of records, records the last listing query, and can be
/// primed to reject writes with a 409 `detail`.
#[derive(Default)]
pub struct FakeAvailabilityApi {
    pub records: Mutex<Vec<OutOfServiceBed>>,
    pub conflict_detail: Mutex<Option<String>>,
    pub last_list_params: Mutex<Vec<(String, String)>>,
    pub write_count: Mutex<usize>,
}

impl FakeAvailabilityApi {
    pub fn seeded() -> Self {
        let fake = Self::default();
        *fake.records.lock().unwrap() = vec![
            current_record(),
            record(FUTURE_ID, date(2024, 11, 1), date(2024, 11, 3)),
            record(PAST_ID, date(2024, 9, 1), date(2024, 9, 5)),
        ];
        fake
    }

    pub fn reject_writes_with(&self, detail: &str) {
        *self.conflict_detail.lock().unwrap() = Some(detail.to_string());
    }

    pub fn writes(&self) -> usize {
        *self.write_count.lock().unwrap()
    }

    fn check_write(&self) -> Result<(), UpstreamError> {
        *self.write_count.lock().unwrap() += 1;
        match self.conflict_detail.lock().unwrap().clone() {
            Some(detail) => Err(UpstreamError::Conflict { detail }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AvailabilityApi for FakeAvailabilityApi {
    async fn health_check(&self) -> Result<(), UpstreamError> {
        Ok(())
    }

    async fn list_out_of_service_beds(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<Paginated<OutOfServiceBed>, UpstreamError> {
        *self.last_list_params.lock().unwrap() = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();

        let items = self.records.lock().unwrap().clone();
        Ok(Paginated {
            pagination: PaginationMeta {
                page: Some(1),
                total_pages: Some(1),
                total_results: Some(items.len() as u64),
                page_size: Some(10),
            },
            items,
        })
    }

    async fn find_out_of_service_bed(
        &self,
        _premises_id: ResourceId,
        id: ResourceId,
    ) -> Result<OutOfServiceBed, UpstreamError> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(UpstreamError::NotFound)
    }

    async fn create_out_of_service_bed(
        &self,
        premises_id: ResourceId,
        input: &NewOutOfServiceBed,
    ) -> Result<OutOfServiceBed, UpstreamError> {
        self.check_write()?;

        let mut created = record(Uuid::new_v4(), input.start_date, input.end_date);
        created.premises_id = premises_id;
        created.bed.id = input.bed_id;
        created.reference_number = input.reference_number.clone();
        created.notes = input.notes.clone();
        self.records.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_out_of_service_bed(
        &self,
        _premises_id: ResourceId,
        id: ResourceId,
        input: &UpdateOutOfServiceBed,
    ) -> Result<OutOfServiceBed, UpstreamError> {
        self.check_write()?;

        let mut records = self.records.lock().unwrap();
        let existing = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(UpstreamError::NotFound)?;
        existing.start_date = input.start_date;
        existing.end_date = input.end_date;
        existing.notes = input.notes.clone();
        Ok(existing.clone())
    }

    async fn cancel_out_of_service_bed(
        &self,
        _premises_id: ResourceId,
        _id: ResourceId,
        input: &NewCancellation,
    ) -> Result<Cancellation, UpstreamError> {
        Ok(Cancellation {
            id: Uuid::from_u128(99),
            created_at: Utc.with_ymd_and_hms(2024, 10, 7, 12, 0, 0).unwrap(),
            notes: input.notes.clone(),
        })
    }

    async fn list_reasons(&self) -> Result<Vec<OutOfServiceBedReason>, UpstreamError> {
        Ok(vec![reason()])
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn reason() -> OutOfServiceBedReason {
    OutOfServiceBedReason {
        id: REASON_ID,
        name: "Planned refurbishment".to_string(),
        reference_type: ReferenceType::WorkOrder,
        is_active: true,
    }
}

pub fn record(id: Uuid, start_date: NaiveDate, end_date: NaiveDate) -> OutOfServiceBed {
    OutOfServiceBed {
        id,
        premises_id: PREMISES_ID,
        premises_name: Some("Hope House".to_string()),
        bed: BedSummary {
            id: BED_ID,
            name: "Bed 3".to_string(),
            room_name: "Room 1".to_string(),
        },
        start_date,
        end_date,
        reason: reason(),
        reference_number: Some("WO-1234".to_string()),
        notes: None,
        revision_history: RevisionHistory::new(),
        cancellation: None,
    }
}

fn revision(id: Uuid, hour: u32, revision_type: RevisionType) -> Revision {
    Revision {
        id,
        updated_at: Utc.with_ymd_and_hms(2024, 9, 20, hour, 0, 0).unwrap(),
        updated_by: Some("Jane Manager".to_string()),
        revision_type: vec![revision_type],
        start_date: None,
        end_date: None,
        reason: None,
        reference_number: None,
        notes: None,
    }
}

/// The current record, with revisions recorded out of timestamp order and
/// two sharing 11:00.
pub fn current_record() -> OutOfServiceBed {
    let mut current = record(CURRENT_ID, date(2024, 10, 1), date(2024, 10, 14));
    current.revision_history = RevisionHistory::from(vec![
        revision(REVISION_CREATED, 9, RevisionType::Created),
        revision(REVISION_END_DATE, 11, RevisionType::UpdatedEndDate),
        revision(REVISION_NOTES, 11, RevisionType::UpdatedNotes),
        revision(REVISION_REASON, 10, RevisionType::UpdatedReason),
    ]);
    current
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        api_base_url: "http://availability.test".to_string(),
        upstream_timeout_secs: 5,
        default_sort_by: "outOfServiceFrom".to_string(),
    }
}

/// Build the full application router over `availability`, with the clock
/// fixed at [`today`].
pub fn build_test_app(availability: Arc<FakeAvailabilityApi>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        availability,
        clock: Arc::new(FixedClock(today())),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
