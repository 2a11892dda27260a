//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router is
//! involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use premises_api::error::AppError;
use premises_api::upstream::UpstreamError;
use premises_core::conflict::{self, ConflictContext, DateForm};
use premises_core::error::CoreError;
use premises_core::temporality::InvalidRangeError;
use uuid::Uuid;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Core errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let id = Uuid::nil();
    let err = AppError::Core(CoreError::NotFound {
        entity: "OutOfServiceBed",
        id,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], format!("OutOfServiceBed with id {id} not found"));
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation(
        "The end date must be on or after the start date".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "The end date must be on or after the start date");
}

#[tokio::test]
async fn plain_conflict_returns_409_without_report() {
    let err = AppError::Core(CoreError::Conflict("Bed is archived".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "Bed is archived");
    assert!(json.get("conflict").is_none());
}

#[tokio::test]
async fn malformed_range_is_sanitized_as_internal_error() {
    let err = AppError::Core(CoreError::InvalidRange(InvalidRangeError {
        start_date: date(2024, 10, 5),
        end_date: date(2024, 10, 1),
    }));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("token for availability API expired".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("token"));
}

// ---------------------------------------------------------------------------
// Conflict reports
// ---------------------------------------------------------------------------

#[tokio::test]
async fn conflict_report_is_embedded_in_body() {
    let context = ConflictContext {
        premises_id: Uuid::from_u128(1),
        bed_id: Uuid::from_u128(2),
    };
    let report =
        conflict::translate("Conflicting Booking: abc-123", &context, DateForm::Range).unwrap();

    let (status, json) = error_to_response(AppError::Conflict(report)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "This bed is not available for the dates entered");
    assert_eq!(json["conflict"]["conflictingResourceId"], "abc-123");
    assert_eq!(json["conflict"]["message"], "They conflict with an existing booking");
}

// ---------------------------------------------------------------------------
// Availability API errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upstream_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Upstream(UpstreamError::NotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn upstream_bad_request_is_passed_through() {
    let err = AppError::Upstream(UpstreamError::Api {
        status: 400,
        body: "reasonId must be a known reason".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "reasonId must be a known reason");
}

#[tokio::test]
async fn other_upstream_failures_return_502_and_hide_body() {
    let err = AppError::Upstream(UpstreamError::Api {
        status: 503,
        body: "stack trace: NullPointerException".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(
        json["error"],
        "The availability service could not complete the request"
    );
}
