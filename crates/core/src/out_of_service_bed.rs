//! Out-of-service bed records and write payloads.
//!
//! These mirror the remote availability API's wire shape (camelCase JSON).
//! Temporality is deliberately absent from [`OutOfServiceBed`]; use
//! [`OutOfServiceBed::temporality`] to derive it at read time.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::revision_history::RevisionHistory;
use crate::temporality::{classify, InvalidRangeError, Temporality};
use crate::types::{Date, ResourceId, Timestamp};

/// Maximum length of the free-text reference number.
pub const MAX_REFERENCE_NUMBER_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// What kind of reference a reason expects alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceType {
    WorkOrder,
    Crn,
}

impl ReferenceType {
    /// Label shown next to the reference number field.
    pub fn label(self) -> &'static str {
        match self {
            Self::WorkOrder => "Work order number",
            Self::Crn => "CRN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutOfServiceBedReason {
    pub id: ResourceId,
    pub name: String,
    pub reference_type: ReferenceType,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedSummary {
    pub id: ResourceId,
    pub name: String,
    pub room_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cancellation {
    pub id: ResourceId,
    pub created_at: Timestamp,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A period during which one bed cannot be used for placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutOfServiceBed {
    pub id: ResourceId,
    pub premises_id: ResourceId,
    #[serde(default)]
    pub premises_name: Option<String>,
    pub bed: BedSummary,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: OutOfServiceBedReason,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub revision_history: RevisionHistory,
    #[serde(default)]
    pub cancellation: Option<Cancellation>,
}

impl OutOfServiceBed {
    /// Cancelled records are retained for audit but no longer block the bed.
    pub fn is_active(&self) -> bool {
        self.cancellation.is_none()
    }

    /// Derive the record's bucket relative to `today`.
    pub fn temporality(&self, today: Date) -> Result<Temporality, InvalidRangeError> {
        classify(self.start_date, self.end_date, today)
    }

    /// Number of calendar days the bed is out of service, inclusive.
    pub fn day_count(&self) -> i64 {
        self.end_date.signed_duration_since(self.start_date).num_days() + 1
    }
}

// ---------------------------------------------------------------------------
// Write payloads
// ---------------------------------------------------------------------------

/// Body for marking a bed out of service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOutOfServiceBed {
    pub bed_id: ResourceId,
    pub start_date: Date,
    pub end_date: Date,
    pub reason_id: ResourceId,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewOutOfServiceBed {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_period(self.start_date, self.end_date)?;
        validate_reference_number(self.reference_number.as_deref())
    }
}

/// Body for changing an existing out-of-service period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutOfServiceBed {
    pub start_date: Date,
    pub end_date: Date,
    pub reason_id: ResourceId,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl UpdateOutOfServiceBed {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_period(self.start_date, self.end_date)?;
        validate_reference_number(self.reference_number.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCancellation {
    #[serde(default)]
    pub notes: Option<String>,
}

/// User-entered periods are checked before they reach the remote API.
fn validate_period(start_date: Date, end_date: Date) -> Result<(), CoreError> {
    if end_date < start_date {
        return Err(CoreError::Validation(
            "The end date must be on or after the start date".to_string(),
        ));
    }
    Ok(())
}

fn validate_reference_number(reference_number: Option<&str>) -> Result<(), CoreError> {
    match reference_number {
        Some(r) if r.chars().count() > MAX_REFERENCE_NUMBER_LENGTH => {
            Err(CoreError::Validation(format!(
                "The reference number must be {MAX_REFERENCE_NUMBER_LENGTH} characters or fewer"
            )))
        }
        _ => Ok(()),
    }
}
