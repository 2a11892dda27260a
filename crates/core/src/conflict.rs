//! Translation of remote overlap conflicts into structured reports.
//!
//! The remote availability API is the only authority on whether two periods
//! for a bed overlap. When it refuses a write it answers `409` with a
//! free-text `detail`. This module recognises the two known wordings and
//! turns them into a [`ConflictReport`] that names the colliding resource and
//! links to it. Anything else is returned as [`UnrecognizedConflict`]; no
//! resource reference is ever guessed.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::paths;
use crate::types::{Date, ResourceId};

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// `Conflicting Booking: <id>`
pub const BOOKING_CONFLICT_PATTERN: &str = r"^Conflicting Booking:\s*(?P<id>[\w-]+)$";

/// `An out-of-service bed already exists for dates from <date> to <date> which
/// overlaps with the desired dates: <id>`
pub const OUT_OF_SERVICE_BED_CONFLICT_PATTERN: &str = concat!(
    r"^An out-of-service bed already exists for dates from (?P<from>\S+) to (?P<to>\S+) ",
    r"which overlaps with the desired dates:\s*(?P<id>[\w-]+)$",
);

static BOOKING_CONFLICT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(BOOKING_CONFLICT_PATTERN).expect("valid regex"));

static OUT_OF_SERVICE_BED_CONFLICT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(OUT_OF_SERVICE_BED_CONFLICT_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The premises and bed the failed write was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictContext {
    pub premises_id: ResourceId,
    pub bed_id: ResourceId,
}

/// Whether the submitted period was a single day or a range of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateForm {
    Single,
    Range,
}

impl DateForm {
    pub fn for_dates(start_date: Date, end_date: Date) -> Self {
        if start_date == end_date {
            Self::Single
        } else {
            Self::Range
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictingResourceKind {
    Booking,
    OutOfServiceBed,
}

impl ConflictingResourceKind {
    fn description(self) -> &'static str {
        match self {
            Self::Booking => "an existing booking",
            Self::OutOfServiceBed => "an existing out of service bed",
        }
    }
}

/// Form fields implicated by a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictField {
    StartDate,
    EndDate,
}

/// Only the dates can produce an overlap.
pub const DATE_OVERLAP_FIELDS: [ConflictField; 2] = [ConflictField::StartDate, ConflictField::EndDate];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatePeriod {
    pub start_date: Date,
    pub end_date: Date,
}

/// Structured description of a recognised overlap conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
    pub affected_fields: Vec<ConflictField>,
    pub conflicting_resource_id: String,
    pub conflicting_resource_kind: ConflictingResourceKind,
    /// Period of the existing record, when the remote message states it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_period: Option<DatePeriod>,
    pub title: String,
    pub message: String,
    /// Page path for the conflicting resource.
    pub link: String,
}

/// A `409` detail matching neither known wording. Carries the raw text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognised conflict: {detail}")]
pub struct UnrecognizedConflict {
    pub detail: String,
}

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

/// Parse a remote `409` detail into a [`ConflictReport`].
///
/// `form` selects the title wording and is chosen by the caller from the
/// dates the user submitted (see [`DateForm::for_dates`]).
pub fn translate(
    detail: &str,
    context: &ConflictContext,
    form: DateForm,
) -> Result<ConflictReport, UnrecognizedConflict> {
    let trimmed = detail.trim();

    let (kind, id, existing_period) = if let Some(caps) = BOOKING_CONFLICT_RE.captures(trimmed) {
        (ConflictingResourceKind::Booking, caps["id"].to_string(), None)
    } else if let Some(caps) = OUT_OF_SERVICE_BED_CONFLICT_RE.captures(trimmed) {
        let period = parse_period(&caps["from"], &caps["to"]);
        (
            ConflictingResourceKind::OutOfServiceBed,
            caps["id"].to_string(),
            period,
        )
    } else {
        return Err(UnrecognizedConflict {
            detail: detail.to_string(),
        });
    };

    let link = match kind {
        ConflictingResourceKind::Booking => paths::booking(context.premises_id, &id),
        ConflictingResourceKind::OutOfServiceBed => {
            paths::out_of_service_bed(context.premises_id, context.bed_id, &id)
        }
    };

    Ok(ConflictReport {
        affected_fields: DATE_OVERLAP_FIELDS.to_vec(),
        conflicting_resource_id: id,
        conflicting_resource_kind: kind,
        existing_period,
        title: title(form),
        message: message(kind, form),
        link,
    })
}

fn title(form: DateForm) -> String {
    match form {
        DateForm::Single => "This bed is not available for the date entered".to_string(),
        DateForm::Range => "This bed is not available for the dates entered".to_string(),
    }
}

fn message(kind: ConflictingResourceKind, form: DateForm) -> String {
    let lead = match form {
        DateForm::Single => "It conflicts with",
        DateForm::Range => "They conflict with",
    };
    format!("{lead} {}", kind.description())
}

/// Stated dates are informational; an unparseable pair is dropped.
fn parse_period(from: &str, to: &str) -> Option<DatePeriod> {
    let start_date = NaiveDate::parse_from_str(from, "%Y-%m-%d").ok()?;
    let end_date = NaiveDate::parse_from_str(to, "%Y-%m-%d").ok()?;
    Some(DatePeriod {
        start_date,
        end_date,
    })
}
