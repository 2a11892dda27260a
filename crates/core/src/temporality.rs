//! Temporal classification of out-of-service periods.
//!
//! A period is `past`, `current` or `future` relative to a caller-supplied
//! date. The bucket is derived on every read and is never stored alongside
//! the record it describes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{Date, Timestamp};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Where an unavailability period sits relative to today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temporality {
    Past,
    #[default]
    Current,
    Future,
}

impl Temporality {
    /// Every bucket, in the order tabs are presented.
    pub const ALL: [Temporality; 3] = [Self::Current, Self::Future, Self::Past];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Current => "current",
            Self::Future => "future",
        }
    }
}

impl fmt::Display for Temporality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Temporality {
    type Err = InvalidTemporalitySelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "past" => Ok(Self::Past),
            "current" => Ok(Self::Current),
            "future" => Ok(Self::Future),
            other => Err(InvalidTemporalitySelector(other.to_string())),
        }
    }
}

/// A date range whose start falls after its end.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid date range: start date {start_date} is after end date {end_date}")]
pub struct InvalidRangeError {
    pub start_date: Date,
    pub end_date: Date,
}

/// A temporality route parameter that is not one of the three bucket names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid temporality '{0}': expected one of current, future, past")]
pub struct InvalidTemporalitySelector(pub String);

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify the inclusive range `start_date..=end_date` against `today`.
///
/// - `past` when the range ended strictly before today.
/// - `future` when the range starts strictly after today.
/// - `current` otherwise, including single-day ranges on today.
///
/// A range with `start_date > end_date` is rejected, never reordered.
pub fn classify(
    start_date: Date,
    end_date: Date,
    today: Date,
) -> Result<Temporality, InvalidRangeError> {
    if start_date > end_date {
        return Err(InvalidRangeError {
            start_date,
            end_date,
        });
    }

    if end_date < today {
        Ok(Temporality::Past)
    } else if start_date > today {
        Ok(Temporality::Future)
    } else {
        Ok(Temporality::Current)
    }
}

/// Classify against an instant. Time-of-day is discarded before comparing.
pub fn classify_at(
    start_date: Date,
    end_date: Date,
    now: Timestamp,
) -> Result<Temporality, InvalidRangeError> {
    classify(start_date, end_date, now.date_naive())
}

/// Accept only the literal bucket names `current`, `future` and `past`.
///
/// Routers redirect to [`Temporality::Current`] on error rather than
/// rendering an error page.
pub fn validate_temporality_selector(
    input: &str,
) -> Result<Temporality, InvalidTemporalitySelector> {
    input.parse()
}
