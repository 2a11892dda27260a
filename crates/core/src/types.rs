/// Identifiers issued by the remote availability API are UUIDs.
pub type ResourceId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar date with no time-of-day component.
pub type Date = chrono::NaiveDate;
