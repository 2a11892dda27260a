//! Append-only revision log for out-of-service bed records, and its
//! display ordering.

use serde::{Deserialize, Serialize};

use crate::out_of_service_bed::OutOfServiceBedReason;
use crate::types::{Date, ResourceId, Timestamp};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which facet of the record a revision touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RevisionType {
    Created,
    UpdatedStartDate,
    UpdatedEndDate,
    UpdatedReferenceNumber,
    UpdatedReason,
    UpdatedNotes,
}

/// One recorded change, with a snapshot of the fields it set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Revision {
    pub id: ResourceId,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub revision_type: Vec<RevisionType>,
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
    #[serde(default)]
    pub reason: Option<OutOfServiceBedReason>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Write-once log of revisions in the order they were recorded.
///
/// Entries can be appended but never edited or removed; readers only ever
/// get shared slices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionHistory(Vec<Revision>);

impl RevisionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, revision: Revision) {
        self.0.push(revision);
    }

    pub fn as_slice(&self) -> &[Revision] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Revision> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The log ordered most recent first. See [`sort_by_recency`].
    pub fn by_recency(&self) -> Vec<Revision> {
        sort_by_recency(&self.0)
    }
}

impl From<Vec<Revision>> for RevisionHistory {
    fn from(revisions: Vec<Revision>) -> Self {
        Self(revisions)
    }
}

impl<'a> IntoIterator for &'a RevisionHistory {
    type Item = &'a Revision;
    type IntoIter = std::slice::Iter<'a, Revision>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Return a copy of `revisions` ordered by `updated_at`, newest first.
///
/// The sort is stable: revisions sharing a timestamp keep their recorded
/// order. The input is left untouched.
pub fn sort_by_recency(revisions: &[Revision]) -> Vec<Revision> {
    let mut sorted = revisions.to_vec();
    // `sort_by` is a stable merge sort.
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted
}
