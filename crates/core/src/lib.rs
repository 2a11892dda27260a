//! Domain logic for out-of-service bed availability.
//!
//! Everything in this crate is pure: no I/O, no async, and no reads of the
//! system clock. Callers pass "today" in explicitly so that a single request
//! sees one consistent notion of the present.

pub mod conflict;
pub mod dashboard_query;
pub mod error;
pub mod out_of_service_bed;
pub mod paths;
pub mod revision_history;
pub mod temporality;
pub mod types;
