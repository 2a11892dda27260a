//! Front-end page paths referenced from API payloads.
//!
//! Conflict reports link to the resource they collide with; these builders
//! keep every such link in one place.

use std::fmt::Display;

/// Dashboard listing across all premises.
pub fn out_of_service_beds_dashboard() -> String {
    "/out-of-service-beds".to_string()
}

/// Listing for a single premises.
pub fn premises_out_of_service_beds(premises_id: impl Display) -> String {
    format!("/premises/{premises_id}/out-of-service-beds")
}

/// Detail page for a booking.
pub fn booking(premises_id: impl Display, booking_id: impl Display) -> String {
    format!("/premises/{premises_id}/bookings/{booking_id}")
}

/// Detail page for one out-of-service bed record.
pub fn out_of_service_bed(
    premises_id: impl Display,
    bed_id: impl Display,
    id: impl Display,
) -> String {
    format!("/premises/{premises_id}/beds/{bed_id}/out-of-service-beds/{id}")
}
