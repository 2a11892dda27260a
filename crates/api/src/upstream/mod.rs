//! Access to the remote availability API.
//!
//! The remote API is the system of record for out-of-service beds and the
//! sole enforcer of the no-overlap rule. Handlers depend on the
//! [`AvailabilityApi`] trait; [`RemoteAvailabilityApi`] is the HTTP
//! implementation. Nothing here retries.

pub mod client;
pub mod pagination;

use async_trait::async_trait;
use premises_core::out_of_service_bed::{
    Cancellation, NewCancellation, NewOutOfServiceBed, OutOfServiceBed, OutOfServiceBedReason,
    UpdateOutOfServiceBed,
};
use premises_core::types::ResourceId;

pub use client::RemoteAvailabilityApi;
pub use pagination::PaginationMeta;

/// Errors from the availability API layer.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote API refused the write because it conflicts with existing
    /// data. `detail` is the free-text explanation from the response body.
    #[error("Availability API conflict: {detail}")]
    Conflict { detail: String },

    #[error("Availability API resource not found")]
    NotFound,

    /// Any other non-2xx status.
    #[error("Availability API error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// A page of results with the pagination headers that came with it.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

#[async_trait]
pub trait AvailabilityApi: Send + Sync {
    /// Whether the remote API answers its health endpoint.
    async fn health_check(&self) -> Result<(), UpstreamError>;

    /// List out-of-service beds. `params` are forwarded as the query string.
    async fn list_out_of_service_beds(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<Paginated<OutOfServiceBed>, UpstreamError>;

    async fn find_out_of_service_bed(
        &self,
        premises_id: ResourceId,
        id: ResourceId,
    ) -> Result<OutOfServiceBed, UpstreamError>;

    async fn create_out_of_service_bed(
        &self,
        premises_id: ResourceId,
        input: &NewOutOfServiceBed,
    ) -> Result<OutOfServiceBed, UpstreamError>;

    async fn update_out_of_service_bed(
        &self,
        premises_id: ResourceId,
        id: ResourceId,
        input: &UpdateOutOfServiceBed,
    ) -> Result<OutOfServiceBed, UpstreamError>;

    async fn cancel_out_of_service_bed(
        &self,
        premises_id: ResourceId,
        id: ResourceId,
        input: &NewCancellation,
    ) -> Result<Cancellation, UpstreamError>;

    async fn list_reasons(&self) -> Result<Vec<OutOfServiceBedReason>, UpstreamError>;
}
