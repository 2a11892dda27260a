//! HTTP client for the remote availability API.
//!
//! Wraps the out-of-service bed endpoints using [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;
use premises_core::out_of_service_bed::{
    Cancellation, NewCancellation, NewOutOfServiceBed, OutOfServiceBed, OutOfServiceBedReason,
    UpdateOutOfServiceBed,
};
use premises_core::types::ResourceId;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{AvailabilityApi, Paginated, PaginationMeta, UpstreamError};

/// HTTP client bound to one availability API base URL.
pub struct RemoteAvailabilityApi {
    client: reqwest::Client,
    base_url: String,
}

/// Error body the remote API sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ProblemBody {
    detail: Option<String>,
}

impl RemoteAvailabilityApi {
    /// Create a client for `base_url`, e.g. `http://host:8080`.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn premises_url(&self, premises_id: ResourceId) -> String {
        format!(
            "{}/cas1/premises/{premises_id}/out-of-service-beds",
            self.base_url
        )
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, translating failures
    /// into [`UpstreamError`] variants.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, UpstreamError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        match status {
            StatusCode::CONFLICT => Err(UpstreamError::Conflict {
                detail: conflict_detail(&body),
            }),
            StatusCode::NOT_FOUND => Err(UpstreamError::NotFound),
            _ => Err(UpstreamError::Api {
                status: status.as_u16(),
                body,
            }),
        }
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, UpstreamError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// The `detail` field of a conflict body, or the raw body when it has none.
fn conflict_detail(body: &str) -> String {
    serde_json::from_str::<ProblemBody>(body)
        .ok()
        .and_then(|problem| problem.detail)
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl AvailabilityApi for RemoteAvailabilityApi {
    async fn health_check(&self) -> Result<(), UpstreamError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn list_out_of_service_beds(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<Paginated<OutOfServiceBed>, UpstreamError> {
        let response = self
            .client
            .get(format!("{}/cas1/out-of-service-beds", self.base_url))
            .query(params)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let pagination = PaginationMeta::from_headers(response.headers());
        let items = response.json::<Vec<OutOfServiceBed>>().await?;

        Ok(Paginated { items, pagination })
    }

    async fn find_out_of_service_bed(
        &self,
        premises_id: ResourceId,
        id: ResourceId,
    ) -> Result<OutOfServiceBed, UpstreamError> {
        let response = self
            .client
            .get(format!("{}/{id}", self.premises_url(premises_id)))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn create_out_of_service_bed(
        &self,
        premises_id: ResourceId,
        input: &NewOutOfServiceBed,
    ) -> Result<OutOfServiceBed, UpstreamError> {
        let response = self
            .client
            .post(self.premises_url(premises_id))
            .json(input)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn update_out_of_service_bed(
        &self,
        premises_id: ResourceId,
        id: ResourceId,
        input: &UpdateOutOfServiceBed,
    ) -> Result<OutOfServiceBed, UpstreamError> {
        let response = self
            .client
            .put(format!("{}/{id}", self.premises_url(premises_id)))
            .json(input)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn cancel_out_of_service_bed(
        &self,
        premises_id: ResourceId,
        id: ResourceId,
        input: &NewCancellation,
    ) -> Result<Cancellation, UpstreamError> {
        let response = self
            .client
            .post(format!("{}/{id}/cancellations", self.premises_url(premises_id)))
            .json(input)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn list_reasons(&self) -> Result<Vec<OutOfServiceBedReason>, UpstreamError> {
        let response = self
            .client
            .get(format!(
                "{}/cas1/reference-data/out-of-service-bed-reasons",
                self.base_url
            ))
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
