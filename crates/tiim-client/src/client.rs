//! HTTP client for the pharmacy backend.
//!
//! Three endpoints are used: the pharmacy listing, the inventory search and
//! order submission. Requests are sent once; there is no retry and no
//! caching. Any non-2xx status is surfaced as [`ClientError::Api`] with the
//! backend's `detail` message when it sent one.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tiim_core::{AppConfig, InventoryResult, OrderRequest, OrderResult, Pharmacy, SearchQuery};

use crate::error::ClientError;
use crate::types::ErrorBody;

/// Client for the pharmacy backend REST API.
///
/// Use [`ApiClient::from_config`] in the application or [`ApiClient::new`]
/// to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise to exactly one trailing slash so `Url::join` appends
        // below any path prefix instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.backend_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /api/pharmacies?city=<city>`.
    ///
    /// A body that is not a JSON array is treated as an empty listing.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Api`] on a non-2xx status.
    /// - [`ClientError::Deserialize`] if an entry does not match [`Pharmacy`].
    pub async fn list_pharmacies(
        &self,
        city: Option<&str>,
    ) -> Result<Vec<Pharmacy>, ClientError> {
        let mut params = Vec::new();
        if let Some(city) = city.filter(|c| !c.is_empty()) {
            params.push(("city", city.to_string()));
        }
        let url = self.endpoint("api/pharmacies", &params)?;

        tracing::debug!(url = %url, "listing pharmacies");
        let response = self.client.get(url.clone()).send().await?;
        let body: serde_json::Value = Self::read_json(response, &url).await?;

        if !body.is_array() {
            tracing::warn!(url = %url, "pharmacy listing is not an array; treating as empty");
            return Ok(Vec::new());
        }

        let pharmacies: Vec<Pharmacy> =
            serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
                context: format!("pharmacies(city={})", city.unwrap_or_default()),
                source: e,
            })?;
        tracing::debug!(count = pharmacies.len(), "pharmacies loaded");
        Ok(pharmacies)
    }

    /// `GET /api/search` with the optional `q`, `barcode`, `latitude` and
    /// `longitude` parameters. Distances are computed by the backend.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Api`] on a non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not a list of results.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<InventoryResult>, ClientError> {
        let url = self.endpoint("api/search", &search_params(query))?;

        tracing::debug!(url = %url, "searching inventory");
        let response = self.client.get(url.clone()).send().await?;
        let results: Vec<InventoryResult> = Self::read_json(response, &url).await?;
        tracing::debug!(count = results.len(), "search results received");
        Ok(results)
    }

    /// `POST /api/orders` with `order` as the JSON body.
    ///
    /// Sent exactly once. A lost response after the backend accepted the
    /// order is indistinguishable from a failure here.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Api`] on a non-2xx status, with the backend `detail`.
    /// - [`ClientError::Deserialize`] if the success body lacks
    ///   `status` / `total_amount`.
    pub async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResult, ClientError> {
        let url = self.endpoint("api/orders", &[])?;

        tracing::info!(
            url = %url,
            pharmacy_id = %order.pharmacy_id,
            items = order.items.len(),
            method = %order.delivery_method,
            "submitting order"
        );
        let response = self.client.post(url.clone()).json(order).send().await?;
        let result: OrderResult = Self::read_json(response, &url).await?;
        tracing::info!(status = %result.status, total = %result.total_amount, "order accepted");
        Ok(result)
    }

    /// Joins `path` onto the base URL and appends the query parameters,
    /// percent-encoded.
    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Checks for a 2xx status and parses the body as `T`.
    ///
    /// On a non-2xx status the body is read as `{"detail": ...}` on a best
    /// effort basis; an unreadable body just yields no detail.
    async fn read_json<T: DeserializeOwned>(
        response: Response,
        url: &Url,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
                .and_then(ErrorBody::into_message);
            tracing::warn!(url = %url, status = status.as_u16(), detail = ?detail, "backend error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}

/// Query parameters for a search, in the order the backend documents them.
fn search_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(q) = &query.query {
        params.push(("q", q.clone()));
    }
    if let Some(barcode) = &query.barcode {
        params.push(("barcode", barcode.clone()));
    }
    if let Some(coords) = query.coordinates {
        params.push(("latitude", coords.latitude.to_string()));
        params.push(("longitude", coords.longitude.to_string()));
    }
    params
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
