//! HTTP client for the portal backend.

use erp_forms::ServerErrors;
use erp_listing::decode_records;
use erp_pos::CheckoutPayload;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::error::{PortalError, Result};

/// Endpoint sales are posted to, relative to the base URL.
pub const CHECKOUT_ENDPOINT: &str = "pos/checkout";

/// Backend acknowledgement of a completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub sale_id: String,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub sale_reference: Option<uuid::Uuid>,
}

/// HTTP client for list, checkout and form endpoints.
///
/// # Example
///
/// ```rust,no_run
/// use erp_listing::Issue;
/// use erp_portal::{ApiConfig, PortalClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PortalClient::new(&ApiConfig {
///     base_url: "http://localhost:8000/api".into(),
///     ..Default::default()
/// })?;
///
/// let issues: Vec<Issue> = client.fetch_records("quality/issues", &[("status", "open")]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PortalClient {
    base_url: String,
    client: Client,
}

impl PortalClient {
    /// Create a client. Fails if the API key is not a valid header value.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
                PortalError::InvalidConfig("API key is not a valid header value".to_string())
            })?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Fetch a record list.
    ///
    /// The body may be a bare array, `{"data": [...]}` or `null`. Entries that
    /// fail to decode are skipped.
    pub async fn fetch_records<R>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<R>>
    where
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        debug!(url = %url, params = params.len(), "Fetching records");

        let response = self.client.get(&url).query(params).send().await?;
        let body: serde_json::Value = self.handle_response(response).await?;
        let decoded = decode_records::<R>(body)?;

        if decoded.skipped > 0 {
            warn!(url = %url, skipped = decoded.skipped, "Some records could not be read");
        }
        debug!(url = %url, count = decoded.records.len(), "Fetched records");
        Ok(decoded.records)
    }

    /// Post a sale.
    pub async fn submit_checkout(&self, payload: &CheckoutPayload) -> Result<CheckoutReceipt> {
        let url = self.url(CHECKOUT_ENDPOINT);

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let receipt: CheckoutReceipt = self.handle_response(response).await?;
        info!(
            sale_id = %receipt.sale_id,
            sale_reference = %payload.sale_reference,
            "Checkout accepted"
        );
        Ok(receipt)
    }

    /// Post flattened form values to an update endpoint.
    ///
    /// A 400 or 422 response carrying an `errors` mapping becomes
    /// [`PortalError::Validation`].
    pub async fn submit_form(
        &self,
        endpoint: &str,
        values: &BTreeMap<String, String>,
    ) -> Result<serde_json::Value> {
        let url = self.url(endpoint);

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(values)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY {
            let body = response.text().await.unwrap_or_default();
            let errors = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|json| ServerErrors::from_body(&json));
            return match errors {
                Some(errors) => {
                    debug!(url = %url, fields = errors.len(), "Form rejected by server");
                    Err(PortalError::Validation(errors))
                }
                None => Err(PortalError::Server {
                    status: status.as_u16(),
                    message: body,
                }),
            };
        }

        self.handle_response(response).await
    }

    /// Handle response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(PortalError::NotFound(response.url().to_string()));
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PortalError::Server {
                status,
                message: body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = PortalClient::new(&ApiConfig {
            base_url: "http://localhost:8000/api/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(client.url("/hr/holidays"), "http://localhost:8000/api/hr/holidays");
        assert_eq!(client.url(CHECKOUT_ENDPOINT), "http://localhost:8000/api/pos/checkout");
    }

    #[test]
    fn test_rejects_unusable_api_key() {
        let result = PortalClient::new(&ApiConfig {
            api_key: Some("line\nbreak".to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(PortalError::InvalidConfig(_))));
    }
}
