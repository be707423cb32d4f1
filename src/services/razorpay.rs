use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{
    error::GatewayError,
    models::{CreateOrderPayload, ProviderOrder, ProviderPayment},
};

const DEFAULT_BASE_URL: &str = "https://api.razorpay.com/v1";

/// Client handle for the Razorpay REST API.
///
/// Constructed once at startup and shared across handlers; holds only
/// read-only credentials, so concurrent use needs no coordination.
pub struct RazorpayClient {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Deserialize)]
struct ProviderErrorDetail {
    description: Option<String>,
}

impl RazorpayClient {
    pub fn new(key_id: &str, key_secret: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            key_id: key_id.to_string(),
            key_secret: key_secret.to_string(),
        })
    }

    /// Overrides the API base URL. Used by tests to point at a local mock.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn create_order(
        &self,
        payload: &CreateOrderPayload,
    ) -> Result<ProviderOrder, GatewayError> {
        let response = self
            .http
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let order: ProviderOrder = response.json().await?;
            tracing::info!(
                "Created order {} for {} {}",
                order.id,
                order.amount,
                order.currency
            );
            return Ok(order);
        }

        let detail = provider_error_detail(response).await;
        tracing::error!("Provider order creation failed: {} ({})", detail, status);
        Err(GatewayError::Upstream(format!(
            "order creation failed: {}",
            detail
        )))
    }

    pub async fn fetch_order(&self, order_id: &str) -> Result<ProviderOrder, GatewayError> {
        self.get_entity("order", &format!("{}/orders/{}", self.base_url, order_id))
            .await
    }

    pub async fn fetch_payment(&self, payment_id: &str) -> Result<ProviderPayment, GatewayError> {
        self.get_entity(
            "payment",
            &format!("{}/payments/{}", self.base_url, payment_id),
        )
        .await
    }

    /// Fetches a provider entity, retrying once on transient transport
    /// failure. Lookups are idempotent GETs, so the retry is safe.
    async fn get_entity<T: DeserializeOwned>(
        &self,
        kind: &str,
        url: &str,
    ) -> Result<T, GatewayError> {
        let response = match self.get_once(url).await {
            Ok(response) => response,
            Err(err) if err.is_timeout() || err.is_connect() => {
                tracing::warn!("Transient error fetching {}, retrying once: {}", kind, err);
                self.get_once(url).await?
            }
            Err(err) => return Err(err.into()),
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let detail = provider_error_detail(response).await;

        // Razorpay reports unknown identifiers as BAD_REQUEST_ERROR with a
        // 400, so both 400 and 404 count as "no such record" on lookups.
        if status == StatusCode::BAD_REQUEST || status == StatusCode::NOT_FOUND {
            tracing::debug!("Provider has no {} for this id: {}", kind, detail);
            return Err(GatewayError::NotFound(format!("{} not found", kind)));
        }

        tracing::error!("Provider {} lookup failed: {} ({})", kind, detail, status);
        Err(GatewayError::Upstream(format!(
            "{} lookup failed: {}",
            kind, detail
        )))
    }

    async fn get_once(&self, url: &str) -> Result<reqwest::Response, reqwest::Error> {
        self.http
            .get(url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .send()
            .await
    }
}

async fn provider_error_detail(response: reqwest::Response) -> String {
    let status = response.status();
    response
        .json::<ProviderErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error.description)
        .unwrap_or_else(|| format!("HTTP {}", status))
}
