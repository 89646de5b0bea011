use std::time::Duration;

use reqwest::{Client, header};
use serde_json::Value;
use url::Url;

use super::{UpstreamGateway, UpstreamQuery};
use crate::{Error, Result};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// HTTP client for the provider's internal API.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
}

impl UpstreamClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, base_url })
    }
}

impl UpstreamGateway for UpstreamClient {
    /// POST the query and parse the response body as JSON. No retries.
    async fn fetch(&self, query: &UpstreamQuery) -> Result<Value> {
        let url = query.to_url(&self.base_url);
        tracing::debug!("Upstream request: {}", url);

        let response = self
            .client
            .post(url.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::UpstreamFailed {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!("Upstream response: {} bytes", body.len());

        Ok(serde_json::from_slice(&body)?)
    }
}
