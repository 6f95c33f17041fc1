use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::BaseBenefitSubmitter;

/// HTTP client for the benefit application service
pub struct HttpBenefitSubmitter {
    endpoint: String,
    client: reqwest::Client,
}

/// Service acknowledgement
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionResponse {
    confirmation_code: String,
}

impl HttpBenefitSubmitter {
    /// Create a new client posting to `endpoint`
    pub fn new(endpoint: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl BaseBenefitSubmitter for HttpBenefitSubmitter {
    async fn submit(&self, payload: &Value) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .context("Failed to send benefit application")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Benefit service error {}: {}", status, body);
        }

        let acknowledgement: SubmissionResponse = response
            .json()
            .await
            .context("Failed to parse benefit service response")?;

        Ok(acknowledgement.confirmation_code)
    }
}

/// Submitter used when no service is configured; every submission fails
pub struct UnconfiguredSubmitter;

#[async_trait]
impl BaseBenefitSubmitter for UnconfiguredSubmitter {
    async fn submit(&self, _payload: &Value) -> Result<String> {
        anyhow::bail!("SUBMISSION_API_URL is not configured")
    }
}
