//! Thin HTTP client for a running sigmoid API.

pub mod export;

use crate::api::error::ErrorBody;
use crate::core::service::{Calculation, SampleRequest, SeparabilityDemonstration, StoredCurve};
use crate::domain::model::{ParameterRecord, SamplePoint};
use crate::utils::error::{Result, SigmoidError};
use crate::utils::validation::validate_url;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

pub struct SigmoidClient {
    base_url: String,
    client: Client,
}

impl SigmoidClient {
    pub fn new(base_url: &str) -> Result<Self> {
        validate_url("base_url", base_url)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn calculate(&self, request: &SampleRequest) -> Result<Calculation> {
        let url = self.url("/api/calculate/");
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(request).send().await?;
        Self::parse(response).await
    }

    pub async fn sigmoid_data(&self, id: u64) -> Result<StoredCurve> {
        let url = self.url(&format!("/api/data/{}/", id));
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::parse(response).await
    }

    pub async fn demonstrate(&self, seed: Option<u64>) -> Result<SeparabilityDemonstration> {
        let url = self.url("/api/demo/nonlinear-separability/");
        tracing::debug!("GET {} (seed={:?})", url, seed);
        let mut request = self.client.get(&url);
        if let Some(seed) = seed {
            request = request.query(&[("seed", seed)]);
        }
        Self::parse(request.send().await?).await
    }

    pub async fn list_parameters(&self) -> Result<Vec<ParameterRecord>> {
        let url = self.url("/api/parameters/");
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        Err(SigmoidError::ApiError {
            status: status.as_u16(),
            message,
        })
    }
}

/// Every ceil(n/20)-th point, formatted as an x/y table.
pub fn format_table(points: &[SamplePoint]) -> String {
    let mut lines = vec![format!("{:>12}  {:>10}", "x", "y")];
    if points.is_empty() {
        return lines.join("\n");
    }

    let step = points.len().div_ceil(20);
    for point in points.iter().step_by(step) {
        lines.push(format!("{:>12.3}  {:>10.6}", point.x, point.y));
    }
    lines.join("\n")
}
