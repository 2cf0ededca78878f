//! MLflow Tracking REST Client
//!
//! TrackingClientのREST API実装

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::domain::repositories::tracking_client::TrackingClient;

pub const DEFAULT_TRACKING_URI: &str = "http://localhost:5000";
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

const API_PREFIX: &str = "api/2.0/mlflow";
const RESOURCE_DOES_NOT_EXIST: &str = "RESOURCE_DOES_NOT_EXIST";

#[derive(Debug, Deserialize)]
struct GetExperimentResponse {
    experiment: ExperimentRef,
}

#[derive(Debug, Deserialize)]
struct ExperimentRef {
    experiment_id: String,
}

#[derive(Debug, Deserialize)]
struct CreateExperimentResponse {
    experiment_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiError {
    #[serde(default)]
    error_code: String,
    #[serde(default)]
    message: String,
}

/// REST client for an MLflow tracking server.
///
/// `reqwest::Client` pools connections internally and is safe to share
/// across workers, so one instance serves a whole batch.
#[derive(Debug, Clone)]
pub struct MlflowRestClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl MlflowRestClient {
    /// Create a client for `tracking_uri`, optionally authenticating with a bearer token
    pub fn new(tracking_uri: &str, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: tracking_uri.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_PREFIX, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<reqwest::Response> {
        let url = self.endpoint(path);
        debug!("POST {}", url);
        let response = self
            .authorize(self.client.post(&url).json(&body))
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;
        check_status(response, &url).await
    }
}

async fn check_status(response: reqwest::Response, url: &str) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let api_error: ApiError = serde_json::from_str(&body).unwrap_or_default();
    if api_error.error_code.is_empty() {
        bail!("{} returned {}: {}", url, status, body);
    }
    bail!(
        "{} returned {} ({}): {}",
        url,
        status,
        api_error.error_code,
        api_error.message
    );
}

#[async_trait]
impl TrackingClient for MlflowRestClient {
    async fn get_experiment_id_by_name(&self, name: &str) -> Result<Option<String>> {
        let url = self.endpoint("experiments/get-by-name");
        debug!("GET {}?experiment_name={}", url, name);
        let response = self
            .authorize(self.client.get(&url).query(&[("experiment_name", name)]))
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        if response.status() == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            let api_error: ApiError = serde_json::from_str(&body).unwrap_or_default();
            if api_error.error_code.is_empty() || api_error.error_code == RESOURCE_DOES_NOT_EXIST {
                return Ok(None);
            }
            bail!("{} returned 404 ({}): {}", url, api_error.error_code, api_error.message);
        }

        let response = check_status(response, &url).await?;
        let parsed: GetExperimentResponse = response
            .json()
            .await
            .context("Failed to parse get-by-name response")?;
        Ok(Some(parsed.experiment.experiment_id))
    }

    async fn create_experiment(&self, name: &str) -> Result<String> {
        let response = self
            .post("experiments/create", json!({ "name": name }))
            .await?;
        let parsed: CreateExperimentResponse = response
            .json()
            .await
            .context("Failed to parse create experiment response")?;
        Ok(parsed.experiment_id)
    }

    async fn set_experiment_tag(&self, experiment_id: &str, key: &str, value: &str) -> Result<()> {
        self.post(
            "experiments/set-experiment-tag",
            json!({ "experiment_id": experiment_id, "key": key, "value": value }),
        )
        .await?;
        Ok(())
    }
}
