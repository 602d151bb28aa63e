use crate::domain::model::{MedalRecord, Prediction, PredictionRequest, Snapshot};
use crate::domain::ports::{ConfigProvider, MedalSource, Predictor};
use crate::utils::error::{DashboardError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct CountriesResponse {
    #[serde(default)]
    countries: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Client for the medal backend: `/countries`, `/medals/summary` and `/predict`.
#[derive(Debug, Clone)]
pub struct HttpMedalApi {
    base: String,
    timeout: Option<Duration>,
    client: Client,
}

impl HttpMedalApi {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
            timeout: None,
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let mut api = Self::new(config.api_base());
        api.timeout = config.request_timeout();
        api
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn apply_timeout(&self, request: RequestBuilder) -> RequestBuilder {
        match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    async fn get(&self, path: &str) -> Result<Response> {
        let url = self.url(path);
        tracing::debug!("Making API request to: {}", url);

        let response = self.apply_timeout(self.client.get(&url)).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(DashboardError::HttpStatus {
                endpoint: path.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl MedalSource for HttpMedalApi {
    async fn countries(&self) -> Result<Vec<String>> {
        let body: Option<CountriesResponse> = self.get("/countries").await?.json().await?;
        Ok(body.and_then(|b| b.countries).unwrap_or_default())
    }

    async fn medal_summary(&self) -> Result<Snapshot> {
        let body: Option<Snapshot> = self.get("/medals/summary").await?.json().await?;
        let snapshot = body.unwrap_or_default();
        validate_snapshot(&snapshot)?;
        Ok(snapshot)
    }
}

#[async_trait]
impl Predictor for HttpMedalApi {
    async fn predict(&self, request: &PredictionRequest) -> Result<Prediction> {
        let url = self.url("/predict");
        tracing::info!(
            "Requesting prediction for {} ({})",
            request.country_name,
            request.year
        );

        let response = self
            .apply_timeout(self.client.post(&url).json(request))
            .send()
            .await?;
        let status = response.status();
        tracing::debug!("Prediction response status: {}", status);

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(DashboardError::PredictionRejected {
            status: status.as_u16(),
            detail: extract_detail(&body),
        })
    }
}

/// `detail` from an error body; a string is used as is, anything else as JSON text.
fn extract_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Some(serde_json::Value::String(detail)),
        }) => detail,
        Ok(ErrorBody {
            detail: Some(other),
        }) if !other.is_null() => other.to_string(),
        _ => String::new(),
    }
}

/// Checks performed before a snapshot reaches the projector.
pub fn validate_snapshot(snapshot: &[MedalRecord]) -> Result<()> {
    let mut seen = HashSet::with_capacity(snapshot.len());

    for (index, record) in snapshot.iter().enumerate() {
        if record.country.trim().is_empty() {
            return Err(DashboardError::SnapshotError {
                message: format!("record {} has an empty country", index),
            });
        }
        if !seen.insert(record.country.as_str()) {
            return Err(DashboardError::SnapshotError {
                message: format!("country '{}' appears more than once", record.country),
            });
        }
        if !record.is_consistent() {
            tracing::warn!(
                "Medal total for {} is {} but gold+silver+bronze is {}",
                record.country,
                record.total,
                u64::from(record.gold) + u64::from(record.silver) + u64::from(record.bronze)
            );
        }
    }

    Ok(())
}
