//! HTTP client for the external comparison service.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::document::Document;

use super::error::{Result, ServiceError};
use super::{CompareOutcome, CompareService, HealthStatus};

/// Maximum length for error bodies captured into errors and logs.
const MAX_ERROR_BODY_LENGTH: usize = 200;

/// Default connect timeout for HTTP requests (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default request timeout for HTTP requests (60 seconds).
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Truncates an error body before it lands in an error message or a log
/// line.
fn truncate_error_body(body: &str) -> String {
    if body.len() > MAX_ERROR_BODY_LENGTH {
        format!("{}... (truncated)", &body[..MAX_ERROR_BODY_LENGTH])
    } else {
        body.to_string()
    }
}

/// Wire format of `POST /compare`.
#[derive(Debug, Clone, Deserialize)]
struct CompareResponse {
    status: String,
    #[serde(default)]
    similarity_score: Option<f64>,
    #[serde(default)]
    message: Option<String>,
}

/// Wire format of the health probe (`GET /`).
#[derive(Debug, Clone, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    message: String,
}

/// Maps the wire response onto an outcome, treating any non-`success`
/// status as a rejection carrying the service message.
fn parse_compare_response(response: CompareResponse) -> Result<CompareOutcome> {
    if response.status != "success" {
        return Err(ServiceError::Rejected {
            message: response.message.unwrap_or_else(|| {
                format!("Comparison failed with status '{}'", response.status)
            }),
        });
    }

    let score = response.similarity_score.ok_or_else(|| {
        ServiceError::Malformed("Success response is missing similarity_score".to_string())
    })?;

    if !(0.0..=1.0).contains(&score) {
        return Err(ServiceError::Malformed(format!(
            "similarity_score {} is outside [0, 1]",
            score
        )));
    }

    Ok(CompareOutcome {
        score,
        note: response.message,
    })
}

/// reqwest-backed [`CompareService`] implementation.
pub struct HttpCompareClient {
    client: Client,
    base_url: String,
}

impl HttpCompareClient {
    /// Creates a client for the service at `base_url` with default
    /// timeouts.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeouts(base_url, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates a client with explicit timeouts.
    pub fn with_timeouts(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| ServiceError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_timeouts(
            config.service_url.clone(),
            config.connect_timeout(),
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds one multipart file part from a document's loaded payload.
    fn part_for(document: &Document) -> Result<reqwest::multipart::Part> {
        let bytes = document
            .payload
            .bytes()
            .ok_or_else(|| ServiceError::PayloadNotReady {
                name: document.name.clone(),
            })?;

        let mut part = reqwest::multipart::Part::bytes(bytes.to_vec())
            .file_name(document.name.clone());
        if let Some(mime) = &document.mime_type {
            part = part.mime_str(mime).map_err(|e| {
                ServiceError::Malformed(format!("Invalid MIME type '{}': {}", mime, e))
            })?;
        }
        Ok(part)
    }
}

#[async_trait]
impl CompareService for HttpCompareClient {
    async fn compare(&self, first: &Document, second: &Document) -> Result<CompareOutcome> {
        let url = format!("{}/compare", self.base_url);

        let form = reqwest::multipart::Form::new()
            .part("file1", Self::part_for(first)?)
            .part("file2", Self::part_for(second)?);

        debug!("Submitting '{}' / '{}' to {}", first.name, second.name, url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(format!("Comparison request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Comparison request to {} failed with HTTP {}", url, status);
            return Err(ServiceError::Http {
                status: status.as_u16(),
                body: truncate_error_body(&body),
            });
        }

        let body: CompareResponse = response.json().await.map_err(|e| {
            ServiceError::Malformed(format!("Failed to parse comparison response: {}", e))
        })?;

        parse_compare_response(body)
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(format!("Health probe failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Http {
                status: status.as_u16(),
                body: truncate_error_body(&body),
            });
        }

        let body: HealthResponse = response.json().await.map_err(|e| {
            ServiceError::Malformed(format!("Failed to parse health response: {}", e))
        })?;

        Ok(HealthStatus {
            message: body.message,
        })
    }
}
