//! HTTP client for the analysis backend.
//!
//! One `POST {base_url}/analyze` per request with a JSON `{"url": ...}` body.
//! No retries, no client-side timeout.

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::ClientConfig,
    types::{AnalysisRequest, AnalysisResult},
};

pub const GENERIC_ERROR_MESSAGE: &str = "Failed to analyze video. Please try again.";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response ({status}): {}", .message.as_deref().unwrap_or("malformed body"))]
    Protocol {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Backend reported an error: {message}")]
    BackendReported { message: String },

    #[error("Invalid backend URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// Text shown to the user: the backend's message if it sent one.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Protocol {
                message: Some(message),
                ..
            }
            | ClientError::BackendReported { message } => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError>;
}

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AnalysisClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.analyze_endpoint(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisBackend for AnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError> {
        info!(endpoint = %self.endpoint, video_id = %request.video_id, "sending analysis request");

        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .inspect_err(|e| warn!(error = %e, "analysis request failed"))?;

        let status = response.status();
        let body = response.bytes().await?;

        parse_response(status, &body)
    }
}

fn parse_response(status: StatusCode, body: &[u8]) -> Result<AnalysisResult, ClientError> {
    let value = serde_json::from_slice::<serde_json::Value>(body).ok();
    let reported = value
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(|e| e.as_str())
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(String::from);

    if !status.is_success() {
        return Err(ClientError::Protocol {
            status,
            message: reported,
        });
    }

    if let Some(message) = reported {
        return Err(ClientError::BackendReported { message });
    }

    let malformed = || ClientError::Protocol {
        status,
        message: None,
    };
    let value = value.ok_or_else(malformed)?;

    serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "malformed analysis response");
        malformed()
    })
}
