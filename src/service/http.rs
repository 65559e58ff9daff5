use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{
    Ack, CompareRequest, CompareResponse, SaveRankingsRequest, TranslateRequest,
    TranslateResponse, TranslationBackend,
};
use crate::comparison::submission::SubmissionRecord;
use crate::errors::ServiceError;

/// Hosted service used when no endpoint is configured
pub const DEFAULT_ENDPOINT: &str = "https://backend-vaeh.onrender.com";

/// HTTP client for the translation service
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// HTTP client for API requests
    client: Client,
    /// Base URL, without trailing slash
    endpoint: String,
}

impl HttpBackend {
    /// Create a client for `endpoint`.
    ///
    /// Without a timeout a request that never resolves keeps the caller waiting.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self::with_client(endpoint, builder.build().unwrap_or_default())
    }

    /// Create a backend around a preconfigured client
    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        let endpoint = endpoint.into();
        let endpoint = if endpoint.trim().is_empty() {
            DEFAULT_ENDPOINT.to_string()
        } else {
            endpoint.trim().trim_end_matches('/').to_string()
        };

        Self { client, endpoint }
    }

    /// Base URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, ServiceError> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self.client.post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::RequestFailed(format!("Failed to send request to {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Service error on {} ({}): {}", path, status, error_text);
            return Err(ServiceError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        Ok(response)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ServiceError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.post(path, body).await?;
        response.json::<R>().await
            .map_err(|e| ServiceError::ParseError(format!("Invalid response from {}: {}", path, e)))
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, None)
    }
}

#[async_trait]
impl TranslationBackend for HttpBackend {
    async fn compare(&self, request: &CompareRequest) -> Result<CompareResponse, ServiceError> {
        self.post_json("rate", request).await
    }

    async fn save_rankings(&self, records: &[SubmissionRecord]) -> Result<Ack, ServiceError> {
        let body = SaveRankingsRequest { rankings: records.to_vec() };
        let response = self.post("save-rankings", &body).await?;
        Ok(Ack {
            status_code: response.status().as_u16(),
            records: records.len(),
        })
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResponse, ServiceError> {
        self.post_json("translate", request).await
    }
}
