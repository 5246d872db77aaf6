//! HTTP client for the remote analysis backend.
//!
//! Provides a minimal client with generic POST helpers and the two analysis
//! calls (image set, social URL). The session crate talks to it through the
//! [`AnalysisGateway`] trait so tests can swap the backend out.

pub mod api;
pub mod gateway;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use moviename_core::ClientConfig;

pub use gateway::{AnalysisGateway, GatewayError, UploadField, UploadPart};

/// Analysis endpoints prefix.
pub fn api_prefix() -> &'static str {
    "/api/films"
}

/// HTTP client for the analysis backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    upload_field: UploadField,
}

impl ApiClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            upload_field: UploadField::Files,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let upload_field = if config.legacy_single_field {
            UploadField::LegacySingle
        } else {
            UploadField::Files
        };

        Ok(Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?
        .with_upload_field(upload_field))
    }

    pub fn with_upload_field(mut self, upload_field: UploadField) -> Self {
        self.upload_field = upload_field;
        self
    }

    pub fn upload_field(&self) -> UploadField {
        self.upload_field
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path_and_query: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let url = self.build_url(path_and_query);
        let response = self.client.post(&url).json(body).send().await?;
        Self::read_json(response).await
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, GatewayError> {
        let url = self.build_url(path);
        let response = self.client.post(&url).multipart(form).send().await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    /// Raw client for custom requests.
    pub fn client(&self) -> &Client {
        &self.client
    }
}
