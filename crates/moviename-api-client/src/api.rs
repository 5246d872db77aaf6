use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use moviename_core::MovieMatch;

use crate::gateway::{AnalysisGateway, GatewayError, UploadPart};
use crate::{api_prefix, ApiClient};

impl ApiClient {
    /// Upload images to `POST /api/films/analyze`.
    #[tracing::instrument(skip(self, parts), fields(part_count = parts.len()))]
    pub async fn analyze_images(
        &self,
        parts: Vec<UploadPart>,
    ) -> Result<MovieMatch, GatewayError> {
        if parts.is_empty() {
            return Err(GatewayError::EmptyUpload);
        }

        let field = self.upload_field().field_name(parts.len());
        let mut form = Form::new();
        for part in parts {
            let body = Part::bytes(part.bytes.to_vec())
                .file_name(part.file_name)
                .mime_str(&part.mime_type)?;
            form = form.part(field, body);
        }

        let path = format!("{}/analyze", api_prefix());
        let movie: MovieMatch = self.post_multipart(&path, form).await?;
        tracing::info!(title = %movie.title, "Analysis completed");
        Ok(movie)
    }

    /// Submit a social-media clip URL to `POST /api/films/analyze_social`.
    #[tracing::instrument(skip(self))]
    pub async fn analyze_social(&self, url: &str) -> Result<MovieMatch, GatewayError> {
        let path = format!(
            "{}/analyze_social?url={}",
            api_prefix(),
            urlencoding::encode(url)
        );
        let movie: MovieMatch = self.post_json(&path, &serde_json::json!({})).await?;
        tracing::info!(title = %movie.title, "Social analysis completed");
        Ok(movie)
    }
}

#[async_trait]
impl AnalysisGateway for ApiClient {
    async fn analyze_images(
        &self,
        parts: Vec<UploadPart>,
    ) -> Result<MovieMatch, GatewayError> {
        ApiClient::analyze_images(self, parts).await
    }

    async fn analyze_social(&self, url: &str) -> Result<MovieMatch, GatewayError> {
        ApiClient::analyze_social(self, url).await
    }
}
