use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{
    error::SubmitError,
    protocol::{
        HealthResponse, DATA_FILE_PART, FILL_TEMPLATES_PATH, HEALTH_PATH, TEMPLATE_FILE_PART,
    },
};
use tracing::{info, warn};

use crate::file::FileHandle;

/// The remote collaborator that merges the data into the template.
#[async_trait]
pub trait MergeService: Send + Sync {
    /// Sends both files in one request and returns the archive body.
    async fn fill_templates(
        &self,
        data_file: &FileHandle,
        template_file: &FileHandle,
    ) -> Result<Vec<u8>, SubmitError>;
}

pub struct HttpMergeService {
    http: Client,
    service_url: String,
}

impl HttpMergeService {
    pub fn new(service_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), service_url)
    }

    pub fn with_client(http: Client, service_url: impl Into<String>) -> Self {
        let service_url = service_url.into().trim_end_matches('/').to_string();
        Self { http, service_url }
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    pub async fn health(&self) -> Result<HealthResponse, SubmitError> {
        let response = self
            .http
            .get(format!("{}{HEALTH_PATH}", self.service_url))
            .send()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
            });
        }

        response
            .json::<HealthResponse>()
            .await
            .map_err(SubmitError::unexpected)
    }
}

async fn file_part(file: &FileHandle) -> Result<Part, SubmitError> {
    let bytes = file.read_bytes().await.map_err(|err| {
        SubmitError::Unexpected(format!("failed to read '{}': {err}", file.name()))
    })?;
    Part::bytes(bytes)
        .file_name(file.name().to_string())
        .mime_str(&file.mime_type())
        .map_err(SubmitError::unexpected)
}

#[async_trait]
impl MergeService for HttpMergeService {
    async fn fill_templates(
        &self,
        data_file: &FileHandle,
        template_file: &FileHandle,
    ) -> Result<Vec<u8>, SubmitError> {
        let form = Form::new()
            .part(DATA_FILE_PART, file_part(data_file).await?)
            .part(TEMPLATE_FILE_PART, file_part(template_file).await?);

        let url = format!("{}{FILL_TEMPLATES_PATH}", self.service_url);
        info!(
            url = %url,
            data_file = data_file.name(),
            template_file = template_file.name(),
            "sending fill-templates request"
        );

        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "merge service rejected request");
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))?;
        Ok(body.to_vec())
    }
}
