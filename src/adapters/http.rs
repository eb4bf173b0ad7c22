use crate::domain::model::{DiagnosisResult, ImageRef};
use crate::domain::ports::{ConfigProvider, DiagnosisRepository};
use crate::utils::error::{DiagnosisError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

/// Multipart field the backend's `/diagnose` endpoint reads the upload from.
pub const UPLOAD_FIELD: &str = "file";
/// Response schema this client speaks: `disease_class`, `confidence`,
/// `treatment_advice`, `log_id`.
pub const RESPONSE_SCHEMA_VERSION: &str = "v1";
pub const DEFAULT_FILE_NAME: &str = "leaf.jpg";
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// What gets attached to the multipart body for one image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: &'static str,
}

impl UploadFile {
    pub fn from_image_ref(image: &ImageRef) -> Self {
        let path = local_path(image.as_str());
        let file_name = file_name_for(&path.to_string_lossy());
        let mime_type = mime_type_for(&file_name);
        Self {
            path,
            file_name,
            mime_type,
        }
    }
}

fn local_path(reference: &str) -> PathBuf {
    if let Ok(url) = Url::parse(reference) {
        if url.scheme() == "file" {
            if let Ok(path) = url.to_file_path() {
                return path;
            }
        }
    }
    PathBuf::from(reference)
}

/// Final `/`-separated segment of the reference, or [`DEFAULT_FILE_NAME`].
pub fn file_name_for(reference: &str) -> String {
    reference
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(DEFAULT_FILE_NAME)
        .to_string()
}

/// Registered MIME type for the file extension, or [`DEFAULT_MIME_TYPE`].
pub fn mime_type_for(file_name: &str) -> &'static str {
    mime_guess::from_path(file_name)
        .first_raw()
        .unwrap_or(DEFAULT_MIME_TYPE)
}

#[derive(Debug, Deserialize)]
struct DiagnosisResponseV1 {
    disease_class: String,
    confidence: Option<f64>,
    treatment_advice: String,
    log_id: Option<String>,
}

impl TryFrom<DiagnosisResponseV1> for DiagnosisResult {
    type Error = DiagnosisError;

    fn try_from(wire: DiagnosisResponseV1) -> Result<Self> {
        match wire.confidence {
            Some(c) if !(0.0..=1.0).contains(&c) => {
                return Err(DiagnosisError::MalformedResponse {
                    message: format!("confidence {} is outside [0.0, 1.0]", c),
                });
            }
            None => tracing::warn!("Backend response has no confidence"),
            Some(_) => {}
        }
        if wire.log_id.is_none() {
            tracing::warn!("Backend response has no log_id");
        }

        Ok(DiagnosisResult {
            disease_name: wire.disease_class,
            confidence: wire.confidence,
            treatment_advice: wire.treatment_advice,
            log_id: wire.log_id,
        })
    }
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    message: String,
}

pub struct HttpDiagnosisClient {
    client: Client,
    base_url: String,
}

impl HttpDiagnosisClient {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| DiagnosisError::Config {
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self::with_client(client, config.base_url()))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Calls the backend root endpoint and returns its status message.
    pub async fn health(&self) -> Result<String> {
        let url = self.endpoint("/");
        tracing::debug!("Health check: GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DiagnosisError::Api {
                status_code: status.as_u16(),
                body,
            });
        }

        let health: HealthResponse =
            serde_json::from_str(&body).map_err(|e| DiagnosisError::MalformedResponse {
                message: format!("health response: {}", e),
            })?;
        Ok(health.message)
    }
}

#[async_trait]
impl DiagnosisRepository for HttpDiagnosisClient {
    async fn diagnose(&self, image: &ImageRef) -> Result<DiagnosisResult> {
        let upload = UploadFile::from_image_ref(image);
        let bytes = tokio::fs::read(&upload.path)
            .await
            .map_err(|source| DiagnosisError::ImageRead {
                path: image.to_string(),
                source,
            })?;

        tracing::debug!(
            "Uploading {} ({}, {} bytes) as field '{}'",
            upload.file_name,
            upload.mime_type,
            bytes.len(),
            UPLOAD_FIELD
        );

        let part = Part::bytes(bytes)
            .file_name(upload.file_name)
            .mime_str(upload.mime_type)
            .map_err(|e| DiagnosisError::InvalidUpload {
                message: format!("invalid MIME type '{}': {}", upload.mime_type, e),
            })?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let url = self.endpoint("/diagnose");
        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Diagnosis response status: {}", status);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DiagnosisError::Api {
                status_code: status.as_u16(),
                body,
            });
        }

        let wire: DiagnosisResponseV1 =
            serde_json::from_str(&body).map_err(|e| DiagnosisError::MalformedResponse {
                message: format!("expected {} diagnosis schema: {}", RESPONSE_SCHEMA_VERSION, e),
            })?;
        wire.try_into()
    }
}
