use crate::domain::model::{DiagnosisResult, ImageRef, ImageSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Sends one image to the diagnosis backend and returns its classification.
#[async_trait]
pub trait DiagnosisRepository: Send + Sync {
    async fn diagnose(&self, image: &ImageRef) -> Result<DiagnosisResult>;
}

/// Acquires an image from the camera or the gallery.
///
/// `Ok(None)` means the user cancelled the picker.
#[async_trait]
pub trait ImagePicker: Send + Sync {
    async fn pick(&self, source: ImageSource) -> Result<Option<ImageRef>>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn connect_timeout(&self) -> Duration;
}
