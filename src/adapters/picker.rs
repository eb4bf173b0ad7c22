use crate::domain::model::{ImageRef, ImageSource};
use crate::domain::ports::ImagePicker;
use crate::utils::error::{DiagnosisError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Gallery picker backed by a file chosen up front, e.g. on the command line.
/// There is no camera on this side, so [`ImageSource::Camera`] is unavailable.
#[derive(Debug, Clone)]
pub struct FilePicker {
    path: PathBuf,
}

impl FilePicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ImagePicker for FilePicker {
    async fn pick(&self, source: ImageSource) -> Result<Option<ImageRef>> {
        if source == ImageSource::Camera {
            return Err(DiagnosisError::SourceUnavailable {
                origin: source.to_string(),
            });
        }

        match tokio::fs::metadata(&self.path).await {
            Ok(meta) if meta.is_file() => {
                let reference = ImageRef::new(self.path.to_string_lossy());
                tracing::debug!("Picked {} from {}", reference, source);
                Ok(Some(reference))
            }
            Ok(_) => Err(DiagnosisError::ImageRead {
                path: self.path.display().to_string(),
                source: std::io::Error::new(ErrorKind::InvalidInput, "not a regular file"),
            }),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                Err(DiagnosisError::PermissionDenied {
                    origin: source.to_string(),
                })
            }
            Err(e) => Err(DiagnosisError::ImageRead {
                path: self.path.display().to_string(),
                source: e,
            }),
        }
    }
}
