use crate::domain::model::{DiagnosisResult, ImageRef};
use crate::domain::ports::DiagnosisRepository;
use crate::utils::error::Result;
use std::sync::Arc;

/// Forwards an image to whichever [`DiagnosisRepository`] it was built with.
pub struct DiagnoseLeafUseCase {
    repository: Arc<dyn DiagnosisRepository>,
}

impl DiagnoseLeafUseCase {
    pub fn new(repository: Arc<dyn DiagnosisRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, image: &ImageRef) -> Result<DiagnosisResult> {
        self.repository.diagnose(image).await
    }
}
