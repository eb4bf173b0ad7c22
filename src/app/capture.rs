use crate::app::diagnose_leaf::DiagnoseLeafUseCase;
use crate::domain::model::{DiagnosisResult, ImageRef, ImageSource};
use crate::domain::ports::ImagePicker;
use crate::utils::error::{DiagnosisError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Holds the current image selection and runs at most one diagnosis at a time.
pub struct CaptureFlow {
    picker: Arc<dyn ImagePicker>,
    use_case: Arc<DiagnoseLeafUseCase>,
    selected: Mutex<Option<ImageRef>>,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CaptureFlow {
    pub fn new(picker: Arc<dyn ImagePicker>, use_case: Arc<DiagnoseLeafUseCase>) -> Self {
        Self {
            picker,
            use_case,
            selected: Mutex::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Asks the picker for an image. A cancelled pick keeps the previous selection.
    pub async fn select(&self, source: ImageSource) -> Result<Option<ImageRef>> {
        let picked = self.picker.pick(source).await?;
        match &picked {
            Some(image) => {
                tracing::debug!("Selected image {}", image);
                *self.selected.lock().await = Some(image.clone());
            }
            None => tracing::debug!("Image pick from {} cancelled", source),
        }
        Ok(picked)
    }

    pub async fn selected(&self) -> Option<ImageRef> {
        self.selected.lock().await.clone()
    }

    pub async fn clear(&self) {
        *self.selected.lock().await = None;
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn diagnose(&self) -> Result<DiagnosisResult> {
        let image = self
            .selected
            .lock()
            .await
            .clone()
            .ok_or(DiagnosisError::NoImageSelected)?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Ignoring diagnose request for {}: already in flight", image);
            return Err(DiagnosisError::DiagnosisInProgress);
        }
        let _guard = InFlightGuard(&self.in_flight);

        tracing::info!("Diagnosing {}", image);
        match self.use_case.execute(&image).await {
            Ok(result) => {
                tracing::info!(
                    "Diagnosis for {}: {} (log_id: {})",
                    image,
                    result.disease_name,
                    result.log_id.as_deref().unwrap_or("-")
                );
                Ok(result)
            }
            Err(e) => {
                tracing::error!("Diagnosis for {} failed: {}", image, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::DiagnosisRepository;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    struct StaticPicker {
        answer: Option<&'static str>,
        denied: bool,
    }

    #[async_trait]
    impl ImagePicker for StaticPicker {
        async fn pick(&self, source: ImageSource) -> Result<Option<ImageRef>> {
            if self.denied {
                return Err(DiagnosisError::PermissionDenied {
                    origin: source.to_string(),
                });
            }
            Ok(self.answer.map(ImageRef::from))
        }
    }

    /// Blocks inside `diagnose` until released, so a second call can race it.
    struct GatedRepository {
        entered: Notify,
        release: Notify,
        calls: AtomicUsize,
    }

    impl GatedRepository {
        fn new() -> Self {
            Self {
                entered: Notify::new(),
                release: Notify::new(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DiagnosisRepository for GatedRepository {
        async fn diagnose(&self, _image: &ImageRef) -> Result<DiagnosisResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            self.release.notified().await;
            Ok(DiagnosisResult {
                disease_name: "Potato___Early_blight".to_string(),
                confidence: Some(0.8),
                treatment_advice: "Remove infected leaves".to_string(),
                log_id: None,
            })
        }
    }

    fn flow_with(picker: StaticPicker, repository: Arc<GatedRepository>) -> CaptureFlow {
        let use_case = Arc::new(DiagnoseLeafUseCase::new(repository));
        CaptureFlow::new(Arc::new(picker), use_case)
    }

    #[tokio::test]
    async fn test_diagnose_without_selection() {
        let flow = flow_with(
            StaticPicker {
                answer: None,
                denied: false,
            },
            Arc::new(GatedRepository::new()),
        );
        assert!(matches!(
            flow.diagnose().await,
            Err(DiagnosisError::NoImageSelected)
        ));
    }

    #[tokio::test]
    async fn test_cancelled_pick_keeps_selection() {
        let flow = flow_with(
            StaticPicker {
                answer: None,
                denied: false,
            },
            Arc::new(GatedRepository::new()),
        );
        *flow.selected.lock().await = Some(ImageRef::new("/tmp/old.jpg"));

        let picked = flow.select(ImageSource::Gallery).await.unwrap();
        assert!(picked.is_none());
        assert_eq!(flow.selected().await, Some(ImageRef::new("/tmp/old.jpg")));
    }

    #[tokio::test]
    async fn test_select_then_clear() {
        let flow = flow_with(
            StaticPicker {
                answer: Some("/tmp/new.png"),
                denied: false,
            },
            Arc::new(GatedRepository::new()),
        );
        flow.select(ImageSource::Camera).await.unwrap();
        assert_eq!(flow.selected().await, Some(ImageRef::new("/tmp/new.png")));

        flow.clear().await;
        assert_eq!(flow.selected().await, None);
    }

    #[tokio::test]
    async fn test_permission_denied_surfaces() {
        let flow = flow_with(
            StaticPicker {
                answer: Some("/tmp/new.png"),
                denied: true,
            },
            Arc::new(GatedRepository::new()),
        );
        let result = flow.select(ImageSource::Camera).await;
        assert!(matches!(result, Err(DiagnosisError::PermissionDenied { .. })));
        assert_eq!(flow.selected().await, None);
    }

    #[tokio::test]
    async fn test_second_diagnose_rejected_while_in_flight() {
        let repository = Arc::new(GatedRepository::new());
        let flow = flow_with(
            StaticPicker {
                answer: Some("/tmp/leaf.jpg"),
                denied: false,
            },
            repository.clone(),
        );
        flow.select(ImageSource::Gallery).await.unwrap();

        let first = flow.diagnose();
        let second = async {
            repository.entered.notified().await;
            assert!(flow.is_busy());
            let result = flow.diagnose().await;
            repository.release.notify_one();
            result
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first.unwrap().disease_name, "Potato___Early_blight");
        assert!(matches!(second, Err(DiagnosisError::DiagnosisInProgress)));
        assert_eq!(repository.calls.load(Ordering::SeqCst), 1);
        assert!(!flow.is_busy());
    }

    #[tokio::test]
    async fn test_guard_released_after_completion() {
        let repository = Arc::new(GatedRepository::new());
        let flow = flow_with(
            StaticPicker {
                answer: Some("/tmp/leaf.jpg"),
                denied: false,
            },
            repository.clone(),
        );
        flow.select(ImageSource::Gallery).await.unwrap();

        for _ in 0..2 {
            repository.release.notify_one();
            flow.diagnose().await.unwrap();
        }
        assert_eq!(repository.calls.load(Ordering::SeqCst), 2);
    }
}
