pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{FilePicker, HttpDiagnosisClient};
pub use app::{CaptureFlow, DiagnoseLeafUseCase, ResultView};
pub use config::AppConfig;
pub use domain::model::{DiagnosisResult, ImageRef, ImageSource};
pub use domain::ports::{ConfigProvider, DiagnosisRepository, ImagePicker};
pub use utils::error::{DiagnosisError, Result};
pub use utils::text::strip_markdown;
