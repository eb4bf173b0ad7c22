use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagnosisError {
    #[error("Permission denied for {origin}")]
    PermissionDenied { origin: String },

    #[error("Image source not available: {origin}")]
    SourceUnavailable { origin: String },

    #[error("No image selected")]
    NoImageSelected,

    #[error("A diagnosis is already in progress")]
    DiagnosisInProgress,

    #[error("Failed to read image '{path}': {source}")]
    ImageRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid upload: {message}")]
    InvalidUpload { message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status_code}: {body}")]
    Api { status_code: u16, body: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfig { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Transport,
    Backend,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DiagnosisError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DiagnosisError::PermissionDenied { .. }
            | DiagnosisError::SourceUnavailable { .. }
            | DiagnosisError::NoImageSelected
            | DiagnosisError::DiagnosisInProgress
            | DiagnosisError::ImageRead { .. }
            | DiagnosisError::InvalidUpload { .. } => ErrorCategory::Input,
            DiagnosisError::Network(_) => ErrorCategory::Transport,
            DiagnosisError::Api { .. } | DiagnosisError::MalformedResponse { .. } => {
                ErrorCategory::Backend
            }
            DiagnosisError::Config { .. }
            | DiagnosisError::MissingConfig { .. }
            | DiagnosisError::InvalidConfigValue { .. } => ErrorCategory::Configuration,
            DiagnosisError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DiagnosisError::DiagnosisInProgress => ErrorSeverity::Low,
            DiagnosisError::Network(_) => ErrorSeverity::Medium,
            DiagnosisError::Api { status_code, .. } if *status_code >= 500 => {
                ErrorSeverity::Medium
            }
            DiagnosisError::Io(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// Short message suitable for showing to the person holding the phone.
    pub fn user_friendly_message(&self) -> String {
        match self {
            DiagnosisError::PermissionDenied { .. } => {
                "Camera/gallery access is required.".to_string()
            }
            DiagnosisError::SourceUnavailable { origin } => {
                format!("The {} is not available on this device.", origin)
            }
            DiagnosisError::NoImageSelected => "Please pick or take a photo first.".to_string(),
            DiagnosisError::DiagnosisInProgress => {
                "A diagnosis is already running for this photo.".to_string()
            }
            DiagnosisError::ImageRead { path, .. } => {
                format!("Could not read the image at {}.", path)
            }
            DiagnosisError::InvalidUpload { .. }
            | DiagnosisError::Network(_)
            | DiagnosisError::Api { .. }
            | DiagnosisError::MalformedResponse { .. } => {
                "Upload or diagnosis failed. Please try again.".to_string()
            }
            DiagnosisError::Config { .. }
            | DiagnosisError::MissingConfig { .. }
            | DiagnosisError::InvalidConfigValue { .. } => {
                format!("Configuration problem: {}", self)
            }
            DiagnosisError::Io(e) => format!("System error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DiagnosisError::PermissionDenied { origin } => {
                format!("Grant access to the {} and try again", origin)
            }
            DiagnosisError::SourceUnavailable { .. } => {
                "Choose an existing photo from the gallery instead".to_string()
            }
            DiagnosisError::NoImageSelected => "Select an image before diagnosing".to_string(),
            DiagnosisError::DiagnosisInProgress => {
                "Wait for the running diagnosis to finish".to_string()
            }
            DiagnosisError::ImageRead { .. } => {
                "Check that the file exists and is readable".to_string()
            }
            DiagnosisError::InvalidUpload { .. } => {
                "Pick a different image file and try again".to_string()
            }
            DiagnosisError::Network(_) => {
                "Check network connectivity and that the backend is reachable".to_string()
            }
            DiagnosisError::Api { status_code, .. } if *status_code >= 500 => {
                "The diagnosis service failed; try again later".to_string()
            }
            DiagnosisError::Api { .. } => {
                "The backend rejected the upload; check the image format".to_string()
            }
            DiagnosisError::MalformedResponse { .. } => {
                "Make sure the backend speaks the v1 diagnosis schema".to_string()
            }
            DiagnosisError::Config { .. }
            | DiagnosisError::MissingConfig { .. }
            | DiagnosisError::InvalidConfigValue { .. } => {
                "Check the config file path and backend settings, or pass --base-url".to_string()
            }
            DiagnosisError::Io(_) => "Check file permissions and disk state".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DiagnosisError>;
