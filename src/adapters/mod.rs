// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod picker;

pub use http::HttpDiagnosisClient;
pub use picker::FilePicker;
