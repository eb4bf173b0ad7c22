// Application layer: use case plus the capture and display flows that drive it.

pub mod capture;
pub mod diagnose_leaf;
pub mod display;

pub use capture::CaptureFlow;
pub use diagnose_leaf::DiagnoseLeafUseCase;
pub use display::ResultView;
