//! Core detection engine module

pub mod discovery;
pub mod fs_scan;
pub mod scoring;
pub mod session;
pub mod simulation;

pub use discovery::{detect_available_apps, AppProber, AppTarget};
pub use scoring::{calculate_security_score, security_level, security_status};
pub use session::{ScanError, ScanSession};
