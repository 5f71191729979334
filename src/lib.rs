//! Vigil - Heuristic Threat Detection Engine
//!
//! This crate provides the core functionality for a lightweight, client-side
//! security scanner: pattern-matching classifiers for URLs, files and app
//! packages, CVE correlation for detected threats, scan-session orchestration
//! with progress reporting, and a rolling security score derived from
//! historical outcomes.
//!
//! The engine is pure metadata/string heuristics. It does not execute or
//! analyze file contents, and it owns no persistent state; a stateful host is
//! expected to merge returned results into its own storage.

pub mod classifier;
pub mod engine;
pub mod intelligence;
pub mod logging;
pub mod types;

/// Re-export commonly used types
pub use classifier::file::{scan_apk, scan_app_installation, scan_file};
pub use classifier::url::scan_url;
pub use engine::discovery::{AppProber, AppTarget, FixedProber, UniversalSchemeProber};
pub use engine::scoring::{calculate_security_score, security_level, security_status};
pub use engine::session::ScanSession;
pub use intelligence::find_cve_for_threat;
pub use types::{
    ScanProgress, ScanResult, SecurityStatus, ThreatCategory, ThreatDraft, ThreatLevel,
    ThreatRecord, UrlScanResult, VulnerabilityRecord,
};

use std::time::Duration;

/// Scan session configuration
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Pause between scanned items, purely so a UI can render incremental
    /// progress. Set to zero in non-interactive use.
    pub item_delay: Duration,
    /// Upper bound on the target-discovery probe batch. A timeout degrades
    /// discovery to the universal fallback targets instead of failing.
    pub discovery_timeout: Duration,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            item_delay: Duration::from_millis(400),
            discovery_timeout: Duration::from_secs(10),
        }
    }
}

impl ScanOptions {
    /// Options suitable for tests and batch runs: no artificial delays.
    pub fn immediate() -> Self {
        Self {
            item_delay: Duration::ZERO,
            discovery_timeout: Duration::from_secs(1),
        }
    }
}
