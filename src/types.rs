//! Core data model shared by the classifiers, the CVE correlator and the
//! scan orchestrator.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Threat severity classification, ordered from harmless to critical.
///
/// The ordering is used for escalation: within a single classification pass a
/// level may only ever move up, never silently back down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    /// No threat detected
    Safe,
    /// Low threat - monitor only
    Low,
    /// Medium threat - user notification
    Medium,
    /// High threat - blocking recommended
    High,
    /// Critical threat - immediate action required
    Critical,
}

impl ThreatLevel {
    /// Raise the level to `to` if it is higher than the current one.
    pub fn escalate(&mut self, to: ThreatLevel) {
        if to > *self {
            *self = to;
        }
    }

    /// Human-readable label for UI-facing descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            ThreatLevel::Safe => "Safe",
            ThreatLevel::Low => "Low Risk",
            ThreatLevel::Medium => "Medium Risk",
            ThreatLevel::High => "High Risk",
            ThreatLevel::Critical => "Critical",
        }
    }
}

/// Category of a detected threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatCategory {
    Phishing,
    Malware,
    SuspiciousFile,
    MaliciousUrl,
    DataBreach,
    UnsafeNetwork,
}

impl ThreatCategory {
    /// Lowercase name used when matching against the CVE pattern table.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatCategory::Phishing => "phishing",
            ThreatCategory::Malware => "malware",
            ThreatCategory::SuspiciousFile => "suspicious_file",
            ThreatCategory::MaliciousUrl => "malicious_url",
            ThreatCategory::DataBreach => "data_breach",
            ThreatCategory::UnsafeNetwork => "unsafe_network",
        }
    }
}

/// CVE severity rating. Independent from [`ThreatLevel`]: coarser, and
/// uppercase by CVE convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VulnSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl VulnSeverity {
    /// Uppercase name, per CVE convention.
    pub fn as_str(&self) -> &'static str {
        match self {
            VulnSeverity::Critical => "CRITICAL",
            VulnSeverity::High => "HIGH",
            VulnSeverity::Medium => "MEDIUM",
            VulnSeverity::Low => "LOW",
        }
    }
}

/// A known vulnerability reference used to enrich classifier output.
///
/// Static read-only table data; matched against threat text by the
/// correlator in `intelligence`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VulnerabilityRecord {
    pub cve_id: &'static str,
    pub severity: VulnSeverity,
    pub description: &'static str,
    pub cvss_score: Option<f64>,
    pub published_date: Option<&'static str>,
    pub affected_platforms: Option<&'static [&'static str]>,
}

impl VulnerabilityRecord {
    /// One-line summary appended to threat descriptions.
    pub fn summary(&self) -> String {
        match self.cvss_score {
            Some(score) => {
                format!("{} ({}) - CVSS: {:.1}", self.cve_id, self.severity.as_str(), score)
            }
            None => format!("{} ({})", self.cve_id, self.severity.as_str()),
        }
    }
}

/// A detected threat before id and timestamp assignment.
///
/// Classifiers produce drafts; the calling layer finalizes them into
/// [`ThreatRecord`]s before storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreatDraft {
    pub category: ThreatCategory,
    pub level: ThreatLevel,
    pub title: String,
    pub description: String,
    pub source: String,
    pub blocked: bool,
    pub cve: Option<VulnerabilityRecord>,
}

/// A finalized threat record.
///
/// Immutable after creation except for the `blocked` flag, which the host
/// toggles on user block/allow decisions.
#[derive(Debug, Clone, Serialize)]
pub struct ThreatRecord {
    pub id: String,
    pub category: ThreatCategory,
    pub level: ThreatLevel,
    pub title: String,
    pub description: String,
    pub source: String,
    pub blocked: bool,
    pub detected_at: DateTime<Utc>,
    pub cve: Option<VulnerabilityRecord>,
}

impl ThreatRecord {
    /// Assign a unique id and detection timestamp to a draft.
    ///
    /// Ids are millisecond timestamps with a random hex suffix, which keeps
    /// them unique even when several drafts land in the same millisecond.
    pub fn finalize(draft: ThreatDraft) -> Self {
        let now = Utc::now();
        let suffix: u16 = rand::thread_rng().gen();
        Self {
            id: format!("{}-{:04x}", now.timestamp_millis(), suffix),
            category: draft.category,
            level: draft.level,
            title: draft.title,
            description: draft.description,
            source: draft.source,
            blocked: draft.blocked,
            detected_at: now,
            cve: draft.cve,
        }
    }

    /// Toggle the blocked flag. The only mutation allowed after creation.
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }
}

/// Result of classifying a single URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrlScanResult {
    pub url: String,
    pub is_safe: bool,
    pub threat_level: ThreatLevel,
    pub threats: Vec<String>,
    pub recommendation: String,
}

/// Result of classifying a single file, installer package or app identity.
#[derive(Debug, Clone, Serialize)]
pub struct FileScanOutcome {
    pub is_safe: bool,
    pub threat: Option<ThreatDraft>,
}

impl FileScanOutcome {
    pub fn safe() -> Self {
        Self { is_safe: true, threat: None }
    }

    pub fn flagged(threat: ThreatDraft) -> Self {
        Self { is_safe: false, threat: Some(threat) }
    }
}

/// Progress snapshot emitted repeatedly during a scan session.
///
/// Transient, never persisted. Progress is monotonically non-decreasing
/// within one scan and the last emission reaches 100 with
/// `items_scanned == total_items`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanProgress {
    pub status: String,
    pub progress: u8,
    pub current_item: String,
    pub items_scanned: usize,
    pub total_items: usize,
}

/// Aggregate outcome of one scan session.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub threats_found: Vec<ThreatDraft>,
    pub items_scanned: usize,
    pub scan_duration_ms: u64,
}

/// Derived security posture, recomputed on demand from the current threat
/// records. Never cached.
#[derive(Debug, Clone, Serialize)]
pub struct SecurityStatus {
    pub overall: ThreatLevel,
    pub score: u32,
    pub last_detection_at: Option<DateTime<Utc>>,
    pub threats_blocked: usize,
    pub active_threats: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threat_level_ordering() {
        assert!(ThreatLevel::Safe < ThreatLevel::Low);
        assert!(ThreatLevel::Low < ThreatLevel::Medium);
        assert!(ThreatLevel::Medium < ThreatLevel::High);
        assert!(ThreatLevel::High < ThreatLevel::Critical);
    }

    #[test]
    fn escalate_never_downgrades() {
        let mut level = ThreatLevel::Critical;
        level.escalate(ThreatLevel::Low);
        assert_eq!(level, ThreatLevel::Critical);

        let mut level = ThreatLevel::Safe;
        level.escalate(ThreatLevel::High);
        assert_eq!(level, ThreatLevel::High);
    }

    #[test]
    fn finalize_assigns_unique_ids() {
        let draft = ThreatDraft {
            category: ThreatCategory::MaliciousUrl,
            level: ThreatLevel::High,
            title: "t".into(),
            description: "d".into(),
            source: "s".into(),
            blocked: true,
            cve: None,
        };
        let a = ThreatRecord::finalize(draft.clone());
        let b = ThreatRecord::finalize(draft);
        assert_ne!(a.id, b.id);
        assert!(a.blocked);
    }

    #[test]
    fn vulnerability_summary_uses_uppercase_severity() {
        let record = VulnerabilityRecord {
            cve_id: "CVE-2024-12345",
            severity: VulnSeverity::Critical,
            description: "test",
            cvss_score: Some(9.8),
            published_date: None,
            affected_platforms: None,
        };
        assert_eq!(record.summary(), "CVE-2024-12345 (CRITICAL) - CVSS: 9.8");

        let record = VulnerabilityRecord { cvss_score: None, ..record };
        assert_eq!(record.summary(), "CVE-2024-12345 (CRITICAL)");
    }

    #[test]
    fn level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ThreatLevel::Critical).unwrap(), "\"critical\"");
        assert_eq!(serde_json::to_string(&ThreatCategory::SuspiciousFile).unwrap(), "\"suspicious_file\"");
        assert_eq!(serde_json::to_string(&VulnSeverity::High).unwrap(), "\"HIGH\"");
    }
}
