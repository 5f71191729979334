//! Scan Session Orchestrator
//!
//! Runs quick and full scan sessions: discovers reachable app targets,
//! iterates scan items while emitting progress callbacks, classifies each
//! app item and aggregates the resulting threat drafts into one
//! [`ScanResult`].

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::classifier::file::scan_app_installation;
use crate::classifier::url::scan_url;
use crate::engine::discovery::{detect_available_apps, AppProber, AppTarget, FALLBACK_TARGETS};
use crate::intelligence::find_cve_for_threat;
use crate::types::{ScanProgress, ScanResult, ThreatCategory, ThreatDraft, ThreatLevel};
use crate::ScanOptions;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("scan item error: {0}")]
    ItemError(String),
}

/// System areas iterated during a full scan. These have no probe URL and are
/// walked for progress reporting only; they never produce findings by
/// themselves.
pub const SYSTEM_AREAS: &[&str] = &[
    "Downloaded Files",
    "Recent Documents",
    "Browser Cache",
    "System Memory",
    "Network Connections",
    "Background Processes",
    "Clipboard History",
    "Installed Applications",
    "App Permissions",
    "System Settings",
];

enum ScanItem {
    App(AppTarget),
    SystemArea(&'static str),
}

impl ScanItem {
    fn name(&self) -> &str {
        match self {
            ScanItem::App(target) => target.name,
            ScanItem::SystemArea(name) => name,
        }
    }

    fn status(&self, app_status: &str) -> String {
        match self {
            ScanItem::App(_) => app_status.to_string(),
            ScanItem::SystemArea(_) => "Scanning system files and settings...".to_string(),
        }
    }
}

/// Orchestrates scan sessions over discovered targets.
///
/// Each scan invocation runs to completion or fails; there is no
/// pause/resume and no internal mutual exclusion. Callers that can trigger
/// overlapping scans must serialize them (and the merges of the returned
/// results) themselves.
pub struct ScanSession {
    prober: Arc<dyn AppProber>,
    options: ScanOptions,
}

impl ScanSession {
    pub fn new(prober: Arc<dyn AppProber>, options: ScanOptions) -> Self {
        Self { prober, options }
    }

    /// Scan the discovered app targets only.
    ///
    /// Progress starts at 5% after discovery and advances proportionally per
    /// item. Zero discovered targets yields an empty, well-formed result.
    pub async fn perform_quick_scan<F>(&self, mut on_progress: F) -> Result<ScanResult, ScanError>
    where
        F: FnMut(ScanProgress),
    {
        let start = Instant::now();
        info!("starting quick scan");

        on_progress(ScanProgress {
            status: "Detecting available apps...".to_string(),
            progress: 5,
            current_item: "Scanning device...".to_string(),
            items_scanned: 0,
            total_items: 0,
        });

        let apps = self.discover_targets().await;
        let items: Vec<ScanItem> = apps.into_iter().map(ScanItem::App).collect();

        self.run_items(
            items,
            5,
            "Scanning available apps and recent sites...",
            start,
            &mut on_progress,
        )
        .await
    }

    /// Scan the discovered app targets plus the fixed system-area catalog.
    pub async fn perform_full_scan<F>(&self, mut on_progress: F) -> Result<ScanResult, ScanError>
    where
        F: FnMut(ScanProgress),
    {
        let start = Instant::now();
        info!("starting full system scan");

        on_progress(ScanProgress {
            status: "Detecting available apps...".to_string(),
            progress: 3,
            current_item: "Scanning device...".to_string(),
            items_scanned: 0,
            total_items: 0,
        });

        let apps = self.discover_targets().await;
        let mut items: Vec<ScanItem> = apps.into_iter().map(ScanItem::App).collect();
        items.extend(SYSTEM_AREAS.iter().copied().map(ScanItem::SystemArea));

        self.run_items(
            items,
            3,
            "Deep scanning apps and system areas...",
            start,
            &mut on_progress,
        )
        .await
    }

    /// Classify a single installed app by its display name and probe URL.
    ///
    /// Returns a threat draft only for actual threats: phishing/malware
    /// findings or a critical/high verdict. Corroborating detail such as an
    /// insecure-connection note never produces a draft by itself.
    pub async fn scan_installed_app(&self, app_name: &str, app_url: &str) -> Option<ThreatDraft> {
        detect_threat_in_app(app_name, app_url)
    }

    /// Discover reachable app targets and classify each of them.
    pub async fn scan_all_installed_apps(&self) -> Vec<ThreatDraft> {
        let apps = self.discover_targets().await;
        apps.iter()
            .filter_map(|app| detect_threat_in_app(app.name, app.probe_url))
            .collect()
    }

    /// Scan a URL on behalf of an interception hook (clipboard, link tap).
    ///
    /// Wraps the URL classifier and attaches CVE enrichment; only
    /// critical/high verdicts are escalated into a threat draft.
    pub async fn intercept_and_scan_url(&self, url: &str) -> Option<ThreatDraft> {
        let result = scan_url(url);
        if result.is_safe || result.threat_level < ThreatLevel::High {
            return None;
        }

        let description = format!("{} - {}", result.url, result.threats.join(", "));
        let cve = find_cve_for_threat(ThreatCategory::MaliciousUrl, &description, Some(url));
        let mut draft = ThreatDraft {
            category: ThreatCategory::MaliciousUrl,
            level: result.threat_level,
            title: "Malicious URL Intercepted".to_string(),
            description,
            source: url.to_string(),
            blocked: true,
            cve,
        };
        if let Some(cve) = cve {
            draft.description.push_str(&format!("\nKnown vulnerability: {}", cve.summary()));
        }
        Some(draft)
    }

    /// Discovery with a timeout. A timed-out probe batch degrades to the
    /// universal fallback targets instead of failing the scan.
    async fn discover_targets(&self) -> Vec<AppTarget> {
        match timeout(
            self.options.discovery_timeout,
            detect_available_apps(self.prober.as_ref()),
        )
        .await
        {
            Ok(targets) => targets,
            Err(_) => {
                warn!("target discovery timed out, using fallback targets");
                FALLBACK_TARGETS.to_vec()
            }
        }
    }

    async fn run_items<F>(
        &self,
        items: Vec<ScanItem>,
        base_percent: u8,
        app_status: &str,
        start: Instant,
        on_progress: &mut F,
    ) -> Result<ScanResult, ScanError>
    where
        F: FnMut(ScanProgress),
    {
        if items.is_empty() {
            info!("no items available to scan");
            return Ok(ScanResult {
                threats_found: Vec::new(),
                items_scanned: 0,
                scan_duration_ms: start.elapsed().as_millis() as u64,
            });
        }

        let total = items.len();
        let remaining = 100.0 - f64::from(base_percent);
        let mut threats_found = Vec::new();

        for (index, item) in items.iter().enumerate() {
            let progress =
                f64::from(base_percent) + ((index + 1) as f64 / total as f64) * remaining;

            on_progress(ScanProgress {
                status: item.status(app_status),
                progress: progress.round() as u8,
                current_item: item.name().to_string(),
                items_scanned: index + 1,
                total_items: total,
            });

            if let ScanItem::App(target) = item {
                if !target.probe_url.is_empty() {
                    if let Some(threat) = detect_threat_in_app(target.name, target.probe_url) {
                        warn!(app = target.name, "threat detected during scan");
                        threats_found.push(threat);
                    }
                }
            }

            if !self.options.item_delay.is_zero() {
                tokio::time::sleep(self.options.item_delay).await;
            }
        }

        let scan_duration_ms = start.elapsed().as_millis() as u64;
        info!(
            threats = threats_found.len(),
            items = total,
            duration_ms = scan_duration_ms,
            "scan completed"
        );

        Ok(ScanResult { threats_found, items_scanned: total, scan_duration_ms })
    }
}

/// Classify one app item: its probe URL through the URL classifier and its
/// display name through the app-identity keyword check.
///
/// Only actual threats produce a draft. A URL flagged solely with
/// corroborating notes (insecure connection, shortener) stays quiet to avoid
/// false-positive floods from ordinary HTTP links.
fn detect_threat_in_app(app_name: &str, url: &str) -> Option<ThreatDraft> {
    let scan_result = scan_url(url);

    if !scan_result.is_safe && scan_result.threat_level >= ThreatLevel::High {
        let mut kinds = Vec::new();
        if scan_result.threats.iter().any(|t| t.contains("phishing")) {
            kinds.push("Phishing");
        }
        if scan_result.threats.iter().any(|t| t.contains("Suspicious keywords")) {
            kinds.push("Suspicious Activity");
        }
        let kind = if kinds.is_empty() {
            "Unknown Threat".to_string()
        } else {
            kinds.join(", ")
        };

        let description = format!(
            "App: {}\nThreat Type: {}\nSeverity: {}\nDetails: {}",
            app_name,
            kind,
            scan_result.threat_level.label(),
            scan_result.threats.join(", ")
        );
        let cve = find_cve_for_threat(ThreatCategory::MaliciousUrl, &description, Some(url));

        return Some(ThreatDraft {
            category: ThreatCategory::MaliciousUrl,
            level: scan_result.threat_level,
            title: format!("Threat in {}", app_name),
            description,
            source: url.to_string(),
            blocked: true,
            cve,
        });
    }

    // The app identity itself may be suspicious even when its URL is clean.
    // The identity draft is rewrapped so scan-loop findings all carry the
    // same shape: a title naming the offending item and blocked set.
    let identity = scan_app_installation(app_name, None);
    identity.threat.map(|draft| ThreatDraft {
        title: format!("Threat in {}", app_name),
        description: format!(
            "App: {}\nThreat Type: {}\nSeverity: {}\nDetails: {}",
            app_name,
            draft.category.as_str(),
            draft.level.label(),
            draft.description
        ),
        blocked: true,
        ..draft
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::discovery::FixedProber;
    use std::sync::Arc;

    fn session(schemes: &[&str]) -> ScanSession {
        let prober = Arc::new(FixedProber::new(schemes.iter().copied()));
        ScanSession::new(prober, ScanOptions::immediate())
    }

    #[tokio::test]
    async fn quick_scan_with_no_targets_returns_empty_result() {
        let session = session(&[]);
        let mut calls = 0;
        let result = session
            .perform_quick_scan(|_| calls += 1)
            .await
            .expect("scan should not fail");

        assert!(result.threats_found.is_empty());
        assert_eq!(result.items_scanned, 0);
        assert!(calls >= 1, "progress callback must fire at least once");
    }

    #[tokio::test]
    async fn quick_scan_reports_monotonic_progress() {
        let session = session(&["whatsapp", "spotify", "netflix"]);
        let mut progress_log = Vec::new();
        let result = session
            .perform_quick_scan(|p| progress_log.push(p))
            .await
            .expect("scan should not fail");

        assert_eq!(result.items_scanned, 3);
        assert!(progress_log.windows(2).all(|w| w[0].progress <= w[1].progress));
        let last = progress_log.last().expect("at least one emission");
        assert_eq!(last.progress, 100);
        assert_eq!(last.items_scanned, last.total_items);
    }

    #[tokio::test]
    async fn full_scan_includes_system_areas() {
        let session = session(&["whatsapp"]);
        let mut total_seen = 0;
        let result = session
            .perform_full_scan(|p| total_seen = p.total_items)
            .await
            .expect("scan should not fail");

        assert_eq!(result.items_scanned, 1 + SYSTEM_AREAS.len());
        assert_eq!(total_seen, 1 + SYSTEM_AREAS.len());
    }

    #[tokio::test]
    async fn full_scan_status_switches_for_system_areas() {
        let session = session(&["whatsapp"]);
        let mut progress_log = Vec::new();
        session
            .perform_full_scan(|p| progress_log.push(p))
            .await
            .expect("scan should not fail");

        let app_emission = progress_log
            .iter()
            .find(|p| p.current_item == "WhatsApp")
            .expect("app item emitted");
        assert_eq!(app_emission.status, "Deep scanning apps and system areas...");

        let area_emissions: Vec<_> = progress_log
            .iter()
            .filter(|p| SYSTEM_AREAS.contains(&p.current_item.as_str()))
            .collect();
        assert_eq!(area_emissions.len(), SYSTEM_AREAS.len());
        assert!(area_emissions
            .iter()
            .all(|p| p.status == "Scanning system files and settings..."));
    }

    #[tokio::test]
    async fn full_scan_system_areas_never_produce_findings() {
        // Both reachable apps are clean, so any finding would have to come
        // from a system area.
        let session = session(&["whatsapp", "netflix"]);
        let result = session
            .perform_full_scan(|_| {})
            .await
            .expect("scan should not fail");
        assert!(result.threats_found.is_empty());
    }

    #[tokio::test]
    async fn phishing_probe_url_is_reported() {
        let draft = session(&[])
            .scan_installed_app(
                "Banking App",
                "http://verify-paypal-secure.phishing-site.example/login",
            )
            .await
            .expect("phishing URL should be flagged");

        assert_eq!(draft.level, ThreatLevel::Critical);
        assert!(draft.blocked);
        assert_eq!(draft.category, ThreatCategory::MaliciousUrl);
        assert!(draft.title.contains("Banking App"));
    }

    #[tokio::test]
    async fn suspicious_app_name_with_clean_url_is_reported_blocked() {
        let draft = session(&[])
            .scan_installed_app("Keylogger Helper", "https://example.com")
            .await
            .expect("suspicious app name should be flagged");

        assert!(draft.blocked);
        assert_eq!(draft.title, "Threat in Keylogger Helper");
        assert_eq!(draft.level, ThreatLevel::High);
        assert!(draft.description.contains("Severity: High Risk"));
    }

    #[tokio::test]
    async fn plain_http_app_url_is_not_reported() {
        let draft = session(&[])
            .scan_installed_app("News Reader", "http://news.example.org")
            .await;
        assert!(draft.is_none());
    }

    #[tokio::test]
    async fn intercept_flags_only_high_and_critical() {
        let session = session(&[]);

        let critical = session
            .intercept_and_scan_url("http://apple-id-locked.example.net/verify")
            .await
            .expect("critical URL should be intercepted");
        assert_eq!(critical.level, ThreatLevel::Critical);
        assert!(critical.blocked);

        // Malformed URLs are a low-severity finding and must pass through.
        assert!(session.intercept_and_scan_url("not a url").await.is_none());
        assert!(session.intercept_and_scan_url("https://example.com").await.is_none());
    }
}
