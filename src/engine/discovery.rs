//! Target Discovery
//!
//! Determines which of a fixed catalog of app targets are actually reachable
//! on the current device before scanning them. Probing goes through an
//! injected [`AppProber`] so the orchestrator can be unit-tested against a
//! fixed fake catalog instead of real platform probing.

use async_trait::async_trait;
use tracing::{debug, info, warn};

/// A scannable app target: display name, representative probe URL and the
/// URL scheme used to test openability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppTarget {
    pub name: &'static str,
    pub probe_url: &'static str,
    pub scheme: &'static str,
}

/// Catalog of well-known consumer apps probed during discovery.
pub const APP_CATALOG: &[AppTarget] = &[
    AppTarget { name: "Chrome Browser", probe_url: "https://www.google.com/chrome", scheme: "googlechrome" },
    AppTarget { name: "Gmail", probe_url: "https://mail.google.com", scheme: "googlegmail" },
    AppTarget { name: "WhatsApp", probe_url: "https://whatsapp.com", scheme: "whatsapp" },
    AppTarget { name: "Instagram", probe_url: "https://instagram.com", scheme: "instagram" },
    AppTarget { name: "Facebook", probe_url: "https://facebook.com", scheme: "fb" },
    AppTarget { name: "Twitter", probe_url: "https://twitter.com", scheme: "twitter" },
    AppTarget { name: "Telegram", probe_url: "https://telegram.org", scheme: "tg" },
    AppTarget { name: "YouTube", probe_url: "https://youtube.com", scheme: "youtube" },
    AppTarget { name: "Banking App", probe_url: "https://onlinebanking.example.com/login", scheme: "paypal" },
    AppTarget { name: "Shopping App", probe_url: "https://amazon.com", scheme: "amazon" },
    AppTarget { name: "Spotify", probe_url: "https://spotify.com", scheme: "spotify" },
    AppTarget { name: "Netflix", probe_url: "https://netflix.com", scheme: "netflix" },
    AppTarget { name: "TikTok", probe_url: "https://tiktok.com", scheme: "tiktok" },
    AppTarget { name: "Snapchat", probe_url: "https://snapchat.com", scheme: "snapchat" },
    AppTarget { name: "LinkedIn", probe_url: "https://linkedin.com", scheme: "linkedin" },
    AppTarget { name: "Uber", probe_url: "https://uber.com", scheme: "uber" },
    AppTarget { name: "Maps", probe_url: "https://maps.google.com", scheme: "geo" },
    AppTarget { name: "Calendar", probe_url: "https://calendar.google.com", scheme: "calshow" },
];

/// Universally-available targets returned when probing finds nothing, so a
/// scan in a sandboxed environment still has something meaningful to do.
pub const FALLBACK_TARGETS: &[AppTarget] = &[
    AppTarget { name: "Web Browser", probe_url: "https://example.com", scheme: "https" },
    AppTarget { name: "Phone", probe_url: "tel:+10000000000", scheme: "tel" },
    AppTarget { name: "Mail", probe_url: "mailto:user@example.com", scheme: "mailto" },
];

/// Capability prober: answers whether a URL scheme can be opened on the
/// current platform.
///
/// Probe failures mean "capability unavailable", never a scan error.
#[async_trait]
pub trait AppProber: Send + Sync {
    async fn can_open(&self, scheme: &str) -> bool;
}

/// Default prober for environments without app-scheme registration
/// (servers, CI, sandboxes): only universal schemes resolve, which routes
/// discovery to the fallback subset.
#[derive(Debug, Clone, Default)]
pub struct UniversalSchemeProber;

#[async_trait]
impl AppProber for UniversalSchemeProber {
    async fn can_open(&self, scheme: &str) -> bool {
        matches!(scheme, "https" | "http" | "tel" | "mailto")
    }
}

/// Test prober backed by a fixed set of available schemes.
#[derive(Debug, Clone, Default)]
pub struct FixedProber {
    pub available_schemes: Vec<String>,
}

impl FixedProber {
    pub fn new<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { available_schemes: schemes.into_iter().map(Into::into).collect() }
    }
}

#[async_trait]
impl AppProber for FixedProber {
    async fn can_open(&self, scheme: &str) -> bool {
        self.available_schemes.iter().any(|s| s == scheme)
    }
}

/// Probe the app catalog and return the targets confirmed openable.
///
/// Idempotent modulo the set of apps actually present. When no catalog
/// entry is reachable, the universal [`FALLBACK_TARGETS`] are probed instead
/// so that scans remain meaningful in sandboxed environments; an environment
/// where even those fail yields an empty list, which the orchestrator treats
/// as a valid, non-error outcome.
pub async fn detect_available_apps(prober: &dyn AppProber) -> Vec<AppTarget> {
    let mut available = probe_targets(prober, APP_CATALOG).await;

    info!(
        detected = available.len(),
        catalog = APP_CATALOG.len(),
        "app target discovery completed"
    );

    if available.is_empty() {
        warn!("no app targets detected, probing universal fallback targets");
        available = probe_targets(prober, FALLBACK_TARGETS).await;
    }

    available
}

async fn probe_targets(prober: &dyn AppProber, catalog: &[AppTarget]) -> Vec<AppTarget> {
    let mut available = Vec::new();
    for target in catalog {
        if prober.can_open(target.scheme).await {
            debug!(app = target.name, "target reachable");
            available.push(target.clone());
        } else {
            debug!(app = target.name, "target not present");
        }
    }
    available
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn detects_only_probed_schemes() {
        let prober = FixedProber::new(["whatsapp", "spotify"]);
        let targets = detect_available_apps(&prober).await;
        let names: Vec<_> = targets.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["WhatsApp", "Spotify"]);
    }

    #[tokio::test]
    async fn empty_probe_falls_back_to_universal_targets() {
        let prober = UniversalSchemeProber;
        let targets = detect_available_apps(&prober).await;
        assert_eq!(targets, FALLBACK_TARGETS.to_vec());
    }

    #[tokio::test]
    async fn fully_sandboxed_environment_yields_no_targets() {
        let prober = FixedProber::default();
        let targets = detect_available_apps(&prober).await;
        assert!(targets.is_empty());
    }

    #[tokio::test]
    async fn universal_prober_resolves_fallback_schemes() {
        let prober = UniversalSchemeProber;
        assert!(prober.can_open("https").await);
        assert!(!prober.can_open("whatsapp").await);
    }

    #[tokio::test]
    async fn discovery_is_idempotent() {
        let prober = FixedProber::new(["tg", "uber"]);
        let first = detect_available_apps(&prober).await;
        let second = detect_available_apps(&prober).await;
        assert_eq!(first, second);
    }
}
