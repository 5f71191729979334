//! URL Classifier
//!
//! Classifies a URL string against phishing phrasing patterns, malicious
//! keywords and hostname heuristics, producing a safety verdict with a
//! severity level and human-readable findings.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::types::{ThreatLevel, UrlScanResult};

/// Known phishing phrasing: brand impersonation and urgency bait.
/// First match wins; matching any of these is a critical finding.
static PHISHING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)paypal.*verify",
        r"(?i)verify.*paypal",
        r"(?i)amazon.*account.*suspend",
        r"(?i)banking.*login.*urgent",
        r"(?i)click.*here.*prize",
        r"(?i)verify.*account.*now",
        r"(?i)urgent.*action.*required",
        r"(?i)suspended.*account",
        r"(?i)confirm.*identity",
        r"(?i)unusual.*activity",
        r"(?i)security.*alert.*verify",
        r"(?i)apple.*id.*locked",
        r"(?i)google.*verify.*account",
        r"(?i)netflix.*payment.*failed",
        r"(?i)tax.*refund.*claim",
        r"(?i)lottery.*winner",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid phishing pattern"))
    .collect()
});

/// High-risk substrings anywhere in the URL text.
const MALICIOUS_KEYWORDS: &[&str] = &[
    "hack", "crack", "keygen", "trojan", "backdoor", "exploit", "malware", "virus",
];

/// URL shorteners. Context only: shortened links hide their destination but
/// are not malicious by themselves.
const SHORTENER_DOMAINS: &[&str] = &["bit.ly", "tinyurl.com", "goo.gl", "ow.ly", "t.co"];

static IPV4_HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("invalid ip pattern"));

/// Scan a URL for signs of phishing or malicious intent.
///
/// Checks are applied in a fixed order and may only escalate the severity
/// level; a later check never reduces a level set by an earlier one. A URL
/// that fails to parse is a finding, not an error: malformed input is
/// reported at `low` severity since it is not inherently dangerous.
pub fn scan_url(url: &str) -> UrlScanResult {
    let mut threats: Vec<String> = Vec::new();
    let mut is_safe = true;
    let mut level = ThreatLevel::Safe;

    match Url::parse(url) {
        Ok(parsed) => {
            let lowered = url.to_lowercase();
            let hostname = parsed.host_str().unwrap_or("").to_lowercase();

            if PHISHING_PATTERNS.iter().any(|p| p.is_match(url)) {
                threats.push("Potential phishing attempt detected".to_string());
                is_safe = false;
                level.escalate(ThreatLevel::Critical);
            }

            if MALICIOUS_KEYWORDS.iter().any(|k| lowered.contains(k)) {
                threats.push("Suspicious keywords detected".to_string());
                is_safe = false;
                level.escalate(ThreatLevel::High);
            }

            // The remaining signals are corroborating detail only. They are
            // appended when a threat was already found for another reason and
            // never flag a URL on their own; legitimate internationalized
            // domains, plain HTTP links and shortened URLs are too common to
            // treat as threats by themselves.
            if !is_safe {
                if parsed.scheme() != "https" {
                    threats.push("Insecure connection (not HTTPS)".to_string());
                }
                if !hostname.is_ascii() {
                    threats.push("Hostname contains non-ASCII characters".to_string());
                }
                if IPV4_HOST.is_match(&hostname) {
                    threats.push("Direct IP address instead of domain name".to_string());
                }
                if SHORTENER_DOMAINS.iter().any(|d| hostname.contains(d)) {
                    threats.push("URL shortener domain".to_string());
                }
            }
        }
        Err(_) => {
            threats.push("Invalid or malformed URL".to_string());
            is_safe = false;
            level.escalate(ThreatLevel::Low);
        }
    }

    let recommendation = recommendation_for(is_safe, level);

    if threats.is_empty() {
        threats.push("No threats detected".to_string());
    }

    UrlScanResult {
        url: url.to_string(),
        is_safe,
        threat_level: level,
        threats,
        recommendation,
    }
}

fn recommendation_for(is_safe: bool, level: ThreatLevel) -> String {
    if is_safe {
        "This URL appears to be safe. Proceed with normal caution.".to_string()
    } else if level >= ThreatLevel::High {
        "DO NOT VISIT this URL. It shows signs of phishing or malicious intent.".to_string()
    } else {
        "Exercise caution when visiting this URL. Verify the source.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_https_url_is_safe() {
        let result = scan_url("https://example.com");
        assert!(result.is_safe);
        assert_eq!(result.threat_level, ThreatLevel::Safe);
        assert_eq!(result.threats, vec!["No threats detected"]);
        assert!(result.recommendation.contains("appears to be safe"));
    }

    #[test]
    fn phishing_pattern_is_critical() {
        let result = scan_url("http://secure-paypal.example.com/verify-account");
        assert!(!result.is_safe);
        assert_eq!(result.threat_level, ThreatLevel::Critical);
        assert!(result.threats.iter().any(|t| t.contains("phishing")));
        assert!(result.recommendation.starts_with("DO NOT VISIT"));
    }

    #[test]
    fn phishing_over_http_adds_insecure_note() {
        let result = scan_url("http://apple-id-locked.example.net/unlock");
        assert_eq!(result.threat_level, ThreatLevel::Critical);
        assert!(result.threats.iter().any(|t| t.contains("Insecure connection")));
    }

    #[test]
    fn malicious_keyword_is_high() {
        let result = scan_url("https://downloads.example.com/photoshop-keygen.zip");
        assert!(!result.is_safe);
        assert_eq!(result.threat_level, ThreatLevel::High);
        assert!(result.threats.iter().any(|t| t.contains("Suspicious keywords")));
    }

    #[test]
    fn keyword_does_not_downgrade_phishing() {
        // Matches both a phishing pattern and a malicious keyword; the
        // critical phishing verdict must survive the later keyword check.
        let result = scan_url("http://paypal-verify.example.com/crack");
        assert_eq!(result.threat_level, ThreatLevel::Critical);
    }

    #[test]
    fn malformed_url_is_low_not_higher() {
        let result = scan_url("not a url at all");
        assert!(!result.is_safe);
        assert_eq!(result.threat_level, ThreatLevel::Low);
        assert!(result.threats.iter().any(|t| t.contains("malformed")));
    }

    #[test]
    fn plain_http_alone_is_not_flagged() {
        let result = scan_url("http://example.org/news");
        assert!(result.is_safe);
        assert_eq!(result.threat_level, ThreatLevel::Safe);
    }

    #[test]
    fn shortener_alone_is_not_flagged() {
        let result = scan_url("https://bit.ly/3xyzabc");
        assert!(result.is_safe);
        assert_eq!(result.threat_level, ThreatLevel::Safe);
    }

    #[test]
    fn ip_host_is_context_only_on_flagged_url() {
        let flagged = scan_url("http://192.168.12.9/free-trojan-builder");
        assert_eq!(flagged.threat_level, ThreatLevel::High);
        assert!(flagged.threats.iter().any(|t| t.contains("Direct IP address")));

        let clean = scan_url("http://10.0.0.1/admin");
        assert!(clean.is_safe);
    }

    #[test]
    fn scan_is_idempotent() {
        let url = "http://amazon-account-suspended.example.com/verify";
        assert_eq!(scan_url(url), scan_url(url));
    }
}
