//! Threat Intelligence Module
//!
//! Correlates detected threats with known vulnerability records. The data is
//! a static, ordered pattern table; correlation is descriptive enrichment by
//! keyword and category, not a verified match.

pub mod cve_table;

use tracing::debug;

use crate::types::{ThreatCategory, VulnerabilityRecord};
use cve_table::CVE_TABLE;

/// Find the best-matching known vulnerability for a detected threat.
///
/// The category, description and source are concatenated into one lowercase
/// search string. Pass 1 considers only table entries whose declared category
/// equals the threat's category; pass 2 falls back to any pattern match
/// regardless of category. Both passes return the first match in table
/// order.
pub fn find_cve_for_threat(
    category: ThreatCategory,
    description: &str,
    source: Option<&str>,
) -> Option<VulnerabilityRecord> {
    let search_text = format!(
        "{} {} {}",
        category.as_str(),
        description,
        source.unwrap_or("")
    )
    .to_lowercase();

    for entry in CVE_TABLE {
        if entry.category.eq_ignore_ascii_case(category.as_str())
            && entry.pattern.matches(&search_text)
        {
            debug!(cve_id = entry.record.cve_id, "CVE category match");
            return Some(entry.record);
        }
    }

    for entry in CVE_TABLE {
        if entry.pattern.matches(&search_text) {
            debug!(cve_id = entry.record.cve_id, "CVE pattern match");
            return Some(entry.record);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_match_takes_priority() {
        let cve = find_cve_for_threat(ThreatCategory::Malware, "trojan dropper detected", None)
            .expect("trojan should correlate");
        assert_eq!(cve.cve_id, "CVE-2024-12345");
    }

    #[test]
    fn declaration_order_breaks_ties() {
        // "trojan horse" matches both the specific and the generic trojan
        // entries; the earlier, more specific entry wins.
        let cve = find_cve_for_threat(ThreatCategory::Malware, "trojan horse in installer", None)
            .expect("trojan horse should correlate");
        assert_eq!(cve.cve_id, "CVE-2023-45678");
    }

    #[test]
    fn fallback_ignores_category() {
        // No table entry declares the unsafe_network category, so the match
        // comes from the category-blind second pass.
        let cve = find_cve_for_threat(ThreatCategory::UnsafeNetwork, "gateway drops ransomware", None)
            .expect("fallback pass should match");
        assert_eq!(cve.cve_id, "CVE-2024-45678");
    }

    #[test]
    fn source_text_participates_in_matching() {
        let cve = find_cve_for_threat(
            ThreatCategory::MaliciousUrl,
            "blocked navigation",
            Some("http://login.phishing-site.com/secure"),
        )
        .expect("source should correlate");
        assert_eq!(cve.cve_id, "CVE-2024-89012");
    }

    #[test]
    fn no_match_returns_none() {
        assert!(find_cve_for_threat(ThreatCategory::DataBreach, "nothing of note", None).is_none());
    }
}
