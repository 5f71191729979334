//! File / Package Classifier
//!
//! Classifies file names, installer packages and app identity strings using
//! extension, keyword and path heuristics. Purely metadata-based: file
//! contents are never read.

use tracing::debug;

use crate::intelligence::find_cve_for_threat;
use crate::types::{FileScanOutcome, ThreatCategory, ThreatDraft, ThreatLevel};

/// High-risk extensions: executables, scripts and installer packages across
/// platforms.
const MALICIOUS_EXTENSIONS: &[&str] = &[
    ".exe", ".bat", ".cmd", ".scr", ".pif", ".vbs", ".js", ".jar", ".apk", ".msi", ".dmg", ".ipa",
];

/// Malware-family keywords matched as substrings of the file name.
const MALWARE_KEYWORDS: &[&str] = &[
    "virus", "trojan", "spyware", "keylogger", "backdoor", "rootkit", "ransomware", "stealer",
    "rat", "botnet", "crack", "keygen", "hack",
];

/// Low-trust directory hints. A path is only suspicious in combination with
/// a high-risk extension; the location alone proves nothing.
const SUSPICIOUS_PATH_HINTS: &[&str] = &["temp", "cache", "downloads", "unknown", "external"];

/// Repackaged/pirated installer phrasing.
const SUSPICIOUS_APK_PATTERNS: &[&str] = &[
    "cracked", "modded", "mod_apk", "patched", "premium_free", "premium-unlocked", "unlocked",
    "bypass", "cheat", "hacked",
];

/// Known-bad package identifiers, matched as substrings of the file or
/// package name.
const KNOWN_MALICIOUS_APKS: &[&str] = &[
    "com.fakebank.app",
    "com.freepremium.unlock",
    "com.cheat.injector",
    "org.cracked.store",
    "com.spy.tracker",
];

/// Scan a file name (plus optional path) for malware indicators.
///
/// Returns a safe outcome with no threat when nothing matches. The threat
/// draft, when present, carries a level derived from how many independent
/// indicators fired; critical and high findings are enriched with a
/// correlated CVE reference when one matches.
pub fn scan_file(file_name: &str, file_path: Option<&str>) -> FileScanOutcome {
    let name = file_name.to_lowercase();
    let path = file_path.map(|p| p.to_lowercase());

    let has_malicious_extension = MALICIOUS_EXTENSIONS.iter().any(|ext| name.ends_with(ext));
    let has_malicious_pattern = MALWARE_KEYWORDS.iter().any(|kw| name.contains(kw));
    let suspicious_path = has_malicious_extension
        && path
            .as_deref()
            .map(|p| SUSPICIOUS_PATH_HINTS.iter().any(|hint| p.contains(hint)))
            .unwrap_or(false);
    let has_apk_pattern = SUSPICIOUS_APK_PATTERNS.iter().any(|pat| name.contains(pat));
    let is_known_malicious_apk = KNOWN_MALICIOUS_APKS.iter().any(|pkg| name.contains(pkg));
    let is_apk = name.ends_with(".apk");

    // Installer packages take priority over the general indicator count.
    if is_apk && (is_known_malicious_apk || has_apk_pattern) {
        let mut draft = ThreatDraft {
            category: ThreatCategory::Malware,
            level: ThreatLevel::Critical,
            title: "Malicious APK Detected".to_string(),
            description: apk_description(file_name, is_known_malicious_apk),
            source: file_name.to_string(),
            blocked: true,
            cve: None,
        };
        attach_cve(&mut draft, file_path);
        debug!(file = file_name, "malicious APK detected");
        return FileScanOutcome::flagged(draft);
    }

    if has_apk_pattern {
        let mut draft = ThreatDraft {
            category: ThreatCategory::SuspiciousFile,
            level: ThreatLevel::High,
            title: "Suspicious APK Detected".to_string(),
            description: format!(
                "File \"{}\" matches repackaged-installer naming patterns",
                file_name
            ),
            source: file_name.to_string(),
            blocked: false,
            cve: None,
        };
        attach_cve(&mut draft, file_path);
        return FileScanOutcome::flagged(draft);
    }

    let indicators = [
        has_malicious_extension,
        has_malicious_pattern,
        suspicious_path,
        has_apk_pattern,
    ]
    .iter()
    .filter(|&&x| x)
    .count();

    let full_triple = has_malicious_extension && has_malicious_pattern && suspicious_path;
    let installer_name = name.contains("install") || name.contains("setup");

    let (level, blocked, title) = if indicators >= 3 || full_triple {
        (ThreatLevel::Critical, true, "Malicious File Detected")
    } else if indicators == 2 || (has_malicious_pattern && has_malicious_extension) {
        (ThreatLevel::High, false, "Suspicious File Detected")
    } else if has_malicious_pattern || (has_malicious_extension && !installer_name) {
        (ThreatLevel::Medium, false, "Potentially Unwanted File")
    } else {
        return FileScanOutcome::safe();
    };

    let category = if has_malicious_pattern {
        ThreatCategory::Malware
    } else {
        ThreatCategory::SuspiciousFile
    };

    let mut reasons = Vec::new();
    if has_malicious_extension {
        reasons.push("high-risk file extension");
    }
    if has_malicious_pattern {
        reasons.push("malware-family keyword in name");
    }
    if suspicious_path {
        reasons.push("located in a low-trust directory");
    }

    let mut draft = ThreatDraft {
        category,
        level,
        title: title.to_string(),
        description: format!("File \"{}\": {}", file_name, reasons.join(", ")),
        source: file_name.to_string(),
        blocked,
        cve: None,
    };
    if level >= ThreatLevel::High {
        attach_cve(&mut draft, file_path);
    }

    debug!(file = file_name, level = ?level, "file flagged");
    FileScanOutcome::flagged(draft)
}

/// Scan an installer package (APK and similar).
///
/// Identical to [`scan_file`]; exists to document intent at call sites that
/// deal specifically with sideloaded installers.
pub fn scan_apk(apk_name: &str, apk_path: Option<&str>) -> FileScanOutcome {
    scan_file(apk_name, apk_path)
}

/// Scan an app identity (display name plus optional package id) at
/// installation time.
///
/// Applies the keyword and deny-list heuristics to the identity strings
/// rather than a file name.
pub fn scan_app_installation(app_name: &str, package_name: Option<&str>) -> FileScanOutcome {
    let identity = format!("{} {}", app_name, package_name.unwrap_or("")).to_lowercase();

    if KNOWN_MALICIOUS_APKS.iter().any(|pkg| identity.contains(pkg)) {
        let mut draft = ThreatDraft {
            category: ThreatCategory::Malware,
            level: ThreatLevel::Critical,
            title: "Malicious App Installation Blocked".to_string(),
            description: format!(
                "App \"{}\" matches a known malicious package identifier",
                app_name
            ),
            source: package_name.unwrap_or(app_name).to_string(),
            blocked: true,
            cve: None,
        };
        attach_cve(&mut draft, package_name);
        return FileScanOutcome::flagged(draft);
    }

    let suspicious = MALWARE_KEYWORDS.iter().any(|kw| identity.contains(kw))
        || SUSPICIOUS_APK_PATTERNS.iter().any(|pat| identity.contains(pat));
    if suspicious {
        let mut draft = ThreatDraft {
            category: ThreatCategory::Malware,
            level: ThreatLevel::High,
            title: "Suspicious App Installation".to_string(),
            description: format!("App \"{}\" has a suspicious name or package id", app_name),
            source: package_name.unwrap_or(app_name).to_string(),
            blocked: false,
            cve: None,
        };
        attach_cve(&mut draft, package_name);
        return FileScanOutcome::flagged(draft);
    }

    FileScanOutcome::safe()
}

fn apk_description(file_name: &str, known_malicious: bool) -> String {
    if known_malicious {
        format!("Package \"{}\" is on the known-malicious deny list", file_name)
    } else {
        format!(
            "Package \"{}\" matches cracked/modified installer patterns",
            file_name
        )
    }
}

/// Append a correlated CVE summary to the draft description, when one
/// matches. Only called for critical and high findings.
fn attach_cve(draft: &mut ThreatDraft, extra_source: Option<&str>) {
    let search = format!("{} {}", draft.description, draft.source);
    if let Some(cve) = find_cve_for_threat(draft.category, &search, extra_source) {
        draft.description.push_str(&format!("\nKnown vulnerability: {}", cve.summary()));
        draft.cve = Some(cve);
    }
}
