//! Demo Threat Generator
//!
//! Produces plausible-looking threat drafts for demos and UI development.
//! Strictly opt-in: nothing in the detection paths calls into this module,
//! and generated drafts are marked as demo data in their source field.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{ThreatCategory, ThreatDraft, ThreatLevel};

struct DemoThreat {
    category: ThreatCategory,
    level: ThreatLevel,
    title: &'static str,
    description: &'static str,
    blocked: bool,
}

const DEMO_POOL: &[DemoThreat] = &[
    DemoThreat {
        category: ThreatCategory::Phishing,
        level: ThreatLevel::High,
        title: "Phishing Email Link",
        description: "A link in a recent email matches known phishing patterns",
        blocked: true,
    },
    DemoThreat {
        category: ThreatCategory::Malware,
        level: ThreatLevel::Critical,
        title: "Trojan Signature Match",
        description: "Downloaded file matches a trojan naming signature",
        blocked: true,
    },
    DemoThreat {
        category: ThreatCategory::SuspiciousFile,
        level: ThreatLevel::Medium,
        title: "Unrecognized Executable",
        description: "An executable with no known publisher was found in Downloads",
        blocked: false,
    },
    DemoThreat {
        category: ThreatCategory::MaliciousUrl,
        level: ThreatLevel::High,
        title: "Blocked Navigation Attempt",
        description: "Navigation to a URL flagged by the heuristic classifier",
        blocked: true,
    },
    DemoThreat {
        category: ThreatCategory::UnsafeNetwork,
        level: ThreatLevel::Low,
        title: "Open Wi-Fi Network",
        description: "Device connected to an unencrypted wireless network",
        blocked: false,
    },
];

/// Generate between one and three random demo threat drafts.
pub fn simulated_threat_batch<R: Rng + ?Sized>(rng: &mut R) -> Vec<ThreatDraft> {
    let count = rng.gen_range(1..=3);
    DEMO_POOL
        .choose_multiple(rng, count)
        .map(|demo| ThreatDraft {
            category: demo.category,
            level: demo.level,
            title: demo.title.to_string(),
            description: demo.description.to_string(),
            source: "demo".to_string(),
            blocked: demo.blocked,
            cve: None,
        })
        .collect()
}
