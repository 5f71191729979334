//! Security Scoring
//!
//! Derives a 0-100 device score and a coarse security level from the threat
//! ledger. Blocked threats are considered handled and do not reduce the
//! score; only active (unblocked) threats count against it.

use crate::types::{SecurityStatus, ThreatLevel, ThreatRecord};

/// Compute the security score: 100 minus 15 per active threat, clamped to
/// the 0-100 range. Blocked threats do not affect the score.
pub fn calculate_security_score(_blocked_threats: usize, active_threats: usize) -> u32 {
    100u32.saturating_sub((active_threats as u32).saturating_mul(15))
}

/// Map a score to its coarse level band.
pub fn security_level(score: u32) -> ThreatLevel {
    if score >= 90 {
        ThreatLevel::Safe
    } else if score >= 70 {
        ThreatLevel::Low
    } else if score >= 50 {
        ThreatLevel::Medium
    } else if score >= 30 {
        ThreatLevel::High
    } else {
        ThreatLevel::Critical
    }
}

/// Summarize the threat ledger into a point-in-time security status.
pub fn security_status(threats: &[ThreatRecord]) -> SecurityStatus {
    let blocked = threats.iter().filter(|t| t.blocked).count();
    let active = threats.len() - blocked;
    let score = calculate_security_score(blocked, active);

    SecurityStatus {
        overall: security_level(score),
        score,
        last_detection_at: threats.iter().map(|t| t.detected_at).max(),
        threats_blocked: blocked,
        active_threats: active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ThreatCategory, ThreatDraft, ThreatLevel};

    fn record(blocked: bool) -> ThreatRecord {
        let mut r = ThreatRecord::finalize(ThreatDraft {
            category: ThreatCategory::Malware,
            level: ThreatLevel::High,
            title: "Test Threat".to_string(),
            description: "test".to_string(),
            source: "test".to_string(),
            blocked: false,
            cve: None,
        });
        r.blocked = blocked;
        r
    }

    #[test]
    fn blocked_threats_do_not_reduce_score() {
        assert_eq!(calculate_security_score(5, 0), 100);
    }

    #[test]
    fn each_active_threat_costs_fifteen_points() {
        assert_eq!(calculate_security_score(0, 2), 70);
        assert_eq!(calculate_security_score(0, 6), 10);
    }

    #[test]
    fn score_clamps_at_zero() {
        assert_eq!(calculate_security_score(0, 10), 0);
        assert_eq!(calculate_security_score(3, 100), 0);
    }

    #[test]
    fn level_bands() {
        assert_eq!(security_level(100), ThreatLevel::Safe);
        assert_eq!(security_level(95), ThreatLevel::Safe);
        assert_eq!(security_level(90), ThreatLevel::Safe);
        assert_eq!(security_level(72), ThreatLevel::Low);
        assert_eq!(security_level(55), ThreatLevel::Medium);
        assert_eq!(security_level(35), ThreatLevel::High);
        assert_eq!(security_level(10), ThreatLevel::Critical);
        assert_eq!(security_level(0), ThreatLevel::Critical);
    }

    #[test]
    fn status_counts_are_consistent() {
        let threats = vec![record(true), record(true), record(false)];
        let status = security_status(&threats);
        assert_eq!(status.threats_blocked, 2);
        assert_eq!(status.active_threats, 1);
        assert_eq!(status.active_threats + status.threats_blocked, threats.len());
        assert_eq!(status.score, 85);
        assert_eq!(status.overall, ThreatLevel::Low);
        assert!(status.last_detection_at.is_some());
    }

    #[test]
    fn empty_ledger_is_fully_safe() {
        let status = security_status(&[]);
        assert_eq!(status.score, 100);
        assert_eq!(status.overall, ThreatLevel::Safe);
        assert_eq!(status.active_threats, 0);
        assert!(status.last_detection_at.is_none());
    }
}
