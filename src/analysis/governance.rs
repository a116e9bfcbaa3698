//! Governance alert detection
//!
//! Stateless checks over one snapshot of counters and scores. Every rule is
//! evaluated; alerts accumulate in rule order.

use crate::models::BehavioralScore;

pub const HIGH_LIKE_RATIO_ALERT: &str = "Unusually high like-to-follower ratio detected.";
pub const LOW_CONTENT_VOLUME_ALERT: &str =
    "Low content volume for follower count may indicate purchased followers.";
pub const LOW_GOVERNANCE_ALERT: &str = "Below-average governance score requires attention.";
pub const LOW_ENGAGEMENT_ALERT: &str = "Low engagement relative to follower count.";

const LIKE_RATIO_LIMIT: f64 = 150.0;
const LOW_VOLUME_VIDEOS: u64 = 15;
const LOW_VOLUME_FOLLOWERS: u64 = 200_000;
const GOVERNANCE_FLOOR: u8 = 60;
const ENGAGEMENT_FLOOR: f64 = 50.0;
const ENGAGEMENT_FOLLOWERS: u64 = 100_000;

pub fn detect_alerts(
    followers: u64,
    likes: u64,
    videos: u64,
    scores: &BehavioralScore,
) -> Vec<String> {
    let mut alerts = Vec::new();

    if followers > 0 && likes as f64 / followers as f64 > LIKE_RATIO_LIMIT {
        alerts.push(HIGH_LIKE_RATIO_ALERT.to_string());
    }

    if videos < LOW_VOLUME_VIDEOS && followers > LOW_VOLUME_FOLLOWERS {
        alerts.push(LOW_CONTENT_VOLUME_ALERT.to_string());
    }

    if scores.governance < GOVERNANCE_FLOOR {
        alerts.push(LOW_GOVERNANCE_ALERT.to_string());
    }

    let engagement = (f64::from(scores.interaction) + f64::from(scores.energy)) / 2.0;
    if engagement < ENGAGEMENT_FLOOR && followers > ENGAGEMENT_FOLLOWERS {
        alerts.push(LOW_ENGAGEMENT_ALERT.to_string());
    }

    if !alerts.is_empty() {
        tracing::debug!(followers, likes, videos, count = alerts.len(), "Governance alerts raised");
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(governance: u8, interaction: u8, energy: u8) -> BehavioralScore {
        BehavioralScore {
            visual: 50,
            audio: 50,
            energy,
            interaction,
            linguistic: 50,
            contextual: 50,
            environmental: 50,
            governance,
        }
    }

    #[test]
    fn test_no_alerts_for_healthy_account() {
        assert!(detect_alerts(50_000, 500_000, 120, &scores(85, 70, 70)).is_empty());
    }

    #[test]
    fn test_like_ratio_alert() {
        let alerts = detect_alerts(1_000, 150_001, 100, &scores(85, 70, 70));
        assert_eq!(alerts, vec![HIGH_LIKE_RATIO_ALERT]);

        // exactly 150 is not above the limit
        assert!(detect_alerts(1_000, 150_000, 100, &scores(85, 70, 70)).is_empty());
    }

    #[test]
    fn test_zero_followers_skips_ratio() {
        assert!(detect_alerts(0, 1_000_000, 100, &scores(85, 70, 70)).is_empty());
    }

    #[test]
    fn test_low_volume_alert() {
        let alerts = detect_alerts(500_000, 2_000_000, 5, &scores(85, 70, 70));
        assert_eq!(alerts, vec![LOW_CONTENT_VOLUME_ALERT]);
        assert!(detect_alerts(200_000, 0, 5, &scores(85, 70, 70)).is_empty());
    }

    #[test]
    fn test_governance_floor() {
        assert_eq!(
            detect_alerts(10, 10, 100, &scores(59, 70, 70)),
            vec![LOW_GOVERNANCE_ALERT]
        );
        assert!(detect_alerts(10, 10, 100, &scores(60, 70, 70)).is_empty());
    }

    #[test]
    fn test_low_engagement_alert() {
        let alerts = detect_alerts(150_000, 100_000, 100, &scores(85, 40, 55));
        assert_eq!(alerts, vec![LOW_ENGAGEMENT_ALERT]);
        // average exactly 50 does not trigger
        assert!(detect_alerts(150_000, 100_000, 100, &scores(85, 45, 55)).is_empty());
    }

    #[test]
    fn test_alerts_accumulate_in_order() {
        let alerts = detect_alerts(300_000, 60_000_000, 3, &scores(30, 20, 20));
        assert_eq!(
            alerts,
            vec![
                HIGH_LIKE_RATIO_ALERT,
                LOW_CONTENT_VOLUME_ALERT,
                LOW_GOVERNANCE_ALERT,
                LOW_ENGAGEMENT_ALERT,
            ]
        );
    }
}
