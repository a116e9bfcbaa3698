//! Randomized mock data for features without a real data source
//!
//! Trend radar, live-stream metrics, collab suggestions and competitor
//! metrics without a stored analysis are all generated here. Every payload
//! leaves the service wrapped in `Simulated`, which carries `simulated: true`.

use chrono::DateTime;
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

use crate::analysis::calculate_scores;
use crate::analysis::ProfileMetrics;
use crate::models::Analysis;
use crate::models::Profile;

pub const TREND_CATEGORIES: [&str; 10] = [
    "dance",
    "comedy",
    "beauty",
    "food",
    "fitness",
    "tech",
    "education",
    "fashion",
    "music",
    "gaming",
];

pub const DEFAULT_TREND_LIMIT: usize = 10;
pub const MAX_TREND_LIMIT: usize = 50;
const COLLAB_SUGGESTIONS: usize = 5;

const TREND_TOPICS: [&str; 12] = [
    "challenge",
    "tutorial",
    "duet",
    "storytime",
    "transition",
    "pov",
    "grwm",
    "haul",
    "remix",
    "dayinmylife",
    "tips",
    "reaction",
];

const COLLAB_PREFIXES: [&str; 8] = [
    "the", "its", "daily", "just", "real", "hey", "only", "team",
];

/// Envelope flagging generated data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulated<T> {
    pub simulated: bool,
    pub generated_at: DateTime<Utc>,
    pub data: T,
}

impl<T> Simulated<T> {
    pub fn new(data: T) -> Self {
        Self {
            simulated: true,
            generated_at: Utc::now(),
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendKind {
    Hashtag,
    Sound,
    Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendPhase {
    Emerging,
    Rising,
    Peaking,
    Declining,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub name: String,
    pub category: String,
    pub kind: TrendKind,
    pub phase: TrendPhase,
    /// Week-over-week growth in percent; negative when declining
    pub growth_rate: f64,
    pub video_count: u64,
    pub view_count: u64,
}

/// Trend radar entries, strongest growth first
///
/// `category` must be one of `TREND_CATEGORIES` (checked by the caller);
/// `None` mixes all categories.
pub fn simulate_trends(rng: &mut impl Rng, category: Option<&str>, limit: usize) -> Vec<Trend> {
    let limit = limit.min(MAX_TREND_LIMIT);
    let mut trends: Vec<Trend> = (0..limit)
        .map(|_| {
            let category = match category {
                Some(category) => category,
                None => TREND_CATEGORIES.choose(rng).copied().unwrap_or("dance"),
            };
            let topic = TREND_TOPICS.choose(rng).copied().unwrap_or("challenge");
            let kind = match rng.gen_range(0..3) {
                0 => TrendKind::Hashtag,
                1 => TrendKind::Sound,
                _ => TrendKind::Format,
            };
            let growth_rate: f64 = (rng.gen_range(-40.0..400.0_f64) * 10.0).round() / 10.0;
            let phase = match growth_rate {
                g if g < 0.0 => TrendPhase::Declining,
                g if g < 50.0 => TrendPhase::Peaking,
                g if g < 200.0 => TrendPhase::Rising,
                _ => TrendPhase::Emerging,
            };
            let video_count = rng.gen_range(1_000..5_000_000);
            let name = match kind {
                TrendKind::Hashtag => format!("#{category}{topic}"),
                TrendKind::Sound => format!("{category} {topic} sound"),
                TrendKind::Format => format!("{topic} format"),
            };

            Trend {
                name,
                category: category.to_string(),
                kind,
                phase,
                growth_rate,
                video_count,
                view_count: video_count * rng.gen_range(200..20_000),
            }
        })
        .collect();

    trends.sort_by(|a, b| b.growth_rate.total_cmp(&a.growth_rate));
    trends
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMetrics {
    pub username: String,
    pub is_live: bool,
    pub current_viewers: u64,
    pub peak_viewers: u64,
    pub likes_per_minute: u64,
    pub comments_per_minute: u64,
    pub gifts_received: u64,
    pub new_followers: u64,
    pub duration_minutes: u32,
}

pub fn simulate_live_metrics(rng: &mut impl Rng, username: &str) -> LiveMetrics {
    let is_live = rng.gen_bool(0.6);
    if !is_live {
        return LiveMetrics {
            username: username.to_string(),
            is_live,
            current_viewers: 0,
            peak_viewers: 0,
            likes_per_minute: 0,
            comments_per_minute: 0,
            gifts_received: 0,
            new_followers: 0,
            duration_minutes: 0,
        };
    }

    let current_viewers = rng.gen_range(10..50_000);
    LiveMetrics {
        username: username.to_string(),
        is_live,
        current_viewers,
        peak_viewers: current_viewers + rng.gen_range(0..current_viewers),
        likes_per_minute: current_viewers * rng.gen_range(1..20),
        comments_per_minute: current_viewers / rng.gen_range(5..50),
        gifts_received: rng.gen_range(0..2_000),
        new_followers: rng.gen_range(0..current_viewers / 10 + 1),
        duration_minutes: rng.gen_range(1..240),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollabSuggestion {
    pub username: String,
    pub category: String,
    pub followers: u64,
    /// 0..=100
    pub compatibility: u8,
    pub reason: String,
}

/// Suggested partner accounts, most compatible first
pub fn simulate_collabs(rng: &mut impl Rng, username: &str) -> Vec<CollabSuggestion> {
    let mut suggestions: Vec<CollabSuggestion> = (0..COLLAB_SUGGESTIONS)
        .map(|_| {
            let category = TREND_CATEGORIES.choose(rng).copied().unwrap_or("dance");
            let prefix = COLLAB_PREFIXES.choose(rng).copied().unwrap_or("the");
            let compatibility: u8 = rng.gen_range(55..=98);
            let reason = if compatibility >= 85 {
                format!("Strong audience overlap with @{username} in {category} content")
            } else if compatibility >= 70 {
                format!("Complementary {category} audience with similar posting cadence")
            } else {
                format!("Adjacent {category} niche that could broaden reach")
            };

            CollabSuggestion {
                username: format!("{prefix}{category}{}", rng.gen_range(1..999)),
                category: category.to_string(),
                followers: rng.gen_range(5_000..3_000_000),
                compatibility,
                reason,
            }
        })
        .collect();

    suggestions.sort_by(|a, b| b.compatibility.cmp(&a.compatibility));
    suggestions
}

/// Headline numbers for one account in a comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorMetrics {
    pub followers: u64,
    pub likes: u64,
    pub videos: u64,
    pub engagement_rate: f64,
    pub overall_score: u8,
    /// False when taken from a stored analysis
    pub simulated: bool,
}

impl CompetitorMetrics {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let metrics = ProfileMetrics::from_profile(&analysis.profile);
        Self {
            followers: analysis.profile.followers,
            likes: analysis.profile.likes,
            videos: analysis.profile.videos,
            engagement_rate: metrics.engagement_rate,
            overall_score: analysis.overall_score,
            simulated: false,
        }
    }
}

/// Plausible counters for an account, scored with the real heuristics
pub fn simulate_competitor_metrics(rng: &mut impl Rng, username: &str) -> CompetitorMetrics {
    let followers: u64 = rng.gen_range(1_000..5_000_000);
    let videos: u64 = rng.gen_range(5..1_500);
    let likes = followers * rng.gen_range(2..40);

    let profile = Profile::with_counts(username, followers, likes, videos);
    let metrics = ProfileMetrics::from_profile(&profile);
    CompetitorMetrics {
        followers,
        likes,
        videos,
        engagement_rate: metrics.engagement_rate,
        overall_score: calculate_scores(&profile).overall(),
        simulated: true,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_trends_sorted_and_limited() {
        let mut rng = StdRng::seed_from_u64(7);
        let trends = simulate_trends(&mut rng, Some("food"), 8);
        assert_eq!(trends.len(), 8);
        assert!(trends.iter().all(|t| t.category == "food"));
        assert!(trends
            .windows(2)
            .all(|w| w[0].growth_rate >= w[1].growth_rate));

        let capped = simulate_trends(&mut rng, None, 500);
        assert_eq!(capped.len(), MAX_TREND_LIMIT);
    }

    #[test]
    fn test_trend_phase_matches_growth() {
        let mut rng = StdRng::seed_from_u64(11);
        for trend in simulate_trends(&mut rng, None, MAX_TREND_LIMIT) {
            match trend.phase {
                TrendPhase::Declining => assert!(trend.growth_rate < 0.0),
                TrendPhase::Emerging => assert!(trend.growth_rate >= 200.0),
                _ => assert!((0.0..200.0).contains(&trend.growth_rate)),
            }
        }
    }

    #[test]
    fn test_live_metrics_consistent() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let live = simulate_live_metrics(&mut rng, "streamer");
            assert!(live.peak_viewers >= live.current_viewers);
            if !live.is_live {
                assert_eq!(live.current_viewers, 0);
            }
        }
    }

    #[test]
    fn test_collabs_sorted() {
        let mut rng = StdRng::seed_from_u64(5);
        let collabs = simulate_collabs(&mut rng, "dancer");
        assert_eq!(collabs.len(), COLLAB_SUGGESTIONS);
        assert!(collabs
            .windows(2)
            .all(|w| w[0].compatibility >= w[1].compatibility));
        assert!(collabs.iter().all(|c| (55..=98).contains(&c.compatibility)));
    }

    #[test]
    fn test_simulated_competitor_is_flagged() {
        let mut rng = StdRng::seed_from_u64(9);
        let metrics = simulate_competitor_metrics(&mut rng, "rival");
        assert!(metrics.simulated);
        assert!(metrics.overall_score <= 100);
    }

    #[test]
    fn test_envelope_flag() {
        let json = serde_json::to_value(Simulated::new(vec![1, 2])).unwrap();
        assert_eq!(json["simulated"], true);
        assert!(json.get("generatedAt").is_some());
    }
}
