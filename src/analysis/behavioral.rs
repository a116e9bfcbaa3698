//! Behavioral scoring heuristics
//!
//! Maps a handful of public profile counters to eight bounded scores.
//! Every calculator follows the same shape:
//!
//! 1. pick a base score from an ascending tier table (video count,
//!    engagement rate or average likes per video)
//! 2. cap it with the follower ceiling, so small audiences stay below a
//!    fixed maximum whatever the other counters say
//! 3. add small bonuses (verified badge, bio, links, very large audience)
//! 4. clamp to `0..=100`
//!
//! Governance is the exception: it starts from a fixed base and moves with
//! ratio anomalies instead of tiers.
//!
//! The thresholds are hand-picked constants. They document current
//! behavior and are meant to be replaced once calibration data exists.

use serde::Serialize;

use super::narrative::describe_scores;
use crate::models::BehavioralScore;
use crate::models::DimensionInsights;
use crate::models::Profile;

/// Upper bounds (exclusive) of the video-count tiers
const VIDEO_TIERS: [f64; 4] = [10.0, 50.0, 100.0, 300.0];

const VISUAL_BASE: [i64; 5] = [20, 40, 55, 70, 85];
const AUDIO_BASE: [i64; 5] = [25, 45, 60, 72, 85];
const LINGUISTIC_BASE: [i64; 5] = [30, 45, 58, 70, 80];
const ENVIRONMENTAL_BASE: [i64; 5] = [30, 48, 60, 72, 82];

const ENERGY_RATE_TIERS: [f64; 4] = [1.0, 3.0, 6.0, 10.0];
const ENERGY_BASE: [i64; 5] = [30, 50, 65, 78, 88];

const INTERACTION_RATE_TIERS: [f64; 4] = [0.5, 2.0, 5.0, 10.0];
const INTERACTION_BASE: [i64; 5] = [25, 45, 62, 75, 88];

const AVG_LIKES_TIERS: [f64; 4] = [100.0, 1_000.0, 10_000.0, 100_000.0];
const CONTEXTUAL_BASE: [i64; 5] = [25, 45, 60, 75, 88];

/// Follower thresholds (exclusive) and the ceiling applied below each
const FOLLOWER_CEILINGS: [(u64, i64); 3] = [(1_000, 50), (10_000, 65), (100_000, 80)];

const LARGE_AUDIENCE_FOLLOWERS: u64 = 1_000_000;
const LARGE_AUDIENCE_BONUS: i64 = 10;
const VERIFIED_BONUS: i64 = 5;
const BIO_BONUS: i64 = 5;
const CONSISTENT_POSTING_VIDEOS: u64 = 100;
const CONSISTENT_POSTING_BONUS: i64 = 5;
const ACTIVE_FOLLOWING: u64 = 100;
const ACTIVE_FOLLOWING_BONUS: i64 = 5;
const LINK_BONUS: i64 = 3;
const MAX_LINK_BONUS: i64 = 9;

const GOVERNANCE_BASE: i64 = 85;
const GOVERNANCE_LIKE_RATIO_LIMIT: f64 = 150.0;
const GOVERNANCE_LIKE_RATIO_PENALTY: i64 = 25;
const GOVERNANCE_LOW_VOLUME_VIDEOS: u64 = 15;
const GOVERNANCE_LOW_VOLUME_FOLLOWERS: u64 = 200_000;
const GOVERNANCE_LOW_VOLUME_PENALTY: i64 = 20;
const GOVERNANCE_LOW_ENGAGEMENT_RATE: f64 = 0.5;
const GOVERNANCE_LOW_ENGAGEMENT_FOLLOWERS: u64 = 10_000;
const GOVERNANCE_LOW_ENGAGEMENT_PENALTY: i64 = 10;
const GOVERNANCE_HIGH_ENGAGEMENT_RATE: f64 = 50.0;
const GOVERNANCE_HIGH_ENGAGEMENT_PENALTY: i64 = 10;
const GOVERNANCE_VERIFIED_BONUS: i64 = 4;
const GOVERNANCE_HIGH_RATIO: f64 = 5.0;
const GOVERNANCE_HIGH_RATIO_BONUS: i64 = 3;
const GOVERNANCE_LOW_RATIO: f64 = 0.5;
const GOVERNANCE_LOW_RATIO_PENALTY: i64 = 6;

/// Counters and derived quantities the calculators read
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileMetrics {
    pub followers: u64,
    pub likes: u64,
    pub videos: u64,
    pub following: Option<u64>,
    pub is_verified: bool,
    pub has_bio: bool,
    pub external_links: usize,
    pub avg_likes_per_video: f64,
    pub engagement_rate: f64,
}

impl ProfileMetrics {
    pub fn from_profile(profile: &Profile) -> Self {
        let avg_likes_per_video = if profile.videos == 0 {
            0.0
        } else {
            profile.likes as f64 / profile.videos as f64
        };
        let engagement_rate = if profile.followers == 0 {
            0.0
        } else {
            avg_likes_per_video / profile.followers as f64 * 100.0
        };

        Self {
            followers: profile.followers,
            likes: profile.likes,
            videos: profile.videos,
            following: profile.following,
            is_verified: profile.verified(),
            has_bio: profile.has_bio(),
            external_links: profile.external_link_count(),
            avg_likes_per_video,
            engagement_rate,
        }
    }

    /// likes / followers, 0 without followers
    pub fn like_to_follower_ratio(&self) -> f64 {
        if self.followers == 0 {
            0.0
        } else {
            self.likes as f64 / self.followers as f64
        }
    }

    /// followers / following, `None` when following is unknown or zero
    pub fn follower_following_ratio(&self) -> Option<f64> {
        match self.following {
            Some(following) if following > 0 => Some(self.followers as f64 / following as f64),
            _ => None,
        }
    }

    fn audience_bonus(&self) -> i64 {
        if self.followers >= LARGE_AUDIENCE_FOLLOWERS {
            LARGE_AUDIENCE_BONUS
        } else {
            0
        }
    }

    fn verified_bonus(&self) -> i64 {
        if self.is_verified {
            VERIFIED_BONUS
        } else {
            0
        }
    }

    fn bio_bonus(&self) -> i64 {
        if self.has_bio {
            BIO_BONUS
        } else {
            0
        }
    }
}

/// Scores plus the narrative sentence for each
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BehavioralReport {
    pub scores: BehavioralScore,
    pub insights: DimensionInsights,
}

fn tiered(value: f64, bounds: &[f64; 4], scores: &[i64; 5]) -> i64 {
    bounds
        .iter()
        .position(|bound| value < *bound)
        .map_or(scores[4], |idx| scores[idx])
}

fn follower_ceiling(followers: u64) -> i64 {
    FOLLOWER_CEILINGS
        .iter()
        .find(|(threshold, _)| followers < *threshold)
        .map_or(100, |(_, ceiling)| *ceiling)
}

fn clamp_score(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}

fn capped(base: i64, metrics: &ProfileMetrics) -> i64 {
    base.min(follower_ceiling(metrics.followers))
}

pub fn calculate_visual_score(metrics: &ProfileMetrics) -> u8 {
    let base = capped(tiered(metrics.videos as f64, &VIDEO_TIERS, &VISUAL_BASE), metrics);
    clamp_score(base + metrics.audience_bonus() + metrics.verified_bonus())
}

pub fn calculate_audio_score(metrics: &ProfileMetrics) -> u8 {
    let base = capped(tiered(metrics.videos as f64, &VIDEO_TIERS, &AUDIO_BASE), metrics);
    clamp_score(base + metrics.audience_bonus() + metrics.verified_bonus())
}

pub fn calculate_energy_score(metrics: &ProfileMetrics) -> u8 {
    let base = capped(
        tiered(metrics.engagement_rate, &ENERGY_RATE_TIERS, &ENERGY_BASE),
        metrics,
    );
    let posting = if metrics.videos >= CONSISTENT_POSTING_VIDEOS {
        CONSISTENT_POSTING_BONUS
    } else {
        0
    };
    clamp_score(base + posting)
}

pub fn calculate_interaction_score(metrics: &ProfileMetrics) -> u8 {
    let base = capped(
        tiered(
            metrics.engagement_rate,
            &INTERACTION_RATE_TIERS,
            &INTERACTION_BASE,
        ),
        metrics,
    );
    let reciprocity = match metrics.following {
        Some(following) if following >= ACTIVE_FOLLOWING => ACTIVE_FOLLOWING_BONUS,
        _ => 0,
    };
    clamp_score(base + reciprocity)
}

pub fn calculate_linguistic_score(metrics: &ProfileMetrics) -> u8 {
    let base = capped(
        tiered(metrics.videos as f64, &VIDEO_TIERS, &LINGUISTIC_BASE),
        metrics,
    );
    clamp_score(base + metrics.bio_bonus() + metrics.audience_bonus() + metrics.verified_bonus())
}

pub fn calculate_contextual_score(metrics: &ProfileMetrics) -> u8 {
    let base = capped(
        tiered(metrics.avg_likes_per_video, &AVG_LIKES_TIERS, &CONTEXTUAL_BASE),
        metrics,
    );
    let links = (metrics.external_links as i64 * LINK_BONUS).min(MAX_LINK_BONUS);
    clamp_score(base + links + metrics.bio_bonus())
}

pub fn calculate_environmental_score(metrics: &ProfileMetrics) -> u8 {
    let base = capped(
        tiered(metrics.videos as f64, &VIDEO_TIERS, &ENVIRONMENTAL_BASE),
        metrics,
    );
    clamp_score(base + metrics.audience_bonus() + metrics.verified_bonus())
}

pub fn calculate_governance_score(metrics: &ProfileMetrics) -> u8 {
    let mut score = GOVERNANCE_BASE;

    if metrics.followers > 0 && metrics.like_to_follower_ratio() > GOVERNANCE_LIKE_RATIO_LIMIT {
        score -= GOVERNANCE_LIKE_RATIO_PENALTY;
    }
    if metrics.videos < GOVERNANCE_LOW_VOLUME_VIDEOS
        && metrics.followers > GOVERNANCE_LOW_VOLUME_FOLLOWERS
    {
        score -= GOVERNANCE_LOW_VOLUME_PENALTY;
    }
    if metrics.engagement_rate < GOVERNANCE_LOW_ENGAGEMENT_RATE
        && metrics.followers > GOVERNANCE_LOW_ENGAGEMENT_FOLLOWERS
    {
        score -= GOVERNANCE_LOW_ENGAGEMENT_PENALTY;
    }
    if metrics.engagement_rate > GOVERNANCE_HIGH_ENGAGEMENT_RATE {
        score -= GOVERNANCE_HIGH_ENGAGEMENT_PENALTY;
    }
    if metrics.is_verified {
        score += GOVERNANCE_VERIFIED_BONUS;
    }
    if let Some(ratio) = metrics.follower_following_ratio() {
        if ratio > GOVERNANCE_HIGH_RATIO {
            score += GOVERNANCE_HIGH_RATIO_BONUS;
        } else if ratio < GOVERNANCE_LOW_RATIO {
            score -= GOVERNANCE_LOW_RATIO_PENALTY;
        }
    }

    clamp_score(score)
}

pub fn calculate_scores(profile: &Profile) -> BehavioralScore {
    let metrics = ProfileMetrics::from_profile(profile);
    let scores = BehavioralScore {
        visual: calculate_visual_score(&metrics),
        audio: calculate_audio_score(&metrics),
        energy: calculate_energy_score(&metrics),
        interaction: calculate_interaction_score(&metrics),
        linguistic: calculate_linguistic_score(&metrics),
        contextual: calculate_contextual_score(&metrics),
        environmental: calculate_environmental_score(&metrics),
        governance: calculate_governance_score(&metrics),
    };

    tracing::debug!(
        username = %profile.username,
        engagement_rate = metrics.engagement_rate,
        avg_likes_per_video = metrics.avg_likes_per_video,
        ?scores,
        "Behavioral scores computed"
    );

    scores
}

/// Score a profile and attach the templated sentence for each dimension
pub fn analyze_profile(profile: &Profile) -> BehavioralReport {
    let scores = calculate_scores(profile);
    BehavioralReport {
        insights: describe_scores(&scores),
        scores,
    }
}
