//! Profile scoring, governance alerts and insight generation

use chrono::Utc;
use uuid::Uuid;

use crate::models::Analysis;
use crate::models::Profile;

pub mod behavioral;
pub mod governance;
pub mod insights;
pub mod narrative;

pub use behavioral::analyze_profile;
pub use behavioral::calculate_scores;
pub use behavioral::BehavioralReport;
pub use behavioral::ProfileMetrics;
pub use governance::detect_alerts;
pub use insights::fallback_insights;
pub use insights::InsightGenerator;
pub use insights::InsightOutcome;
pub use narrative::describe_scores;

/// Score a profile, raise alerts and attach insights
///
/// Never fails: insight generation falls back to templates on its own.
pub async fn build_analysis(profile: Profile, generator: &InsightGenerator) -> Analysis {
    let report = analyze_profile(&profile);
    let alerts = detect_alerts(profile.followers, profile.likes, profile.videos, &report.scores);
    let outcome = generator.generate(&profile, &report.scores).await;

    Analysis {
        id: Uuid::new_v4(),
        overall_score: report.scores.overall(),
        scores: report.scores,
        dimension_insights: report.insights,
        insights: outcome.insights,
        alerts,
        insight_source: outcome.source,
        profile,
        created_at: Utc::now(),
    }
}
