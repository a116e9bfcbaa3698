//! Rendering of stored analyses into downloadable documents

use chrono::Utc;
use tracing::info;
use tracing::warn;

use crate::errors::BiasError;
use crate::errors::Result;
use crate::models::Analysis;
use crate::models::ExportFormat;
use crate::models::ExportJob;
use crate::models::ExportStatus;
use crate::models::InsightKind;

pub fn render(analysis: &Analysis, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => render_json(analysis),
        ExportFormat::Csv => render_csv(analysis),
    }
}

pub fn render_json(analysis: &Analysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

/// Flat `section,field,value` rows
pub fn render_csv(analysis: &Analysis) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["section", "field", "value"])?;

    let profile = &analysis.profile;
    let optional = |value: Option<u64>| value.map_or_else(String::new, |v| v.to_string());
    let profile_rows = [
        ("username", profile.username.clone()),
        ("nickname", profile.nickname.clone()),
        ("verified", profile.verified().to_string()),
        ("followers", profile.followers.to_string()),
        ("following", optional(profile.following)),
        ("likes", profile.likes.to_string()),
        ("videos", profile.videos.to_string()),
        ("bio", profile.bio.clone().unwrap_or_default()),
    ];
    for (field, value) in &profile_rows {
        writer.write_record(["profile", *field, value.as_str()])?;
    }

    for (name, score) in analysis.scores.dimensions() {
        writer.write_record(["score", name, score.to_string().as_str()])?;
    }
    writer.write_record(["score", "overall", analysis.overall_score.to_string().as_str()])?;

    for alert in &analysis.alerts {
        writer.write_record(["alert", "", alert.as_str()])?;
    }

    for insight in &analysis.insights {
        let kind = match insight.kind {
            InsightKind::Strength => "strength",
            InsightKind::Opportunity => "opportunity",
            InsightKind::Alert => "alert",
        };
        let text = format!("{}: {}", insight.title, insight.description);
        writer.write_record(["insight", kind, text.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| BiasError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| BiasError::Export(e.to_string()))
}

/// Render a pending job; the returned job is `Completed` or `Failed`
pub fn run_export_job(mut job: ExportJob, analysis: Option<&Analysis>) -> ExportJob {
    let rendered = analysis
        .ok_or_else(|| BiasError::not_found("Analysis", job.analysis_id))
        .and_then(|analysis| render(analysis, job.format));

    match rendered {
        Ok(content) => {
            info!(
                "Export {} rendered ({:?}, {} bytes)",
                job.id,
                job.format,
                content.len()
            );
            job.status = ExportStatus::Completed;
            job.content = Some(content);
        }
        Err(e) => {
            warn!("Export {} failed: {}", job.id, e);
            job.status = ExportStatus::Failed;
            job.error = Some(e.to_string());
        }
    }
    job.completed_at = Some(Utc::now());
    job
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::analysis::analyze_profile;
    use crate::analysis::detect_alerts;
    use crate::analysis::fallback_insights;
    use crate::models::InsightSource;
    use crate::models::Profile;

    fn analysis() -> Analysis {
        let mut profile = Profile::with_counts("maker", 500_000, 2_000_000, 5);
        profile.bio = Some("builds, \"things\"".to_string());
        let report = analyze_profile(&profile);
        Analysis {
            id: Uuid::new_v4(),
            alerts: detect_alerts(500_000, 2_000_000, 5, &report.scores),
            insights: fallback_insights(&report.scores),
            overall_score: report.scores.overall(),
            scores: report.scores,
            dimension_insights: report.insights,
            insight_source: InsightSource::Fallback,
            profile,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_csv_rows() {
        let csv = render_csv(&analysis()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("section,field,value"));
        assert!(csv.contains("profile,followers,500000"));
        assert!(csv.contains("score,governance,"));
        assert!(csv.contains("alert,,Low content volume"));
        // quoted field with embedded quotes and comma
        assert!(csv.contains(r#"profile,bio,"builds, ""things""""#));
    }

    #[test]
    fn test_json_is_analysis() {
        let analysis = analysis();
        let json = render_json(&analysis).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], analysis.id.to_string());
        assert_eq!(value["profile"]["username"], "maker");
    }

    #[test]
    fn test_run_job_completes() {
        let analysis = analysis();
        let job = run_export_job(ExportJob::pending(analysis.id, ExportFormat::Csv), Some(&analysis));
        assert_eq!(job.status, ExportStatus::Completed);
        assert!(job.content.is_some());
        assert!(job.completed_at.is_some());
    }

    #[test]
    fn test_run_job_without_analysis_fails() {
        let job = run_export_job(ExportJob::pending(Uuid::new_v4(), ExportFormat::Json), None);
        assert_eq!(job.status, ExportStatus::Failed);
        assert!(job.error.unwrap().contains("Analysis not found"));
        assert!(job.content.is_none());
    }
}
