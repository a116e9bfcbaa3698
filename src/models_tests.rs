//! Unit tests for data models
//!
//! Covers the JSON shapes the HTTP API exposes and the score helpers.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::models::*;

    fn sample_scores() -> BehavioralScore {
        BehavioralScore {
            visual: 80,
            audio: 70,
            energy: 60,
            interaction: 50,
            linguistic: 90,
            contextual: 40,
            environmental: 30,
            governance: 100,
        }
    }

    #[test]
    fn test_profile_deserializes_camel_case() {
        let profile: Profile = serde_json::from_value(json!({
            "username": "creator",
            "nickname": "The Creator",
            "isVerified": true,
            "avatarUrl": "https://cdn.example/avatar.jpg",
            "followers": 1200,
            "following": 30,
            "likes": 50000,
            "videos": 42,
            "externalLinks": [{"platform": "instagram", "url": "https://instagram.com/creator"}]
        }))
        .unwrap();

        assert!(profile.verified());
        assert_eq!(profile.following, Some(30));
        assert_eq!(profile.external_link_count(), 1);
        assert_eq!(
            profile.avatar_url.as_deref(),
            Some("https://cdn.example/avatar.jpg")
        );
    }

    #[test]
    fn test_profile_optional_fields_default() {
        let profile: Profile = serde_json::from_value(json!({
            "username": "plain",
            "nickname": "plain",
            "followers": 0,
            "likes": 0,
            "videos": 0
        }))
        .unwrap();

        assert!(!profile.verified());
        assert!(!profile.has_bio());
        assert_eq!(profile.external_link_count(), 0);
        assert_eq!(profile.following, None);
    }

    #[test]
    fn test_profile_rejects_negative_counters() {
        let result: Result<Profile, _> = serde_json::from_value(json!({
            "username": "neg",
            "nickname": "neg",
            "followers": -5,
            "likes": 0,
            "videos": 0
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_bio_is_not_a_bio() {
        let mut profile = Profile::with_counts("x", 1, 1, 1);
        profile.bio = Some("   ".to_string());
        assert!(!profile.has_bio());
        profile.bio = Some("hello".to_string());
        assert!(profile.has_bio());
    }

    #[test]
    fn test_score_average_and_overall() {
        let scores = sample_scores();
        assert!((scores.average() - 65.0).abs() < f64::EPSILON);
        assert_eq!(scores.overall(), 65);
        assert_eq!(scores.behavioral_dimensions().len(), 7);
        assert_eq!(scores.dimensions()[7], ("governance", 100));
    }

    #[test]
    fn test_insight_serializes_type_field() {
        let insight = Insight::new(InsightKind::Opportunity, "Grow", "Post more");
        let value = serde_json::to_value(&insight).unwrap();
        assert_eq!(value["type"], "opportunity");
        assert_eq!(value["title"], "Grow");
    }

    #[test]
    fn test_export_job_pending() {
        let analysis_id = uuid::Uuid::new_v4();
        let job = ExportJob::pending(analysis_id, ExportFormat::Csv);
        assert_eq!(job.status, ExportStatus::Pending);
        assert_eq!(job.analysis_id, analysis_id);
        assert!(job.content.is_none());

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["status"], "pending");
        assert_eq!(value["format"], "csv");
        assert!(value.get("completedAt").is_none());
    }
}
