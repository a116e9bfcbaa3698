//! CLI command handlers

use tracing::info;

use crate::analysis::build_analysis;
use crate::analysis::InsightGenerator;
use crate::api::types::ScoreResponse;
use crate::cli::output::*;
use crate::models::Profile;
use crate::scraper::ProfileScraper;
use crate::AppConfig;
use crate::Result;

/// Handle serve command; flags override the `[server]` section
pub async fn handle_serve_command(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    cors: bool,
) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let enable_cors = cors || config.server.enable_cors;

    crate::api::serve_api(config, host, port, enable_cors).await
}

/// Handle analyze command
pub async fn handle_analyze_command(config: &AppConfig, username: &str, json: bool) -> Result<()> {
    let scraper = ProfileScraper::new(config)?;
    let generator = InsightGenerator::from_config(config);

    info!("Analyzing @{}", username.trim().trim_start_matches('@'));
    let profile = scraper.fetch_profile(username).await?;
    let analysis = build_analysis(profile, &generator).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }
    Ok(())
}

/// Build the profile scored by the offline `score` command
pub fn profile_from_counts(
    followers: u64,
    likes: u64,
    videos: u64,
    following: Option<u64>,
    verified: bool,
    bio: Option<String>,
) -> Profile {
    let mut profile = Profile::with_counts("offline", followers, likes, videos);
    profile.following = following;
    profile.is_verified = Some(verified);
    profile.bio = bio;
    profile
}

/// Handle score command
pub async fn handle_score_command(config: &AppConfig, profile: Profile, json: bool) -> Result<()> {
    let generator = InsightGenerator::from_config(config);
    let analysis = build_analysis(profile, &generator).await;

    if json {
        let response = ScoreResponse {
            scores: analysis.scores,
            dimension_insights: analysis.dimension_insights,
            alerts: analysis.alerts,
            insights: analysis.insights,
            overall_score: analysis.overall_score,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_scores(&analysis.scores, &analysis.dimension_insights);
        print_alerts(&analysis.alerts);
        print_insights(&analysis.insights);
    }
    Ok(())
}

/// Handle config command
pub fn handle_config_command(config: &AppConfig) {
    print_config(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_counts() {
        let profile = profile_from_counts(10, 20, 3, Some(4), true, Some("bio".into()));
        assert_eq!(profile.followers, 10);
        assert_eq!(profile.following, Some(4));
        assert!(profile.verified());
        assert!(profile.has_bio());
    }
}
