//! CLI output formatting utilities
//!
//! This module provides consistent output formatting for the BIAS CLI

use crate::models::Analysis;
use crate::models::BehavioralScore;
use crate::models::DimensionInsights;
use crate::models::Insight;
use crate::models::InsightKind;
use crate::models::Profile;
use crate::AppConfig;

const BAR_WIDTH: usize = 20;

/// Safely truncate a string at character boundary (not byte boundary)
///
/// This prevents panics when truncating strings with multi-byte UTF-8 characters (emojis, etc.)
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Fixed-width bar for a 0-100 score
#[must_use]
pub fn score_bar(score: u8) -> String {
    let filled = usize::from(score.min(100)) * BAR_WIDTH / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Print the profile header block
pub fn print_profile(profile: &Profile) {
    let verified = if profile.verified() { " ✓" } else { "" };
    println!("👤 @{}{} ({})", profile.username, verified, profile.nickname);
    println!(
        "   Followers: {} | Following: {} | Likes: {} | Videos: {}",
        profile.followers,
        profile
            .following
            .map_or_else(|| "N/A".to_string(), |f| f.to_string()),
        profile.likes,
        profile.videos
    );
    if let Some(bio) = profile.bio.as_deref().filter(|b| !b.trim().is_empty()) {
        println!("   Bio: {}", truncate_str(&bio.replace('\n', " "), 80));
    }
    if let Some(links) = &profile.external_links {
        for link in links {
            println!("   Link ({}): {}", link.platform, link.url);
        }
    }
}

/// Print one line per dimension with its bar and narrative sentence
pub fn print_scores(scores: &BehavioralScore, narrative: &DimensionInsights) {
    let sentences = [
        &narrative.visual,
        &narrative.audio,
        &narrative.energy,
        &narrative.interaction,
        &narrative.linguistic,
        &narrative.contextual,
        &narrative.environmental,
        &narrative.governance,
    ];

    println!();
    println!("📊 Behavioral scores (overall {}):", scores.overall());
    for ((name, score), sentence) in scores.dimensions().iter().zip(sentences) {
        println!("  {name:<14} {} {score:>3}", score_bar(*score));
        println!("  {:<14} {}", "", sentence);
    }
}

pub fn print_alerts(alerts: &[String]) {
    println!();
    if alerts.is_empty() {
        println!("✅ No governance alerts");
        return;
    }
    println!("⚠️  Governance alerts:");
    for alert in alerts {
        println!("  - {alert}");
    }
}

pub fn print_insights(insights: &[Insight]) {
    println!();
    if insights.is_empty() {
        println!("💡 No insights");
        return;
    }
    println!("💡 Insights:");
    for insight in insights {
        let icon = match insight.kind {
            InsightKind::Strength => "💪",
            InsightKind::Opportunity => "🎯",
            InsightKind::Alert => "🚨",
        };
        println!("  {icon} {}", insight.title);
        println!("     {}", insight.description);
    }
}

/// Print a full stored analysis
pub fn print_analysis(analysis: &Analysis) {
    print_profile(&analysis.profile);
    print_scores(&analysis.scores, &analysis.dimension_insights);
    print_alerts(&analysis.alerts);
    print_insights(&analysis.insights);
    println!();
    println!(
        "🆔 Analysis {} ({:?} insights, {})",
        analysis.id,
        analysis.insight_source,
        analysis.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

/// Print the effective configuration
pub fn print_config(config: &AppConfig) {
    println!("📋 BIAS Configuration:");
    println!();
    println!("Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
    println!();
    println!("Server:");
    println!("  Address: {}", config.server_addr());
    println!("  CORS: {}", config.server.enable_cors);
    println!();
    println!("Scraper:");
    println!("  Base URL: {}", config.scraper.base_url);
    println!("  User agent: {}", truncate_str(&config.scraper.user_agent, 60));
    println!("  Timeout: {}s", config.scraper.timeout_secs);
    println!();
    println!("LLM:");
    println!("  Provider: {}", config.llm.provider);
    println!("  Endpoint: {}", config.llm.endpoint);
    println!("  Model: {}", config.llm.model);
    println!("  API key: {}", config.masked_llm_key());
    println!("  Temperature: {}", config.llm.temperature);
    println!("  Timeout: {}s", config.llm.timeout_secs);
    println!(
        "  AI insights: {}",
        if config.llm_enabled() {
            "enabled"
        } else {
            "disabled (templated fallback)"
        }
    );
}
