//! AI insight generation with a deterministic fallback
//!
//! `InsightGenerator::generate` never fails. When an LLM key is configured
//! the model is asked for strict JSON; any network, status or parse failure
//! is logged and the templated fallback is returned instead.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use tracing::warn;

use crate::config::AppConfig;
use crate::errors::BiasError;
use crate::errors::Result;
use crate::llm::InsightPrompts;
use crate::llm::LlmService;
use crate::models::BehavioralScore;
use crate::models::Insight;
use crate::models::InsightKind;
use crate::models::InsightSource;
use crate::models::Profile;

const MAX_INSIGHTS: usize = 4;
const STRENGTH_THRESHOLD: u8 = 80;
const OPPORTUNITY_THRESHOLD: u8 = 70;
const GOVERNANCE_ALERT_THRESHOLD: u8 = 75;
const STRONG_OVERALL_AVERAGE: f64 = 75.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightOutcome {
    pub insights: Vec<Insight>,
    pub source: InsightSource,
}

/// Produces the strength/opportunity/alert list attached to an analysis
pub struct InsightGenerator {
    llm: Option<Arc<LlmService>>,
}

impl InsightGenerator {
    /// Generator that only uses the templated fallback
    #[must_use]
    pub const fn fallback_only() -> Self {
        Self { llm: None }
    }

    /// Create with LLM service for model-written insights
    pub fn with_llm(llm: Arc<LlmService>) -> Self {
        Self { llm: Some(llm) }
    }

    /// LLM-backed when the config carries an API key, fallback-only otherwise
    pub fn from_config(config: &AppConfig) -> Self {
        if !config.llm_enabled() {
            info!("No LLM API key configured - using templated insights");
            return Self::fallback_only();
        }
        match LlmService::new(config) {
            Ok(service) => {
                info!(
                    "AI insights enabled ({:?}, model {})",
                    service.provider(),
                    service.model()
                );
                Self::with_llm(Arc::new(service))
            }
            Err(e) => {
                warn!("Failed to initialize LLM service, using templated insights: {}", e);
                Self::fallback_only()
            }
        }
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm.is_some()
    }

    pub async fn generate(&self, profile: &Profile, scores: &BehavioralScore) -> InsightOutcome {
        if let Some(llm) = &self.llm {
            match generate_with_llm(llm, profile, scores).await {
                Ok(insights) => {
                    return InsightOutcome {
                        insights,
                        source: InsightSource::Llm,
                    };
                }
                Err(e) => {
                    warn!(
                        "AI insight generation failed for @{}, falling back to templates: {}",
                        profile.username, e
                    );
                }
            }
        }

        InsightOutcome {
            insights: fallback_insights(scores),
            source: InsightSource::Fallback,
        }
    }
}

async fn generate_with_llm(
    llm: &LlmService,
    profile: &Profile,
    scores: &BehavioralScore,
) -> Result<Vec<Insight>> {
    let prompt = build_prompt(profile, scores);
    tracing::debug!("=== INSIGHT PROMPT ===\n{}\n=== END PROMPT ===", prompt);
    let raw = llm.generate_json(InsightPrompts::SYSTEM, &prompt).await?;
    parse_llm_insights(&raw)
}

fn build_prompt(profile: &Profile, scores: &BehavioralScore) -> String {
    let mut values: HashMap<&str, String> = HashMap::new();
    values.insert("username", profile.username.clone());
    values.insert("nickname", profile.nickname.clone());
    values.insert("verified", profile.verified().to_string());
    values.insert("followers", profile.followers.to_string());
    values.insert(
        "following",
        profile
            .following
            .map_or_else(|| "unknown".to_string(), |f| f.to_string()),
    );
    values.insert("likes", profile.likes.to_string());
    values.insert("videos", profile.videos.to_string());
    values.insert(
        "bio",
        profile
            .bio
            .clone()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| "(none)".to_string()),
    );
    for (name, score) in scores.dimensions() {
        values.insert(name, score.to_string());
    }

    InsightPrompts::profile_insights().render(&values)
}

#[derive(Deserialize)]
struct RawInsight {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl RawInsight {
    fn into_insight(self) -> Option<Insight> {
        let kind = match self.kind?.trim().to_ascii_lowercase().as_str() {
            "strength" => InsightKind::Strength,
            "opportunity" => InsightKind::Opportunity,
            "alert" => InsightKind::Alert,
            _ => return None,
        };
        let title = self.title?;
        let description = self.description?;
        if title.trim().is_empty() || description.trim().is_empty() {
            return None;
        }
        Some(Insight::new(kind, title.trim(), description.trim()))
    }
}

/// Parse a model reply into insights
///
/// Accepts `{"insights": [...]}` or a bare array, optionally wrapped in a
/// markdown code fence. Entries that are not objects, lack a field, carry an
/// unknown type or have empty text are dropped; at most four are kept.
pub fn parse_llm_insights(raw: &str) -> Result<Vec<Insight>> {
    let body = strip_code_fence(raw);

    let entries = match serde_json::from_str::<Value>(body)? {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("insights") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(BiasError::LlmError(
                    "Model reply has no \"insights\" array".to_string(),
                ))
            }
        },
        other => {
            return Err(BiasError::LlmError(format!(
                "Model reply is not a JSON object or array: {other}"
            )))
        }
    };

    let insights: Vec<Insight> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<RawInsight>(entry).ok())
        .filter_map(RawInsight::into_insight)
        .take(MAX_INSIGHTS)
        .collect();

    if insights.is_empty() {
        return Err(BiasError::LlmError(
            "Model reply contained no usable insights".to_string(),
        ));
    }
    Ok(insights)
}

/// Remove a surrounding markdown fence and its language tag, if any
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = match rest.split_once('\n') {
        Some((tag, body)) if tag.trim().chars().all(|c| c.is_ascii_alphanumeric()) => body,
        _ => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn dimension_label(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Deterministic insights derived from the scores alone
pub fn fallback_insights(scores: &BehavioralScore) -> Vec<Insight> {
    let dimensions = scores.behavioral_dimensions();
    let mut insights = Vec::new();

    // Ties resolve to the first dimension in declaration order
    let (best_name, best) = dimensions
        .iter()
        .copied()
        .fold(dimensions[0], |acc, d| if d.1 > acc.1 { d } else { acc });
    let (worst_name, worst) = dimensions
        .iter()
        .copied()
        .fold(dimensions[0], |acc, d| if d.1 < acc.1 { d } else { acc });

    if best >= STRENGTH_THRESHOLD {
        insights.push(Insight::new(
            InsightKind::Strength,
            format!("Standout {} performance", dimension_label(best_name)),
            format!(
                "Your {best_name} score of {best} is your strongest dimension. Keep leaning into what is working here."
            ),
        ));
    }

    if worst < OPPORTUNITY_THRESHOLD {
        insights.push(Insight::new(
            InsightKind::Opportunity,
            format!("Improve {}", dimension_label(worst_name)),
            format!(
                "Your {worst_name} score of {worst} has the most room to grow. Small, consistent changes here will lift your overall profile."
            ),
        ));
    }

    if scores.governance < GOVERNANCE_ALERT_THRESHOLD {
        insights.push(Insight::new(
            InsightKind::Alert,
            "Account health needs review",
            format!(
                "A governance score of {} suggests unusual follower or engagement ratios. Review where your audience growth is coming from.",
                scores.governance
            ),
        ));
    }

    if scores.average() >= STRONG_OVERALL_AVERAGE && insights.len() < 3 {
        insights.push(Insight::new(
            InsightKind::Strength,
            "Strong overall performance",
            format!(
                "An average score of {:.0} across all dimensions puts this account among well-rounded creators.",
                scores.average()
            ),
        ));
    }

    insights
}
