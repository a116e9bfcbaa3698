use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Link shown on a profile (bio link, linked socials)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    pub platform: String,
    pub url: String,
}

/// Public profile summary as scraped from the profile page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    pub followers: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub following: Option<u64>,
    pub likes: u64,
    pub videos: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_links: Option<Vec<ExternalLink>>,
}

impl Profile {
    /// Minimal profile with only the counters the scoring core reads
    pub fn with_counts(username: impl Into<String>, followers: u64, likes: u64, videos: u64) -> Self {
        let username = username.into();
        Self {
            nickname: username.clone(),
            username,
            bio: None,
            avatar_url: None,
            is_verified: None,
            followers,
            following: None,
            likes,
            videos,
            external_links: None,
        }
    }

    pub fn verified(&self) -> bool {
        self.is_verified.unwrap_or(false)
    }

    pub fn has_bio(&self) -> bool {
        self.bio.as_deref().is_some_and(|b| !b.trim().is_empty())
    }

    pub fn external_link_count(&self) -> usize {
        self.external_links.as_ref().map_or(0, Vec::len)
    }
}

/// Eight synthetic ratings, each clamped to 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehavioralScore {
    pub visual: u8,
    pub audio: u8,
    pub energy: u8,
    pub interaction: u8,
    pub linguistic: u8,
    pub contextual: u8,
    pub environmental: u8,
    pub governance: u8,
}

impl BehavioralScore {
    /// All eight dimensions in declaration order
    pub fn dimensions(&self) -> [(&'static str, u8); 8] {
        [
            ("visual", self.visual),
            ("audio", self.audio),
            ("energy", self.energy),
            ("interaction", self.interaction),
            ("linguistic", self.linguistic),
            ("contextual", self.contextual),
            ("environmental", self.environmental),
            ("governance", self.governance),
        ]
    }

    /// The seven content dimensions, governance excluded
    pub fn behavioral_dimensions(&self) -> [(&'static str, u8); 7] {
        [
            ("visual", self.visual),
            ("audio", self.audio),
            ("energy", self.energy),
            ("interaction", self.interaction),
            ("linguistic", self.linguistic),
            ("contextual", self.contextual),
            ("environmental", self.environmental),
        ]
    }

    /// Mean of all eight dimensions
    pub fn average(&self) -> f64 {
        let total: u32 = self.dimensions().iter().map(|(_, s)| u32::from(*s)).sum();
        f64::from(total) / 8.0
    }

    pub fn overall(&self) -> u8 {
        self.average().round().clamp(0.0, 100.0) as u8
    }
}

/// One templated sentence per dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionInsights {
    pub visual: String,
    pub audio: String,
    pub energy: String,
    pub interaction: String,
    pub linguistic: String,
    pub contextual: String,
    pub environmental: String,
    pub governance: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Strength,
    Opportunity,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
}

impl Insight {
    pub fn new(kind: InsightKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Where the insight list of an analysis came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSource {
    Llm,
    Fallback,
}

/// Stored result of one analyze request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub id: Uuid,
    pub profile: Profile,
    pub scores: BehavioralScore,
    pub dimension_insights: DimensionInsights,
    pub insights: Vec<Insight>,
    pub alerts: Vec<String>,
    pub overall_score: u8,
    pub insight_source: InsightSource,
    pub created_at: DateTime<Utc>,
}

/// Account tracked for side-by-side comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub id: Uuid,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Scheduled,
    Published,
    Cancelled,
}

/// Content calendar entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarPost {
    pub id: Uuid,
    pub username: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub scheduled_for: DateTime<Utc>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    Pending,
    Completed,
    Failed,
}

/// Rendering of a stored analysis into a downloadable document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJob {
    pub id: Uuid,
    pub analysis_id: Uuid,
    pub format: ExportFormat,
    pub status: ExportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ExportJob {
    pub fn pending(analysis_id: Uuid, format: ExportFormat) -> Self {
        Self {
            id: Uuid::new_v4(),
            analysis_id,
            format,
            status: ExportStatus::Pending,
            content: None,
            error: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}
