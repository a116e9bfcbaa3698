//! API request and response types

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::BiasError;
use crate::errors::Result;
use crate::errors::ScrapeError;
use crate::models::BehavioralScore;
use crate::models::CalendarPost;
use crate::models::Competitor;
use crate::models::DimensionInsights;
use crate::models::ExportFormat;
use crate::models::Insight;
use crate::models::PostStatus;
use crate::models::Profile;
use crate::scraper::normalize_username;
use crate::simulation::CompetitorMetrics;
use crate::simulation::TREND_CATEGORIES;

pub const DEFAULT_LIST_LIMIT: usize = 50;
pub const MAX_LIST_LIMIT: usize = 200;
const MAX_NOTES_LEN: usize = 500;
const MAX_TITLE_LEN: usize = 150;
const MAX_DESCRIPTION_LEN: usize = 2_000;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error response carrying its status code; renders as the error envelope
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.message))).into_response()
    }
}

/// HTTP status for each scrape failure
pub fn scrape_status(error: &ScrapeError) -> StatusCode {
    match error {
        ScrapeError::InvalidUsername(_) => StatusCode::BAD_REQUEST,
        ScrapeError::NotFound(_) => StatusCode::NOT_FOUND,
        ScrapeError::AccessDenied(_) => StatusCode::FORBIDDEN,
        ScrapeError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        ScrapeError::StructureChanged(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScrapeError::Http(_) | ScrapeError::Network(_) => StatusCode::BAD_GATEWAY,
    }
}

impl From<ScrapeError> for ApiError {
    fn from(error: ScrapeError) -> Self {
        Self::new(scrape_status(&error), error.to_string())
    }
}

impl From<BiasError> for ApiError {
    fn from(error: BiasError) -> Self {
        match error {
            BiasError::Scrape(e) => e.into(),
            BiasError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, error.to_string()),
            BiasError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            BiasError::AlreadyExists { .. } => {
                Self::new(StatusCode::BAD_REQUEST, error.to_string())
            }
            other => {
                tracing::error!("Request failed: {}", other);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        }
    }
}

pub type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

/// Wrap data in a successful envelope
#[allow(clippy::unnecessary_wraps)]
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Statistics response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub analyses: usize,
    pub competitors: usize,
    pub calendar_posts: usize,
    pub exports: usize,
    pub llm_enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub username: String,
}

impl AnalyzeRequest {
    /// Normalized username
    pub fn validate(&self) -> std::result::Result<String, ScrapeError> {
        normalize_username(&self.username)
    }
}

/// Check a client-supplied profile before scoring; fills a blank nickname
pub fn validate_profile(mut profile: Profile) -> std::result::Result<Profile, ScrapeError> {
    profile.username = normalize_username(&profile.username)?;
    if profile.nickname.trim().is_empty() {
        profile.nickname = profile.username.clone();
    }
    Ok(profile)
}

/// Offline scoring result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub scores: BehavioralScore,
    pub dimension_insights: DimensionInsights,
    pub alerts: Vec<String>,
    pub insights: Vec<Insight>,
    pub overall_score: u8,
}

fn clamp_limit(limit: Option<usize>, default: usize, max: usize) -> usize {
    limit.unwrap_or(default).clamp(1, max)
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalysesQuery {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl AnalysesQuery {
    pub fn limit(&self) -> usize {
        clamp_limit(self.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT)
    }

    /// Username filter with any leading `@` removed
    pub fn username(&self) -> Option<String> {
        self.username
            .as_deref()
            .map(|u| u.trim().trim_start_matches('@').to_ascii_lowercase())
            .filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct NewCompetitor {
    pub username: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewCompetitor {
    pub fn validate(self) -> Result<Competitor> {
        let username = normalize_username(&self.username)
            .map_err(|e| BiasError::Validation(e.to_string()))?;
        let notes = self.notes.filter(|n| !n.trim().is_empty());
        if notes.as_ref().is_some_and(|n| n.chars().count() > MAX_NOTES_LEN) {
            return Err(BiasError::Validation(format!(
                "Notes must be at most {MAX_NOTES_LEN} characters"
            )));
        }

        Ok(Competitor {
            id: Uuid::new_v4(),
            username,
            notes,
            added_at: Utc::now(),
        })
    }
}

/// One tracked account with its headline numbers
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorComparison {
    pub competitor: Competitor,
    pub metrics: CompetitorMetrics,
}

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(BiasError::Validation("Title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(BiasError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

fn validate_description(description: Option<String>) -> Result<Option<String>> {
    let description = description.filter(|d| !d.trim().is_empty());
    if description
        .as_ref()
        .is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN)
    {
        return Err(BiasError::Validation(format!(
            "Description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(description)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCalendarPost {
    pub username: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub scheduled_for: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<PostStatus>,
}

impl NewCalendarPost {
    pub fn validate(self) -> Result<CalendarPost> {
        let username = normalize_username(&self.username)
            .map_err(|e| BiasError::Validation(e.to_string()))?;
        let now = Utc::now();

        Ok(CalendarPost {
            id: Uuid::new_v4(),
            username,
            title: validate_title(&self.title)?,
            description: validate_description(self.description)?,
            scheduled_for: self.scheduled_for,
            status: self.status.unwrap_or(PostStatus::Scheduled),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCalendarPost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<PostStatus>,
}

impl UpdateCalendarPost {
    pub fn apply(self, mut post: CalendarPost) -> Result<CalendarPost> {
        if let Some(title) = self.title {
            post.title = validate_title(&title)?;
        }
        if self.description.is_some() {
            post.description = validate_description(self.description)?;
        }
        if let Some(scheduled_for) = self.scheduled_for {
            post.scheduled_for = scheduled_for;
        }
        if let Some(status) = self.status {
            post.status = status;
        }
        post.updated_at = Utc::now();
        Ok(post)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExportJob {
    pub analysis_id: Uuid,
    pub format: ExportFormat,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendsQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl TrendsQuery {
    /// Known category (lowercased) or `None` for all
    pub fn category(&self) -> Result<Option<&'static str>> {
        let Some(raw) = self.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) else {
            return Ok(None);
        };
        let wanted = raw.to_ascii_lowercase();
        TREND_CATEGORIES
            .iter()
            .find(|c| **c == wanted)
            .copied()
            .map(Some)
            .ok_or_else(|| {
                BiasError::Validation(format!(
                    "Unknown category '{raw}'; expected one of: {}",
                    TREND_CATEGORIES.join(", ")
                ))
            })
    }

    pub fn limit(&self) -> usize {
        clamp_limit(
            self.limit,
            crate::simulation::DEFAULT_TREND_LIMIT,
            crate::simulation::MAX_TREND_LIMIT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_status_mapping() {
        let cases = [
            (ScrapeError::InvalidUsername("x".into()), 400),
            (ScrapeError::NotFound("x".into()), 404),
            (ScrapeError::AccessDenied("x".into()), 403),
            (ScrapeError::RateLimited("x".into()), 429),
            (ScrapeError::StructureChanged("x".into()), 422),
            (ScrapeError::Http(500), 502),
            (ScrapeError::Network("reset".into()), 502),
        ];
        for (error, status) in cases {
            assert_eq!(scrape_status(&error).as_u16(), status, "{error}");
        }
    }

    #[test]
    fn test_bias_error_mapping() {
        let not_found: ApiError = BiasError::not_found("Analysis", "abc").into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
        let invalid: ApiError = BiasError::Validation("bad".into()).into();
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
        assert_eq!(invalid.message, "bad");
        let duplicate: ApiError = BiasError::AlreadyExists {
            entity: "Competitor",
            key: "rival".into(),
        }
        .into();
        assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
        assert_eq!(duplicate.message, "Competitor already exists: rival");
        let scrape: ApiError = BiasError::Scrape(ScrapeError::RateLimited("x".into())).into();
        assert_eq!(scrape.status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_new_competitor_validation() {
        let ok = NewCompetitor {
            username: " @Rival.one ".into(),
            notes: Some("  ".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(ok.username, "Rival.one");
        assert!(ok.notes.is_none());

        let bad = NewCompetitor {
            username: "no spaces".into(),
            notes: None,
        };
        assert!(matches!(bad.validate(), Err(BiasError::Validation(_))));
    }

    #[test]
    fn test_calendar_update_applies_fields() {
        let post = NewCalendarPost {
            username: "creator".into(),
            title: " Launch ".into(),
            description: None,
            scheduled_for: Utc::now(),
            status: None,
        }
        .validate()
        .unwrap();
        assert_eq!(post.title, "Launch");
        assert_eq!(post.status, PostStatus::Scheduled);

        let updated = UpdateCalendarPost {
            status: Some(PostStatus::Published),
            ..Default::default()
        }
        .apply(post.clone())
        .unwrap();
        assert_eq!(updated.title, "Launch");
        assert_eq!(updated.status, PostStatus::Published);

        let blank = UpdateCalendarPost {
            title: Some("   ".into()),
            ..Default::default()
        };
        assert!(blank.apply(post).is_err());
    }

    #[test]
    fn test_trends_query() {
        let query = TrendsQuery {
            category: Some("Food".into()),
            limit: Some(0),
        };
        assert_eq!(query.category().unwrap(), Some("food"));
        assert_eq!(query.limit(), 1);

        let unknown = TrendsQuery {
            category: Some("knitting".into()),
            limit: None,
        };
        assert!(unknown.category().is_err());
        assert_eq!(TrendsQuery::default().category().unwrap(), None);
    }

    #[test]
    fn test_validate_profile_fills_nickname() {
        let profile = validate_profile(Profile::with_counts("@maker", 1, 2, 3)).unwrap();
        assert_eq!(profile.username, "maker");
        // with_counts copies the raw username into nickname
        assert_eq!(profile.nickname, "@maker");

        let mut blank = Profile::with_counts("maker", 1, 2, 3);
        blank.nickname = String::new();
        assert_eq!(validate_profile(blank).unwrap().nickname, "maker");
    }
}
