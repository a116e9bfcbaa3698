/// API request handlers
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::analysis::InsightGenerator;
use crate::api::types::ok;
use crate::api::types::ApiResponse;
use crate::api::types::ApiResult;
use crate::api::types::HealthResponse;
use crate::api::types::StatsResponse;
use crate::config::AppConfig;
use crate::models::Analysis;
use crate::models::CalendarPost;
use crate::models::Competitor;
use crate::models::ExportJob;
use crate::scraper::ProfileScraper;
use crate::store::InMemoryRepository;
use crate::store::Repository;
use crate::Result;

pub mod analysis;
pub mod calendar;
pub mod competitors;
pub mod exports;
pub mod simulated;

pub use analysis::*;
pub use calendar::*;
pub use competitors::*;
pub use exports::*;
pub use simulated::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub scraper: Arc<ProfileScraper>,
    pub insights: Arc<InsightGenerator>,
    pub analyses: Arc<dyn Repository<Analysis>>,
    pub competitors: Arc<dyn Repository<Competitor>>,
    pub calendar: Arc<dyn Repository<CalendarPost>>,
    pub exports: Arc<dyn Repository<ExportJob>>,
}

impl AppState {
    /// Services from config, backed by fresh in-memory repositories
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::in_memory(
            ProfileScraper::new(config)?,
            InsightGenerator::from_config(config),
        ))
    }

    pub fn in_memory(scraper: ProfileScraper, insights: InsightGenerator) -> Self {
        Self {
            scraper: Arc::new(scraper),
            insights: Arc::new(insights),
            analyses: Arc::new(InMemoryRepository::<Analysis>::new()),
            competitors: Arc::new(InMemoryRepository::<Competitor>::new()),
            calendar: Arc::new(InMemoryRepository::<CalendarPost>::new()),
            exports: Arc::new(InMemoryRepository::<ExportJob>::new()),
        }
    }
}

/// Health check handler
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Get stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<StatsResponse> {
    info!("GET /api/stats");

    ok(StatsResponse {
        analyses: state.analyses.count().await?,
        competitors: state.competitors.count().await?,
        calendar_posts: state.calendar.count().await?,
        exports: state.exports.count().await?,
        llm_enabled: state.insights.llm_enabled(),
    })
}
