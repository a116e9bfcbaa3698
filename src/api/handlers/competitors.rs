/// Competitor tracking handlers
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;
use uuid::Uuid;

use super::AppState;
use crate::api::extract::ApiJson;
use crate::api::extract::ApiPath;
use crate::api::types::ok;
use crate::api::types::ApiError;
use crate::api::types::ApiResponse;
use crate::api::types::ApiResult;
use crate::api::types::CompetitorComparison;
use crate::api::types::NewCompetitor;
use crate::models::Competitor;
use crate::simulation::simulate_competitor_metrics;
use crate::simulation::CompetitorMetrics;

/// GET /api/competitors
pub async fn list_competitors(State(state): State<AppState>) -> ApiResult<Vec<Competitor>> {
    info!("GET /api/competitors");
    ok(state.competitors.list().await?)
}

/// POST /api/competitors; 400 when the username is already tracked
pub async fn add_competitor(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NewCompetitor>,
) -> Result<(StatusCode, Json<ApiResponse<Competitor>>), ApiError> {
    let competitor = request.validate()?;
    info!("POST /api/competitors @{}", competitor.username);

    // the repository rejects an already tracked username
    let competitor = state.competitors.create(competitor).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(competitor))))
}

/// DELETE /api/competitors/:id
pub async fn remove_competitor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Competitor> {
    info!("DELETE /api/competitors/{}", id);
    ok(state.competitors.delete(id).await?)
}

/// Side-by-side metrics for every tracked account (GET /api/competitors/compare)
///
/// Uses the newest stored analysis of each account; accounts never analyzed
/// get simulated metrics flagged `simulated: true`.
pub async fn compare_competitors(
    State(state): State<AppState>,
) -> ApiResult<Vec<CompetitorComparison>> {
    info!("GET /api/competitors/compare");

    let competitors = state.competitors.list().await?;
    let analyses = state.analyses.list().await?;

    let comparisons: Vec<CompetitorComparison> = {
        let mut rng = rand::thread_rng();
        competitors
            .into_iter()
            .map(|competitor| {
                let latest = analyses
                    .iter()
                    .rev()
                    .find(|a| a.profile.username.eq_ignore_ascii_case(&competitor.username));
                let metrics = match latest {
                    Some(analysis) => CompetitorMetrics::from_analysis(analysis),
                    None => simulate_competitor_metrics(&mut rng, &competitor.username),
                };
                CompetitorComparison {
                    competitor,
                    metrics,
                }
            })
            .collect()
    };

    ok(comparisons)
}
