/// Analysis handlers: scrape-and-score, offline scoring, history
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;
use uuid::Uuid;

use super::AppState;
use crate::analysis::analyze_profile;
use crate::analysis::build_analysis;
use crate::analysis::detect_alerts;
use crate::api::extract::ApiJson;
use crate::api::extract::ApiPath;
use crate::api::extract::ApiQuery;
use crate::api::types::ok;
use crate::api::types::validate_profile;
use crate::api::types::AnalysesQuery;
use crate::api::types::AnalyzeRequest;
use crate::api::types::ApiResponse;
use crate::api::types::ApiError;
use crate::api::types::ApiResult;
use crate::api::types::ScoreResponse;
use crate::errors::BiasError;
use crate::models::Analysis;
use crate::models::Profile;

/// Scrape, score and store (POST /api/analyze)
pub async fn analyze(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalyzeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Analysis>>), ApiError> {
    let username = request.validate()?;
    info!("POST /api/analyze @{}", username);

    let profile = state.scraper.fetch_profile(&username).await?;
    let analysis = build_analysis(profile, &state.insights).await;
    let analysis = state.analyses.create(analysis).await?;

    info!(
        "Analysis {} stored for @{} (overall {}, {} alerts)",
        analysis.id,
        analysis.profile.username,
        analysis.overall_score,
        analysis.alerts.len()
    );
    Ok((StatusCode::CREATED, Json(ApiResponse::success(analysis))))
}

/// Score a client-supplied profile without scraping or storing (POST /api/score)
pub async fn score_profile(
    State(state): State<AppState>,
    ApiJson(profile): ApiJson<Profile>,
) -> ApiResult<ScoreResponse> {
    let profile = validate_profile(profile)?;
    info!("POST /api/score @{}", profile.username);

    let report = analyze_profile(&profile);
    let alerts = detect_alerts(profile.followers, profile.likes, profile.videos, &report.scores);
    let outcome = state.insights.generate(&profile, &report.scores).await;

    ok(ScoreResponse {
        overall_score: report.scores.overall(),
        scores: report.scores,
        dimension_insights: report.insights,
        alerts,
        insights: outcome.insights,
    })
}

/// List stored analyses, newest first (GET /api/analyses)
pub async fn list_analyses(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AnalysesQuery>,
) -> ApiResult<Vec<Analysis>> {
    let username = params.username();
    info!(
        "GET /api/analyses?username={}&limit={}",
        username.as_deref().unwrap_or(""),
        params.limit()
    );

    let mut analyses = state.analyses.list().await?;
    if let Some(username) = &username {
        analyses.retain(|a| a.profile.username.eq_ignore_ascii_case(username));
    }
    analyses.reverse();
    analyses.truncate(params.limit());

    ok(analyses)
}

/// GET /api/analyses/:id
pub async fn get_analysis(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Analysis> {
    info!("GET /api/analyses/{}", id);

    match state.analyses.get(id).await? {
        Some(analysis) => ok(analysis),
        None => Err(BiasError::not_found("Analysis", id).into()),
    }
}
