/// Handlers serving generated data (trend radar, collabs, live metrics)
use tracing::info;

use crate::api::extract::ApiPath;
use crate::api::extract::ApiQuery;
use crate::api::types::ok;
use crate::api::types::ApiResult;
use crate::api::types::TrendsQuery;
use crate::scraper::normalize_username;
use crate::simulation::simulate_collabs;
use crate::simulation::simulate_live_metrics;
use crate::simulation::simulate_trends;
use crate::simulation::CollabSuggestion;
use crate::simulation::LiveMetrics;
use crate::simulation::Simulated;
use crate::simulation::Trend;

/// GET /api/trends
pub async fn get_trends(
    ApiQuery(params): ApiQuery<TrendsQuery>,
) -> ApiResult<Simulated<Vec<Trend>>> {
    let category = params.category()?;
    let limit = params.limit();
    info!("GET /api/trends?category={}&limit={}", category.unwrap_or("all"), limit);

    let trends = simulate_trends(&mut rand::thread_rng(), category, limit);
    ok(Simulated::new(trends))
}

/// GET /api/collabs/:username
pub async fn get_collabs(
    ApiPath(username): ApiPath<String>,
) -> ApiResult<Simulated<Vec<CollabSuggestion>>> {
    let username = normalize_username(&username)?;
    info!("GET /api/collabs/{}", username);

    let suggestions = simulate_collabs(&mut rand::thread_rng(), &username);
    ok(Simulated::new(suggestions))
}

/// GET /api/live/:username
pub async fn get_live_metrics(
    ApiPath(username): ApiPath<String>,
) -> ApiResult<Simulated<LiveMetrics>> {
    let username = normalize_username(&username)?;
    info!("GET /api/live/{}", username);

    ok(Simulated::new(simulate_live_metrics(
        &mut rand::thread_rng(),
        &username,
    )))
}
