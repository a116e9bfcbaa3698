//! API route definitions

use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create RESTful API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Statistics
        .route("/stats", get(handlers::get_stats))
        // Analysis endpoints
        .route("/analyze", post(handlers::analyze))
        .route("/score", post(handlers::score_profile))
        .route("/analyses", get(handlers::list_analyses))
        .route("/analyses/:id", get(handlers::get_analysis))
        // Competitor endpoints
        .route(
            "/competitors",
            get(handlers::list_competitors).post(handlers::add_competitor),
        )
        .route("/competitors/compare", get(handlers::compare_competitors))
        .route("/competitors/:id", delete(handlers::remove_competitor))
        // Simulated data
        .route("/trends", get(handlers::get_trends))
        .route("/collabs/:username", get(handlers::get_collabs))
        .route("/live/:username", get(handlers::get_live_metrics))
        // Content calendar
        .route(
            "/calendar",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route(
            "/calendar/:id",
            get(handlers::get_post)
                .put(handlers::update_post)
                .delete(handlers::delete_post),
        )
        // Exports
        .route(
            "/exports",
            get(handlers::list_exports).post(handlers::create_export),
        )
        .route("/exports/:id", get(handlers::get_export))
        .with_state(state)
}
