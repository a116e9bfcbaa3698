//! HTTP server implementation

use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::config::AppConfig;
use crate::Result;

/// Full application router: `/api` routes plus middleware layers
pub fn build_app(state: AppState, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .nest("/api", routes::api_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        );

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Start the API server
pub async fn serve_api(config: &AppConfig, host: String, port: u16, enable_cors: bool) -> Result<()> {
    info!("🚀 Starting BIAS API server...");

    let state = AppState::from_config(config)?;
    if state.insights.llm_enabled() {
        info!("🤖 AI insights enabled (provider: {})", config.llm.provider);
    } else {
        info!("💡 No LLM API key - insights use built-in templates");
    }
    if enable_cors {
        info!("✅ CORS enabled");
    }

    let app = build_app(state, enable_cors);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("");
    info!("Available endpoints:");
    info!("  GET  /api/health                 - Health check");
    info!("  GET  /api/stats                  - Statistics");
    info!("  POST /api/analyze                - Scrape and score a profile");
    info!("  POST /api/score                  - Score a supplied profile");
    info!("  GET  /api/analyses[/:id]         - Stored analyses");
    info!("  *    /api/competitors[/:id]      - Competitor tracking");
    info!("  GET  /api/competitors/compare    - Competitor comparison");
    info!("  GET  /api/trends                 - Trend radar (simulated)");
    info!("  GET  /api/collabs/:username      - Collab finder (simulated)");
    info!("  GET  /api/live/:username         - Live metrics (simulated)");
    info!("  *    /api/calendar[/:id]         - Content calendar");
    info!("  *    /api/exports[/:id]          - Export jobs");

    axum::serve(listener, app).await?;

    Ok(())
}
