/// Export job handlers
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
use crate::api::types::NewExportJob;
use crate::errors::BiasError;
use crate::export::run_export_job;
use crate::models::ExportJob;

/// GET /api/exports
pub async fn list_exports(State(state): State<AppState>) -> ApiResult<Vec<ExportJob>> {
    info!("GET /api/exports");
    ok(state.exports.list().await?)
}

/// Render an analysis and store the job (POST /api/exports)
///
/// The job is stored either way; a missing analysis yields a `failed` job.
pub async fn create_export(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NewExportJob>,
) -> Result<(StatusCode, Json<ApiResponse<ExportJob>>), ApiError> {
    info!(
        "POST /api/exports analysis={} format={:?}",
        request.analysis_id, request.format
    );

    let analysis = state.analyses.get(request.analysis_id).await?;
    let job = run_export_job(
        ExportJob::pending(request.analysis_id, request.format),
        analysis.as_ref(),
    );
    let job = state.exports.create(job).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(job))))
}

/// GET /api/exports/:id
pub async fn get_export(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ExportJob> {
    info!("GET /api/exports/{}", id);

    match state.exports.get(id).await? {
        Some(job) => ok(job),
        None => Err(BiasError::not_found("Export job", id).into()),
    }
}
