/// Content calendar handlers
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
use crate::api::types::NewCalendarPost;
use crate::api::types::UpdateCalendarPost;
use crate::errors::BiasError;
use crate::models::CalendarPost;

/// List posts by scheduled time (GET /api/calendar)
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Vec<CalendarPost>> {
    info!("GET /api/calendar");

    let mut posts = state.calendar.list().await?;
    posts.sort_by_key(|p| p.scheduled_for);
    ok(posts)
}

/// POST /api/calendar
pub async fn create_post(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NewCalendarPost>,
) -> Result<(StatusCode, Json<ApiResponse<CalendarPost>>), ApiError> {
    let post = request.validate()?;
    info!(
        "POST /api/calendar @{} scheduled for {}",
        post.username, post.scheduled_for
    );

    let post = state.calendar.create(post).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(post))))
}

/// GET /api/calendar/:id
pub async fn get_post(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<CalendarPost> {
    info!("GET /api/calendar/{}", id);

    match state.calendar.get(id).await? {
        Some(post) => ok(post),
        None => Err(BiasError::not_found("Calendar post", id).into()),
    }
}

/// PUT /api/calendar/:id
pub async fn update_post(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateCalendarPost>,
) -> ApiResult<CalendarPost> {
    info!("PUT /api/calendar/{}", id);

    let existing = state
        .calendar
        .get(id)
        .await?
        .ok_or_else(|| BiasError::not_found("Calendar post", id))?;
    let updated = request.apply(existing)?;
    ok(state.calendar.update(updated).await?)
}

/// DELETE /api/calendar/:id
pub async fn delete_post(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<CalendarPost> {
    info!("DELETE /api/calendar/{}", id);
    ok(state.calendar.delete(id).await?)
}
