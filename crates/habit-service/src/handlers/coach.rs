//! AI 周报 API 处理器

use axum::{Json, extract::State};

use crate::{
    error::HabitError,
    middleware::AuthUser,
    service::dto::WeeklyReviewResponse,
    state::AppState,
};

/// 生成最近 7 天的 AI 周报
///
/// GET /ai/weekly-review
pub async fn weekly_review(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<WeeklyReviewResponse>, HabitError> {
    let insight = state.coach.weekly_review(user_id).await?;
    Ok(Json(WeeklyReviewResponse { insight }))
}
