//! 打卡 API 处理器

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;

use crate::{
    error::HabitError,
    middleware::AuthUser,
    service::dto::CheckinResponse,
    state::AppState,
};

/// 为某个习惯打今天的卡
///
/// POST /habits/{id}/checkin
pub async fn check_in(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(habit_id): Path<i64>,
) -> Result<Json<CheckinResponse>, HabitError> {
    let summary = state.checkin.check_in(user_id, habit_id).await?;

    info!(
        user_id = %user_id,
        habit_id,
        leveled_up = summary.leveled_up,
        "打卡成功"
    );
    Ok(Json(CheckinResponse::from(summary)))
}
