//! 习惯 API 处理器
//!
//! 习惯 CRUD、徽章墙与打卡日志查询

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::{
    error::HabitError,
    middleware::AuthUser,
    models::{AwardedBadge, Habit, ProgressEntry},
    repository::{BadgeRepository, ProgressRepository},
    service::dto::{CreateHabitRequest, UpdateHabitRequest},
    state::AppState,
};

/// 列出当前用户的习惯
///
/// GET /habits
pub async fn list_habits(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Habit>>, HabitError> {
    let habits = state.habits.list(user_id).await?;
    Ok(Json(habits))
}

/// 创建习惯，提醒时间与课程冲突时返回 409
///
/// POST /habits
pub async fn create_habit(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<Habit>), HabitError> {
    let habit = state.habits.create(user_id, req).await?;

    info!(user_id = %user_id, habit_id = habit.id, "习惯已创建");
    Ok((StatusCode::CREATED, Json(habit)))
}

/// 更新习惯
///
/// PUT /habits/{id}
pub async fn update_habit(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(habit_id): Path<i64>,
    Json(req): Json<UpdateHabitRequest>,
) -> Result<Json<Habit>, HabitError> {
    let habit = state.habits.update(user_id, habit_id, req).await?;
    Ok(Json(habit))
}

/// 删除习惯
///
/// DELETE /habits/{id}
pub async fn delete_habit(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(habit_id): Path<i64>,
) -> Result<StatusCode, HabitError> {
    state.habits.delete(user_id, habit_id).await?;

    info!(user_id = %user_id, habit_id, "习惯已删除");
    Ok(StatusCode::NO_CONTENT)
}

/// 用户已获得的徽章
///
/// GET /habits/badges
pub async fn list_badges(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<AwardedBadge>>, HabitError> {
    let badges = BadgeRepository::new(state.pool.clone())
        .list_for_user(user_id)
        .await?;

    Ok(Json(badges))
}

/// 最近一年的打卡流水，日历视图用
///
/// GET /habits/logs
pub async fn list_logs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ProgressEntry>>, HabitError> {
    let one_year_ago = chrono::Utc::now().date_naive() - chrono::Duration::days(365);
    let logs = ProgressRepository::new(state.pool.clone())
        .list_since(user_id, one_year_ago)
        .await?;

    Ok(Json(logs))
}
