//! 课程表 API 处理器

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::{
    error::HabitError,
    middleware::AuthUser,
    models::{ClassSchedule, is_weekday_name},
    repository::{NewScheduleEntry, ScheduleRepository},
    service::conflict,
    service::dto::CreateScheduleRequest,
    state::AppState,
};

/// 列出当前用户的课程表
///
/// GET /schedule
pub async fn list_schedule(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ClassSchedule>>, HabitError> {
    let schedules = ScheduleRepository::new(state.pool.clone())
        .list_for_user(user_id)
        .await?;

    Ok(Json(schedules))
}

/// 批量创建课程，客户端一次提交整周
///
/// POST /schedule
pub async fn create_schedule(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<Vec<ClassSchedule>>), HabitError> {
    if req.schedules.is_empty() {
        return Err(HabitError::Validation("schedules must not be empty".into()));
    }

    let mut entries = Vec::with_capacity(req.schedules.len());
    for item in &req.schedules {
        item.validate()?;
        if !is_weekday_name(&item.day) {
            return Err(HabitError::Validation(format!(
                "invalid weekday: {}",
                item.day
            )));
        }
        if !conflict::is_valid_time(&item.start_time) || !conflict::is_valid_time(&item.end_time) {
            return Err(HabitError::Validation(
                "start_time and end_time must be zero-padded HH:mm".into(),
            ));
        }
        if item.start_time >= item.end_time {
            return Err(HabitError::Validation(
                "start_time must be before end_time".into(),
            ));
        }

        entries.push(NewScheduleEntry {
            day: item.day.clone(),
            subject: item.subject.clone(),
            start_time: item.start_time.clone(),
            end_time: item.end_time.clone(),
        });
    }

    let inserted = ScheduleRepository::new(state.pool.clone())
        .insert_many(user_id, &entries)
        .await?;

    info!(user_id = %user_id, count = inserted.len(), "课程已创建");
    Ok((StatusCode::CREATED, Json(inserted)))
}

/// 删除一节课
///
/// DELETE /schedule/{id}
pub async fn delete_schedule(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(schedule_id): Path<i64>,
) -> Result<Json<serde_json::Value>, HabitError> {
    let deleted = ScheduleRepository::new(state.pool.clone())
        .delete(schedule_id, user_id)
        .await?;

    if !deleted {
        return Err(HabitError::ScheduleNotFound(schedule_id));
    }

    Ok(Json(json!({ "message": "Deleted" })))
}
