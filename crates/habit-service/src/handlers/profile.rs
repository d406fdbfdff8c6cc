//! 用户档案 API 处理器

use axum::{Json, extract::State, http::StatusCode};
use tracing::info;
use validator::Validate;

use crate::{
    error::HabitError,
    middleware::AuthUser,
    models::Profile,
    repository::ProfileRepository,
    service::dto::{CreateProfileRequest, UpdateProfileRequest},
    state::AppState,
};

/// 获取当前用户档案
///
/// GET /profile
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Profile>, HabitError> {
    let profile = ProfileRepository::new(state.pool.clone())
        .get(user_id)
        .await?
        .ok_or(HabitError::ProfileNotFound)?;

    Ok(Json(profile))
}

/// 创建档案（注册后的初始化）
///
/// POST /profile
pub async fn create_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<Profile>), HabitError> {
    req.validate()?;

    let profile = ProfileRepository::new(state.pool.clone())
        .create(user_id, &req.full_name, req.avatar_url.as_deref())
        .await?;

    info!(user_id = %user_id, "档案已创建");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// 更新档案基本信息
///
/// PUT /profile
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, HabitError> {
    req.validate()?;

    let profile = ProfileRepository::new(state.pool.clone())
        .update_info(user_id, &req.full_name, req.avatar_url.as_deref())
        .await?
        .ok_or(HabitError::ProfileNotFound)?;

    Ok(Json(profile))
}
