//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{handlers, state::AppState};

/// 档案路由
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(handlers::profile::get_profile))
        .route("/profile", post(handlers::profile::create_profile))
        .route("/profile", put(handlers::profile::update_profile))
}

/// 习惯与打卡路由
fn habit_routes() -> Router<AppState> {
    Router::new()
        .route("/habits", get(handlers::habit::list_habits))
        .route("/habits", post(handlers::habit::create_habit))
        .route("/habits/badges", get(handlers::habit::list_badges))
        .route("/habits/logs", get(handlers::habit::list_logs))
        .route("/habits/{id}", put(handlers::habit::update_habit))
        .route("/habits/{id}", delete(handlers::habit::delete_habit))
        .route("/habits/{id}/checkin", post(handlers::checkin::check_in))
}

/// 课程表路由
fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/schedule", get(handlers::schedule::list_schedule))
        .route("/schedule", post(handlers::schedule::create_schedule))
        .route("/schedule/{id}", delete(handlers::schedule::delete_schedule))
}

/// AI 教练路由
fn coach_routes() -> Router<AppState> {
    Router::new().route("/ai/weekly-review", get(handlers::coach::weekly_review))
}

/// 全部业务路由
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(profile_routes())
        .merge(habit_routes())
        .merge(schedule_routes())
        .merge(coach_routes())
}
