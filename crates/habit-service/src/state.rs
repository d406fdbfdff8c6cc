//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::JwtManager;
use crate::coach::{CoachClient, CoachService};
use crate::repository::{HabitRepository, ProfileRepository, ProgressRepository};
use crate::service::{CheckinService, HabitService};

/// Axum 应用共享状态
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL 连接池
    pub pool: PgPool,
    /// JWT 验证器
    pub jwt_manager: JwtManager,
    /// 打卡服务
    pub checkin: Arc<CheckinService>,
    /// 习惯管理服务
    pub habits: Arc<HabitService>,
    /// AI 周报服务
    pub coach: Arc<CoachService<ProfileRepository, HabitRepository, ProgressRepository>>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(pool: PgPool, jwt_manager: JwtManager, coach_client: Option<CoachClient>) -> Self {
        let coach = CoachService::new(
            Arc::new(ProfileRepository::new(pool.clone())),
            Arc::new(HabitRepository::new(pool.clone())),
            Arc::new(ProgressRepository::new(pool.clone())),
            coach_client,
        );

        Self {
            checkin: Arc::new(CheckinService::new(pool.clone())),
            habits: Arc::new(HabitService::new(pool.clone())),
            coach: Arc::new(coach),
            jwt_manager,
            pool,
        }
    }
}
