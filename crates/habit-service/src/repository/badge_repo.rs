//! 徽章仓储
//!
//! 授予走 ON CONFLICT DO NOTHING，(user_id, badge_name) 唯一约束
//! 使重复授予天然幂等。

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::traits::BadgeRepositoryTrait;
use crate::error::Result;
use crate::models::{AwardedBadge, BadgeName};

/// 徽章仓储
pub struct BadgeRepository {
    pool: PgPool,
}

impl BadgeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 列出用户已获得的徽章，按获得时间倒序
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<AwardedBadge>> {
        let badges = sqlx::query_as::<_, AwardedBadge>(
            r#"
            SELECT id, user_id, badge_name, earned_at
            FROM user_badges
            WHERE user_id = $1
            ORDER BY earned_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(badges)
    }

    // ==================== 事务操作 ====================

    /// 在事务中授予徽章
    ///
    /// 返回 Some 表示本次新授予，None 表示用户早已持有
    pub async fn award_in_tx(
        tx: &mut PgConnection,
        user_id: Uuid,
        badge: BadgeName,
    ) -> Result<Option<BadgeName>> {
        let awarded = sqlx::query_scalar::<_, BadgeName>(
            r#"
            INSERT INTO user_badges (user_id, badge_name)
            VALUES ($1, $2)
            ON CONFLICT (user_id, badge_name) DO NOTHING
            RETURNING badge_name
            "#,
        )
        .bind(user_id)
        .bind(badge)
        .fetch_optional(tx)
        .await?;

        Ok(awarded)
    }
}

#[async_trait]
impl BadgeRepositoryTrait for BadgeRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<AwardedBadge>> {
        self.list_for_user(user_id).await
    }
}
