//! 用户档案仓储
//!
//! 档案行同时是打卡事务的串行化点，事务内一律先 FOR UPDATE 锁行

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::traits::ProfileRepositoryTrait;
use crate::error::Result;
use crate::models::Profile;

/// 用户档案仓储
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 查询操作 ====================

    /// 获取用户档案
    pub async fn get(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, full_name, avatar_url, current_exp, current_level,
                   streak_count, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    // ==================== 写入操作 ====================

    /// 创建用户档案（注册后的初始化）
    pub async fn create(
        &self,
        user_id: Uuid,
        full_name: &str,
        avatar_url: Option<&str>,
    ) -> Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, full_name, avatar_url)
            VALUES ($1, $2, $3)
            RETURNING id, full_name, avatar_url, current_exp, current_level,
                      streak_count, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(full_name)
        .bind(avatar_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    /// 更新档案基本信息
    pub async fn update_info(
        &self,
        user_id: Uuid,
        full_name: &str,
        avatar_url: Option<&str>,
    ) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET full_name = $2, avatar_url = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, full_name, avatar_url, current_exp, current_level,
                      streak_count, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(full_name)
        .bind(avatar_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    // ==================== 事务操作 ====================

    /// 在事务中获取档案（带行级锁）
    ///
    /// 同一用户的并发打卡在这里排队，保证全局 streak 与 EXP
    /// 的读改写序列不会交错。
    pub async fn get_for_update(tx: &mut PgConnection, user_id: Uuid) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, full_name, avatar_url, current_exp, current_level,
                   streak_count, created_at, updated_at
            FROM profiles
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .fetch_optional(tx)
        .await?;

        Ok(profile)
    }

    /// 在事务中写回打卡结算后的 EXP / 等级 / 全局 streak
    pub async fn apply_progress_in_tx(
        tx: &mut PgConnection,
        user_id: Uuid,
        exp: i32,
        level: i32,
        streak: i32,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE profiles
            SET current_exp = $2, current_level = $3, streak_count = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(exp)
        .bind(level)
        .bind(streak)
        .execute(tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ProfileRepositoryTrait for ProfileRepository {
    async fn get(&self, user_id: Uuid) -> Result<Option<Profile>> {
        self.get(user_id).await
    }

    async fn create(
        &self,
        user_id: Uuid,
        full_name: &str,
        avatar_url: Option<String>,
    ) -> Result<Profile> {
        self.create(user_id, full_name, avatar_url.as_deref()).await
    }

    async fn update_info(
        &self,
        user_id: Uuid,
        full_name: &str,
        avatar_url: Option<String>,
    ) -> Result<Option<Profile>> {
        self.update_info(user_id, full_name, avatar_url.as_deref())
            .await
    }
}
