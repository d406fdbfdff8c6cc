//! 习惯仓储
//!
//! 所有查询都带 user_id 过滤，习惯只对其所有者可见

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::traits::HabitRepositoryTrait;
use crate::error::Result;
use crate::models::Habit;

const HABIT_COLUMNS: &str = "id, user_id, name, icon_name, frequency, reminder_time, \
                             current_streak, created_at, updated_at";

/// 习惯仓储
pub struct HabitRepository {
    pool: PgPool,
}

impl HabitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 查询操作 ====================

    /// 列出用户的所有习惯
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Habit>> {
        let habits = sqlx::query_as::<_, Habit>(&format!(
            "SELECT {HABIT_COLUMNS} FROM habits WHERE user_id = $1 ORDER BY created_at"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(habits)
    }

    /// 获取用户的某个习惯
    pub async fn get(&self, habit_id: i64, user_id: Uuid) -> Result<Option<Habit>> {
        let habit = sqlx::query_as::<_, Habit>(&format!(
            "SELECT {HABIT_COLUMNS} FROM habits WHERE id = $1 AND user_id = $2"
        ))
        .bind(habit_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(habit)
    }

    // ==================== 写入操作 ====================

    /// 创建习惯
    pub async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        icon_name: &str,
        frequency: &[String],
        reminder_time: Option<&str>,
    ) -> Result<Habit> {
        let habit = sqlx::query_as::<_, Habit>(&format!(
            r#"
            INSERT INTO habits (user_id, name, icon_name, frequency, reminder_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {HABIT_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(name)
        .bind(icon_name)
        .bind(frequency)
        .bind(reminder_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(habit)
    }

    /// 更新习惯
    pub async fn update(
        &self,
        habit_id: i64,
        user_id: Uuid,
        name: &str,
        icon_name: &str,
        frequency: &[String],
        reminder_time: Option<&str>,
    ) -> Result<Option<Habit>> {
        let habit = sqlx::query_as::<_, Habit>(&format!(
            r#"
            UPDATE habits
            SET name = $3, icon_name = $4, frequency = $5, reminder_time = $6, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {HABIT_COLUMNS}
            "#
        ))
        .bind(habit_id)
        .bind(user_id)
        .bind(name)
        .bind(icon_name)
        .bind(frequency)
        .bind(reminder_time)
        .fetch_optional(&self.pool)
        .await?;

        Ok(habit)
    }

    /// 删除习惯，返回是否确有删除
    ///
    /// 打卡流水随外键级联删除
    pub async fn delete(&self, habit_id: i64, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM habits WHERE id = $1 AND user_id = $2")
            .bind(habit_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ==================== 事务操作 ====================

    /// 在事务中获取习惯（带行级锁）
    pub async fn get_for_update(
        tx: &mut PgConnection,
        habit_id: i64,
        user_id: Uuid,
    ) -> Result<Option<Habit>> {
        let habit = sqlx::query_as::<_, Habit>(&format!(
            "SELECT {HABIT_COLUMNS} FROM habits WHERE id = $1 AND user_id = $2 FOR UPDATE"
        ))
        .bind(habit_id)
        .bind(user_id)
        .fetch_optional(tx)
        .await?;

        Ok(habit)
    }

    /// 在事务中写回习惯 streak
    pub async fn update_streak_in_tx(
        tx: &mut PgConnection,
        habit_id: i64,
        streak: i32,
    ) -> Result<()> {
        sqlx::query("UPDATE habits SET current_streak = $2, updated_at = NOW() WHERE id = $1")
            .bind(habit_id)
            .bind(streak)
            .execute(tx)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl HabitRepositoryTrait for HabitRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Habit>> {
        self.list_for_user(user_id).await
    }

    async fn get(&self, habit_id: i64, user_id: Uuid) -> Result<Option<Habit>> {
        self.get(habit_id, user_id).await
    }
}
