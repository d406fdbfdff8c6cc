//! 打卡流水仓储
//!
//! 流水只追加不修改。事务方法与档案行锁配合使用，
//! 唯一约束 uq_progress_habit_date 是重复写入的最终兜底。

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

use super::traits::ProgressRepositoryTrait;
use crate::error::Result;
use crate::models::ProgressEntry;

const PROGRESS_COLUMNS: &str = "id, habit_id, user_id, completion_date, exp_earned, created_at";

/// 打卡流水仓储
pub struct ProgressRepository {
    pool: PgPool,
}

impl ProgressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 查询操作 ====================

    /// 列出用户自某日（含）以来的全部流水，时间倒序
    pub async fn list_since(&self, user_id: Uuid, from: NaiveDate) -> Result<Vec<ProgressEntry>> {
        let entries = sqlx::query_as::<_, ProgressEntry>(&format!(
            r#"
            SELECT {PROGRESS_COLUMNS}
            FROM progress
            WHERE user_id = $1 AND completion_date >= $2
            ORDER BY completion_date DESC, id DESC
            "#
        ))
        .bind(user_id)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    // ==================== 事务操作 ====================

    /// 某习惯在指定日期是否已有流水
    pub async fn has_entry_in_tx(
        tx: &mut PgConnection,
        habit_id: i64,
        date: NaiveDate,
    ) -> Result<bool> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM progress WHERE habit_id = $1 AND completion_date = $2)",
        )
        .bind(habit_id)
        .bind(date)
        .fetch_one(tx)
        .await?;

        Ok(row.get::<bool, _>(0))
    }

    /// 用户在指定日期是否打过任意习惯的卡
    pub async fn user_has_entry_on_date_in_tx(
        tx: &mut PgConnection,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<bool> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM progress WHERE user_id = $1 AND completion_date = $2)",
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(tx)
        .await?;

        Ok(row.get::<bool, _>(0))
    }

    /// 用户在指定日期的流水条数
    pub async fn count_for_user_on_date_in_tx(
        tx: &mut PgConnection,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) FROM progress WHERE user_id = $1 AND completion_date = $2",
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(tx)
        .await?;

        Ok(row.get::<i64, _>(0))
    }

    /// 用户历史流水总条数
    pub async fn count_total_in_tx(tx: &mut PgConnection, user_id: Uuid) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) FROM progress WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(tx)
            .await?;

        Ok(row.get::<i64, _>(0))
    }

    /// 在事务中追加一条流水
    ///
    /// 撞上唯一约束时原样返回 sqlx 错误，由调用方翻译成重复打卡
    pub async fn append_in_tx(
        tx: &mut PgConnection,
        habit_id: i64,
        user_id: Uuid,
        date: NaiveDate,
        exp_earned: i32,
    ) -> Result<ProgressEntry> {
        let entry = sqlx::query_as::<_, ProgressEntry>(&format!(
            r#"
            INSERT INTO progress (habit_id, user_id, completion_date, exp_earned)
            VALUES ($1, $2, $3, $4)
            RETURNING {PROGRESS_COLUMNS}
            "#
        ))
        .bind(habit_id)
        .bind(user_id)
        .bind(date)
        .bind(exp_earned)
        .fetch_one(tx)
        .await?;

        Ok(entry)
    }
}

#[async_trait]
impl ProgressRepositoryTrait for ProgressRepository {
    async fn list_since(&self, user_id: Uuid, from: NaiveDate) -> Result<Vec<ProgressEntry>> {
        self.list_since(user_id, from).await
    }
}
