//! 课程表仓储

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::ScheduleRepositoryTrait;
use crate::error::Result;
use crate::models::ClassSchedule;

const SCHEDULE_COLUMNS: &str = "id, user_id, day, subject, start_time, end_time, created_at";

/// 待插入的一节课
#[derive(Debug, Clone)]
pub struct NewScheduleEntry {
    pub day: String,
    pub subject: String,
    pub start_time: String,
    pub end_time: String,
}

/// 课程表仓储
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 列出用户的全部课程
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ClassSchedule>> {
        let schedules = sqlx::query_as::<_, ClassSchedule>(&format!(
            r#"
            SELECT {SCHEDULE_COLUMNS}
            FROM class_schedules
            WHERE user_id = $1
            ORDER BY day, start_time
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(schedules)
    }

    /// 列出用户在给定星期几的课程，冲突检测用
    pub async fn list_for_days(
        &self,
        user_id: Uuid,
        days: &[String],
    ) -> Result<Vec<ClassSchedule>> {
        let schedules = sqlx::query_as::<_, ClassSchedule>(&format!(
            r#"
            SELECT {SCHEDULE_COLUMNS}
            FROM class_schedules
            WHERE user_id = $1 AND day = ANY($2)
            ORDER BY day, start_time
            "#
        ))
        .bind(user_id)
        .bind(days)
        .fetch_all(&self.pool)
        .await?;

        Ok(schedules)
    }

    /// 批量插入课程，返回插入后的完整记录
    pub async fn insert_many(
        &self,
        user_id: Uuid,
        entries: &[NewScheduleEntry],
    ) -> Result<Vec<ClassSchedule>> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(entries.len());

        for entry in entries {
            let schedule = sqlx::query_as::<_, ClassSchedule>(&format!(
                r#"
                INSERT INTO class_schedules (user_id, day, subject, start_time, end_time)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {SCHEDULE_COLUMNS}
                "#
            ))
            .bind(user_id)
            .bind(&entry.day)
            .bind(&entry.subject)
            .bind(&entry.start_time)
            .bind(&entry.end_time)
            .fetch_one(&mut *tx)
            .await?;

            inserted.push(schedule);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// 删除一节课，返回是否确有删除
    pub async fn delete(&self, schedule_id: i64, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM class_schedules WHERE id = $1 AND user_id = $2")
            .bind(schedule_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ScheduleRepositoryTrait for ScheduleRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ClassSchedule>> {
        self.list_for_user(user_id).await
    }

    async fn list_for_days(&self, user_id: Uuid, days: &[String]) -> Result<Vec<ClassSchedule>> {
        self.list_for_days(user_id, days).await
    }
}
