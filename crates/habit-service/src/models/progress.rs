//! 打卡流水实体

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 一次打卡记录，只增不改
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProgressEntry {
    pub id: i64,
    pub habit_id: i64,
    pub user_id: Uuid,
    /// 打卡归属的自然日（UTC）
    pub completion_date: NaiveDate,
    pub exp_earned: i32,
    pub created_at: DateTime<Utc>,
}
