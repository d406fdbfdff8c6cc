//! 课程表实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 一节课
///
/// start_time / end_time 为零填充 "HH:mm"，同格式下字典序等价于时间序，
/// 冲突判断直接用字符串比较。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClassSchedule {
    pub id: i64,
    pub user_id: Uuid,
    /// 星期名，如 "Monday"
    pub day: String,
    pub subject: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: DateTime<Utc>,
}
