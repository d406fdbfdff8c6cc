//! 习惯实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 合法的星期名，frequency 与课程表的 day 字段都取自这里
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub fn is_weekday_name(name: &str) -> bool {
    WEEKDAYS.contains(&name)
}

/// 习惯
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Habit {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
    pub icon_name: String,
    /// 计划打卡的星期名列表，如 ["Monday", "Wednesday"]
    pub frequency: Vec<String>,
    /// 提醒时间，零填充 "HH:mm"，可为空
    pub reminder_time: Option<String>,
    /// 该习惯自身的连续打卡天数
    pub current_streak: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_names() {
        assert!(is_weekday_name("Monday"));
        assert!(is_weekday_name("Sunday"));
        assert!(!is_weekday_name("monday"));
        assert!(!is_weekday_name("Funday"));
    }
}
