//! 徽章枚举与已授予记录

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 徽章名称
///
/// 以 snake_case 字符串落库（VARCHAR 列），新增徽章只需扩展此枚举
/// 并在规则表中登记判定条件。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
pub enum BadgeName {
    /// 首次打卡
    FirstHabit,
    /// 全局连续 7 天
    WeekStreak,
    /// 全局连续 30 天
    MonthStreak,
    /// 达到 5 级
    ///
    /// rename_all 会把数字后缀渲染成 "level5"，落库名是 "level_5"，显式指定
    #[serde(rename = "level_5")]
    #[sqlx(rename = "level_5")]
    Level5,
    /// 达到 10 级
    #[serde(rename = "level_10")]
    #[sqlx(rename = "level_10")]
    Level10,
}

impl BadgeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeName::FirstHabit => "first_habit",
            BadgeName::WeekStreak => "week_streak",
            BadgeName::MonthStreak => "month_streak",
            BadgeName::Level5 => "level_5",
            BadgeName::Level10 => "level_10",
        }
    }
}

impl std::fmt::Display for BadgeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 用户已获得的徽章
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AwardedBadge {
    pub id: i64,
    pub user_id: Uuid,
    pub badge_name: BadgeName,
    pub earned_at: DateTime<Utc>,
}
