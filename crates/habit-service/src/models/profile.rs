//! 用户档案实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 用户档案
///
/// 每个用户一行。EXP / 等级 / 全局连续天数只由打卡流程修改。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    /// 用户 ID，与外部身份提供方的 subject 一致
    pub id: Uuid,
    pub full_name: String,
    #[sqlx(default)]
    pub avatar_url: Option<String>,
    /// 累计经验值，单调不减
    pub current_exp: i32,
    /// 当前等级，由 EXP 推导（每 100 EXP 一级）
    pub current_level: i32,
    /// 全局连续打卡天数
    pub streak_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_serializes_expected_fields() {
        let profile = Profile {
            id: Uuid::nil(),
            full_name: "Ana".to_string(),
            avatar_url: None,
            current_exp: 95,
            current_level: 1,
            streak_count: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["current_exp"], 95);
        assert_eq!(json["streak_count"], 3);
    }
}
