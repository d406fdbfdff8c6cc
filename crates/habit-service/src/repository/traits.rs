//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试。
//! 事务内的 `*_in_tx` 静态方法不在此列，它们绑定具体连接。

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{AwardedBadge, ClassSchedule, Habit, Profile, ProgressEntry};

/// 用户档案仓储接口
///
/// avatar_url 按值传 Option<String>，automock 不接受省略生命周期的 Option<&str>
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepositoryTrait: Send + Sync {
    async fn get(&self, user_id: Uuid) -> Result<Option<Profile>>;
    async fn create(
        &self,
        user_id: Uuid,
        full_name: &str,
        avatar_url: Option<String>,
    ) -> Result<Profile>;
    async fn update_info(
        &self,
        user_id: Uuid,
        full_name: &str,
        avatar_url: Option<String>,
    ) -> Result<Option<Profile>>;
}

/// 习惯仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitRepositoryTrait: Send + Sync {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Habit>>;
    async fn get(&self, habit_id: i64, user_id: Uuid) -> Result<Option<Habit>>;
}

/// 打卡流水仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressRepositoryTrait: Send + Sync {
    async fn list_since(&self, user_id: Uuid, from: NaiveDate) -> Result<Vec<ProgressEntry>>;
}

/// 徽章仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BadgeRepositoryTrait: Send + Sync {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<AwardedBadge>>;
}

/// 课程表仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleRepositoryTrait: Send + Sync {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ClassSchedule>>;
    async fn list_for_days(&self, user_id: Uuid, days: &[String]) -> Result<Vec<ClassSchedule>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile(user_id: Uuid, full_name: &str, avatar_url: Option<String>) -> Profile {
        Profile {
            id: user_id,
            full_name: full_name.to_string(),
            avatar_url,
            current_exp: 0,
            current_level: 1,
            streak_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// 档案写接口可整体 mock，头像参数按值传入传出
    #[tokio::test]
    async fn test_mock_profile_repository_write_ops() {
        let mut repo = MockProfileRepositoryTrait::new();
        repo.expect_create()
            .withf(|_, name, avatar| {
                name == "Kai" && avatar.as_deref() == Some("https://cdn.example/kai.png")
            })
            .returning(|user_id, name, avatar| Ok(profile(user_id, name, avatar)));
        repo.expect_update_info()
            .returning(|user_id, name, avatar| Ok(Some(profile(user_id, name, avatar))));

        let created = repo
            .create(
                Uuid::nil(),
                "Kai",
                Some("https://cdn.example/kai.png".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(
            created.avatar_url.as_deref(),
            Some("https://cdn.example/kai.png")
        );

        let updated = repo
            .update_info(Uuid::nil(), "Kai", None)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.avatar_url.is_none());
    }
}
