//! 周报服务
//!
//! 仓储通过 trait 注入，提示词组装可以脱离数据库单测。

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::instrument;
use uuid::Uuid;

use super::client::CoachClient;
use super::prompt;
use crate::error::{HabitError, Result};
use crate::repository::traits::{
    HabitRepositoryTrait, ProfileRepositoryTrait, ProgressRepositoryTrait,
};

const LOG_WINDOW_DAYS: i64 = 7;

/// 周报服务
pub struct CoachService<PF, HR, PR>
where
    PF: ProfileRepositoryTrait,
    HR: HabitRepositoryTrait,
    PR: ProgressRepositoryTrait,
{
    profiles: Arc<PF>,
    habits: Arc<HR>,
    progress: Arc<PR>,
    /// 未配置 API key 时为 None，请求直接返回 503
    client: Option<CoachClient>,
}

impl<PF, HR, PR> CoachService<PF, HR, PR>
where
    PF: ProfileRepositoryTrait,
    HR: HabitRepositoryTrait,
    PR: ProgressRepositoryTrait,
{
    pub fn new(
        profiles: Arc<PF>,
        habits: Arc<HR>,
        progress: Arc<PR>,
        client: Option<CoachClient>,
    ) -> Self {
        Self {
            profiles,
            habits,
            progress,
            client,
        }
    }

    /// 生成最近 7 天的周报
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn weekly_review(&self, user_id: Uuid) -> Result<String> {
        let client = self.client.as_ref().ok_or(HabitError::CoachUnavailable)?;

        let profile = self
            .profiles
            .get(user_id)
            .await?
            .ok_or(HabitError::ProfileNotFound)?;
        let habits = self.habits.list_for_user(user_id).await?;

        let window_start = Utc::now().date_naive() - Duration::days(LOG_WINDOW_DAYS);
        let logs = self.progress.list_since(user_id, window_start).await?;

        let user_prompt = prompt::build_user_prompt(&profile, &habits, &logs);
        client.chat(prompt::SYSTEM_PROMPT, &user_prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::traits::{
        MockHabitRepositoryTrait, MockProfileRepositoryTrait, MockProgressRepositoryTrait,
    };

    /// 未配置客户端时不应触碰任何仓储，直接 503
    #[tokio::test]
    async fn test_unconfigured_coach_returns_unavailable() {
        let service = CoachService::new(
            Arc::new(MockProfileRepositoryTrait::new()),
            Arc::new(MockHabitRepositoryTrait::new()),
            Arc::new(MockProgressRepositoryTrait::new()),
            None,
        );

        let err = service.weekly_review(Uuid::nil()).await.unwrap_err();
        assert!(matches!(err, HabitError::CoachUnavailable));
    }
}
