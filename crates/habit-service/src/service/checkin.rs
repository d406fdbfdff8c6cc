//! 打卡服务
//!
//! 一次打卡的完整流程：
//! 1. 锁定档案行（同一用户的并发打卡在此排队）
//! 2. 锁定习惯行并校验归属
//! 3. 查重，今天已打过直接返回 AlreadyCheckedIn
//! 4. 追加流水（唯一约束兜底并发写入）
//! 5. 结算习惯 streak、全局 streak、EXP 与等级
//! 6. 评估并授予徽章
//! 7. 提交事务，返回结算摘要
//!
//! 步骤 1-7 在单个事务内完成，失败则整体回滚，不存在半成品状态。

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{HabitError, Result};
use crate::repository::{BadgeRepository, HabitRepository, ProfileRepository, ProgressRepository};
use crate::service::badges::{self, BadgeContext};
use crate::service::dto::CheckinSummary;
use crate::service::engine::{self, CHECKIN_EXP_REWARD};

/// 打卡服务
pub struct CheckinService {
    pool: PgPool,
}

impl CheckinService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 以当前 UTC 日期打卡
    pub async fn check_in(&self, user_id: Uuid, habit_id: i64) -> Result<CheckinSummary> {
        let today = Utc::now().date_naive();
        self.check_in_as_of(user_id, habit_id, today).await
    }

    /// 以指定日期打卡
    ///
    /// 日期由调用方一次性确定并贯穿整个事务，跨午夜的请求
    /// 不会出现前后步骤日期不一致。
    #[instrument(skip(self), fields(user_id = %user_id, habit_id = %habit_id, date = %today))]
    pub async fn check_in_as_of(
        &self,
        user_id: Uuid,
        habit_id: i64,
        today: NaiveDate,
    ) -> Result<CheckinSummary> {
        let yesterday = today
            .pred_opt()
            .ok_or_else(|| HabitError::Internal(format!("no day before {today}")))?;

        let mut tx = self.pool.begin().await?;

        // 档案行锁是该用户所有打卡的串行化点
        let profile = ProfileRepository::get_for_update(&mut tx, user_id)
            .await?
            .ok_or(HabitError::ProfileNotFound)?;

        let habit = HabitRepository::get_for_update(&mut tx, habit_id, user_id)
            .await?
            .ok_or(HabitError::HabitNotFound(habit_id))?;

        if ProgressRepository::has_entry_in_tx(&mut tx, habit_id, today).await? {
            return Err(HabitError::AlreadyCheckedIn);
        }

        // 唯一约束是查重之外的最终兜底
        if let Err(err) =
            ProgressRepository::append_in_tx(&mut tx, habit_id, user_id, today, CHECKIN_EXP_REWARD)
                .await
        {
            return Err(match err {
                HabitError::Database(db_err) if is_unique_violation(&db_err) => {
                    HabitError::AlreadyCheckedIn
                }
                other => other,
            });
        }

        // 习惯自身的 streak
        let habit_done_yesterday =
            ProgressRepository::has_entry_in_tx(&mut tx, habit_id, yesterday).await?;
        let habit_streak = engine::next_habit_streak(habit.current_streak, habit_done_yesterday);
        HabitRepository::update_streak_in_tx(&mut tx, habit_id, habit_streak).await?;

        // 全局 streak 只在当天第一条流水时变动
        let today_count =
            ProgressRepository::count_for_user_on_date_in_tx(&mut tx, user_id, today).await?;
        let any_yesterday =
            ProgressRepository::user_has_entry_on_date_in_tx(&mut tx, user_id, yesterday).await?;

        let progress = engine::advance_profile(
            profile.current_exp,
            profile.current_level,
            profile.streak_count,
            today_count == 1,
            any_yesterday,
        );
        ProfileRepository::apply_progress_in_tx(
            &mut tx,
            user_id,
            progress.exp,
            progress.level,
            progress.streak,
        )
        .await?;

        // 徽章评估看结算后的最终状态
        let total_entries = ProgressRepository::count_total_in_tx(&mut tx, user_id).await?;
        let ctx = BadgeContext {
            total_entries,
            global_streak: progress.streak,
            level: progress.level,
        };

        let mut new_badges = Vec::new();
        for badge in badges::eligible(&ctx) {
            if let Some(awarded) = BadgeRepository::award_in_tx(&mut tx, user_id, badge).await? {
                new_badges.push(awarded);
            }
        }

        tx.commit().await?;

        info!(
            exp = progress.exp,
            level = progress.level,
            streak = progress.streak,
            habit_streak,
            new_badges = new_badges.len(),
            "打卡结算完成"
        );

        Ok(CheckinSummary {
            exp_gained: CHECKIN_EXP_REWARD,
            leveled_up: progress.leveled_up,
            new_level: progress.level,
            new_badges,
            habit_streak,
        })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}
