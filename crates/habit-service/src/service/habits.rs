//! 习惯管理服务
//!
//! 创建 / 更新习惯时做字段校验与课程表冲突检测

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{HabitError, Result};
use crate::models::{Habit, is_weekday_name};
use crate::repository::{HabitRepository, ScheduleRepository};
use crate::service::conflict;
use crate::service::dto::{CreateHabitRequest, UpdateHabitRequest};

const DEFAULT_ICON: &str = "📝";

/// 习惯管理服务
pub struct HabitService {
    habits: HabitRepository,
    schedules: ScheduleRepository,
}

impl HabitService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            habits: HabitRepository::new(pool.clone()),
            schedules: ScheduleRepository::new(pool),
        }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Habit>> {
        self.habits.list_for_user(user_id).await
    }

    /// 创建习惯
    ///
    /// 提醒时间落在 frequency 中任一星期的课程区间内则拒绝创建
    #[instrument(skip(self, request), fields(user_id = %user_id))]
    pub async fn create(&self, user_id: Uuid, request: CreateHabitRequest) -> Result<Habit> {
        validator::Validate::validate(&request)?;
        validate_schedule_fields(&request.frequency, request.reminder_time.as_deref())?;

        self.ensure_no_conflict(user_id, &request.frequency, request.reminder_time.as_deref())
            .await?;

        let icon = request.icon_name.as_deref().unwrap_or(DEFAULT_ICON);
        self.habits
            .create(
                user_id,
                &request.name,
                icon,
                &request.frequency,
                request.reminder_time.as_deref(),
            )
            .await
    }

    /// 更新习惯，冲突规则与创建一致
    #[instrument(skip(self, request), fields(user_id = %user_id, habit_id = %habit_id))]
    pub async fn update(
        &self,
        user_id: Uuid,
        habit_id: i64,
        request: UpdateHabitRequest,
    ) -> Result<Habit> {
        validator::Validate::validate(&request)?;
        validate_schedule_fields(&request.frequency, request.reminder_time.as_deref())?;

        self.ensure_no_conflict(user_id, &request.frequency, request.reminder_time.as_deref())
            .await?;

        let icon = request.icon_name.as_deref().unwrap_or(DEFAULT_ICON);
        self.habits
            .update(
                habit_id,
                user_id,
                &request.name,
                icon,
                &request.frequency,
                request.reminder_time.as_deref(),
            )
            .await?
            .ok_or(HabitError::HabitNotFound(habit_id))
    }

    pub async fn delete(&self, user_id: Uuid, habit_id: i64) -> Result<()> {
        if self.habits.delete(habit_id, user_id).await? {
            Ok(())
        } else {
            Err(HabitError::HabitNotFound(habit_id))
        }
    }

    async fn ensure_no_conflict(
        &self,
        user_id: Uuid,
        frequency: &[String],
        reminder_time: Option<&str>,
    ) -> Result<()> {
        let Some(reminder) = reminder_time else {
            return Ok(());
        };
        if frequency.is_empty() {
            return Ok(());
        }

        let schedules = self
            .schedules
            .list_for_days(user_id, frequency)
            .await?;

        if let Some(class) = conflict::find_conflict(reminder, frequency, &schedules) {
            return Err(HabitError::ScheduleConflict {
                subject: class.subject.clone(),
                day: class.day.clone(),
                start_time: class.start_time.clone(),
                end_time: class.end_time.clone(),
            });
        }

        Ok(())
    }
}

fn validate_schedule_fields(frequency: &[String], reminder_time: Option<&str>) -> Result<()> {
    for day in frequency {
        if !is_weekday_name(day) {
            return Err(HabitError::Validation(format!("invalid weekday: {day}")));
        }
    }
    if let Some(time) = reminder_time
        && !conflict::is_valid_time(time)
    {
        return Err(HabitError::Validation(format!(
            "reminder_time must be zero-padded HH:mm, got: {time}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_schedule_fields_accepts_valid() {
        let frequency = vec!["Monday".to_string(), "Friday".to_string()];
        assert!(validate_schedule_fields(&frequency, Some("07:30")).is_ok());
        assert!(validate_schedule_fields(&[], None).is_ok());
    }

    #[test]
    fn test_validate_schedule_fields_rejects_bad_weekday() {
        let frequency = vec!["Mondayy".to_string()];
        let err = validate_schedule_fields(&frequency, None).unwrap_err();
        assert!(matches!(err, HabitError::Validation(_)));
    }

    #[test]
    fn test_validate_schedule_fields_rejects_bad_time() {
        let err = validate_schedule_fields(&[], Some("7:30")).unwrap_err();
        assert!(matches!(err, HabitError::Validation(_)));
    }
}
