//! 周报提示词组装

use std::collections::HashMap;

use serde_json::json;

use crate::models::{Habit, Profile, ProgressEntry};

pub const SYSTEM_PROMPT: &str = "You are \"Strive AI\", a high-energy, empathetic motivational \
                                 habit coach. Your goal is to help users build consistency.";

/// 组装用户提示词
///
/// 流水里的 habit_id 翻译成习惯名，模型只看人类可读的数据。
pub fn build_user_prompt(profile: &Profile, habits: &[Habit], logs: &[ProgressEntry]) -> String {
    let habit_names: HashMap<i64, &str> = habits
        .iter()
        .map(|habit| (habit.id, habit.name.as_str()))
        .collect();

    let habit_summary = json!(
        habits
            .iter()
            .map(|habit| {
                json!({
                    "name": habit.name,
                    "frequency": habit.frequency,
                    "current_streak": habit.current_streak,
                })
            })
            .collect::<Vec<_>>()
    );

    let readable_logs = json!(
        logs.iter()
            .map(|entry| {
                json!({
                    "habit_name": habit_names
                        .get(&entry.habit_id)
                        .copied()
                        .unwrap_or("Unknown Habit"),
                    "date": entry.completion_date,
                })
            })
            .collect::<Vec<_>>()
    );

    format!(
        "USER PROFILE:\n\
         - Name: {name} (Level {level})\n\
         - Global streak: {streak} days\n\
         \n\
         CURRENT HABITS:\n\
         {habit_summary}\n\
         \n\
         ACTIVITY LOG (Last 7 Days):\n\
         {readable_logs}\n\
         \n\
         TASK:\n\
         1. Analyze their performance based on the logs.\n\
         2. Give a short, energetic summary.\n\
         3. Provide 1 specific actionable tip.\n\
         4. Use emojis. Be friendly but disciplined. Keep it concise.",
        name = profile.full_name,
        level = profile.current_level,
        streak = profile.streak_count,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn profile() -> Profile {
        Profile {
            id: Uuid::nil(),
            full_name: "Ana".to_string(),
            avatar_url: None,
            current_exp: 120,
            current_level: 2,
            streak_count: 5,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn habit(id: i64, name: &str) -> Habit {
        Habit {
            id,
            user_id: Uuid::nil(),
            name: name.to_string(),
            icon_name: "📝".to_string(),
            frequency: vec!["Monday".to_string()],
            reminder_time: None,
            current_streak: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn entry(habit_id: i64, date: NaiveDate) -> ProgressEntry {
        ProgressEntry {
            id: 1,
            habit_id,
            user_id: Uuid::nil(),
            completion_date: date,
            exp_earned: 10,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_prompt_contains_profile_and_habit_names() {
        let habits = vec![habit(1, "Read"), habit(2, "Run")];
        let logs = vec![entry(1, NaiveDate::from_ymd_opt(2026, 8, 20).unwrap())];

        let prompt = build_user_prompt(&profile(), &habits, &logs);
        assert!(prompt.contains("Ana"));
        assert!(prompt.contains("Level 2"));
        assert!(prompt.contains("Read"));
        assert!(prompt.contains("2026-08-20"));
    }

    /// 流水引用了已删除的习惯时退化为占位名，不 panic
    #[test]
    fn test_unknown_habit_id_falls_back() {
        let logs = vec![entry(999, NaiveDate::from_ymd_opt(2026, 8, 21).unwrap())];
        let prompt = build_user_prompt(&profile(), &[], &logs);
        assert!(prompt.contains("Unknown Habit"));
    }
}
