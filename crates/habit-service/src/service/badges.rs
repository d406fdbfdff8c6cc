//! 徽章授予规则
//!
//! 规则以声明式表格维护：每条规则是 (判定函数, 徽章名)。
//! 判定只看结算后的最终状态，新增徽章只需加一个判定函数和一行表项。

use crate::models::BadgeName;

/// 打卡结算完成后的用户状态快照，徽章判定的唯一输入
#[derive(Debug, Clone, Copy)]
pub struct BadgeContext {
    /// 含本次在内的历史流水总数
    pub total_entries: i64,
    /// 结算后的全局 streak
    pub global_streak: i32,
    /// 结算后的等级
    pub level: i32,
}

type Predicate = fn(&BadgeContext) -> bool;

fn is_first_entry(ctx: &BadgeContext) -> bool {
    ctx.total_entries == 1
}

fn reached_week_streak(ctx: &BadgeContext) -> bool {
    ctx.global_streak == 7
}

fn reached_month_streak(ctx: &BadgeContext) -> bool {
    ctx.global_streak == 30
}

fn reached_level_5(ctx: &BadgeContext) -> bool {
    ctx.level == 5
}

fn reached_level_10(ctx: &BadgeContext) -> bool {
    ctx.level == 10
}

/// 规则表
const RULES: &[(Predicate, BadgeName)] = &[
    (is_first_entry, BadgeName::FirstHabit),
    (reached_week_streak, BadgeName::WeekStreak),
    (reached_month_streak, BadgeName::MonthStreak),
    (reached_level_5, BadgeName::Level5),
    (reached_level_10, BadgeName::Level10),
];

/// 本次打卡后符合条件的徽章
///
/// 只做判定，不管用户是否已持有；幂等由存储层唯一约束保证。
pub fn eligible(ctx: &BadgeContext) -> Vec<BadgeName> {
    RULES
        .iter()
        .filter(|(predicate, _)| predicate(ctx))
        .map(|(_, badge)| *badge)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(total_entries: i64, global_streak: i32, level: i32) -> BadgeContext {
        BadgeContext {
            total_entries,
            global_streak,
            level,
        }
    }

    #[test]
    fn test_first_entry_awards_first_habit() {
        assert_eq!(eligible(&ctx(1, 1, 1)), vec![BadgeName::FirstHabit]);
    }

    #[test]
    fn test_second_entry_no_first_habit() {
        assert!(eligible(&ctx(2, 2, 1)).is_empty());
    }

    /// streak 正好等于 7 才授予周徽章，8 天不补发
    #[test]
    fn test_week_streak_exact_match_only() {
        assert_eq!(eligible(&ctx(10, 7, 1)), vec![BadgeName::WeekStreak]);
        assert!(eligible(&ctx(11, 8, 1)).is_empty());
        assert!(eligible(&ctx(9, 6, 1)).is_empty());
    }

    #[test]
    fn test_month_streak() {
        assert_eq!(eligible(&ctx(40, 30, 4)), vec![BadgeName::MonthStreak]);
    }

    #[test]
    fn test_level_badges() {
        assert_eq!(eligible(&ctx(50, 3, 5)), vec![BadgeName::Level5]);
        assert_eq!(eligible(&ctx(120, 3, 10)), vec![BadgeName::Level10]);
        assert!(eligible(&ctx(60, 3, 6)).is_empty());
    }

    /// 同一次打卡可以同时满足多条规则
    #[test]
    fn test_multiple_badges_same_checkin() {
        let badges = eligible(&ctx(7, 7, 1));
        assert_eq!(badges, vec![BadgeName::WeekStreak]);

        let badges = eligible(&ctx(50, 7, 5));
        assert_eq!(badges, vec![BadgeName::WeekStreak, BadgeName::Level5]);
    }
}
