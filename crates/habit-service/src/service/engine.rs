//! 打卡结算引擎
//!
//! 纯函数：EXP、等级与 streak 的全部算术都集中在这里，
//! 不触碰数据库，事务编排只负责喂入读出的状态。

/// 每次打卡奖励的 EXP
pub const CHECKIN_EXP_REWARD: i32 = 10;

/// 每级所需 EXP
pub const EXP_PER_LEVEL: i32 = 100;

/// 由累计 EXP 推导等级
///
/// 0..=99 为 1 级，100..=199 为 2 级，依此类推。
pub fn level_for_exp(exp: i32) -> i32 {
    exp / EXP_PER_LEVEL + 1
}

/// 习惯自身 streak 的下一个值
///
/// 昨天有该习惯的流水则延续，否则从 1 重新起算。
pub fn next_habit_streak(prior: i32, completed_yesterday: bool) -> i32 {
    if completed_yesterday { prior + 1 } else { 1 }
}

/// 打卡结算后的档案状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileProgress {
    pub exp: i32,
    pub level: i32,
    pub streak: i32,
    pub leveled_up: bool,
}

/// 结算一次打卡对档案的影响
///
/// 全局 streak 只在「这是当天第一条流水」时变动：昨天打过卡则 +1，
/// 否则归 1。当天第二条及以后的打卡只累加 EXP。
pub fn advance_profile(
    current_exp: i32,
    current_level: i32,
    current_streak: i32,
    first_entry_today: bool,
    any_entry_yesterday: bool,
) -> ProfileProgress {
    let exp = current_exp + CHECKIN_EXP_REWARD;
    let level = level_for_exp(exp);

    let streak = if first_entry_today {
        if any_entry_yesterday {
            current_streak + 1
        } else {
            1
        }
    } else {
        current_streak
    };

    ProfileProgress {
        exp,
        level,
        streak,
        leveled_up: level > current_level,
    }
}
