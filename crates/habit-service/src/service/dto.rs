//! 服务层请求 / 响应 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::BadgeName;

// ==================== 档案 ====================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "full_name must be 1-100 characters"))]
    pub full_name: String,
    #[validate(length(max = 500))]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "full_name must be 1-100 characters"))]
    pub full_name: String,
    #[validate(length(max = 500))]
    pub avatar_url: Option<String>,
}

// ==================== 习惯 ====================

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHabitRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    /// 省略时用默认图标
    pub icon_name: Option<String>,
    /// 计划打卡的星期名列表
    #[serde(default)]
    pub frequency: Vec<String>,
    /// "HH:mm"，格式在服务层校验
    pub reminder_time: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateHabitRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    pub icon_name: Option<String>,
    #[serde(default)]
    pub frequency: Vec<String>,
    pub reminder_time: Option<String>,
}

// ==================== 打卡 ====================

/// 打卡事务的结算结果，服务层内部类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckinSummary {
    pub exp_gained: i32,
    pub leveled_up: bool,
    pub new_level: i32,
    pub new_badges: Vec<BadgeName>,
    pub habit_streak: i32,
}

/// 打卡成功的 HTTP 响应体
#[derive(Debug, Serialize)]
pub struct CheckinResponse {
    pub message: &'static str,
    pub exp_gained: i32,
    pub leveled_up: bool,
    pub new_level: i32,
    pub new_badges: Vec<BadgeName>,
    pub habit_streak: i32,
}

impl From<CheckinSummary> for CheckinResponse {
    fn from(summary: CheckinSummary) -> Self {
        Self {
            message: "Check-in successful!",
            exp_gained: summary.exp_gained,
            leveled_up: summary.leveled_up,
            new_level: summary.new_level,
            new_badges: summary.new_badges,
            habit_streak: summary.habit_streak,
        }
    }
}

// ==================== 课程表 ====================

#[derive(Debug, Deserialize, Validate)]
pub struct ScheduleEntryRequest {
    pub day: String,
    #[validate(length(min = 1, max = 100, message = "subject must be 1-100 characters"))]
    pub subject: String,
    pub start_time: String,
    pub end_time: String,
}

/// 批量创建课程，客户端一次提交整周
#[derive(Debug, Deserialize)]
pub struct CreateScheduleRequest {
    pub schedules: Vec<ScheduleEntryRequest>,
}

// ==================== AI 教练 ====================

#[derive(Debug, Serialize)]
pub struct WeeklyReviewResponse {
    pub insight: String,
}
