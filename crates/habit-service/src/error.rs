//! 习惯服务错误类型定义
//!
//! 包含打卡、课程冲突、AI 教练等所有业务错误及其 HTTP 映射

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// 习惯服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum HabitError {
    // 认证错误
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // 验证错误
    #[error("{0}")]
    Validation(String),

    // 资源不存在
    #[error("Profile not found")]
    ProfileNotFound,
    #[error("Habit not found")]
    HabitNotFound(i64),
    #[error("Schedule entry not found")]
    ScheduleNotFound(i64),

    // 业务错误
    #[error("Already checked in today.")]
    AlreadyCheckedIn,
    #[error("Habit reminder conflicts with {subject} on {day} ({start_time}-{end_time})")]
    ScheduleConflict {
        subject: String,
        day: String,
        start_time: String,
        end_time: String,
    },

    // AI 教练错误
    #[error("AI coach is not configured")]
    CoachUnavailable,
    #[error("Coach is busy analyzing too many pros. Please wait a moment!")]
    CoachBusy,
    #[error("Upstream AI service error: {0}")]
    ExternalService(String),

    // 系统错误
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HabitError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,

            // 重复打卡与参数校验同为 400，客户端按 message 区分
            Self::AlreadyCheckedIn | Self::Validation(_) => StatusCode::BAD_REQUEST,

            Self::ProfileNotFound | Self::HabitNotFound(_) | Self::ScheduleNotFound(_) => {
                StatusCode::NOT_FOUND
            }

            Self::ScheduleConflict { .. } => StatusCode::CONFLICT,

            Self::CoachUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::CoachBusy => StatusCode::TOO_MANY_REQUESTS,
            Self::ExternalService(_) => StatusCode::BAD_GATEWAY,

            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于日志与排查）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::HabitNotFound(_) => "HABIT_NOT_FOUND",
            Self::ScheduleNotFound(_) => "SCHEDULE_NOT_FOUND",
            Self::AlreadyCheckedIn => "ALREADY_CHECKED_IN",
            Self::ScheduleConflict { .. } => "SCHEDULE_CONFLICT",
            Self::CoachUnavailable => "COACH_UNAVAILABLE",
            Self::CoachBusy => "COACH_BUSY",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for HabitError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "Something went wrong. Please try again later.".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "Something went wrong. Please try again later.".to_string()
            }
            Self::ExternalService(e) => {
                tracing::error!(error = %e, "上游 AI 服务调用失败");
                "The AI coach could not be reached.".to_string()
            }
            other => other.to_string(),
        };

        // 重复打卡的响应体用 message 字段，历史客户端依赖这个形状；
        // 其余错误统一用 error 字段
        let body = if matches!(self, Self::AlreadyCheckedIn) {
            json!({ "message": message })
        } else {
            json!({ "error": message })
        };

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for HabitError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 从共享基础设施错误转换
impl From<strive_shared::error::InfraError> for HabitError {
    fn from(err: strive_shared::error::InfraError) -> Self {
        match err {
            strive_shared::error::InfraError::Database(e) => Self::Database(e),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, HabitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    /// 构造全部错误变体及其期望的 (StatusCode, error_code) 映射。
    /// 表驱动避免逐个变体写重复断言。
    fn all_error_variants() -> Vec<(HabitError, StatusCode, &'static str)> {
        vec![
            (
                HabitError::Unauthorized("token expired".into()),
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
            ),
            (
                HabitError::Validation("name is required".into()),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                HabitError::ProfileNotFound,
                StatusCode::NOT_FOUND,
                "PROFILE_NOT_FOUND",
            ),
            (
                HabitError::HabitNotFound(7),
                StatusCode::NOT_FOUND,
                "HABIT_NOT_FOUND",
            ),
            (
                HabitError::ScheduleNotFound(3),
                StatusCode::NOT_FOUND,
                "SCHEDULE_NOT_FOUND",
            ),
            (
                HabitError::AlreadyCheckedIn,
                StatusCode::BAD_REQUEST,
                "ALREADY_CHECKED_IN",
            ),
            (
                HabitError::ScheduleConflict {
                    subject: "Math".into(),
                    day: "Monday".into(),
                    start_time: "08:30".into(),
                    end_time: "09:30".into(),
                },
                StatusCode::CONFLICT,
                "SCHEDULE_CONFLICT",
            ),
            (
                HabitError::CoachUnavailable,
                StatusCode::SERVICE_UNAVAILABLE,
                "COACH_UNAVAILABLE",
            ),
            (
                HabitError::CoachBusy,
                StatusCode::TOO_MANY_REQUESTS,
                "COACH_BUSY",
            ),
            (
                HabitError::ExternalService("502 from upstream".into()),
                StatusCode::BAD_GATEWAY,
                "EXTERNAL_SERVICE_ERROR",
            ),
            (
                HabitError::Internal("unexpected state".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ]
    }

    #[test]
    fn test_all_variants_status_code() {
        for (error, expected_status, label) in all_error_variants() {
            assert_eq!(
                error.status_code(),
                expected_status,
                "状态码不匹配: variant={label}"
            );
        }
    }

    #[test]
    fn test_all_variants_error_code() {
        for (error, _status, expected_code) in all_error_variants() {
            assert_eq!(
                error.error_code(),
                expected_code,
                "错误码不匹配: expected={expected_code}"
            );
        }
    }

    /// 重复打卡的响应体必须是 {"message": "Already checked in today."}，
    /// 这是客户端依赖的契约。
    #[tokio::test]
    async fn test_already_checked_in_body_shape() {
        let response = HabitError::AlreadyCheckedIn.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("读取响应体失败");
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(body["message"], json!("Already checked in today."));
        assert!(body.get("error").is_none(), "不应同时返回 error 字段");
    }

    /// 其余错误统一返回 {"error": "..."}
    #[tokio::test]
    async fn test_other_errors_use_error_field() {
        let cases = vec![
            HabitError::ProfileNotFound,
            HabitError::Unauthorized("missing token".into()),
            HabitError::CoachBusy,
            HabitError::ScheduleConflict {
                subject: "Physics".into(),
                day: "Friday".into(),
                start_time: "10:00".into(),
                end_time: "11:00".into(),
            },
        ];

        for error in cases {
            let label = format!("{:?}", error);
            let response = error.into_response();
            let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("读取响应体失败");
            let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

            assert!(body.get("error").is_some(), "缺少 error 字段: {label}");
            assert!(
                !body["error"].as_str().unwrap_or("").is_empty(),
                "error 不应为空: {label}"
            );
            assert!(body.get("message").is_none(), "不应返回 message 字段: {label}");
        }
    }

    /// 系统级错误的响应消息不应泄露内部细节
    #[tokio::test]
    async fn test_system_errors_hide_internal_details() {
        let error = HabitError::Internal("stack overflow at module X".into());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("读取响应体失败");
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        let message = body["error"].as_str().unwrap();

        assert!(!message.contains("stack overflow"));
        assert!(message.contains("try again later"));
    }

    /// 冲突错误的消息要携带课程上下文，客户端直接展示给用户
    #[test]
    fn test_schedule_conflict_message_contains_context() {
        let error = HabitError::ScheduleConflict {
            subject: "Chemistry".into(),
            day: "Tuesday".into(),
            start_time: "14:00".into(),
            end_time: "15:30".into(),
        };
        let msg = error.to_string();
        assert!(msg.contains("Chemistry"));
        assert!(msg.contains("Tuesday"));
        assert!(msg.contains("14:00"));
    }

    #[test]
    fn test_coach_busy_message() {
        assert_eq!(
            HabitError::CoachBusy.to_string(),
            "Coach is busy analyzing too many pros. Please wait a moment!"
        );
    }

    #[test]
    fn test_from_sqlx_error() {
        let err = HabitError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, HabitError::Database(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_validation_errors() {
        use validator::{ValidationError, ValidationErrors};

        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("length"));

        let err: HabitError = errors.into();
        assert!(matches!(err, HabitError::Validation(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
