//! 请求层错误类型定义
//!
//! 引擎错误在这里映射为 HTTP 状态码与统一响应体；
//! 系统级错误只返回通用提示，详细信息仅记录日志。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

use habit_core::CoreError;

/// 请求层错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 认证错误
    #[error("未授权: {0}")]
    Unauthorized(String),
    #[error("邮箱或密码错误")]
    InvalidCredentials,
    #[error("用户不存在: {0}")]
    UserNotFound(Uuid),

    // 验证错误
    #[error("参数验证失败: {0}")]
    Validation(String),

    // 业务错误
    #[error("习惯不存在: {0}")]
    HabitNotFound(Uuid),
    #[error("该习惯今天已完成打卡")]
    AlreadyCompletedToday,
    #[error("邮箱已被占用: {0}")]
    EmailTaken(String),

    // 系统错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::UserNotFound(_) | Self::HabitNotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            // 重复打卡是请求被拒绝，不是服务故障
            Self::AlreadyCompletedToday | Self::EmailTaken(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::HabitNotFound(_) => "HABIT_NOT_FOUND",
            Self::AlreadyCompletedToday => "ALREADY_COMPLETED_TODAY",
            Self::EmailTaken(_) => "EMAIL_TAKEN",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 从引擎错误转换
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::HabitNotFound(id) => Self::HabitNotFound(id),
            CoreError::AlreadyCompletedToday => Self::AlreadyCompletedToday,
        }
    }
}

/// 请求层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;
