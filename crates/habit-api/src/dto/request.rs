//! 请求 DTO 定义
//!
//! 所有写接口的请求体在进入引擎前先做字段校验

use serde::Deserialize;
use validator::Validate;

use habit_core::HabitCategory;

/// 注册请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 50, message = "姓名长度必须在 2-50 之间"))]
    pub name: String,
    #[validate(email(message = "邮箱格式不正确"))]
    pub email: String,
    #[validate(length(min = 6, max = 100, message = "密码长度必须在 6-100 之间"))]
    pub password: String,
}

/// 登录请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "邮箱格式不正确"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "密码不能为空"))]
    pub password: String,
}

/// 创建习惯请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabitRequest {
    #[validate(length(min = 1, max = 100, message = "习惯名称不能为空"))]
    pub name: String,
    #[validate(length(max = 500, message = "描述不能超过 500 字符"))]
    pub description: Option<String>,
    pub category: Option<HabitCategory>,
}

/// 更新习惯请求
///
/// 所有字段可选，只更新提供的字段
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHabitRequest {
    #[validate(length(min = 1, max = 100, message = "习惯名称不能为空"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "描述不能超过 500 字符"))]
    pub description: Option<String>,
    pub category: Option<HabitCategory>,
}

/// 更新个人资料请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 50, message = "姓名长度必须在 2-50 之间"))]
    pub name: Option<String>,
    #[validate(email(message = "邮箱格式不正确"))]
    pub email: Option<String>,
}

/// 图表查询参数
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartQuery {
    /// 统计天数，缺省 7，限制在 [1, 365]
    pub days: Option<u32>,
}

impl ChartQuery {
    /// 解析后的天数
    pub fn days(&self) -> u32 {
        self.days.unwrap_or(7).clamp(1, 365)
    }
}
