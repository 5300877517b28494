//! 引擎错误类型定义
//!
//! 派生计算（streak/badge/chart）对合法输入是全函数，不产生错误；
//! 只有打卡事务存在失败分支。

use thiserror::Error;
use uuid::Uuid;

/// 引擎错误类型
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("习惯不存在: {0}")]
    HabitNotFound(Uuid),

    #[error("该习惯今天已完成打卡")]
    AlreadyCompletedToday,
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::HabitNotFound(_) => "HABIT_NOT_FOUND",
            Self::AlreadyCompletedToday => "ALREADY_COMPLETED_TODAY",
        }
    }
}
