//! 打卡事务
//!
//! 聚合上唯一的写操作：追加一条记账打卡并发放经验值。
//! 幂等约束（每个习惯每个日历日只记账一次）在这里守住，
//! 检查与写入必须由存储层在同一个用户聚合的原子更新内执行。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::models::{CompletionEvent, User};
use crate::views::{HabitView, habit_view};

/// 单次打卡发放的经验值
pub const XP_PER_COMPLETION: i64 = 10;

/// 打卡成功的返回值
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOutcome {
    /// 打卡后的习惯视图（streak 已重算，completedToday 为 true）
    pub habit: HabitView,
    /// 发放后的经验值总额
    pub new_xp: i64,
}

/// 打卡事务
pub struct CompletionTransaction;

impl CompletionTransaction {
    /// 为指定习惯记一次当日打卡并发放经验值
    ///
    /// # Errors
    /// - [`CoreError::HabitNotFound`]：习惯 id 不属于该用户
    /// - [`CoreError::AlreadyCompletedToday`]：当日已有记账打卡，经验值不变
    pub fn complete_habit(
        user: &mut User,
        habit_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<CompletionOutcome> {
        let today = now.date_naive();

        let idx = user
            .habits
            .iter()
            .position(|h| h.id == habit_id)
            .ok_or(CoreError::HabitNotFound(habit_id))?;

        if user.habits[idx].credited_on(today) {
            return Err(CoreError::AlreadyCompletedToday);
        }

        // 追加事件与发放经验值作用在同一个 &mut User 上，
        // 由调用方保证整个聚合一起提交或一起放弃
        user.habits[idx]
            .completions
            .push(CompletionEvent::credited_at(now));
        user.xp += XP_PER_COMPLETION;

        Ok(CompletionOutcome {
            habit: habit_view(&user.habits[idx], today),
            new_xp: user.xp,
        })
    }
}
