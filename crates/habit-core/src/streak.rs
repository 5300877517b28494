//! 连续打卡计算
//!
//! streak 定义：以今天（或今天未打卡时以昨天）收尾、每天都有记账打卡的
//! 最长连续日历日区间长度。今天尚未打卡不立即清零，保留一天宽限期。

use chrono::{Days, NaiveDate};

use crate::models::{Habit, User};

/// 连续打卡计算器
pub struct StreakCalculator;

impl StreakCalculator {
    /// 单个习惯的当前连续打卡天数
    ///
    /// # Arguments
    /// * `habit` - 目标习惯
    /// * `today` - 调用方提供的当前日历日
    pub fn habit_streak(habit: &Habit, today: NaiveDate) -> u32 {
        let days = habit.credited_days();
        if days.is_empty() {
            return 0;
        }

        let yesterday = today - Days::new(1);

        // 锚点：今天已打卡从今天起算；否则宽限到昨天；都没有则断签
        let mut cursor = if days.contains(&today) {
            today
        } else if days.contains(&yesterday) {
            yesterday
        } else {
            return 0;
        };

        // 从锚点逐日回退，遇到第一个缺口即停
        let mut streak = 0u32;
        while days.contains(&cursor) {
            streak += 1;
            cursor = cursor - Days::new(1);
        }

        streak
    }

    /// 用户所有习惯中最长的当前连续打卡天数
    ///
    /// 没有任何习惯或任何记账打卡时返回 0
    pub fn overall_streak(user: &User, today: NaiveDate) -> u32 {
        user.habits
            .iter()
            .map(|h| Self::habit_streak(h, today))
            .max()
            .unwrap_or(0)
    }
}
