//! 每日完成度图表聚合
//!
//! 生成定长的逐日时间序列：每天统计有多少个习惯至少有一次记账打卡。
//! `total` 一律取用户当前的习惯数量，不回溯历史数量。

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// 图表中的一个数据点
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCompletion {
    /// 日期，格式 YYYY-MM-DD
    pub date: String,
    /// 短星期标签，如 "Mon"
    pub day: String,
    /// 当天至少打卡一次的习惯数
    pub completed: u32,
    /// 用户当前习惯总数
    pub total: u32,
}

/// 图表聚合器
pub struct ChartAggregator;

impl ChartAggregator {
    /// 构建 `[today - (days-1), today]` 的逐日完成度序列
    ///
    /// 返回恰好 `days` 个数据点，按日期升序，最后一个点是 `today`。
    /// `days = 0` 返回空序列。
    pub fn daily_completions(user: &User, days: u32, today: NaiveDate) -> Vec<DailyCompletion> {
        let total = user.habits.len() as u32;

        // 每个习惯的记账日集合只构建一次，避免逐日重复扫描事件日志
        let credited: Vec<_> = user.habits.iter().map(|h| h.credited_days()).collect();

        let mut series = Vec::with_capacity(days as usize);
        for offset in (0..days).rev() {
            let day = today - Days::new(offset as u64);
            let completed = credited.iter().filter(|set| set.contains(&day)).count() as u32;

            series.push(DailyCompletion {
                date: day.format("%Y-%m-%d").to_string(),
                day: day.format("%a").to_string(),
                completed,
                total,
            });
        }

        series
    }
}
