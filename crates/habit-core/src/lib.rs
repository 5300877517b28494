//! 习惯打卡派生引擎
//!
//! 从追加式的打卡日志中推导游戏化反馈，包括：
//! - 单习惯/全局连续打卡天数（streak）
//! - 成就徽章档位评估
//! - 每日完成度图表聚合
//! - 打卡事务与经验值发放（幂等：每个习惯每个日历日只记账一次）
//!
//! 所有派生计算都是纯函数：`today`/`now` 由调用方显式传入，
//! 引擎内部不读取系统时钟。

pub mod badge;
pub mod chart;
pub mod completion;
pub mod error;
pub mod models;
pub mod streak;
pub mod views;

pub use badge::{BadgeEvaluator, BadgeStatus, BadgeTier};
pub use chart::{ChartAggregator, DailyCompletion};
pub use completion::{CompletionOutcome, CompletionTransaction, XP_PER_COMPLETION};
pub use error::{CoreError, Result};
pub use models::{CompletionEvent, Habit, HabitCategory, User};
pub use streak::StreakCalculator;
pub use views::{HabitView, UserStatsView, habit_view, habits_view, user_stats_view};
