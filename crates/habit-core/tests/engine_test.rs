//! 派生引擎集成测试
//!
//! 围绕一个逐步搭建的用户聚合，验证 streak、徽章、图表、
//! 打卡事务之间的端到端一致性。

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use habit_core::{
    BadgeEvaluator, ChartAggregator, CompletionTransaction, CoreError, Habit, HabitCategory,
    StreakCalculator, User, XP_PER_COMPLETION, habits_view, user_stats_view,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(d: NaiveDate, hour: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&d.and_hms_opt(hour, 0, 0).unwrap())
}

/// 创建一个带两个习惯的用户：晨跑与读书
fn new_user() -> (User, uuid::Uuid, uuid::Uuid) {
    let created = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
    let mut user = User::new("集成测试用户", "it@example.com", "hash", created);

    let run = Habit::new("晨跑", "5 公里", HabitCategory::Fitness, created);
    let read = Habit::new("读书", "", HabitCategory::Study, created);
    let (run_id, read_id) = (run.id, read.id);
    user.habits.push(run);
    user.habits.push(read);

    (user, run_id, read_id)
}

// ==================== 打卡事务 → 派生值联动 ====================

#[test]
fn test_completion_flow_drives_all_derived_values() {
    let (mut user, run_id, read_id) = new_user();
    let today = day(2026, 3, 15);

    // 连续四天给晨跑打卡（含今天）
    for offset in (0..4u64).rev() {
        let ts = at(today - Days::new(offset), 7);
        CompletionTransaction::complete_habit(&mut user, run_id, ts).unwrap();
    }
    // 读书只在今天打卡
    CompletionTransaction::complete_habit(&mut user, read_id, at(today, 21)).unwrap();

    // streak：单习惯与全局
    assert_eq!(
        StreakCalculator::habit_streak(user.habit(run_id).unwrap(), today),
        4
    );
    assert_eq!(StreakCalculator::overall_streak(&user, today), 4);

    // 经验值：五次打卡
    assert_eq!(user.xp, 5 * XP_PER_COMPLETION);

    // 统计视图
    let stats = user_stats_view(&user, today);
    assert_eq!(stats.max_streak, 4);
    assert_eq!(stats.total_habits, 2);
    assert_eq!(stats.habits_completed_today, 2);

    // 习惯视图
    let views = habits_view(&user, today);
    assert!(views.iter().all(|v| v.completed_today));

    // 图表：今天两个习惯都完成，三天前只有晨跑
    let series = ChartAggregator::daily_completions(&user, 7, today);
    assert_eq!(series.len(), 7);
    assert_eq!(series[6].completed, 2);
    assert_eq!(series[3].completed, 1);
    assert_eq!(series[2].completed, 0);
}

#[test]
fn test_duplicate_completion_rejected_and_state_unchanged() {
    let (mut user, run_id, _) = new_user();
    let today = day(2026, 3, 15);

    let first = CompletionTransaction::complete_habit(&mut user, run_id, at(today, 7)).unwrap();
    assert_eq!(first.new_xp, XP_PER_COMPLETION);

    let err = CompletionTransaction::complete_habit(&mut user, run_id, at(today, 22)).unwrap_err();
    assert_eq!(err, CoreError::AlreadyCompletedToday);

    assert_eq!(user.xp, XP_PER_COMPLETION);
    assert_eq!(user.habit(run_id).unwrap().completions.len(), 1);
}

// ==================== 宽限期语义 ====================

#[test]
fn test_grace_day_then_break() {
    let (mut user, run_id, _) = new_user();
    let completed_on = day(2026, 3, 14);
    CompletionTransaction::complete_habit(&mut user, run_id, at(completed_on, 9)).unwrap();

    let habit = user.habit(run_id).unwrap();
    // 当天
    assert_eq!(StreakCalculator::habit_streak(habit, completed_on), 1);
    // 次日未打卡：宽限期内仍按昨天收尾
    assert_eq!(
        StreakCalculator::habit_streak(habit, completed_on + Days::new(1)),
        1
    );
    // 再过一天：断签
    assert_eq!(
        StreakCalculator::habit_streak(habit, completed_on + Days::new(2)),
        0
    );
}

// ==================== 徽章与 streak 联动 ====================

#[test]
fn test_long_streak_reaches_bronze_tier() {
    let (mut user, run_id, _) = new_user();
    let today = day(2026, 3, 15);

    for offset in (0..10u64).rev() {
        let ts = at(today - Days::new(offset), 7);
        CompletionTransaction::complete_habit(&mut user, run_id, ts).unwrap();
    }

    let max_streak = StreakCalculator::overall_streak(&user, today);
    assert_eq!(max_streak, 10);

    let badges = BadgeEvaluator::badges_for(max_streak);
    assert_eq!(BadgeEvaluator::achieved_count(max_streak), 1);
    assert!(badges[0].achieved);
    assert_eq!(badges[1].progress, Some(10));
    assert_eq!(badges[1].target, Some(30));
}

// ==================== 跨日边界 ====================

#[test]
fn test_completions_near_midnight_fall_on_distinct_days() {
    let (mut user, run_id, _) = new_user();

    // 3-14 晚 23 点与 3-15 凌晨 0 点属于相邻两个日历日
    let late = Utc.with_ymd_and_hms(2026, 3, 14, 23, 0, 0).unwrap();
    let early = Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap();

    CompletionTransaction::complete_habit(&mut user, run_id, late).unwrap();
    let outcome = CompletionTransaction::complete_habit(&mut user, run_id, early).unwrap();

    assert_eq!(outcome.habit.streak, 2);
    assert_eq!(user.xp, 2 * XP_PER_COMPLETION);
}

#[test]
fn test_chart_last_point_is_today_and_tracks_transaction() {
    let (mut user, run_id, _) = new_user();
    let today = day(2026, 3, 15);

    let before = ChartAggregator::daily_completions(&user, 7, today);
    assert_eq!(before[6].date, "2026-03-15");
    assert_eq!(before[6].completed, 0);

    CompletionTransaction::complete_habit(&mut user, run_id, at(today, 12)).unwrap();

    let after = ChartAggregator::daily_completions(&user, 7, today);
    assert_eq!(after[6].completed, 1);
    assert_eq!(after[6].total, 2);
}
