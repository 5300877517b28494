//! 读模型视图
//!
//! 请求层返回给客户端的派生视图：习惯视图（含 streak 与当日完成标记）
//! 和用户统计视图。所有字段即时重算，不落库。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CompletionEvent, Habit, HabitCategory, User};
use crate::streak::StreakCalculator;

/// 习惯视图
///
/// 习惯自身字段加上两项派生值
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: HabitCategory,
    pub created_at: DateTime<Utc>,
    pub completions: Vec<CompletionEvent>,
    pub streak: u32,
    pub completed_today: bool,
}

/// 用户统计视图
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsView {
    pub name: String,
    pub email: String,
    pub xp: i64,
    pub max_streak: u32,
    pub total_habits: u32,
    pub habits_completed_today: u32,
}

/// 构建单个习惯的视图
pub fn habit_view(habit: &Habit, today: NaiveDate) -> HabitView {
    HabitView {
        id: habit.id,
        name: habit.name.clone(),
        description: habit.description.clone(),
        category: habit.category,
        created_at: habit.created_at,
        completions: habit.completions.clone(),
        streak: StreakCalculator::habit_streak(habit, today),
        completed_today: habit.credited_on(today),
    }
}

/// 构建用户全部习惯的视图列表，保持习惯的原始顺序
pub fn habits_view(user: &User, today: NaiveDate) -> Vec<HabitView> {
    user.habits.iter().map(|h| habit_view(h, today)).collect()
}

/// 构建用户统计视图
pub fn user_stats_view(user: &User, today: NaiveDate) -> UserStatsView {
    let habits_completed_today = user
        .habits
        .iter()
        .filter(|h| h.credited_on(today))
        .count() as u32;

    UserStatsView {
        name: user.name.clone(),
        email: user.email.clone(),
        xp: user.xp,
        max_streak: StreakCalculator::overall_streak(user, today),
        total_habits: user.habits.len() as u32,
        habits_completed_today,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at_noon(d: NaiveDate) -> DateTime<Utc> {
        Utc.from_utc_datetime(&d.and_hms_opt(12, 0, 0).unwrap())
    }

    fn sample_user(today: NaiveDate) -> User {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut user = User::new("赵六", "zhaoliu@example.com", "hash", created);
        user.xp = 120;

        // 习惯一：今天和昨天都打了卡
        let mut reading = Habit::new("读书", "每天 30 分钟", HabitCategory::Study, created);
        reading.completions.push(CompletionEvent::credited_at(at_noon(today)));
        reading
            .completions
            .push(CompletionEvent::credited_at(at_noon(today - chrono::Days::new(1))));
        user.habits.push(reading);

        // 习惯二：从未打卡
        user.habits
            .push(Habit::new("早睡", "", HabitCategory::Health, created));

        user
    }

    #[test]
    fn test_habit_view_carries_derived_fields() {
        let today = day(2026, 3, 15);
        let user = sample_user(today);

        let views = habits_view(&user, today);
        assert_eq!(views.len(), 2);

        assert_eq!(views[0].name, "读书");
        assert_eq!(views[0].streak, 2);
        assert!(views[0].completed_today);
        assert_eq!(views[0].completions.len(), 2);

        assert_eq!(views[1].streak, 0);
        assert!(!views[1].completed_today);
    }

    #[test]
    fn test_user_stats_view_aggregates() {
        let today = day(2026, 3, 15);
        let user = sample_user(today);

        let stats = user_stats_view(&user, today);
        assert_eq!(stats.xp, 120);
        assert_eq!(stats.max_streak, 2);
        assert_eq!(stats.total_habits, 2);
        assert_eq!(stats.habits_completed_today, 1);
        assert_eq!(stats.email, "zhaoliu@example.com");
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let today = day(2026, 3, 15);
        let user = sample_user(today);

        let json = serde_json::to_value(habits_view(&user, today)).unwrap();
        assert!(json[0].get("completedToday").is_some());
        assert!(json[0].get("createdAt").is_some());

        let stats = serde_json::to_value(user_stats_view(&user, today)).unwrap();
        assert!(stats.get("maxStreak").is_some());
        assert!(stats.get("habitsCompletedToday").is_some());
    }
}
