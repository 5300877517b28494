//! 习惯打卡领域模型
//!
//! User 是持久化聚合根：习惯归属于用户，打卡记录归属于习惯。
//! 引擎只读取聚合（打卡事务除外），所有派生值均即时重算、从不落库。

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 习惯分类
///
/// 固定枚举集合，序列化为变体原名（与客户端约定一致）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HabitCategory {
    Health,
    Study,
    Work,
    #[default]
    Personal,
    Fitness,
    Mindfulness,
    Social,
    Creative,
}

/// 打卡记录
///
/// 追加式日志中的一条事件；`completed = true` 的事件才参与记账
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEvent {
    pub date: DateTime<Utc>,
    pub completed: bool,
}

impl CompletionEvent {
    /// 构造一条在 `now` 记账的打卡事件
    pub fn credited_at(now: DateTime<Utc>) -> Self {
        Self {
            date: now,
            completed: true,
        }
    }

    /// 事件所在的日历日（UTC）
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

/// 习惯
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: HabitCategory,
    pub created_at: DateTime<Utc>,
    pub completions: Vec<CompletionEvent>,
}

impl Habit {
    /// 创建一个没有任何打卡记录的新习惯
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: HabitCategory,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            category,
            created_at,
            completions: Vec::new(),
        }
    }

    /// 已记账的日历日集合
    ///
    /// 按天去重，历史数据中同一天的重复事件不会影响后续推导
    pub fn credited_days(&self) -> HashSet<NaiveDate> {
        self.completions
            .iter()
            .filter(|c| c.completed)
            .map(|c| c.day())
            .collect()
    }

    /// 指定日历日是否已有记账的打卡
    pub fn credited_on(&self, day: NaiveDate) -> bool {
        self.completions
            .iter()
            .any(|c| c.completed && c.day() == day)
    }
}

/// 用户聚合根
///
/// `xp` 非负且单调不减，唯一的写入口是打卡事务
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub xp: i64,
    pub habits: Vec<Habit>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// 创建一个没有任何习惯的新用户
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            xp: 0,
            habits: Vec::new(),
            created_at,
        }
    }

    /// 按 id 查找习惯
    pub fn habit(&self, habit_id: Uuid) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == habit_id)
    }

    /// 按 id 查找习惯（可变）
    pub fn habit_mut(&mut self, habit_id: Uuid) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|h| h.id == habit_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_category_serialization_uses_variant_name() {
        let json = serde_json::to_string(&HabitCategory::Mindfulness).unwrap();
        assert_eq!(json, "\"Mindfulness\"");

        let parsed: HabitCategory = serde_json::from_str("\"Health\"").unwrap();
        assert_eq!(parsed, HabitCategory::Health);
    }

    #[test]
    fn test_category_default_is_personal() {
        assert_eq!(HabitCategory::default(), HabitCategory::Personal);
    }

    #[test]
    fn test_completion_event_day_truncates_to_calendar_day() {
        let event = CompletionEvent::credited_at(at(2026, 3, 15, 23));
        assert!(event.completed);
        assert_eq!(event.day(), NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());
    }

    #[test]
    fn test_credited_days_dedupes_same_day_events() {
        let mut habit = Habit::new("晨跑", "", HabitCategory::Fitness, at(2026, 3, 1, 8));
        // 同一天的两条事件（如历史迁移产生的重复）只计一天
        habit.completions.push(CompletionEvent::credited_at(at(2026, 3, 10, 7)));
        habit.completions.push(CompletionEvent::credited_at(at(2026, 3, 10, 21)));
        habit.completions.push(CompletionEvent::credited_at(at(2026, 3, 11, 7)));

        assert_eq!(habit.credited_days().len(), 2);
    }

    #[test]
    fn test_credited_on_ignores_uncredited_events() {
        let mut habit = Habit::new("阅读", "", HabitCategory::Study, at(2026, 3, 1, 8));
        habit.completions.push(CompletionEvent {
            date: at(2026, 3, 10, 7),
            completed: false,
        });

        let day = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        assert!(!habit.credited_on(day));

        habit.completions.push(CompletionEvent::credited_at(at(2026, 3, 10, 9)));
        assert!(habit.credited_on(day));
    }

    #[test]
    fn test_user_habit_lookup() {
        let mut user = User::new("张三", "zhangsan@example.com", "hash", at(2026, 1, 1, 0));
        let habit = Habit::new("冥想", "", HabitCategory::Mindfulness, at(2026, 1, 2, 0));
        let habit_id = habit.id;
        user.habits.push(habit);

        assert!(user.habit(habit_id).is_some());
        assert!(user.habit(Uuid::new_v4()).is_none());
        assert_eq!(user.xp, 0);
    }
}
