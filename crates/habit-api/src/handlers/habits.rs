//! 习惯相关的 HTTP 处理器
//!
//! 习惯 CRUD、打卡和图表查询。派生计算全部委托给引擎，
//! 这里只读一次时钟并作为参数传入。

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use habit_core::{
    ChartAggregator, CompletionOutcome, CompletionTransaction, DailyCompletion, Habit, HabitView,
    habit_view, habits_view,
};

use crate::auth::Claims;
use crate::dto::{ApiResponse, ChartQuery, CreateHabitRequest, UpdateHabitRequest};
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// 获取习惯列表（含 streak 与当日完成标记）
///
/// GET /api/habits
pub async fn list_habits(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<HabitView>>>> {
    let user = state.store.find_by_id(claims.user_id()?)?;
    let today = Utc::now().date_naive();

    Ok(Json(ApiResponse::success(habits_view(&user, today))))
}

/// 创建习惯
///
/// POST /api/habits
pub async fn create_habit(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<ApiResponse<HabitView>>)> {
    req.validate()?;

    let user_id = claims.user_id()?;
    let now = Utc::now();

    let habit = Habit::new(
        req.name.trim(),
        req.description.as_deref().unwrap_or("").trim(),
        req.category.unwrap_or_default(),
        now,
    );
    // 新习惯没有打卡记录：streak 0、completedToday false
    let view = habit_view(&habit, now.date_naive());

    state.store.update(user_id, move |user| {
        user.habits.push(habit);
        Ok(())
    })?;
    info!(user_id = %user_id, habit_id = %view.id, "habit created");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(view))))
}

/// 更新习惯（部分更新）
///
/// PUT /api/habits/{id}
pub async fn update_habit(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(habit_id): Path<Uuid>,
    Json(req): Json<UpdateHabitRequest>,
) -> Result<Json<ApiResponse<HabitView>>> {
    req.validate()?;

    let today = Utc::now().date_naive();
    let view = state.store.update(claims.user_id()?, |user| {
        let habit = user
            .habit_mut(habit_id)
            .ok_or(ApiError::HabitNotFound(habit_id))?;

        if let Some(name) = &req.name {
            habit.name = name.trim().to_string();
        }
        if let Some(description) = &req.description {
            habit.description = description.trim().to_string();
        }
        if let Some(category) = req.category {
            habit.category = category;
        }

        Ok(habit_view(habit, today))
    })?;

    Ok(Json(ApiResponse::success(view)))
}

/// 删除习惯
///
/// DELETE /api/habits/{id}
pub async fn delete_habit(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(habit_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    let user_id = claims.user_id()?;
    state.store.update(user_id, |user| {
        let before = user.habits.len();
        user.habits.retain(|h| h.id != habit_id);
        if user.habits.len() == before {
            return Err(ApiError::HabitNotFound(habit_id));
        }
        Ok(())
    })?;
    info!(user_id = %user_id, habit_id = %habit_id, "habit deleted");

    Ok(Json(ApiResponse::success_with_message((), "习惯已删除")))
}

/// 打卡
///
/// PUT /api/habits/{id}/complete
///
/// 当日是否已打卡的检查与事件追加、经验值发放
/// 在同一个用户聚合的原子更新内完成
pub async fn complete_habit(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(habit_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CompletionOutcome>>> {
    let user_id = claims.user_id()?;
    let now = Utc::now();

    let outcome = state.store.update(user_id, |user| {
        CompletionTransaction::complete_habit(user, habit_id, now).map_err(ApiError::from)
    })?;
    info!(
        user_id = %user_id,
        habit_id = %habit_id,
        new_xp = outcome.new_xp,
        "habit completed"
    );

    Ok(Json(ApiResponse::success(outcome)))
}

/// 获取每日完成度图表数据
///
/// GET /api/habits/stats?days=N
pub async fn chart(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ApiResponse<Vec<DailyCompletion>>>> {
    let user = state.store.find_by_id(claims.user_id()?)?;
    let today = Utc::now().date_naive();

    let series = ChartAggregator::daily_completions(&user, query.days(), today);
    Ok(Json(ApiResponse::success(series)))
}
