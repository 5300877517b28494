//! 用户相关的 HTTP 处理器
//!
//! 统计视图与个人资料更新

use axum::{Extension, Json, extract::State};
use chrono::Utc;
use validator::Validate;

use habit_core::{BadgeEvaluator, BadgeStatus, StreakCalculator, UserStatsView, user_stats_view};

use crate::auth::Claims;
use crate::dto::{ApiResponse, UpdateProfileRequest, UserPayload};
use crate::error::Result;
use crate::state::AppState;

/// 获取用户统计（经验值、最长 streak、当日完成数）
///
/// GET /api/user/stats
pub async fn get_user_stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<UserStatsView>>> {
    let user = state.store.find_by_id(claims.user_id()?)?;
    let today = Utc::now().date_naive();

    Ok(Json(ApiResponse::success(user_stats_view(&user, today))))
}

/// 获取成就徽章列表
///
/// GET /api/user/badges
///
/// 基于当前最长 streak 评估：已达成的档位加至多一个待达成档位
pub async fn get_user_badges(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<BadgeStatus>>>> {
    let user = state.store.find_by_id(claims.user_id()?)?;
    let today = Utc::now().date_naive();

    let max_streak = StreakCalculator::overall_streak(&user, today);
    Ok(Json(ApiResponse::success(BadgeEvaluator::badges_for(
        max_streak,
    ))))
}

/// 更新个人资料（姓名/邮箱，部分更新）
///
/// PUT /api/user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserPayload>>> {
    req.validate()?;

    let name = req.name.as_ref().map(|n| n.trim().to_string());
    let email = req.email.as_ref().map(|e| e.trim().to_lowercase());

    let user = state
        .store
        .update_profile(claims.user_id()?, name, email)?;

    Ok(Json(ApiResponse::success(UserPayload::from(&user))))
}
