//! 认证相关的 HTTP 处理器
//!
//! 提供注册、登录和获取当前用户的 API

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use habit_core::User;

use crate::auth::{Claims, hash_password, verify_password};
use crate::dto::{ApiResponse, AuthResponse, LoginRequest, RegisterRequest, UserPayload};
use crate::error::{ApiError, Result};
use crate::state::AppState;

/// 规范化邮箱：去空白并转小写，保证索引键一致
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 用户注册
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    req.validate()?;

    let email = normalize_email(&req.email);
    let password_hash = hash_password(&req.password)?;
    let user = User::new(req.name.trim(), &email, password_hash, Utc::now());
    let user_id = user.id;
    let payload = UserPayload::from(&user);

    // 邮箱唯一性由存储的索引抢占保证
    state.store.insert(user)?;

    let (token, expires_at) = state.jwt_manager.generate_token(user_id, &email)?;
    info!(user_id = %user_id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AuthResponse {
            token,
            user: payload,
            expires_at,
        })),
    ))
}

/// 用户登录
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>> {
    req.validate()?;

    let email = normalize_email(&req.email);

    // 查无此人和密码错误返回同一个错误，避免泄露邮箱是否已注册
    let user = state
        .store
        .find_by_email(&email)
        .ok_or(ApiError::InvalidCredentials)?;

    let password_valid = verify_password(&req.password, &user.password_hash)?;
    if !password_valid {
        return Err(ApiError::InvalidCredentials);
    }

    let (token, expires_at) = state.jwt_manager.generate_token(user.id, &user.email)?;
    info!(user_id = %user.id, "user logged in");

    Ok(Json(ApiResponse::success(AuthResponse {
        token,
        user: UserPayload::from(&user),
        expires_at,
    })))
}

/// 获取当前用户信息
///
/// GET /api/auth/me
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<UserPayload>>> {
    let user = state.store.find_by_id(claims.user_id()?)?;
    Ok(Json(ApiResponse::success(UserPayload::from(&user))))
}
