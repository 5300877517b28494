//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Json, Router, middleware,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, middleware::auth_middleware, state::AppState};

/// 构建认证相关的路由
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::get_current_user))
}

/// 构建习惯相关的路由
///
/// 包含 CRUD、打卡和图表查询
pub fn habit_routes() -> Router<AppState> {
    Router::new()
        .route("/habits", get(handlers::habits::list_habits))
        .route("/habits", post(handlers::habits::create_habit))
        // 静态段优先于路径参数，/habits/stats 不会被 {id} 吞掉
        .route("/habits/stats", get(handlers::habits::chart))
        .route("/habits/{id}", put(handlers::habits::update_habit))
        .route("/habits/{id}", delete(handlers::habits::delete_habit))
        .route(
            "/habits/{id}/complete",
            put(handlers::habits::complete_habit),
        )
}

/// 构建用户相关的路由
///
/// 包含统计视图和个人资料更新
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/stats", get(handlers::user::get_user_stats))
        .route("/user/badges", get(handlers::user::get_user_badges))
        .route("/user/profile", put(handlers::user::update_profile))
}

/// 构建完整的 API 路由
///
/// 返回所有 API 路由（不含前缀，由 app 挂载到 /api 下）
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(habit_routes())
        .merge(user_routes())
}

/// 组装完整应用
///
/// 挂载 /api 前缀、健康检查端点，并套上认证、CORS 和请求追踪中间件
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        // 认证中间件：验证 JWT Token
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 存活探针：服务进程正常即返回 ok
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "habit-api"
    }))
}
