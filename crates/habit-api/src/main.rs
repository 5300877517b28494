//! 习惯打卡服务入口
//!
//! 提供注册/登录、习惯管理、打卡与统计查询的 REST API。

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use habit_api::{
    auth::JwtConfig,
    config::{AppConfig, ObservabilityConfig},
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 统一加载配置：config/{service_name}.toml + HABIT_ 环境变量覆盖
    let config = AppConfig::load("habit-api").unwrap_or_default();

    init_tracing(&config.observability)?;
    info!("Starting habit-api on {}", config.server_addr());

    let jwt_config = JwtConfig {
        secret: config.auth.jwt_secret.clone(),
        expires_in_secs: config.auth.jwt_expires_in_secs,
        issuer: config.service_name.clone(),
    };
    let state = AppState::new(jwt_config);

    let app = routes::app(state);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 优雅关闭：收到 SIGTERM 或 Ctrl+C 时停止接收新连接并等待已有请求完成
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志（EnvFilter + pretty/json 输出）
fn init_tracing(config: &ObservabilityConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.log_format == "json" {
        registry.with(fmt::layer().json().with_target(true)).try_init()?;
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()?;
    }

    Ok(())
}

/// 监听关闭信号
///
/// 收到 SIGTERM（容器编排停止实例）或 Ctrl+C 后返回，
/// 触发 axum 的优雅关闭流程。
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("注册 Ctrl+C 处理器失败");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("注册 SIGTERM 处理器失败")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
