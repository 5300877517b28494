//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use crate::auth::{JwtConfig, JwtManager};
use crate::store::MemoryUserStore;

/// Axum 应用共享状态
///
/// 包含用户存储和 JWT 管理器，通过 Arc 在 handler 间共享
#[derive(Clone)]
pub struct AppState {
    /// 用户存储
    pub store: Arc<MemoryUserStore>,
    /// JWT 管理器
    pub jwt_manager: JwtManager,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(jwt_config: JwtConfig) -> Self {
        Self {
            store: Arc::new(MemoryUserStore::new()),
            jwt_manager: JwtManager::new(jwt_config),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(JwtConfig::default())
    }
}
