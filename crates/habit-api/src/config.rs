//! 配置管理模块
//!
//! 从 config/{service_name}.toml 加载，支持 HABIT_ 前缀的环境变量覆盖，
//! 缺省时回退到内置默认值。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// 服务监听配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

/// 认证配置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// JWT 签名密钥
    pub jwt_secret: String,
    /// Token 过期时间（秒）
    pub jwt_expires_in_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "habit-api-secret-key-change-in-production".to_string(),
            jwt_expires_in_secs: 86400, // 24 小时
        }
    }
}

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// 日志输出格式：json（结构化）或 pretty（人类可读）
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "habit-api".to_string(),
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// 加载配置
    ///
    /// 优先级：环境变量（HABIT_ 前缀，双下划线分隔层级）>
    /// config/{service_name}.toml > 内置默认值
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let config_path = format!("config/{}.toml", service_name);

        let mut builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("server.host", ServerConfig::default().host)?
            .set_default("server.port", ServerConfig::default().port as i64)?
            .set_default("auth.jwt_secret", AuthConfig::default().jwt_secret)?
            .set_default(
                "auth.jwt_expires_in_secs",
                AuthConfig::default().jwt_expires_in_secs,
            )?
            .set_default("observability.log_level", "info")?
            .set_default("observability.log_format", "pretty")?;

        if Path::new(&config_path).exists() {
            builder = builder.add_source(File::with_name(&config_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("HABIT")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// 服务监听地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
