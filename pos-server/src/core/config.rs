use std::time::Duration;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};
use crate::db::{CaseMode, RetryPolicy};

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | DATA_API_URL | - | 托管数据库 REST 地址 (未设置时使用内存存储) |
/// | DATA_API_KEY | - | 托管服务 API key |
/// | AUTH_API_URL | = DATA_API_URL | 托管认证服务地址 |
/// | DB_MAX_RETRIES | 3 | 首次失败后的最大重试次数 |
/// | DB_RETRY_BASE_MS | 200 | 首次重试等待 |
/// | DB_RETRY_MAX_MS | 5000 | 最长重试等待 |
/// | DB_CASE_CONVERSION | true | camelCase ↔ snake_case 列名转换 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | PUBLIC_BASE_URL | http://localhost:{HTTP_PORT} | 桌台二维码指向的前端地址 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志文件目录 |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub data_api_url: Option<String>,
    pub data_api_key: String,
    pub auth_api_url: Option<String>,
    pub db_max_retries: u32,
    pub db_retry_base_ms: u64,
    pub db_retry_max_ms: u64,
    pub db_case_conversion: bool,
    pub request_timeout_ms: u64,
    pub public_base_url: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// JWT 认证配置
    pub jwt: JwtConfig,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        let http_port = env_parse("HTTP_PORT", 3000);
        let data_api_url = env_opt("DATA_API_URL");

        Self {
            http_port,
            environment: env_opt("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            auth_api_url: env_opt("AUTH_API_URL").or_else(|| data_api_url.clone()),
            data_api_url,
            data_api_key: env_opt("DATA_API_KEY").unwrap_or_default(),
            db_max_retries: env_parse("DB_MAX_RETRIES", 3),
            db_retry_base_ms: env_parse("DB_RETRY_BASE_MS", 200),
            db_retry_max_ms: env_parse("DB_RETRY_MAX_MS", 5000),
            db_case_conversion: env_parse("DB_CASE_CONVERSION", true),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30000),
            public_base_url: env_opt("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{http_port}")),
            log_level: env_opt("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: env_opt("LOG_DIR"),
            jwt: JwtConfig::from_env(),
        }
    }

    /// 内存存储 + 固定 JWT 密钥 (测试用，不读取环境变量)
    pub fn for_tests(jwt_secret: impl Into<String>) -> Self {
        Self {
            http_port: 0,
            environment: "test".into(),
            data_api_url: None,
            data_api_key: String::new(),
            auth_api_url: None,
            db_max_retries: 0,
            db_retry_base_ms: 0,
            db_retry_max_ms: 0,
            db_case_conversion: true,
            request_timeout_ms: 5000,
            public_base_url: "http://pos.test".into(),
            log_level: "debug".into(),
            log_dir: None,
            jwt: JwtConfig::with_secret(jwt_secret),
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 启动前检查: 生产环境必须配置托管后端和 JWT 密钥
    pub fn validate(&self) -> Result<()> {
        if !self.is_production() {
            return Ok(());
        }
        if self.data_api_url.is_none() {
            return Err(ServerError::Config("DATA_API_URL must be set in production".into()));
        }
        self.jwt
            .check_production()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// `DB_MAX_RETRIES` counts retries after the first attempt
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.db_max_retries.saturating_add(1),
            initial_delay: Duration::from_millis(self.db_retry_base_ms),
            max_delay: Duration::from_millis(self.db_retry_max_ms.max(self.db_retry_base_ms)),
        }
    }

    pub fn case_mode(&self) -> CaseMode {
        if self.db_case_conversion {
            CaseMode::Convert
        } else {
            CaseMode::Preserve
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policy_counts_first_attempt() {
        let mut config = Config::for_tests("secret");
        config.db_max_retries = 3;
        config.db_retry_base_ms = 200;
        config.db_retry_max_ms = 5000;

        let policy = config.retry_policy();
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.max_delay, Duration::from_millis(5000));
    }

    #[test]
    fn test_production_requires_jwt_secret() {
        let mut config = Config::for_tests("short-secret");
        assert!(config.validate().is_ok());

        config.environment = "production".into();
        config.data_api_url = Some("https://db.example.com".into());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at least 32 characters"));

        config.jwt = JwtConfig::with_secret("production-secret-0123456789abcdef");
        config.jwt.generated = true;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must be set in production"));

        config.jwt.generated = false;
        assert!(config.validate().is_ok());

        config.data_api_url = None;
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn test_case_mode() {
        let mut config = Config::for_tests("secret");
        assert_eq!(config.case_mode(), CaseMode::Convert);
        config.db_case_conversion = false;
        assert_eq!(config.case_mode(), CaseMode::Preserve);
    }
}
