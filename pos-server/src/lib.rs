//! Restaurant POS Server - 餐厅点餐/桌台管理后端
//!
//! # 架构概述
//!
//! - **数据访问** (`db`): 托管数据库 REST API 的行级封装 (重试 + 字段名转换)
//! - **认证** (`auth`): 托管登录 + JWT 会话 + 角色权限
//! - **订单** (`orders`): 状态流转与金额计算
//! - **统计** (`metrics`): 员工绩效、桌台翻台效率
//! - **HTTP API** (`api`): RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! pos-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # JWT 认证、权限、登录服务
//! ├── db/            # 数据访问层
//! ├── orders/        # 订单状态机、金额
//! ├── metrics/       # 统计计算
//! ├── services/      # 业务服务
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod metrics;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_router};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 `.env` 并初始化日志
///
/// 返回的 guard 需保持到进程结束 (文件日志刷新)
pub fn setup_environment() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    if let Some(dir) = &log_dir
        && let Err(e) = std::fs::create_dir_all(dir)
    {
        eprintln!("Failed to create log directory {dir}: {e}");
    }

    init_logger_with_file(log_level.as_deref(), log_dir.as_deref())
}

pub fn print_banner(config: &Config, store: &str, auth: &str) {
    println!(
        r#"
    ____  ____  _____
   / __ \/ __ \/ ___/
  / /_/ / / / /\__ \
 / ____/ /_/ /___/ /
/_/    \____//____/
    "#
    );
    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        store,
        auth,
        "Restaurant POS server v{}",
        env!("CARGO_PKG_VERSION")
    );
}
