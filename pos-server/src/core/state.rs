use std::sync::Arc;

use crate::auth::{AuthProvider, JwtService, MemoryAuthProvider, RestAuthProvider};
use crate::core::{Config, Result, seed};
use crate::db::{Db, MemoryStore, RestStore};

/// 服务器状态 - 持有所有服务的共享引用
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Db | 数据访问门面 (托管后端或内存) |
/// | auth | Arc<dyn AuthProvider> | 邮箱密码登录 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Db,
    pub auth: Arc<dyn AuthProvider>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: Db, auth: Arc<dyn AuthProvider>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            auth,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// - 配置了 `DATA_API_URL`: 托管后端 + 托管认证
    /// - 未配置且非生产环境: 内存存储 + 演示数据
    /// - 生产环境缺少 `DATA_API_URL` 或 `JWT_SECRET`: 启动失败
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.validate()?;
        match &config.data_api_url {
            Some(url) => {
                let store = RestStore::new(
                    url.clone(),
                    config.data_api_key.clone(),
                    config.request_timeout(),
                    config.retry_policy(),
                )?;
                let auth_url = config.auth_api_url.clone().unwrap_or_else(|| url.clone());
                let auth = RestAuthProvider::new(
                    auth_url,
                    config.data_api_key.clone(),
                    config.request_timeout(),
                )?;
                tracing::info!(backend = %url, "Using hosted data store");
                Ok(Self::new(
                    config.clone(),
                    Db::new(Arc::new(store), config.case_mode()),
                    Arc::new(auth),
                ))
            }
            None => {
                tracing::warn!("DATA_API_URL not set, using in-memory store with demo data");
                let state = Self::in_memory(config.clone());
                seed::seed_demo_data(&state).await?;
                Ok(state)
            }
        }
    }

    /// 内存存储 + 内存认证 (无数据)
    pub fn in_memory(config: Config) -> Self {
        let db = Db::new(Arc::new(MemoryStore::new()), config.case_mode());
        Self::new(config, db, Arc::new(MemoryAuthProvider::new()))
    }

    /// 获取数据访问门面
    pub fn get_db(&self) -> Db {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}
