use thiserror::Error;

use crate::auth::AuthError;
use crate::db::DbError;

/// 服务启动/运行错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("数据存储初始化失败: {0}")]
    Db(#[from] DbError),

    #[error("认证服务初始化失败: {0}")]
    Auth(#[from] AuthError),
}

pub type Result<T> = std::result::Result<T, ServerError>;
