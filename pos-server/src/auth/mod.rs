//! 认证授权模块
//!
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`AuthProvider`] - 邮箱密码登录 (托管服务 / 进程内)
//! - [`require_auth`] - 认证中间件
//! - [`require_permission`] - 权限检查中间件

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod permissions;
pub mod provider;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth, require_permission};
pub use permissions::get_default_permissions;
pub use provider::{
    AuthError, AuthIdentity, AuthProvider, MemoryAuthProvider, RestAuthProvider,
    map_sign_in_error,
};
