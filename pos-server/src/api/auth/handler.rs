//! Authentication Handlers

use axum::{Extension, Json, extract::State};
use shared::client::{CurrentUserResponse, LoginRequest, LoginResponse};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::AuthService;
use crate::utils::AppResult;

/// POST /api/auth/login - 员工登录
///
/// 托管认证校验后签发本服务的 JWT。
pub async fn login(
    State(state): State<ServerState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let service = AuthService::new(&state.db, state.auth.as_ref(), state.get_jwt_service());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<CurrentUserResponse>> {
    let service = AuthService::new(&state.db, state.auth.as_ref(), state.get_jwt_service());
    Ok(Json(service.me(&user).await?))
}

/// Logout handler
///
/// 令牌无状态，客户端丢弃即可；这里只记录日志。
pub async fn logout(Extension(user): Extension<CurrentUser>) -> AppResult<Json<()>> {
    tracing::info!(user_id = %user.id, email = %user.email, "User logged out");
    Ok(Json(()))
}
