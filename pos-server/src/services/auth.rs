//! Staff sign-in
//!
//! 1. 托管认证服务校验邮箱密码
//! 2. 读取 `users` 资料并校验角色
//! 3. 签发 JWT，返回落地区域

use serde_json::Map;
use shared::client::{CurrentUserResponse, Landing, LoginRequest, LoginResponse};
use shared::error::ErrorCode;
use shared::models::{User, UserRole};
use shared::util::now;

use crate::auth::{AuthProvider, CurrentUser, JwtService, get_default_permissions, map_sign_in_error};
use crate::db::Db;
use crate::security_log;
use crate::services::orders::timestamp;
use crate::utils::{AppError, AppResult};

pub struct AuthService<'a> {
    db: &'a Db,
    provider: &'a dyn AuthProvider,
    jwt: &'a JwtService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a Db, provider: &'a dyn AuthProvider, jwt: &'a JwtService) -> Self {
        Self { db, provider, jwt }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let email = request.email.trim();
        if email.is_empty() || request.password.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "Please enter both email and password",
            ));
        }

        let identity = self
            .provider
            .sign_in(email, &request.password)
            .await
            .map_err(|e| {
                security_log!("WARN", "login_failed", email = email.to_string(), error = e.to_string());
                map_sign_in_error(e)
            })?;

        let user: User = self
            .db
            .get(&identity.user_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::UserNotRegistered))?;

        if !user.role.is_staff() {
            security_log!(
                "WARN",
                "login_role_denied",
                user_id = user.id.clone(),
                user_role = user.role.as_str()
            );
            return Err(AppError::new(ErrorCode::RoleNotAllowed));
        }

        let mut fields = Map::new();
        fields.insert("lastActive".into(), timestamp(now()));
        let user: User = self.db.patch(&user.id, fields).await?.unwrap_or(user);

        let permissions = get_default_permissions(user.role);
        let token = self
            .jwt
            .generate_token(&user, &permissions)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

        let landing = if user.role == UserRole::Admin {
            Landing::Admin
        } else {
            Landing::Staff
        };

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(LoginResponse {
            token,
            user,
            landing,
        })
    }

    /// 当前登录用户资料
    pub async fn me(&self, current: &CurrentUser) -> AppResult<CurrentUserResponse> {
        let user: User = self
            .db
            .get(&current.id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::UserNotRegistered))?;
        Ok(CurrentUserResponse {
            user,
            permissions: current.permissions.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtConfig, MemoryAuthProvider};
    use crate::db::{CaseMode, MemoryStore};
    use std::sync::Arc;

    async fn setup() -> (Db, MemoryAuthProvider, JwtService) {
        let db = Db::new(Arc::new(MemoryStore::new()), CaseMode::Convert);
        let provider = MemoryAuthProvider::new();
        for (id, role) in [("u-admin", UserRole::Admin), ("u-kitchen", UserRole::Kitchen), ("u-guest", UserRole::Customer)] {
            let email = format!("{}@pos.test", role.as_str());
            db.put(&User {
                id: id.into(),
                email: email.clone(),
                name: id.into(),
                role,
                bio: None,
                phone_number: None,
                profile_image: None,
                joined_at: None,
                last_active: None,
            })
            .await
            .unwrap();
            provider.register(id, &email, "pass-1234").await.unwrap();
        }
        provider.register("u-orphan", "orphan@pos.test", "pass-1234").await.unwrap();
        let jwt = JwtService::with_config(JwtConfig::with_secret("auth-service-test-secret-0123456789"));
        (db, provider, jwt)
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_login_landing_and_last_active() {
        let (db, provider, jwt) = setup().await;
        let svc = AuthService::new(&db, &provider, &jwt);

        let admin = svc.login(login("admin@pos.test", "pass-1234")).await.unwrap();
        assert_eq!(admin.landing, Landing::Admin);
        assert!(admin.user.last_active.is_some());
        let claims = jwt.validate_token(&admin.token).unwrap();
        assert_eq!(claims.sub, "u-admin");
        assert_eq!(claims.permissions, "all");

        let kitchen = svc.login(login("kitchen@pos.test", "pass-1234")).await.unwrap();
        assert_eq!(kitchen.landing, Landing::Staff);
    }

    #[tokio::test]
    async fn test_login_errors() {
        let (db, provider, jwt) = setup().await;
        let svc = AuthService::new(&db, &provider, &jwt);

        let err = svc.login(login("", "pass-1234")).await.unwrap_err();
        assert_eq!(err.message, "Please enter both email and password");

        let err = svc.login(login("admin@pos.test", "wrong")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
        assert_eq!(err.message, "Invalid email or password");

        let err = svc.login(login("customer@pos.test", "pass-1234")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RoleNotAllowed);
        assert_eq!(err.message, "Unauthorized role");

        let err = svc.login(login("orphan@pos.test", "pass-1234")).await.unwrap_err();
        assert_eq!(err.message, "User not found in database");
    }
}
