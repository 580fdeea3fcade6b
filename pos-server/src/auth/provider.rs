//! 登录凭证校验
//!
//! 密码校验委托给托管认证服务 (`RestAuthProvider`)，开发/测试环境使用
//! 进程内 argon2 实现 (`MemoryAuthProvider`)。

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// 认证服务返回的身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    /// 对应 `users.id`
    pub user_id: String,
    pub email: String,
}

/// 认证服务错误
#[derive(Debug, Error)]
pub enum AuthError {
    /// 认证服务拒绝 (消息原样保留，供 [`map_sign_in_error`] 映射)
    #[error("{0}")]
    Rejected(String),

    #[error("Auth service unreachable: {0}")]
    Network(String),

    #[error("Credential registration is managed by the auth service")]
    Unsupported,

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

/// 将认证服务错误映射为面向用户的错误
///
/// | 服务消息包含 | 返回 |
/// |--------------|------|
/// | invalid login credentials | Invalid email or password |
/// | email not confirmed | Please verify your email address |
/// | email logins are disabled | Email login is currently disabled |
pub fn map_sign_in_error(err: AuthError) -> AppError {
    match err {
        AuthError::Rejected(message) => {
            let lower = message.to_lowercase();
            if lower.contains("invalid login credentials") {
                AppError::new(ErrorCode::InvalidCredentials)
            } else if lower.contains("email not confirmed") {
                AppError::new(ErrorCode::EmailNotConfirmed)
            } else if lower.contains("email logins are disabled") {
                AppError::new(ErrorCode::EmailLoginDisabled)
            } else {
                AppError::with_message(ErrorCode::InvalidCredentials, "Invalid login credentials")
            }
        }
        AuthError::Network(msg) => AppError::with_message(ErrorCode::NetworkError, msg),
        other => AppError::internal(other.to_string()),
    }
}

#[async_trait]
pub trait AuthProvider: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// 邮箱密码登录
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthIdentity, AuthError>;

    /// 为已有用户登记密码 (托管服务返回 [`AuthError::Unsupported`])
    async fn register(&self, user_id: &str, email: &str, password: &str) -> Result<(), AuthError>;
}

// =============================================================================
// Hosted auth service
// =============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Error body variants of the hosted auth service
#[derive(Debug, Deserialize)]
struct TokenError {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// `POST {base}/auth/v1/token?grant_type=password`
#[derive(Debug, Clone)]
pub struct RestAuthProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestAuthProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl AuthProvider for RestAuthProvider {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthIdentity, AuthError> {
        let url = format!("{}/auth/v1/token", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<TokenError>(&text)
                .ok()
                .and_then(|e| e.error_description.or(e.msg).or(e.message))
                .unwrap_or_else(|| format!("Auth service returned {status}"));
            return Err(AuthError::Rejected(message));
        }

        let body: TokenResponse = serde_json::from_str(&text)
            .map_err(|e| AuthError::Rejected(format!("Unexpected auth response: {e}")))?;
        Ok(AuthIdentity {
            user_id: body.user.id,
            email: body.user.email.unwrap_or_else(|| email.to_string()),
        })
    }

    async fn register(&self, _user_id: &str, _email: &str, _password: &str) -> Result<(), AuthError> {
        Err(AuthError::Unsupported)
    }
}

// =============================================================================
// In-process provider
// =============================================================================

#[derive(Debug, Clone)]
struct Credential {
    user_id: String,
    hash: String,
}

/// 进程内凭证表 (email → argon2 hash)
#[derive(Debug, Default)]
pub struct MemoryAuthProvider {
    credentials: RwLock<HashMap<String, Credential>>,
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verify password using argon2
    pub fn verify_password(password: &str, hash: &str) -> bool {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthIdentity, AuthError> {
        let credential = self.credentials.read().get(&Self::key(email)).cloned();
        match credential {
            Some(c) if Self::verify_password(password, &c.hash) => Ok(AuthIdentity {
                user_id: c.user_id,
                email: email.to_string(),
            }),
            _ => Err(AuthError::Rejected("Invalid login credentials".into())),
        }
    }

    async fn register(&self, user_id: &str, email: &str, password: &str) -> Result<(), AuthError> {
        let hash = Self::hash_password(password).map_err(|e| AuthError::Hash(e.to_string()))?;
        self.credentials.write().insert(
            Self::key(email),
            Credential {
                user_id: user_id.to_string(),
                hash,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        let err = map_sign_in_error(AuthError::Rejected("Invalid login credentials".into()));
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
        assert_eq!(err.message, "Invalid email or password");

        let err = map_sign_in_error(AuthError::Rejected("Email not confirmed".into()));
        assert_eq!(err.message, "Please verify your email address");

        let err = map_sign_in_error(AuthError::Rejected("Email logins are disabled".into()));
        assert_eq!(err.message, "Email login is currently disabled");

        let err = map_sign_in_error(AuthError::Rejected("something else".into()));
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
        assert_eq!(err.message, "Invalid login credentials");

        let err = map_sign_in_error(AuthError::Network("refused".into()));
        assert_eq!(err.code, ErrorCode::NetworkError);
    }

    #[tokio::test]
    async fn test_memory_provider_sign_in() {
        let provider = MemoryAuthProvider::new();
        provider
            .register("u-1", "Chef@Bistro.com", "s3cret-pass")
            .await
            .unwrap();

        let identity = provider.sign_in("chef@bistro.com", "s3cret-pass").await.unwrap();
        assert_eq!(identity.user_id, "u-1");

        let err = provider.sign_in("chef@bistro.com", "wrong").await.unwrap_err();
        assert_eq!(
            map_sign_in_error(err).message,
            "Invalid email or password"
        );

        assert!(provider.sign_in("nobody@bistro.com", "x").await.is_err());
    }

    #[tokio::test]
    async fn test_rest_provider_cannot_register() {
        let provider =
            RestAuthProvider::new("http://localhost:1", "key", Duration::from_secs(1)).unwrap();
        assert!(matches!(
            provider.register("u", "e@x.io", "p").await,
            Err(AuthError::Unsupported)
        ));
    }
}
