//! Data store errors

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Data store error types
#[derive(Debug, Clone, Error)]
pub enum DbError {
    /// Backend unreachable (DNS, refused, reset)
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Non-success HTTP status from the backend
    #[error("Backend returned {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body could not be decoded into the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Row rejected before reaching the backend
    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

impl DbError {
    /// 可重试的瞬时错误: 连接失败、超时、408、429、5xx
    pub fn is_transient(&self) -> bool {
        match self {
            DbError::Connection(_) | DbError::Timeout(_) => true,
            DbError::Http { status, .. } => {
                *status == 408 || *status == 429 || (500..600).contains(status)
            }
            DbError::Decode(_) | DbError::InvalidRow(_) => false,
        }
    }
}

impl From<reqwest::Error> for DbError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DbError::Timeout(err.to_string())
        } else if err.is_decode() {
            DbError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            DbError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            DbError::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::Decode(err.to_string())
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match &err {
            DbError::Connection(_) => AppError::with_message(ErrorCode::NetworkError, err.to_string()),
            DbError::Timeout(_) => AppError::with_message(ErrorCode::TimeoutError, err.to_string()),
            DbError::Http { status, .. } if *status >= 500 => {
                AppError::with_message(ErrorCode::UpstreamError, err.to_string())
            }
            _ => AppError::database(err.to_string()),
        }
    }
}

/// Result type for data store operations
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> DbError {
        DbError::Http {
            status,
            message: "x".into(),
        }
    }

    #[test]
    fn test_transient_classification() {
        assert!(DbError::Connection("refused".into()).is_transient());
        assert!(DbError::Timeout("slow".into()).is_transient());
        assert!(http(408).is_transient());
        assert!(http(429).is_transient());
        assert!(http(500).is_transient());
        assert!(http(503).is_transient());

        assert!(!http(400).is_transient());
        assert!(!http(404).is_transient());
        assert!(!http(409).is_transient());
        assert!(!DbError::Decode("bad json".into()).is_transient());
    }

    #[test]
    fn test_into_app_error() {
        assert_eq!(AppError::from(http(503)).code, ErrorCode::UpstreamError);
        assert_eq!(AppError::from(http(409)).code, ErrorCode::DatabaseError);
        assert_eq!(
            AppError::from(DbError::Timeout("t".into())).code,
            ErrorCode::TimeoutError
        );
    }
}
