//! 统一错误处理
//!
//! 错误类型定义在 `shared::error`，此处重新导出供 handler 使用。
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Order"))
//!
//! // 返回带错误码的业务错误
//! Err(AppError::new(ErrorCode::TableHasOrders))
//! ```

pub use shared::error::{ApiResponse, AppError, ErrorCategory, ErrorCode};
