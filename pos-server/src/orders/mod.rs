//! 订单领域
//!
//! - [`status`] - 状态流转校验 (pending → preparing → ready → delivered)
//! - [`money`] - 金额计算 (rust_decimal)

pub mod money;
pub mod status;

pub use status::{allowed_transitions, can_transition, validate_transition};
