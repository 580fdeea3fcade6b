//! Order status lifecycle
//!
//! ```text
//! pending → preparing → ready → delivered
//! ```
//!
//! Only forward single steps are allowed. Same-state and backward moves are
//! rejected.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::OrderStatus;

/// Allowed next statuses for each status
pub fn allowed_transitions(from: OrderStatus) -> &'static [OrderStatus] {
    match from {
        OrderStatus::Pending => &[OrderStatus::Preparing],
        OrderStatus::Preparing => &[OrderStatus::Ready],
        OrderStatus::Ready => &[OrderStatus::Delivered],
        OrderStatus::Delivered => &[],
    }
}

pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    allowed_transitions(from).contains(&to)
}

/// Check a transition, failing with `Invalid status transition from {from} to {to}`
pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> AppResult<()> {
    if can_transition(from, to) {
        return Ok(());
    }
    Err(AppError::with_message(
        ErrorCode::InvalidStatusTransition,
        format!("Invalid status transition from {from} to {to}"),
    )
    .with_detail("from", from.as_str())
    .with_detail("to", to.as_str()))
}
