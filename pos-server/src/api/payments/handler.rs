//! Payment API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::models::{Payment, PaymentCreate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::PaymentService;
use crate::utils::AppResult;

/// GET /api/orders/:id/payments
pub async fn list(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Vec<Payment>>> {
    let payments = PaymentService::new(state.get_db()).list_for_order(&order_id).await?;
    Ok(Json(payments))
}

/// POST /api/orders/:id/payments - 收款
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(order_id): Path<String>,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<Json<Payment>> {
    let payment = PaymentService::new(state.get_db())
        .process(&order_id, payload, &user)
        .await?;
    Ok(Json(payment))
}
