//! Order API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use shared::models::{Order, OrderCreate, OrderFilter, OrderStatusUpdate, OrderWithItems, PosOrder};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::OrderService;
use crate::utils::AppResult;

/// GET /api/orders?status=&paymentStatus=&tableId= - 最新在前
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<OrderFilter>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = OrderService::new(state.get_db()).list(&filter).await?;
    Ok(Json(orders))
}

/// GET /api/orders/pos - 收银台未结清订单
pub async fn pos_orders(State(state): State<ServerState>) -> AppResult<Json<Vec<PosOrder>>> {
    let orders = OrderService::new(state.get_db()).pos_orders().await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - 订单及明细
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderWithItems>> {
    let order = OrderService::new(state.get_db()).get_with_items(&id).await?;
    Ok(Json(order))
}

/// POST /api/orders - 下单 (桌台置为占用)
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderWithItems>> {
    let order = OrderService::new(state.get_db()).create(payload, &user).await?;
    Ok(Json(order))
}

/// PUT /api/orders/:id/status
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = OrderService::new(state.get_db())
        .update_status(&id, payload.status, &user)
        .await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/complaint
pub async fn flag_complaint(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = OrderService::new(state.get_db()).flag_complaint(&id).await?;
    tracing::info!(order_id = %id, by = %user.id, "Complaint recorded");
    Ok(Json(order))
}
