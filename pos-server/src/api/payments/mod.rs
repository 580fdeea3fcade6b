//! Payment API 模块
//!
//! 收款挂在订单路径下: `/api/orders/{id}/payments`

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/api/orders/{id}/payments", get(handler::list))
        .layer(middleware::from_fn(require_permission("payments:read")));

    let create_routes = Router::new()
        .route("/api/orders/{id}/payments", post(handler::create))
        .layer(middleware::from_fn(require_permission("payments:create")));

    read_routes.merge(create_routes)
}
