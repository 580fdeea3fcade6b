//! Order API 模块
//!
//! 读取、下单、状态流转分别由不同权限保护。

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/pos", get(handler::pos_orders))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission("orders:read")));

    let create_routes = Router::new()
        .route("/", post(handler::create))
        .layer(middleware::from_fn(require_permission("orders:create")));

    let status_routes = Router::new()
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/complaint", post(handler::flag_complaint))
        .layer(middleware::from_fn(require_permission("orders:status")));

    read_routes.merge(create_routes).merge(status_routes)
}
