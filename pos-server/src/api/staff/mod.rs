//! 员工绩效路由

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let self_routes = Router::new().route("/api/staff/me/metrics", get(handler::my_metrics));

    let read_routes = Router::new()
        .route("/api/staff/{id}/metrics", get(handler::metrics))
        .layer(middleware::from_fn(require_permission("staff:read")));

    self_routes.merge(read_routes)
}
