//! 管理员路由
//!
//! | 路径 | 方法 | 权限 |
//! |------|------|------|
//! | /api/admin/status | GET | 公开 |
//! | /api/admin/bootstrap | POST | 公开 (仅无管理员时) |
//! | /api/admin/import | POST | 管理员 |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let public_routes = Router::new()
        .route("/api/admin/status", get(handler::status))
        .route("/api/admin/bootstrap", post(handler::bootstrap));

    let admin_routes = Router::new()
        .route("/api/admin/import", post(handler::import_catalog))
        .layer(middleware::from_fn(require_admin));

    public_routes.merge(admin_routes)
}
