//! Admin Handlers

use axum::{Extension, Json, extract::State};
use shared::client::{AdminStatus, BootstrapAdminRequest};
use shared::models::{CatalogImportReport, CatalogSnapshot, User};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;
use crate::services::{CatalogService, StaffService};
use crate::utils::AppResult;

/// GET /api/admin/status - 是否已有管理员
pub async fn status(State(state): State<ServerState>) -> AppResult<Json<AdminStatus>> {
    let has_admin = StaffService::new(state.get_db()).has_admin().await?;
    Ok(Json(AdminStatus { has_admin }))
}

/// POST /api/admin/bootstrap - 创建首个管理员
pub async fn bootstrap(
    State(state): State<ServerState>,
    Json(request): Json<BootstrapAdminRequest>,
) -> AppResult<Json<User>> {
    let user = StaffService::new(state.get_db())
        .create_initial_admin(request, state.auth.as_ref())
        .await?;
    security_log!("INFO", "admin_bootstrapped", user_id = user.id.clone(), email = user.email.clone());
    Ok(Json(user))
}

/// POST /api/admin/import - 批量导入菜单
pub async fn import_catalog(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(snapshot): Json<CatalogSnapshot>,
) -> AppResult<Json<CatalogImportReport>> {
    let report = CatalogService::new(state.get_db()).import_catalog(snapshot).await?;
    tracing::info!(
        by = %user.id,
        categories = report.categories,
        menu_items = report.menu_items,
        "Catalog imported"
    );
    Ok(Json(report))
}
