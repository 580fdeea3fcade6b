//! Staff API Handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::models::StaffMetrics;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::StaffService;
use crate::utils::AppResult;

/// GET /api/staff/me/metrics - 当前员工绩效
pub async fn my_metrics(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<StaffMetrics>> {
    let metrics = StaffService::new(state.get_db()).metrics(&user.id).await?;
    Ok(Json(metrics))
}

/// GET /api/staff/:id/metrics
pub async fn metrics(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<StaffMetrics>> {
    let metrics = StaffService::new(state.get_db()).metrics(&id).await?;
    Ok(Json(metrics))
}
