//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, TableFilter, TableOverview,
    TableStatusUpdate,
};

use crate::core::ServerState;
use crate::services::TableService;
use crate::utils::AppResult;

fn service(state: &ServerState) -> TableService {
    TableService::new(state.get_db(), state.config.public_base_url.clone())
}

/// GET /api/tables?status=&q= - 按桌号排序的桌台
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<TableFilter>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = service(&state).list(&filter).await?;
    Ok(Json(tables))
}

/// GET /api/tables/overview - 桌台 + 当前订单 + 翻台效率
pub async fn overview(State(state): State<ServerState>) -> AppResult<Json<TableOverview>> {
    let overview = service(&state).overview().await?;
    Ok(Json(overview))
}

/// GET /api/tables/:id - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let table = service(&state).get(&id).await?;
    Ok(Json(table))
}

/// POST /api/tables - 创建桌台 (自动生成二维码地址)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    let table = service(&state).create(payload).await?;
    Ok(Json(table))
}

/// PUT /api/tables/:id - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    let table = service(&state).update(&id, payload).await?;
    Ok(Json(table))
}

/// PUT /api/tables/:id/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TableStatusUpdate>,
) -> AppResult<Json<DiningTable>> {
    let table = service(&state).set_status(&id, payload.status).await?;
    Ok(Json(table))
}

/// DELETE /api/tables/:id - 删除桌台 (有进行中订单时拒绝)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    service(&state).delete(&id).await?;
    Ok(Json(true))
}
