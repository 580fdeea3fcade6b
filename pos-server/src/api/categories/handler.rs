//! Menu Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{CategoryCreate, CategoryMove, CategoryUpdate, MenuCategory};

use crate::core::ServerState;
use crate::services::CatalogService;
use crate::utils::AppResult;

/// GET /api/categories - 按 order 排序的全部分类
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuCategory>>> {
    let categories = CatalogService::new(state.get_db()).list_categories().await?;
    Ok(Json(categories))
}

/// GET /api/categories/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuCategory>> {
    let category = CatalogService::new(state.get_db()).get_category(&id).await?;
    Ok(Json(category))
}

/// POST /api/categories - 创建分类 (排在末尾)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<MenuCategory>> {
    let category = CatalogService::new(state.get_db()).create_category(payload).await?;
    Ok(Json(category))
}

/// PUT /api/categories/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<MenuCategory>> {
    let category = CatalogService::new(state.get_db())
        .update_category(&id, payload)
        .await?;
    Ok(Json(category))
}

/// DELETE /api/categories/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    CatalogService::new(state.get_db()).delete_category(&id).await?;
    Ok(Json(true))
}

/// POST /api/categories/:id/move - 上移/下移，返回重排后的列表
pub async fn move_category(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryMove>,
) -> AppResult<Json<Vec<MenuCategory>>> {
    let categories = CatalogService::new(state.get_db())
        .move_category(&id, payload.direction)
        .await?;
    Ok(Json(categories))
}
