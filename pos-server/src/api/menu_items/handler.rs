//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuItemWithCategories};

use crate::core::ServerState;
use crate::services::CatalogService;
use crate::utils::AppResult;

/// GET /api/menu-items - 全部菜品 (附分类)
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<MenuItemWithCategories>>> {
    let items = CatalogService::new(state.get_db()).list_menu_items().await?;
    Ok(Json(items))
}

/// GET /api/menu-items/available - 可点菜品
pub async fn list_available(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<MenuItemWithCategories>>> {
    let items = CatalogService::new(state.get_db()).list_available_items().await?;
    Ok(Json(items))
}

/// GET /api/menu-items/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItemWithCategories>> {
    let item = CatalogService::new(state.get_db()).get_menu_item(&id).await?;
    Ok(Json(item))
}

/// POST /api/menu-items
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    let item = CatalogService::new(state.get_db()).create_menu_item(payload).await?;
    tracing::info!(id = %item.id, name = %item.name, "Menu item created");
    Ok(Json(item))
}

/// PUT /api/menu-items/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    let item = CatalogService::new(state.get_db())
        .update_menu_item(&id, payload)
        .await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    CatalogService::new(state.get_db()).delete_menu_item(&id).await?;
    Ok(Json(true))
}
