//! Catalog Service
//!
//! 菜单分类与菜品维护

use std::collections::HashMap;

use shared::error::ErrorCode;
use shared::models::{
    CatalogImportReport, CatalogSnapshot, CategoryCreate, CategoryType, CategoryUpdate,
    MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate, MenuItemWithCategories, MoveDirection,
};
use shared::util::{new_id, now};

use crate::db::{Db, RowQuery, SortOrder};
use crate::orders::money::{MAX_PRICE, require_finite};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Db,
}

impl CatalogService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// 按 `order` 升序
    pub async fn list_categories(&self) -> AppResult<Vec<MenuCategory>> {
        let mut categories: Vec<MenuCategory> = self
            .db
            .find(RowQuery::new().order_by("order", SortOrder::Asc))
            .await?;
        // stable tie-break for rows sharing an order value
        categories.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        Ok(categories)
    }

    pub async fn get_category(&self, id: &str) -> AppResult<MenuCategory> {
        self.db
            .get(id)
            .await?
            .ok_or_else(|| AppError::category_not_found(id))
    }

    /// 新分类追加到末尾 (`order` = 当前数量)
    pub async fn create_category(&self, data: CategoryCreate) -> AppResult<MenuCategory> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        self.check_parent(None, data.category_type, data.parent_id.as_deref())
            .await?;

        let existing: Vec<MenuCategory> = self.db.get_all().await?;
        let category = MenuCategory {
            id: new_id(),
            name: data.name.trim().to_string(),
            order: existing.len() as i32,
            parent_id: parent_for(data.category_type, data.parent_id),
            category_type: data.category_type,
            created_at: Some(now()),
        };
        Ok(self.db.put(&category).await?)
    }

    pub async fn update_category(&self, id: &str, data: CategoryUpdate) -> AppResult<MenuCategory> {
        let mut category = self.get_category(id).await?;

        if let Some(name) = data.name {
            validate_required_text(&name, "name", MAX_NAME_LEN)?;
            category.name = name.trim().to_string();
        }
        if let Some(category_type) = data.category_type {
            category.category_type = category_type;
        }
        // 空字符串清除父级；未提供父级时，改为 main 会丢弃原父级
        match data.parent_id {
            Some(parent_id) if parent_id.trim().is_empty() => category.parent_id = None,
            Some(parent_id) => category.parent_id = Some(parent_id),
            None => {
                category.parent_id = parent_for(category.category_type, category.parent_id.take())
            }
        }
        self.check_parent(
            Some(id),
            category.category_type,
            category.parent_id.as_deref(),
        )
        .await?;

        Ok(self.db.put(&category).await?)
    }

    pub async fn delete_category(&self, id: &str) -> AppResult<()> {
        self.get_category(id).await?;
        self.db.delete::<MenuCategory>(id).await?;
        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }

    /// 与相邻分类交换 `order`，首尾为空操作
    pub async fn move_category(
        &self,
        id: &str,
        direction: MoveDirection,
    ) -> AppResult<Vec<MenuCategory>> {
        let mut categories = self.list_categories().await?;
        let index = categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AppError::category_not_found(id))?;

        let neighbor = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|i| *i < categories.len()),
        };
        let Some(neighbor) = neighbor else {
            return Ok(categories);
        };

        let (a, b) = (categories[index].order, categories[neighbor].order);
        // equal values would make the swap a no-op, so fall back to positions
        let (a, b) = if a == b {
            (index as i32, neighbor as i32)
        } else {
            (a, b)
        };
        categories[index].order = b;
        categories[neighbor].order = a;

        let changed = [categories[index].clone(), categories[neighbor].clone()];
        self.db.upsert_many(&changed).await?;

        categories.swap(index, neighbor);
        Ok(categories)
    }

    /// `sub` 必须挂在已存在的 `main` 下；`main` 不允许有父级
    async fn check_parent(
        &self,
        self_id: Option<&str>,
        category_type: CategoryType,
        parent_id: Option<&str>,
    ) -> AppResult<()> {
        match (category_type, parent_id) {
            (CategoryType::Main, Some(_)) => Err(AppError::with_message(
                ErrorCode::CategoryParentInvalid,
                "Main categories cannot have a parent",
            )),
            (CategoryType::Main, None) => Ok(()),
            (CategoryType::Sub, None) => Err(AppError::with_message(
                ErrorCode::CategoryParentInvalid,
                "Sub categories require a parent main category",
            )),
            (CategoryType::Sub, Some(parent_id)) => {
                if self_id == Some(parent_id) {
                    return Err(AppError::with_message(
                        ErrorCode::CategoryParentInvalid,
                        "A category cannot be its own parent",
                    ));
                }
                let parent: Option<MenuCategory> = self.db.get(parent_id).await?;
                match parent {
                    Some(p) if p.category_type == CategoryType::Main => Ok(()),
                    Some(_) => Err(AppError::with_message(
                        ErrorCode::CategoryParentInvalid,
                        "Parent must be a main category",
                    )
                    .with_detail("parentId", parent_id)),
                    None => Err(AppError::with_message(
                        ErrorCode::CategoryParentInvalid,
                        format!("Parent category {parent_id} not found"),
                    )
                    .with_detail("parentId", parent_id)),
                }
            }
        }
    }

    // =========================================================================
    // Menu items
    // =========================================================================

    /// 全部菜品，附带主/子分类
    pub async fn list_menu_items(&self) -> AppResult<Vec<MenuItemWithCategories>> {
        let items: Vec<MenuItem> = self.db.get_all().await?;
        self.join_categories(items).await
    }

    /// 仅上架菜品
    pub async fn list_available_items(&self) -> AppResult<Vec<MenuItemWithCategories>> {
        let items: Vec<MenuItem> = self.db.find(RowQuery::new().eq("available", true)).await?;
        self.join_categories(items).await
    }

    pub async fn get_menu_item(&self, id: &str) -> AppResult<MenuItemWithCategories> {
        let item = self.find_menu_item(id).await?;
        let mut joined = self.join_categories(vec![item]).await?;
        joined
            .pop()
            .ok_or_else(|| AppError::menu_item_not_found(id))
    }

    pub async fn find_menu_item(&self, id: &str) -> AppResult<MenuItem> {
        self.db
            .get(id)
            .await?
            .ok_or_else(|| AppError::menu_item_not_found(id))
    }

    pub async fn create_menu_item(&self, data: MenuItemCreate) -> AppResult<MenuItem> {
        let item = MenuItem {
            id: new_id(),
            name: data.name.trim().to_string(),
            description: data.description,
            price: data.price,
            image: data.image,
            available: data.available.unwrap_or(true),
            customizations: data.customizations,
            main_category_id: data.main_category_id,
            sub_category_id: data.sub_category_id.filter(|s| !s.is_empty()),
            created_at: Some(now()),
        };
        self.validate_menu_item(&item).await?;
        Ok(self.db.put(&item).await?)
    }

    pub async fn update_menu_item(&self, id: &str, data: MenuItemUpdate) -> AppResult<MenuItem> {
        let mut item = self.find_menu_item(id).await?;

        if let Some(name) = data.name {
            item.name = name.trim().to_string();
        }
        if data.description.is_some() {
            item.description = data.description;
        }
        if let Some(price) = data.price {
            item.price = price;
        }
        if data.image.is_some() {
            item.image = data.image;
        }
        if let Some(available) = data.available {
            item.available = available;
        }
        if data.customizations.is_some() {
            item.customizations = data.customizations;
        }
        if let Some(main) = data.main_category_id {
            item.main_category_id = main;
        }
        if let Some(sub) = data.sub_category_id {
            // empty string clears the sub category
            item.sub_category_id = Some(sub).filter(|s| !s.is_empty());
        }

        self.validate_menu_item(&item).await?;
        Ok(self.db.put(&item).await?)
    }

    pub async fn delete_menu_item(&self, id: &str) -> AppResult<()> {
        self.find_menu_item(id).await?;
        self.db.delete::<MenuItem>(id).await?;
        tracing::info!(menu_item_id = %id, "Menu item deleted");
        Ok(())
    }

    async fn validate_menu_item(&self, item: &MenuItem) -> AppResult<()> {
        validate_required_text(&item.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&item.description, "description", MAX_NOTE_LEN)?;
        validate_optional_text(&item.image, "image", MAX_URL_LEN)?;

        require_finite(item.price, "price")?;
        if item.price < 0.0 || item.price > MAX_PRICE {
            return Err(AppError::with_message(
                ErrorCode::MenuItemInvalidPrice,
                format!("price must be between 0 and {MAX_PRICE}, got {}", item.price),
            ));
        }

        self.expect_category(&item.main_category_id, CategoryType::Main, "mainCategoryId")
            .await?;
        if let Some(sub) = &item.sub_category_id {
            self.expect_category(sub, CategoryType::Sub, "subCategoryId")
                .await?;
        }
        Ok(())
    }

    async fn expect_category(&self, id: &str, expected: CategoryType, field: &str) -> AppResult<()> {
        let category: Option<MenuCategory> = self.db.get(id).await?;
        match category {
            Some(c) if c.category_type == expected => Ok(()),
            Some(_) => Err(AppError::with_message(
                ErrorCode::MenuItemCategoryInvalid,
                format!("{field} must reference a {} category", type_name(expected)),
            )
            .with_detail("field", field)),
            None => Err(AppError::with_message(
                ErrorCode::MenuItemCategoryInvalid,
                format!("Category {id} not found"),
            )
            .with_detail("field", field)),
        }
    }

    async fn join_categories(&self, items: Vec<MenuItem>) -> AppResult<Vec<MenuItemWithCategories>> {
        let categories: HashMap<String, MenuCategory> = self
            .db
            .get_all::<MenuCategory>()
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        Ok(items
            .into_iter()
            .map(|item| MenuItemWithCategories {
                main_category: categories.get(&item.main_category_id).cloned(),
                sub_category: item
                    .sub_category_id
                    .as_ref()
                    .and_then(|id| categories.get(id))
                    .cloned(),
                item,
            })
            .collect())
    }

    // =========================================================================
    // Import
    // =========================================================================

    /// 批量导入本地菜单 (先分类后菜品，失败即停止)
    pub async fn import_catalog(&self, snapshot: CatalogSnapshot) -> AppResult<CatalogImportReport> {
        for category in &snapshot.categories {
            validate_required_text(&category.name, "category name", MAX_NAME_LEN)?;
        }
        for item in &snapshot.menu_items {
            validate_required_text(&item.name, "menu item name", MAX_NAME_LEN)?;
            require_finite(item.price, "price")?;
        }

        let categories = if snapshot.categories.is_empty() {
            0
        } else {
            self.db
                .upsert_many(&snapshot.categories)
                .await
                .map_err(|e| AppError::from(e).with_detail("stage", "categories"))?
                .len()
        };

        let menu_items = if snapshot.menu_items.is_empty() {
            0
        } else {
            self.db
                .upsert_many(&snapshot.menu_items)
                .await
                .map_err(|e| {
                    AppError::from(e)
                        .with_detail("stage", "menu_items")
                        .with_detail("categoriesImported", categories)
                })?
                .len()
        };

        tracing::info!(categories, menu_items, "Catalog imported");
        Ok(CatalogImportReport {
            categories,
            menu_items,
        })
    }
}

fn parent_for(category_type: CategoryType, parent_id: Option<String>) -> Option<String> {
    match category_type {
        CategoryType::Main => None,
        CategoryType::Sub => parent_id,
    }
}

fn type_name(category_type: CategoryType) -> &'static str {
    match category_type {
        CategoryType::Main => "main",
        CategoryType::Sub => "sub",
    }
}
