//! Menu Item Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::category::MenuCategory;
use crate::util::null_to_default;

/// Menu item entity (`menu_items`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    /// `null` in the backend counts as unavailable
    #[serde(default, deserialize_with = "null_to_default")]
    pub available: bool,
    /// Free-form customization options, stored verbatim
    #[serde(default)]
    pub customizations: Option<Value>,
    pub main_category_id: String,
    #[serde(default)]
    pub sub_category_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Menu item joined with its categories
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemWithCategories {
    #[serde(flatten)]
    pub item: MenuItem,
    pub main_category: Option<MenuCategory>,
    pub sub_category: Option<MenuCategory>,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub available: Option<bool>,
    pub customizations: Option<Value>,
    pub main_category_id: String,
    pub sub_category_id: Option<String>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub available: Option<bool>,
    pub customizations: Option<Value>,
    pub main_category_id: Option<String>,
    pub sub_category_id: Option<String>,
}

/// Catalog snapshot used for bulk import
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub categories: Vec<MenuCategory>,
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
}

/// Result of a catalog import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogImportReport {
    pub categories: usize,
    pub menu_items: usize,
}
