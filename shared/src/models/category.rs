//! Menu Category Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category level: top-level `main` or nested `sub`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    #[default]
    Main,
    Sub,
}

/// Menu category entity (`menu_categories`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub id: String,
    pub name: String,
    /// Display position, ascending
    pub order: i32,
    /// Parent main category (sub categories only)
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub name: String,
    #[serde(rename = "type", default)]
    pub category_type: CategoryType,
    pub parent_id: Option<String>,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub category_type: Option<CategoryType>,
    pub parent_id: Option<String>,
}

/// Direction for reordering a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Move category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMove {
    pub direction: MoveDirection,
}
