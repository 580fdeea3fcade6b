//! Column name conversion between the API (camelCase) and the backend
//! (snake_case).
//!
//! Only top-level keys are renamed; nested JSON values such as
//! `customizations` or `splits` pass through untouched.

use serde_json::{Map, Value};

/// How record field names map onto backend column names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    /// camelCase fields ↔ snake_case columns
    #[default]
    Convert,
    /// Column names equal field names
    Preserve,
}

impl CaseMode {
    /// Field name → column name
    pub fn column(&self, field: &str) -> String {
        match self {
            CaseMode::Convert => camel_to_snake(field),
            CaseMode::Preserve => field.to_string(),
        }
    }

    /// Record object → backend row
    pub fn to_row(&self, fields: Map<String, Value>) -> Map<String, Value> {
        match self {
            CaseMode::Convert => fields
                .into_iter()
                .map(|(k, v)| (camel_to_snake(&k), v))
                .collect(),
            CaseMode::Preserve => fields,
        }
    }

    /// Backend row → record object
    pub fn from_row(&self, row: Map<String, Value>) -> Map<String, Value> {
        match self {
            CaseMode::Convert => row
                .into_iter()
                .map(|(k, v)| (snake_to_camel(&k), v))
                .collect(),
            CaseMode::Preserve => row,
        }
    }
}

/// `main_category_id` → `mainCategoryId`
pub fn snake_to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper = false;
    for c in s.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `mainCategoryId` → `main_category_id`
pub fn camel_to_snake(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("main_category_id"), "mainCategoryId");
        assert_eq!(snake_to_camel("id"), "id");
        assert_eq!(snake_to_camel("qr_code"), "qrCode");
    }

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("mainCategoryId"), "main_category_id");
        assert_eq!(camel_to_snake("order"), "order");
        assert_eq!(camel_to_snake("hasComplaints"), "has_complaints");
    }

    #[test]
    fn test_inverse_on_identifiers() {
        for column in ["waiter_staff_id", "completed_at", "total", "phone_number"] {
            assert_eq!(camel_to_snake(&snake_to_camel(column)), column);
        }
    }

    #[test]
    fn test_nested_values_untouched() {
        let fields = json!({
            "menuItemId": "m-1",
            "customizations": {"extraCheese": true, "spice_level": 2}
        });
        let Value::Object(fields) = fields else { unreachable!() };

        let row = CaseMode::Convert.to_row(fields);
        assert!(row.contains_key("menu_item_id"));
        assert_eq!(row["customizations"]["extraCheese"], true);
        assert_eq!(row["customizations"]["spice_level"], 2);

        let back = CaseMode::Convert.from_row(row);
        assert!(back.contains_key("menuItemId"));
        assert_eq!(back["customizations"]["spice_level"], 2);
    }

    #[test]
    fn test_preserve_mode() {
        let mut fields = Map::new();
        fields.insert("tableId".into(), json!("t-1"));
        let row = CaseMode::Preserve.to_row(fields);
        assert!(row.contains_key("tableId"));
        assert_eq!(CaseMode::Preserve.column("tableId"), "tableId");
    }
}
