//! In-process row store
//!
//! Same merge-on-id semantics as the hosted backend. Used in development
//! when no backend is configured, and by tests.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use super::error::{DbError, DbResult};
use super::store::{Row, RowQuery, RowStore, SortOrder};

#[derive(Debug, Default)]
pub struct MemoryStore {
    /// table -> rows in insertion order
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rows in a table
    pub fn count(&self, table: &str) -> usize {
        self.tables.read().get(table).map(Vec::len).unwrap_or(0)
    }

    fn row_id(row: &Row) -> Option<&str> {
        row.get("id").and_then(Value::as_str)
    }

    fn merge_into(rows: &mut Vec<Row>, mut row: Row) -> Row {
        if Self::row_id(&row).is_none() {
            row.insert("id".into(), Value::String(shared::util::new_id()));
        }
        let id = Self::row_id(&row).map(str::to_owned);

        match rows
            .iter_mut()
            .find(|existing| Self::row_id(existing) == id.as_deref())
        {
            Some(existing) => {
                for (k, v) in row {
                    existing.insert(k, v);
                }
                existing.clone()
            }
            None => {
                rows.push(row.clone());
                row
            }
        }
    }
}

/// Ordering used for `order_by`: null < bool < number < string
fn compare_values(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[async_trait]
impl RowStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, table: &str, id: &str) -> DbResult<Option<Row>> {
        let tables = self.tables.read();
        Ok(tables
            .get(table)
            .and_then(|rows| rows.iter().find(|r| Self::row_id(r) == Some(id)))
            .cloned())
    }

    async fn get_all(&self, table: &str) -> DbResult<Vec<Row>> {
        Ok(self.tables.read().get(table).cloned().unwrap_or_default())
    }

    async fn query(&self, table: &str, query: &RowQuery) -> DbResult<Vec<Row>> {
        let mut rows: Vec<Row> = {
            let tables = self.tables.read();
            tables
                .get(table)
                .map(|rows| {
                    rows.iter()
                        .filter(|r| query.filters.iter().all(|f| f.matches(r)))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        };

        if let Some((column, order)) = &query.order_by {
            rows.sort_by(|a, b| {
                let a = a.get(column).unwrap_or(&Value::Null);
                let b = b.get(column).unwrap_or(&Value::Null);
                match order {
                    SortOrder::Asc => compare_values(a, b),
                    SortOrder::Desc => compare_values(b, a),
                }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn put(&self, table: &str, row: Row) -> DbResult<Row> {
        let mut tables = self.tables.write();
        let rows = tables.entry(table.to_string()).or_default();
        Ok(Self::merge_into(rows, row))
    }

    async fn upsert(&self, table: &str, rows: Vec<Row>) -> DbResult<Vec<Row>> {
        let mut tables = self.tables.write();
        let stored = tables.entry(table.to_string()).or_default();
        Ok(rows
            .into_iter()
            .map(|row| Self::merge_into(stored, row))
            .collect())
    }

    async fn patch(&self, table: &str, id: &str, fields: Row) -> DbResult<Option<Row>> {
        if fields.get("id").is_some_and(|v| v.as_str() != Some(id)) {
            return Err(DbError::InvalidRow("id cannot be changed".into()));
        }

        let mut tables = self.tables.write();
        let Some(existing) = tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|r| Self::row_id(r) == Some(id)))
        else {
            return Ok(None);
        };

        for (k, v) in fields {
            existing.insert(k, v);
        }
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, table: &str, id: &str) -> DbResult<()> {
        if let Some(rows) = self.tables.write().get_mut(table) {
            rows.retain(|r| Self::row_id(r) != Some(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn test_put_merges_on_id() {
        let store = MemoryStore::new();
        store
            .put("tables", row(json!({"id": "t-1", "number": 1, "status": "available"})))
            .await
            .unwrap();
        let merged = store
            .put("tables", row(json!({"id": "t-1", "status": "occupied"})))
            .await
            .unwrap();

        assert_eq!(merged["number"], 1);
        assert_eq!(merged["status"], "occupied");
        assert_eq!(store.count("tables"), 1);
    }

    #[tokio::test]
    async fn test_put_generates_missing_id() {
        let store = MemoryStore::new();
        let stored = store.put("users", row(json!({"name": "Ann"}))).await.unwrap();
        assert!(stored["id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = MemoryStore::new();
        assert!(store.get("orders", "nope").await.unwrap().is_none());
        assert!(store.get_all("orders").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_filter_order_limit() {
        let store = MemoryStore::new();
        store
            .upsert(
                "menu_categories",
                vec![
                    row(json!({"id": "c", "order": 2, "type": "main"})),
                    row(json!({"id": "a", "order": 0, "type": "main"})),
                    row(json!({"id": "s", "order": 3, "type": "sub"})),
                    row(json!({"id": "b", "order": 1, "type": "main"})),
                ],
            )
            .await
            .unwrap();

        let query = RowQuery::new()
            .eq("type", "main")
            .order_by("order", SortOrder::Desc)
            .limit(2);
        let rows = store.query("menu_categories", &query).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[tokio::test]
    async fn test_patch_and_delete() {
        let store = MemoryStore::new();
        store
            .put("orders", row(json!({"id": "o-1", "status": "pending", "total": 9.5})))
            .await
            .unwrap();

        let patched = store
            .patch("orders", "o-1", row(json!({"status": "preparing"})))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(patched["status"], "preparing");
        assert_eq!(patched["total"], 9.5);

        assert!(
            store
                .patch("orders", "o-2", row(json!({"status": "ready"})))
                .await
                .unwrap()
                .is_none()
        );

        store.delete("orders", "o-1").await.unwrap();
        assert!(store.get("orders", "o-1").await.unwrap().is_none());
    }
}
