//! Typed record access
//!
//! [`Db`] converts between the shared models (camelCase JSON) and backend
//! rows according to its [`CaseMode`], and logs each call with its elapsed
//! time.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shared::models::{DiningTable, MenuCategory, MenuItem, Order, OrderItem, Payment, User};

use super::case::CaseMode;
use super::error::{DbError, DbResult};
use super::store::{Row, RowQuery, RowStore};

/// Model stored in a backend table
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    const TABLE: &'static str;

    fn id(&self) -> &str;
}

impl Record for MenuCategory {
    const TABLE: &'static str = "menu_categories";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for MenuItem {
    const TABLE: &'static str = "menu_items";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for DiningTable {
    const TABLE: &'static str = "tables";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Order {
    const TABLE: &'static str = "orders";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for OrderItem {
    const TABLE: &'static str = "order_items";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Payment {
    const TABLE: &'static str = "payments";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for User {
    const TABLE: &'static str = "users";
    fn id(&self) -> &str {
        &self.id
    }
}

/// 类型化数据访问门面 (Arc 共享，克隆成本低)
#[derive(Debug, Clone)]
pub struct Db {
    store: Arc<dyn RowStore>,
    case: CaseMode,
}

impl Db {
    pub fn new(store: Arc<dyn RowStore>, case: CaseMode) -> Self {
        Self { store, case }
    }

    pub fn store(&self) -> &Arc<dyn RowStore> {
        &self.store
    }

    pub fn backend(&self) -> &'static str {
        self.store.name()
    }

    fn encode<T: Serialize>(&self, value: &T) -> DbResult<Row> {
        match serde_json::to_value(value)? {
            Value::Object(fields) => Ok(self.case.to_row(fields)),
            other => Err(DbError::InvalidRow(format!("expected object, got {other}"))),
        }
    }

    fn decode<T: DeserializeOwned>(&self, row: Row) -> DbResult<T> {
        let fields = self.case.from_row(row);
        Ok(serde_json::from_value(Value::Object(fields))?)
    }

    fn decode_all<T: DeserializeOwned>(&self, rows: Vec<Row>) -> DbResult<Vec<T>> {
        rows.into_iter().map(|r| self.decode(r)).collect()
    }

    fn trace(op: &str, table: &str, started: Instant) {
        tracing::debug!(
            target: "db",
            op,
            table,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "data store call"
        );
    }

    /// Fetch by id (`None` when absent)
    pub async fn get<T: Record>(&self, id: &str) -> DbResult<Option<T>> {
        let started = Instant::now();
        let row = self.store.get(T::TABLE, id).await?;
        Self::trace("get", T::TABLE, started);
        row.map(|r| self.decode(r)).transpose()
    }

    pub async fn get_all<T: Record>(&self) -> DbResult<Vec<T>> {
        let started = Instant::now();
        let rows = self.store.get_all(T::TABLE).await?;
        Self::trace("get_all", T::TABLE, started);
        self.decode_all(rows)
    }

    /// Select with filters expressed in model field names
    pub async fn find<T: Record>(&self, query: RowQuery) -> DbResult<Vec<T>> {
        let started = Instant::now();
        let query = query.map_columns(|c| self.case.column(c));
        let rows = self.store.query(T::TABLE, &query).await?;
        Self::trace("query", T::TABLE, started);
        self.decode_all(rows)
    }

    /// Insert or merge by id
    pub async fn put<T: Record>(&self, record: &T) -> DbResult<T> {
        let started = Instant::now();
        let row = self.encode(record)?;
        let stored = self.store.put(T::TABLE, row).await?;
        Self::trace("put", T::TABLE, started);
        self.decode(stored)
    }

    /// Alias of [`Db::put`]
    pub async fn add<T: Record>(&self, record: &T) -> DbResult<T> {
        self.put(record).await
    }

    pub async fn upsert_many<T: Record>(&self, records: &[T]) -> DbResult<Vec<T>> {
        let started = Instant::now();
        let rows = records
            .iter()
            .map(|r| self.encode(r))
            .collect::<DbResult<Vec<_>>>()?;
        let stored = self.store.upsert(T::TABLE, rows).await?;
        Self::trace("upsert", T::TABLE, started);
        self.decode_all(stored)
    }

    /// Partial update; `fields` uses model field names
    pub async fn patch<T: Record>(&self, id: &str, fields: Map<String, Value>) -> DbResult<Option<T>> {
        let started = Instant::now();
        let row = self.case.to_row(fields);
        let stored = self.store.patch(T::TABLE, id, row).await?;
        Self::trace("patch", T::TABLE, started);
        stored.map(|r| self.decode(r)).transpose()
    }

    pub async fn delete<T: Record>(&self, id: &str) -> DbResult<()> {
        let started = Instant::now();
        self.store.delete(T::TABLE, id).await?;
        Self::trace("delete", T::TABLE, started);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use serde_json::json;
    use shared::models::{TableStatus, UserRole};

    fn memory_db() -> (Arc<MemoryStore>, Db) {
        let store = Arc::new(MemoryStore::new());
        let db = Db::new(store.clone(), CaseMode::Convert);
        (store, db)
    }

    fn table(id: &str, number: i32) -> DiningTable {
        DiningTable {
            id: id.into(),
            number,
            capacity: 4,
            qr_code: String::new(),
            status: TableStatus::Available,
        }
    }

    #[tokio::test]
    async fn test_put_stores_snake_case_columns() {
        let (store, db) = memory_db();
        db.put(&table("t-1", 3)).await.unwrap();

        let row = store.get("tables", "t-1").await.unwrap().unwrap();
        assert!(row.contains_key("qr_code"));
        assert!(!row.contains_key("qrCode"));

        let loaded: DiningTable = db.get("t-1").await.unwrap().unwrap();
        assert_eq!(loaded.number, 3);
    }

    #[tokio::test]
    async fn test_add_is_put() {
        let (_, db) = memory_db();
        db.add(&table("t-1", 1)).await.unwrap();
        db.add(&table("t-1", 2)).await.unwrap();
        let all: Vec<DiningTable> = db.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].number, 2);
    }

    #[tokio::test]
    async fn test_find_uses_field_names() {
        let (_, db) = memory_db();
        let user = User {
            id: "u-1".into(),
            email: "a@b.c".into(),
            name: "A".into(),
            role: UserRole::Admin,
            bio: None,
            phone_number: None,
            profile_image: None,
            joined_at: None,
            last_active: None,
        };
        db.put(&user).await.unwrap();

        let found: Vec<User> = db
            .find(RowQuery::new().eq("role", "admin").eq("phoneNumber", Value::Null))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_patch_with_field_names() {
        let (_, db) = memory_db();
        db.put(&table("t-1", 1)).await.unwrap();

        let mut fields = Map::new();
        fields.insert("status".into(), json!("occupied"));
        let patched: DiningTable = db.patch("t-1", fields).await.unwrap().unwrap();
        assert_eq!(patched.status, TableStatus::Occupied);

        db.delete::<DiningTable>("t-1").await.unwrap();
        assert!(db.get::<DiningTable>("t-1").await.unwrap().is_none());
    }
}
