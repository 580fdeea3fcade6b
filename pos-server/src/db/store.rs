//! Row-level store abstraction
//!
//! A row is a flat JSON object keyed by backend column names. Every table has
//! a string primary key in the `id` column.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::error::DbResult;

pub type Row = Map<String, Value>;

/// Column filter
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column = value` (`null` matches missing/null)
    Eq(String, Value),
    /// `column <> value`
    Neq(String, Value),
    /// `column IN (values)`
    In(String, Vec<Value>),
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq(c, _) | Filter::Neq(c, _) | Filter::In(c, _) => c,
        }
    }

    pub(crate) fn with_column(self, column: String) -> Self {
        match self {
            Filter::Eq(_, v) => Filter::Eq(column, v),
            Filter::Neq(_, v) => Filter::Neq(column, v),
            Filter::In(_, vs) => Filter::In(column, vs),
        }
    }

    /// In-process evaluation against a row
    pub fn matches(&self, row: &Row) -> bool {
        let value = row.get(self.column()).unwrap_or(&Value::Null);
        match self {
            Filter::Eq(_, expected) => value == expected,
            Filter::Neq(_, expected) => !value.is_null() && value != expected,
            Filter::In(_, expected) => expected.contains(value),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Filtered, ordered, limited select
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowQuery {
    pub filters: Vec<Filter>,
    pub order_by: Option<(String, SortOrder)>,
    pub limit: Option<usize>,
}

impl RowQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(column.into(), value.into()));
        self
    }

    pub fn neq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Neq(column.into(), value.into()));
        self
    }

    pub fn is_in<V: Into<Value>>(
        mut self,
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.filters.push(Filter::In(column.into(), values));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.order_by = Some((column.into(), order));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Rename every referenced column
    pub(crate) fn map_columns(self, f: impl Fn(&str) -> String) -> Self {
        Self {
            filters: self
                .filters
                .into_iter()
                .map(|filter| {
                    let column = f(filter.column());
                    filter.with_column(column)
                })
                .collect(),
            order_by: self.order_by.map(|(c, o)| (f(&c), o)),
            limit: self.limit,
        }
    }
}

/// Raw row operations on named tables
///
/// Implementations: [`super::RestStore`] (hosted backend) and
/// [`super::MemoryStore`] (in-process).
#[async_trait]
pub trait RowStore: Send + Sync + std::fmt::Debug {
    /// Short backend name for logs and health output
    fn name(&self) -> &'static str;

    async fn get(&self, table: &str, id: &str) -> DbResult<Option<Row>>;

    async fn get_all(&self, table: &str) -> DbResult<Vec<Row>>;

    async fn query(&self, table: &str, query: &RowQuery) -> DbResult<Vec<Row>>;

    /// Insert or merge one row by `id`, returning the stored row
    async fn put(&self, table: &str, row: Row) -> DbResult<Row>;

    /// Batch insert-or-merge
    async fn upsert(&self, table: &str, rows: Vec<Row>) -> DbResult<Vec<Row>>;

    /// Update the given columns of an existing row
    async fn patch(&self, table: &str, id: &str, fields: Row) -> DbResult<Option<Row>>;

    async fn delete(&self, table: &str, id: &str) -> DbResult<()>;
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

    #[test]
    fn test_filter_matches() {
        let r = row(json!({"status": "pending", "table_id": "t-1", "cashier_id": null}));

        assert!(Filter::Eq("status".into(), json!("pending")).matches(&r));
        assert!(!Filter::Eq("status".into(), json!("ready")).matches(&r));
        assert!(Filter::Eq("cashier_id".into(), Value::Null).matches(&r));
        assert!(Filter::Eq("missing".into(), Value::Null).matches(&r));
        assert!(Filter::Neq("status".into(), json!("paid")).matches(&r));
        assert!(!Filter::Neq("cashier_id".into(), json!("u-1")).matches(&r));
        assert!(Filter::In("table_id".into(), vec![json!("t-0"), json!("t-1")]).matches(&r));
    }

    #[test]
    fn test_map_columns() {
        let query = RowQuery::new()
            .eq("tableId", "t-1")
            .order_by("createdAt", SortOrder::Desc)
            .limit(5)
            .map_columns(crate::db::case::camel_to_snake);

        assert_eq!(query.filters[0].column(), "table_id");
        assert_eq!(query.order_by, Some(("created_at".into(), SortOrder::Desc)));
        assert_eq!(query.limit, Some(5));
    }
}
