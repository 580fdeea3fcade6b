//! Hosted backend store (PostgREST-style HTTP API)
//!
//! | 操作 | 请求 |
//! |------|------|
//! | get | `GET /rest/v1/{table}?select=*&id=eq.{id}` |
//! | query | `GET /rest/v1/{table}?select=*&{col}=eq.{v}&order={col}.asc&limit=n` |
//! | put / upsert | `POST /rest/v1/{table}` + `Prefer: resolution=merge-duplicates` |
//! | patch | `PATCH /rest/v1/{table}?id=eq.{id}` |
//! | delete | `DELETE /rest/v1/{table}?id=eq.{id}` |

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;

use super::error::{DbError, DbResult};
use super::retry::RetryPolicy;
use super::store::{Filter, Row, RowQuery, RowStore, SortOrder};

const PREFER_UPSERT: &str = "resolution=merge-duplicates,return=representation";
const PREFER_RETURN: &str = "return=representation";

/// Error body returned by the backend
#[derive(Debug, Deserialize)]
struct BackendError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

impl BackendError {
    fn describe(&self) -> String {
        let mut out = self.message.clone().unwrap_or_else(|| "request failed".into());
        if let Some(code) = &self.code {
            out = format!("[{code}] {out}");
        }
        if let Some(details) = &self.details {
            out.push_str(&format!(" ({details})"));
        }
        if let Some(hint) = &self.hint {
            out.push_str(&format!(" hint: {hint}"));
        }
        out
    }
}

#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl RestStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> DbResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DbError::Connection(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            retry,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    /// Send and decode a JSON array of rows
    async fn send_rows(request: RequestBuilder) -> DbResult<Vec<Row>> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<BackendError>(&text)
                .map(|e| e.describe())
                .unwrap_or(text);
            return Err(DbError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// Render a value as a PostgREST filter operand
fn operand(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Query-string pair for one filter
pub(crate) fn filter_param(filter: &Filter) -> (String, String) {
    match filter {
        Filter::Eq(column, Value::Null) => (column.clone(), "is.null".into()),
        Filter::Eq(column, value) => (column.clone(), format!("eq.{}", operand(value))),
        Filter::Neq(column, value) => (column.clone(), format!("neq.{}", operand(value))),
        Filter::In(column, values) => {
            let list: Vec<String> = values.iter().map(operand).collect();
            (column.clone(), format!("in.({})", list.join(",")))
        }
    }
}

/// Full query string for a select
pub(crate) fn query_params(query: &RowQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    params.extend(query.filters.iter().map(filter_param));
    if let Some((column, order)) = &query.order_by {
        let dir = match order {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        };
        params.push(("order".into(), format!("{column}.{dir}")));
    }
    if let Some(limit) = query.limit {
        params.push(("limit".into(), limit.to_string()));
    }
    params
}

#[async_trait]
impl RowStore for RestStore {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn get(&self, table: &str, id: &str) -> DbResult<Option<Row>> {
        let params = query_params(&RowQuery::new().eq("id", id).limit(1));
        let rows = self
            .retry
            .run("get", || {
                Self::send_rows(self.request(Method::GET, table).query(&params))
            })
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn get_all(&self, table: &str) -> DbResult<Vec<Row>> {
        self.query(table, &RowQuery::new()).await
    }

    async fn query(&self, table: &str, query: &RowQuery) -> DbResult<Vec<Row>> {
        let params = query_params(query);
        self.retry
            .run("query", || {
                Self::send_rows(self.request(Method::GET, table).query(&params))
            })
            .await
    }

    async fn put(&self, table: &str, row: Row) -> DbResult<Row> {
        self.upsert(table, vec![row])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DbError::Decode(format!("Upsert into {table} returned no row")))
    }

    async fn upsert(&self, table: &str, rows: Vec<Row>) -> DbResult<Vec<Row>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        self.retry
            .run("upsert", || {
                Self::send_rows(
                    self.request(Method::POST, table)
                        .header("Prefer", PREFER_UPSERT)
                        .json(&rows),
                )
            })
            .await
    }

    async fn patch(&self, table: &str, id: &str, fields: Row) -> DbResult<Option<Row>> {
        let params = [("id", format!("eq.{id}"))];
        let rows = self
            .retry
            .run("patch", || {
                Self::send_rows(
                    self.request(Method::PATCH, table)
                        .query(&params)
                        .header("Prefer", PREFER_RETURN)
                        .json(&fields),
                )
            })
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, table: &str, id: &str) -> DbResult<()> {
        let params = [("id", format!("eq.{id}"))];
        self.retry
            .run("delete", || {
                Self::send_rows(self.request(Method::DELETE, table).query(&params))
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_params() {
        assert_eq!(
            filter_param(&Filter::Eq("status".into(), json!("pending"))),
            ("status".into(), "eq.pending".into())
        );
        assert_eq!(
            filter_param(&Filter::Eq("number".into(), json!(4))),
            ("number".into(), "eq.4".into())
        );
        assert_eq!(
            filter_param(&Filter::Eq("cashier_id".into(), Value::Null)),
            ("cashier_id".into(), "is.null".into())
        );
        assert_eq!(
            filter_param(&Filter::In("order_id".into(), vec![json!("a"), json!("b")])),
            ("order_id".into(), "in.(a,b)".into())
        );
    }

    #[test]
    fn test_query_params() {
        let query = RowQuery::new()
            .eq("table_id", "t-1")
            .order_by("created_at", SortOrder::Desc)
            .limit(10);
        let params = query_params(&query);
        assert_eq!(params[0], ("select".into(), "*".into()));
        assert!(params.contains(&("table_id".into(), "eq.t-1".into())));
        assert!(params.contains(&("order".into(), "created_at.desc".into())));
        assert!(params.contains(&("limit".into(), "10".into())));
    }

    #[test]
    fn test_backend_error_describe() {
        let err: BackendError = serde_json::from_str(
            r#"{"code":"23505","message":"duplicate key","details":"Key (id) exists","hint":null}"#,
        )
        .unwrap();
        assert_eq!(err.describe(), "[23505] duplicate key (Key (id) exists)");
    }

    #[test]
    fn test_table_url() {
        let store = RestStore::new(
            "https://db.example.com/",
            "key",
            Duration::from_secs(5),
            RetryPolicy::none(),
        )
        .unwrap();
        assert_eq!(store.table_url("orders"), "https://db.example.com/rest/v1/orders");
    }
}
