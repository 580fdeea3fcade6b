//! Table Service
//!
//! 桌台维护、状态切换与概览

use std::collections::HashMap;

use shared::error::ErrorCode;
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, Order, TableFilter, TableOverview,
    TableStatus, TableWithOrder,
};
use shared::util::new_id;

use crate::db::{Db, RowQuery};
use crate::metrics::table_efficiency;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct TableService {
    db: Db,
    /// 二维码目标前缀
    public_base_url: String,
}

/// 表单数值 → 正整数 (向下取整，至少为 1)
pub fn normalize_positive(value: Option<f64>) -> i32 {
    match value {
        Some(v) if v.is_finite() => v.floor().clamp(1.0, i32::MAX as f64) as i32,
        _ => 1,
    }
}

/// 桌台二维码目标地址
pub fn qr_target(public_base_url: &str, table_id: &str) -> String {
    format!("{}/table/{}", public_base_url.trim_end_matches('/'), table_id)
}

/// 搜索匹配桌号或状态名 (不区分大小写)
fn matches_query(table: &DiningTable, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty()
        || table.number.to_string().contains(&query)
        || table.status.as_str().contains(&query)
}

impl TableService {
    pub fn new(db: Db, public_base_url: impl Into<String>) -> Self {
        Self {
            db,
            public_base_url: public_base_url.into(),
        }
    }

    /// 按桌号排序
    pub async fn list(&self, filter: &TableFilter) -> AppResult<Vec<DiningTable>> {
        let mut tables: Vec<DiningTable> = self.db.get_all().await?;
        tables.retain(|t| {
            filter.status.is_none_or(|s| t.status == s)
                && filter.query.as_deref().is_none_or(|q| matches_query(t, q))
        });
        tables.sort_by_key(|t| t.number);
        Ok(tables)
    }

    pub async fn get(&self, id: &str) -> AppResult<DiningTable> {
        self.db
            .get(id)
            .await?
            .ok_or_else(|| AppError::table_not_found(id))
    }

    pub async fn create(&self, data: DiningTableCreate) -> AppResult<DiningTable> {
        let id = new_id();
        let table = DiningTable {
            qr_code: qr_target(&self.public_base_url, &id),
            id,
            number: normalize_positive(data.number),
            capacity: normalize_positive(data.capacity),
            status: data.status.unwrap_or_default(),
        };
        let table = self.db.put(&table).await?;
        tracing::info!(table_id = %table.id, number = table.number, "Table created");
        Ok(table)
    }

    /// 桌号变化时重新生成二维码目标
    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> AppResult<DiningTable> {
        let existing = self.get(id).await?;
        let mut table = existing.clone();

        if data.number.is_some() {
            table.number = normalize_positive(data.number);
        }
        if data.capacity.is_some() {
            table.capacity = normalize_positive(data.capacity);
        }
        if let Some(status) = data.status {
            table.status = status;
        }
        if table.qr_code.is_empty() || table.number != existing.number {
            table.qr_code = qr_target(&self.public_base_url, &table.id);
        }

        Ok(self.db.put(&table).await?)
    }

    pub async fn set_status(&self, id: &str, status: TableStatus) -> AppResult<DiningTable> {
        let mut fields = serde_json::Map::new();
        fields.insert("status".into(), status.as_str().into());
        let table: Option<DiningTable> = self.db.patch(id, fields).await?;
        table.ok_or_else(|| AppError::table_not_found(id))
    }

    /// 有进行中订单的桌台不可删除
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.get(id).await?;

        let orders: Vec<Order> = self.db.find(RowQuery::new().eq("tableId", id)).await?;
        let active = orders.iter().filter(|o| o.is_active()).count();
        if active > 0 {
            return Err(AppError::new(ErrorCode::TableHasOrders).with_detail("activeOrders", active));
        }

        self.db.delete::<DiningTable>(id).await?;
        tracing::info!(table_id = %id, "Table deleted");
        Ok(())
    }

    /// 桌台 + 当前订单 + 周转效率
    pub async fn overview(&self) -> AppResult<TableOverview> {
        let tables = self.list(&TableFilter::default()).await?;
        let orders: Vec<Order> = self.db.get_all().await?;

        let mut active: HashMap<&str, &Order> = HashMap::new();
        for order in orders.iter().filter(|o| o.is_active()) {
            // keep the most recent active order per table
            let newer = active
                .get(order.table_id.as_str())
                .is_none_or(|current| order.created_at >= current.created_at);
            if newer {
                active.insert(order.table_id.as_str(), order);
            }
        }

        let efficiency = table_efficiency(&tables, &orders);
        let tables = tables
            .into_iter()
            .map(|table| TableWithOrder {
                active_order: active.get(table.id.as_str()).map(|o| (*o).clone()),
                table,
            })
            .collect();

        Ok(TableOverview { tables, efficiency })
    }
}
