//! Order Service
//!
//! 下单、状态流转、POS 未结订单

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use shared::error::ErrorCode;
use shared::models::{
    DiningTable, MenuItem, Order, OrderCreate, OrderFilter, OrderItem, OrderItemDetail,
    OrderStatus, OrderWithItems, PaymentStatus, PosOrder, TableStatus, UserRole,
};
use shared::util::{new_id, now};

use crate::auth::CurrentUser;
use crate::db::{Db, RowQuery, SortOrder};
use crate::orders::money::{MAX_QUANTITY, order_total};
use crate::orders::validate_transition;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct OrderService {
    db: Db,
}

/// Timestamp column value for partial updates
pub(crate) fn timestamp(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339())
}

impl OrderService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: &str) -> AppResult<Order> {
        self.db.get(id).await?.ok_or_else(|| AppError::order_not_found(id))
    }

    /// 新订单: 校验桌台与菜品，计算总价，占用桌台
    pub async fn create(&self, data: OrderCreate, actor: &CurrentUser) -> AppResult<OrderWithItems> {
        if data.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }
        for (index, line) in data.items.iter().enumerate() {
            if !(1..=MAX_QUANTITY).contains(&line.quantity) {
                return Err(AppError::with_message(
                    ErrorCode::OrderItemInvalid,
                    format!("quantity must be between 1 and {MAX_QUANTITY}, got {}", line.quantity),
                )
                .with_detail("index", index));
            }
            validate_optional_text(&line.notes, "notes", MAX_NOTE_LEN)?;
        }

        let table: DiningTable = self
            .db
            .get(&data.table_id)
            .await?
            .ok_or_else(|| AppError::table_not_found(&data.table_id))?;
        if table.status != TableStatus::Available {
            return Err(AppError::new(ErrorCode::TableNotAvailable)
                .with_detail("tableId", table.id.clone())
                .with_detail("status", table.status.as_str()));
        }

        let mut menu: HashMap<String, MenuItem> = HashMap::new();
        for line in &data.items {
            if menu.contains_key(&line.menu_item_id) {
                continue;
            }
            let item: MenuItem = self
                .db
                .get(&line.menu_item_id)
                .await?
                .ok_or_else(|| AppError::menu_item_not_found(&line.menu_item_id))?;
            if !item.available {
                return Err(AppError::with_message(
                    ErrorCode::MenuItemUnavailable,
                    format!("{} is not available", item.name),
                )
                .with_detail("menuItemId", item.id.clone()));
            }
            menu.insert(item.id.clone(), item);
        }

        let total = order_total(
            data.items
                .iter()
                .filter_map(|l| menu.get(&l.menu_item_id).map(|m| (m.price, l.quantity))),
        );

        let created_at = now();
        let order = Order {
            id: new_id(),
            table_id: table.id.clone(),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            total,
            waiter_staff_id: actor.role.is_staff().then(|| actor.id.clone()),
            kitchen_staff_id: None,
            cashier_id: None,
            has_complaints: false,
            created_at: Some(created_at),
            updated_at: Some(created_at),
            completed_at: None,
        };
        let order = self.db.put(&order).await?;

        let items: Vec<OrderItem> = data
            .items
            .into_iter()
            .map(|line| OrderItem {
                id: new_id(),
                order_id: order.id.clone(),
                menu_item_id: line.menu_item_id,
                quantity: line.quantity,
                notes: line.notes.filter(|n| !n.trim().is_empty()),
                customizations: line.customizations,
                created_at: Some(created_at),
            })
            .collect();
        let items = self.db.upsert_many(&items).await?;

        let mut fields = Map::new();
        fields.insert("status".into(), TableStatus::Occupied.as_str().into());
        let table: Option<DiningTable> = self.db.patch(&table.id, fields).await?;

        tracing::info!(
            order_id = %order.id,
            table_id = %order.table_id,
            total = order.total,
            items = items.len(),
            "Order created"
        );

        let details = items
            .into_iter()
            .map(|item| OrderItemDetail {
                menu_item: menu.get(&item.menu_item_id).cloned(),
                item,
            })
            .collect();
        Ok(OrderWithItems {
            order,
            items: details,
            table,
        })
    }

    /// 最新的在前
    pub async fn list(&self, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        let mut query = RowQuery::new().order_by("createdAt", SortOrder::Desc);
        if let Some(status) = filter.status {
            query = query.eq("status", status.as_str());
        }
        if let Some(payment_status) = filter.payment_status {
            query = query.eq("paymentStatus", payment_status.as_str());
        }
        if let Some(table_id) = &filter.table_id {
            query = query.eq("tableId", table_id.as_str());
        }
        Ok(self.db.find(query).await?)
    }

    pub async fn get_with_items(&self, id: &str) -> AppResult<OrderWithItems> {
        let order = self.get(id).await?;
        let mut items = self.load_items(&[order.id.as_str()]).await?;
        let table: Option<DiningTable> = self.db.get(&order.table_id).await?;
        Ok(OrderWithItems {
            items: items.remove(&order.id).unwrap_or_default(),
            order,
            table,
        })
    }

    /// 未结清订单 (POS 收银)，最早的在前
    pub async fn pos_orders(&self) -> AppResult<Vec<PosOrder>> {
        // a `neq` filter would drop rows whose payment status is null
        let mut orders: Vec<Order> = self.db.get_all().await?;
        orders.retain(|o| o.payment_status != PaymentStatus::Paid);
        orders.sort_by_key(|o| o.created_at);

        let ids: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();
        let mut items = self.load_items(&ids).await?;
        let tables: HashMap<String, i32> = self
            .db
            .get_all::<DiningTable>()
            .await?
            .into_iter()
            .map(|t| (t.id, t.number))
            .collect();

        let current = now();
        Ok(orders
            .into_iter()
            .map(|order| PosOrder {
                table_number: tables.get(&order.table_id).copied(),
                items: items.remove(&order.id).unwrap_or_default(),
                age_minutes: order
                    .created_at
                    .map(|c| (current - c).num_minutes().max(0))
                    .unwrap_or(0),
                order,
            })
            .collect())
    }

    /// 状态流转: 校验后更新 `status`、`updated_at`、`completed_at`
    pub async fn update_status(
        &self,
        id: &str,
        new_status: OrderStatus,
        actor: &CurrentUser,
    ) -> AppResult<Order> {
        let order = self.get(id).await?;
        validate_transition(order.status, new_status)?;

        let updated_at = now();
        let mut fields = Map::new();
        fields.insert("status".into(), new_status.as_str().into());
        fields.insert("updatedAt".into(), timestamp(updated_at));
        let completed_at = if new_status == OrderStatus::Delivered {
            timestamp(updated_at)
        } else {
            Value::Null
        };
        fields.insert("completedAt".into(), completed_at);
        if new_status == OrderStatus::Preparing && actor.role == UserRole::Kitchen {
            fields.insert("kitchenStaffId".into(), actor.id.clone().into());
        }

        let order: Order = self
            .db
            .patch(id, fields)
            .await?
            .ok_or_else(|| AppError::order_not_found(id))?;
        tracing::info!(order_id = %id, status = %new_status, by = %actor.id, "Order status updated");
        Ok(order)
    }

    /// 标记投诉 (影响员工评分)
    pub async fn flag_complaint(&self, id: &str) -> AppResult<Order> {
        self.get(id).await?;
        let mut fields = Map::new();
        fields.insert("hasComplaints".into(), true.into());
        fields.insert("updatedAt".into(), timestamp(now()));
        let order: Order = self
            .db
            .patch(id, fields)
            .await?
            .ok_or_else(|| AppError::order_not_found(id))?;
        tracing::info!(order_id = %id, "Complaint recorded");
        Ok(order)
    }

    /// order_id -> 明细 (附菜品)
    async fn load_items(&self, order_ids: &[&str]) -> AppResult<HashMap<String, Vec<OrderItemDetail>>> {
        if order_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let items: Vec<OrderItem> = self
            .db
            .find(
                RowQuery::new()
                    .is_in("orderId", order_ids.iter().copied())
                    .order_by("createdAt", SortOrder::Asc),
            )
            .await?;
        let menu: HashMap<String, MenuItem> = self
            .db
            .get_all::<MenuItem>()
            .await?
            .into_iter()
            .map(|m| (m.id.clone(), m))
            .collect();

        let mut grouped: HashMap<String, Vec<OrderItemDetail>> = HashMap::new();
        for item in items {
            grouped
                .entry(item.order_id.clone())
                .or_default()
                .push(OrderItemDetail {
                    menu_item: menu.get(&item.menu_item_id).cloned(),
                    item,
                });
        }
        Ok(grouped)
    }
}
