//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::dining_table::DiningTable;
use super::menu_item::MenuItem;
use crate::util::null_to_default;

/// Kitchen/service lifecycle of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment dimension of an order, tracked independently of [`OrderStatus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Partially,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Partially => "partially",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity (`orders`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub table_id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "null_to_default")]
    pub payment_status: PaymentStatus,
    pub total: f64,
    #[serde(default)]
    pub waiter_staff_id: Option<String>,
    #[serde(default)]
    pub kitchen_staff_id: Option<String>,
    #[serde(default)]
    pub cashier_id: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub has_complaints: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// 送达或付清后即不再占用桌台
    pub fn is_active(&self) -> bool {
        self.status != OrderStatus::Delivered && self.payment_status != PaymentStatus::Paid
    }
}

/// Order line (`order_items`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub menu_item_id: String,
    pub quantity: i32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub customizations: Option<Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Order line joined with its menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetail {
    #[serde(flatten)]
    pub item: OrderItem,
    pub menu_item: Option<MenuItem>,
}

/// Order with its lines and table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
    pub table: Option<DiningTable>,
}

/// Unpaid order as shown at the point of sale
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosOrder {
    #[serde(flatten)]
    pub order: Order,
    pub table_number: Option<i32>,
    pub items: Vec<OrderItemDetail>,
    /// Minutes since the order was placed
    pub age_minutes: i64,
}

/// One line of a new order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub menu_item_id: String,
    pub quantity: i32,
    pub notes: Option<String>,
    pub customizations: Option<Value>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub table_id: String,
    pub items: Vec<OrderItemInput>,
}

/// Order status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Order list filter (query string)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub table_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: OrderStatus, payment_status: PaymentStatus) -> Order {
        Order {
            id: "o-1".into(),
            table_id: "t-1".into(),
            status,
            payment_status,
            total: 10.0,
            waiter_staff_id: None,
            kitchen_staff_id: None,
            cashier_id: None,
            has_complaints: false,
            created_at: None,
            updated_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn test_is_active() {
        assert!(order(OrderStatus::Pending, PaymentStatus::Unpaid).is_active());
        assert!(order(OrderStatus::Ready, PaymentStatus::Partially).is_active());
        assert!(!order(OrderStatus::Pending, PaymentStatus::Paid).is_active());
        assert!(!order(OrderStatus::Delivered, PaymentStatus::Unpaid).is_active());
        assert!(!order(OrderStatus::Delivered, PaymentStatus::Paid).is_active());
    }

    #[test]
    fn test_nullable_columns_default() {
        let json = r#"{"id":"o-1","tableId":"t-1","status":null,"paymentStatus":null,
            "total":12.5,"hasComplaints":null}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Unpaid);
        assert!(!order.has_complaints);
    }

    #[test]
    fn test_completed_at_serializes_as_null() {
        let json = serde_json::to_value(order(OrderStatus::Ready, PaymentStatus::Unpaid)).unwrap();
        assert!(json.get("completedAt").unwrap().is_null());
        assert_eq!(json["paymentStatus"], "unpaid");
    }
}
