//! Derived statistics (computed on demand, never persisted)

use serde::{Deserialize, Serialize};

use super::dining_table::DiningTable;
use super::order::Order;

/// Payment counts per method
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodCounts {
    pub card: u32,
    pub cash: u32,
    pub wallet: u32,
    pub crypto: u32,
}

/// Performance figures of one staff member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMetrics {
    pub orders_handled: u32,
    /// Minutes
    pub avg_service_time: f64,
    pub total_sales: f64,
    pub payment_methods: PaymentMethodCounts,
    pub speed_score: f64,
    pub efficiency_score: f64,
    /// 0..=5, one decimal
    pub rating: f64,
}

/// Turnover figures across all tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableEfficiency {
    /// Minutes
    pub average_turnover_time: f64,
    /// 0..=1
    pub occupancy_rate: f64,
    pub total_turnovers: u32,
}

/// Table with its current order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableWithOrder {
    #[serde(flatten)]
    pub table: DiningTable,
    pub active_order: Option<Order>,
}

/// Floor overview for the table management screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOverview {
    pub tables: Vec<TableWithOrder>,
    pub efficiency: TableEfficiency,
}
