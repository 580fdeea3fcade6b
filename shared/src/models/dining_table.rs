//! Dining Table Model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::util::null_to_default;

/// Table occupancy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Reserved => "reserved",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dining table entity (`tables`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: String,
    pub number: i32,
    pub capacity: i32,
    /// Target encoded in the table's QR code
    #[serde(default)]
    pub qr_code: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub status: TableStatus,
}

/// Create dining table payload
///
/// `number`/`capacity` arrive as plain numbers from form inputs and are
/// normalized server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableCreate {
    pub number: Option<f64>,
    pub capacity: Option<f64>,
    pub status: Option<TableStatus>,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningTableUpdate {
    pub number: Option<f64>,
    pub capacity: Option<f64>,
    pub status: Option<TableStatus>,
}

/// Table status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStatusUpdate {
    pub status: TableStatus,
}

/// Table list filter (query string)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableFilter {
    pub status: Option<TableStatus>,
    #[serde(rename = "q")]
    pub query: Option<String>,
}
