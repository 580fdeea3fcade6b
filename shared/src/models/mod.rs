//! Data models
//!
//! Shared between pos-server and its clients (via API).
//! Wire format is camelCase; the server's data layer maps it onto the
//! backend's snake_case columns. All IDs are UUID strings.

pub mod category;
pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod payment;
pub mod stats;
pub mod user;

// Re-exports
pub use category::*;
pub use dining_table::*;
pub use menu_item::*;
pub use order::*;
pub use payment::*;
pub use stats::*;
pub use user::*;
