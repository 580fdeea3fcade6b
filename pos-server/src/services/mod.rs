//! 业务服务
//!
//! 每个服务持有 [`Db`](crate::db::Db) 的克隆，由处理器按请求构造。

pub mod auth;
pub mod catalog;
pub mod orders;
pub mod payments;
pub mod staff;
pub mod tables;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use orders::OrderService;
pub use payments::PaymentService;
pub use staff::StaffService;
pub use tables::TableService;
