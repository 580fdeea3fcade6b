//! 数据访问层
//!
//! 所有持久化都委托给托管后端 (HTTP API)，按行 get/get_all/put/patch/delete。
//!
//! - [`RowStore`] - 行级存储接口
//! - [`RestStore`] - 托管后端实现 (reqwest + 重试)
//! - [`MemoryStore`] - 进程内实现 (开发/测试)
//! - [`Db`] - 类型化门面 (字段名转换 + 日志)

pub mod case;
pub mod error;
pub mod memory;
pub mod record;
pub mod rest;
pub mod retry;
pub mod store;

pub use case::CaseMode;
pub use error::{DbError, DbResult};
pub use memory::MemoryStore;
pub use record::{Db, Record};
pub use rest::RestStore;
pub use retry::RetryPolicy;
pub use store::{Filter, Row, RowQuery, RowStore, SortOrder};
