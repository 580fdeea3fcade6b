//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 员工登录、当前用户
//! - [`admin`] - 首个管理员、菜单导入
//! - [`categories`] - 菜单分类
//! - [`menu_items`] - 菜品
//! - [`tables`] - 桌台与总览
//! - [`orders`] - 订单与状态流转
//! - [`payments`] - 收款
//! - [`staff`] - 员工绩效

pub mod admin;
pub mod auth;
pub mod health;

// Data models API
pub mod categories;
pub mod menu_items;
pub mod orders;
pub mod payments;
pub mod staff;
pub mod tables;

// Re-export common types for handlers
pub use crate::utils::AppResult;
