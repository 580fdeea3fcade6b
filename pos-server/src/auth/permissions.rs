//! Permission Definitions
//!
//! 角色固定 (customer / waiter / kitchen / cashier / admin)，权限由角色推导:
//! - admin 拥有 `all`
//! - 前台员工只拿到各自岗位需要的操作
//! - 菜单/桌台管理与员工统计仅 admin

/// Order creation (waiter, customer)
pub const ORDERS_CREATE: &str = "orders:create";
/// Order listing and detail
pub const ORDERS_READ: &str = "orders:read";
/// Order status transitions (waiter, kitchen)
pub const ORDERS_STATUS: &str = "orders:status";
pub const PAYMENTS_CREATE: &str = "payments:create";
pub const PAYMENTS_READ: &str = "payments:read";
pub const TABLES_READ: &str = "tables:read";
/// Table create/update/delete (admin)
pub const TABLES_MANAGE: &str = "tables:manage";
pub const MENU_READ: &str = "menu:read";
/// Category and menu item maintenance (admin)
pub const MENU_MANAGE: &str = "menu:manage";
/// Other staff members' metrics (admin)
pub const STAFF_READ: &str = "staff:read";

pub const ALL_PERMISSIONS: &[&str] = &[
    ORDERS_CREATE,
    ORDERS_READ,
    ORDERS_STATUS,
    PAYMENTS_CREATE,
    PAYMENTS_READ,
    TABLES_READ,
    TABLES_MANAGE,
    MENU_READ,
    MENU_MANAGE,
    STAFF_READ,
];

pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &["all"];

pub const DEFAULT_WAITER_PERMISSIONS: &[&str] = &[
    ORDERS_CREATE,
    ORDERS_READ,
    ORDERS_STATUS,
    TABLES_READ,
    MENU_READ,
];

pub const DEFAULT_KITCHEN_PERMISSIONS: &[&str] = &[ORDERS_READ, ORDERS_STATUS, MENU_READ];

pub const DEFAULT_CASHIER_PERMISSIONS: &[&str] = &[
    ORDERS_READ,
    PAYMENTS_CREATE,
    PAYMENTS_READ,
    TABLES_READ,
    MENU_READ,
];

use shared::models::UserRole;

/// Get permissions for a role
pub fn get_default_permissions(role: UserRole) -> Vec<String> {
    let permissions: &[&str] = match role {
        UserRole::Admin => DEFAULT_ADMIN_PERMISSIONS,
        UserRole::Waiter => DEFAULT_WAITER_PERMISSIONS,
        UserRole::Kitchen => DEFAULT_KITCHEN_PERMISSIONS,
        UserRole::Cashier => DEFAULT_CASHIER_PERMISSIONS,
        // 顾客不能登录员工端，不签发令牌
        UserRole::Customer => &[],
    };
    permissions.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert_eq!(get_default_permissions(UserRole::Admin), vec!["all"]);
        assert!(get_default_permissions(UserRole::Kitchen).contains(&ORDERS_STATUS.to_string()));
        assert!(!get_default_permissions(UserRole::Kitchen).contains(&PAYMENTS_CREATE.to_string()));
        assert!(get_default_permissions(UserRole::Cashier).contains(&PAYMENTS_CREATE.to_string()));
        assert!(!get_default_permissions(UserRole::Waiter).contains(&MENU_MANAGE.to_string()));
        assert!(get_default_permissions(UserRole::Customer).is_empty());
    }

    #[test]
    fn test_defaults_are_known_permissions() {
        for role in [UserRole::Waiter, UserRole::Kitchen, UserRole::Cashier] {
            for p in get_default_permissions(role) {
                assert!(ALL_PERMISSIONS.contains(&p.as_str()), "unknown permission {p}");
            }
        }
    }
}
