//! 开发环境演示数据
//!
//! 仅在未配置托管后端时写入内存存储。

use serde_json::json;
use shared::models::{
    CategoryType, DiningTable, MenuCategory, MenuItem, TableStatus, User, UserRole,
};
use shared::util::now;

use crate::core::{Result, ServerState};
use crate::services::tables::qr_target;

/// 演示账号密码
pub const DEMO_PASSWORD: &str = "demo1234";

const DEMO_STAFF: &[(&str, &str, UserRole)] = &[
    ("admin@pos.local", "Alex Admin", UserRole::Admin),
    ("waiter@pos.local", "Wendy Waiter", UserRole::Waiter),
    ("kitchen@pos.local", "Kai Kitchen", UserRole::Kitchen),
    ("cashier@pos.local", "Cass Cashier", UserRole::Cashier),
];

fn category(id: &str, name: &str, order: i32, parent: Option<&str>) -> MenuCategory {
    MenuCategory {
        id: id.into(),
        name: name.into(),
        order,
        parent_id: parent.map(Into::into),
        category_type: if parent.is_some() {
            CategoryType::Sub
        } else {
            CategoryType::Main
        },
        created_at: Some(now()),
    }
}

fn item(id: &str, name: &str, price: f64, main: &str, sub: Option<&str>) -> MenuItem {
    MenuItem {
        id: id.into(),
        name: name.into(),
        description: None,
        price,
        image: None,
        available: true,
        customizations: None,
        main_category_id: main.into(),
        sub_category_id: sub.map(Into::into),
        created_at: Some(now()),
    }
}

/// 写入演示菜单、桌台和员工账号
pub async fn seed_demo_data(state: &ServerState) -> Result<()> {
    let db = &state.db;

    let categories = vec![
        category("cat-starters", "Starters", 0, None),
        category("cat-mains", "Mains", 1, None),
        category("cat-drinks", "Drinks", 2, None),
        category("cat-salads", "Salads", 3, Some("cat-starters")),
        category("cat-coffee", "Coffee", 4, Some("cat-drinks")),
    ];
    db.upsert_many(&categories).await?;

    let mut soup = item("item-soup", "Tomato Soup", 6.5, "cat-starters", None);
    soup.customizations = Some(json!({ "size": ["cup", "bowl"] }));
    let items = vec![
        soup,
        item("item-caesar", "Caesar Salad", 8.9, "cat-starters", Some("cat-salads")),
        item("item-burger", "Classic Burger", 14.0, "cat-mains", None),
        item("item-risotto", "Mushroom Risotto", 16.5, "cat-mains", None),
        item("item-espresso", "Espresso", 2.8, "cat-drinks", Some("cat-coffee")),
        item("item-lemonade", "Lemonade", 3.5, "cat-drinks", None),
    ];
    db.upsert_many(&items).await?;

    let tables: Vec<DiningTable> = (1..=6)
        .map(|number| {
            let id = format!("table-{number}");
            DiningTable {
                qr_code: qr_target(&state.config.public_base_url, &id),
                id,
                number,
                capacity: if number % 3 == 0 { 6 } else { 4 },
                status: TableStatus::Available,
            }
        })
        .collect();
    db.upsert_many(&tables).await?;

    for (email, name, role) in DEMO_STAFF {
        let user = User {
            id: format!("user-{}", role.as_str()),
            email: (*email).into(),
            name: (*name).into(),
            role: *role,
            bio: None,
            phone_number: None,
            profile_image: None,
            joined_at: Some(now()),
            last_active: None,
        };
        db.put(&user).await?;
        state.auth.register(&user.id, email, DEMO_PASSWORD).await?;
    }

    tracing::info!(
        categories = categories.len(),
        menu_items = items.len(),
        tables = tables.len(),
        staff = DEMO_STAFF.len(),
        "Demo data loaded (password: {DEMO_PASSWORD})"
    );
    Ok(())
}
