//! 端到端 API 测试
//!
//! 在进程内驱动完整路由 (内存存储 + 内存认证)，不监听端口。

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use pos_server::core::seed::{DEMO_PASSWORD, seed_demo_data};
use pos_server::{Config, ServerState, build_router};

const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

async fn seeded_app() -> Router {
    let state = ServerState::in_memory(Config::for_tests(TEST_SECRET));
    seed_demo_data(&state).await.unwrap();
    build_router(state)
}

fn empty_app() -> Router {
    build_router(ServerState::in_memory(Config::for_tests(TEST_SECRET)))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = seeded_app().await;
    let (status, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
    assert_eq!(body["environment"], "test");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = seeded_app().await;
    let (status, _) = send(&app, "GET", "/api/tables", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/tables", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_errors_and_landing() {
    let app = seeded_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "waiter@pos.local", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "admin@pos.local", "password": DEMO_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["landing"], "admin");

    let token = login(&app, "kitchen@pos.local", DEMO_PASSWORD).await;
    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], "user-kitchen");
    assert!(
        body["permissions"]
            .as_array()
            .unwrap()
            .contains(&json!("orders:status"))
    );
}

#[tokio::test]
async fn test_order_lifecycle_and_payment() {
    let app = seeded_app().await;
    let waiter = login(&app, "waiter@pos.local", DEMO_PASSWORD).await;
    let kitchen = login(&app, "kitchen@pos.local", DEMO_PASSWORD).await;
    let cashier = login(&app, "cashier@pos.local", DEMO_PASSWORD).await;

    // 下单
    let order_body = json!({
        "tableId": "table-1",
        "items": [
            { "menuItemId": "item-burger", "quantity": 2 },
            { "menuItemId": "item-lemonade", "quantity": 1, "notes": "no ice" }
        ]
    });
    let (status, order) = send(&app, "POST", "/api/orders", Some(&waiter), Some(order_body.clone())).await;
    assert_eq!(status, StatusCode::OK, "{order}");
    assert_eq!(order["total"], 31.5);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["waiterStaffId"], "user-waiter");
    assert_eq!(order["items"].as_array().unwrap().len(), 2);
    let order_id = order["id"].as_str().unwrap().to_string();

    // 占用中的桌台不能再下单
    let (status, _) = send(&app, "POST", "/api/orders", Some(&waiter), Some(order_body)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // 厨房不能跳过状态
    let status_uri = format!("/api/orders/{order_id}/status");
    let (status, body) = send(&app, "PUT", &status_uri, Some(&kitchen), Some(json!({ "status": "ready" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Invalid status transition from pending to ready");

    let (status, body) = send(&app, "PUT", &status_uri, Some(&kitchen), Some(json!({ "status": "preparing" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kitchenStaffId"], "user-kitchen");

    for next in ["ready", "delivered"] {
        let (status, body) = send(&app, "PUT", &status_uri, Some(&kitchen), Some(json!({ "status": next }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], next);
    }

    // 服务员没有收款权限
    let payments_uri = format!("/api/orders/{order_id}/payments");
    let (status, _) = send(
        &app,
        "POST",
        &payments_uri,
        Some(&waiter),
        Some(json!({ "amount": 31.5, "method": "cash" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, pos) = send(&app, "GET", "/api/orders/pos", Some(&cashier), None).await;
    assert_eq!(status, StatusCode::OK);
    let pos = pos.as_array().unwrap();
    assert_eq!(pos.len(), 1);
    assert_eq!(pos[0]["tableNumber"], 1);

    let (status, first) = send(
        &app,
        "POST",
        &payments_uri,
        Some(&cashier),
        Some(json!({ "amount": 20.0, "method": "card" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{first}");
    assert_eq!(first["status"], "partially");

    let (_, table) = send(&app, "GET", "/api/tables/table-1", Some(&cashier), None).await;
    assert_eq!(table["status"], "occupied");

    let (status, second) = send(
        &app,
        "POST",
        &payments_uri,
        Some(&cashier),
        Some(json!({ "amount": 11.5, "method": "cash", "tip": 3.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["status"], "paid");

    let (_, table) = send(&app, "GET", "/api/tables/table-1", Some(&cashier), None).await;
    assert_eq!(table["status"], "available");

    let (status, _) = send(
        &app,
        "POST",
        &payments_uri,
        Some(&cashier),
        Some(json!({ "amount": 1.0, "method": "cash" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, payments) = send(&app, "GET", &payments_uri, Some(&cashier), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments.as_array().unwrap().len(), 2);

    let (_, pos) = send(&app, "GET", "/api/orders/pos", Some(&cashier), None).await;
    assert!(pos.as_array().unwrap().is_empty());

    // 收银员绩效
    let (status, metrics) = send(&app, "GET", "/api/staff/me/metrics", Some(&cashier), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics["ordersHandled"], 1);
}

#[tokio::test]
async fn test_order_rejects_unknown_items_and_tables() {
    let app = seeded_app().await;
    let waiter = login(&app, "waiter@pos.local", DEMO_PASSWORD).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&waiter),
        Some(json!({ "tableId": "table-2", "items": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&waiter),
        Some(json!({ "tableId": "table-99", "items": [{ "menuItemId": "item-soup", "quantity": 1 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&waiter),
        Some(json!({ "tableId": "table-2", "items": [{ "menuItemId": "item-ghost", "quantity": 1 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_management_requires_permission() {
    let app = seeded_app().await;
    let admin = login(&app, "admin@pos.local", DEMO_PASSWORD).await;
    let waiter = login(&app, "waiter@pos.local", DEMO_PASSWORD).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/categories",
        Some(&waiter),
        Some(json!({ "name": "Desserts", "type": "main" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = send(
        &app,
        "POST",
        "/api/categories",
        Some(&admin),
        Some(json!({ "name": "Desserts", "type": "main" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{created}");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, list) = send(
        &app,
        "POST",
        &format!("/api/categories/{id}/move"),
        Some(&admin),
        Some(json!({ "direction": "up" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    let desserts = names.iter().position(|n| *n == "Desserts").unwrap();
    assert_eq!(names[desserts + 1], "Coffee");

    let (status, items) = send(&app, "GET", "/api/menu-items/available", Some(&waiter), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(items.as_array().unwrap().len(), 6);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/menu-items/item-soup",
        Some(&admin),
        Some(json!({ "available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, items) = send(&app, "GET", "/api/menu-items/available", Some(&waiter), None).await;
    assert_eq!(items.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_table_with_active_order_cannot_be_deleted() {
    let app = seeded_app().await;
    let admin = login(&app, "admin@pos.local", DEMO_PASSWORD).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&admin),
        Some(json!({ "tableId": "table-3", "items": [{ "menuItemId": "item-espresso", "quantity": 3 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "DELETE", "/api/tables/table-3", Some(&admin), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["details"]["activeOrders"].is_number());

    let (status, overview) = send(&app, "GET", "/api/tables/overview", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let busy: Vec<&Value> = overview["tables"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|t| !t["activeOrder"].is_null())
        .collect();
    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0]["id"], "table-3");

    let (status, _) = send(&app, "DELETE", "/api/tables/table-6", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_bootstrap_flow() {
    let app = empty_app();

    let (status, body) = send(&app, "GET", "/api/admin/status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasAdmin"], false);

    let request = json!({ "email": "Owner@Bistro.com", "name": "Owner", "password": "owner-pass-1" });
    let (status, user) = send(&app, "POST", "/api/admin/bootstrap", None, Some(request.clone())).await;
    assert_eq!(status, StatusCode::OK, "{user}");
    assert_eq!(user["role"], "admin");
    assert_eq!(user["email"], "owner@bistro.com");

    let (_, body) = send(&app, "GET", "/api/admin/status", None, None).await;
    assert_eq!(body["hasAdmin"], true);

    let (status, _) = send(&app, "POST", "/api/admin/bootstrap", None, Some(request)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let token = login(&app, "owner@bistro.com", "owner-pass-1").await;
    let snapshot = json!({
        "categories": [
            { "id": "c-main", "name": "Pizza", "order": 0, "type": "main" }
        ],
        "menuItems": [
            { "id": "m-1", "name": "Margherita", "price": 9.5, "mainCategoryId": "c-main" }
        ]
    });
    let (status, report) = send(&app, "POST", "/api/admin/import", Some(&token), Some(snapshot)).await;
    assert_eq!(status, StatusCode::OK, "{report}");
    assert_eq!(report["categories"], 1);
    assert_eq!(report["menuItems"], 1);
}
