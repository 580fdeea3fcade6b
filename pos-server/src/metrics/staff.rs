//! Staff performance metrics
//!
//! Computed on demand from order and payment history, never persisted.

use std::collections::HashSet;

use shared::models::{Order, Payment, PaymentMethod, PaymentMethodCounts, StaffMetrics, UserRole};
use shared::util::minutes_between;

/// Target average service time (minutes) per role
fn target_minutes(role: Option<UserRole>) -> f64 {
    match role {
        Some(UserRole::Waiter) => 10.0,
        Some(UserRole::Kitchen) => 20.0,
        Some(UserRole::Cashier) => 5.0,
        _ => 15.0,
    }
}

/// Target handled-order count per role
fn target_count(role: Option<UserRole>) -> f64 {
    match role {
        Some(UserRole::Waiter) => 50.0,
        Some(UserRole::Kitchen) => 40.0,
        Some(UserRole::Cashier) => 60.0,
        _ => 45.0,
    }
}

/// `clamp(target / avg * 100, 0, 100)`; a non-positive average scores 100
pub fn calculate_speed_score(avg_minutes: f64, role: Option<UserRole>) -> f64 {
    if avg_minutes <= 0.0 || !avg_minutes.is_finite() {
        return 100.0;
    }
    (target_minutes(role) / avg_minutes * 100.0).clamp(0.0, 100.0)
}

/// `clamp(count / target * 100, 0, 100)`
pub fn calculate_efficiency_score(count: u32, role: Option<UserRole>) -> f64 {
    (count as f64 / target_count(role) * 100.0).clamp(0.0, 100.0)
}

/// Heuristic 0..=5 rating, one decimal
pub fn calculate_rating(speed: f64, efficiency: f64, complaint_ratio: f64) -> f64 {
    let raw = (speed + efficiency) / 200.0 * 5.0 - 2.0 * complaint_ratio;
    (raw.clamp(0.0, 5.0) * 10.0).round() / 10.0
}

fn handled_by(order: &Order, user_id: &str) -> bool {
    [&order.waiter_staff_id, &order.kitchen_staff_id, &order.cashier_id]
        .into_iter()
        .any(|id| id.as_deref() == Some(user_id))
}

/// Metrics of one staff member over the given history
///
/// An order counts when the user is its waiter, kitchen staff or cashier.
pub fn compute_staff_metrics(
    user_id: &str,
    role: Option<UserRole>,
    orders: &[Order],
    payments: &[Payment],
) -> StaffMetrics {
    let handled: Vec<&Order> = orders.iter().filter(|o| handled_by(o, user_id)).collect();
    if handled.is_empty() {
        return StaffMetrics::default();
    }

    let orders_handled = handled.len() as u32;
    let total_sales = super::round2(handled.iter().map(|o| o.total).sum());

    // 未完成的订单计 0 分钟，但仍计入分母
    let service_times: Vec<f64> = handled
        .iter()
        .filter_map(|o| Some(minutes_between(o.created_at?, o.completed_at?)))
        .collect();
    let avg_service_time = service_times.iter().sum::<f64>() / handled.len() as f64;

    let order_ids: HashSet<&str> = handled.iter().map(|o| o.id.as_str()).collect();
    let mut payment_methods = PaymentMethodCounts::default();
    for payment in payments.iter().filter(|p| order_ids.contains(p.order_id.as_str())) {
        match payment.method {
            PaymentMethod::Card => payment_methods.card += 1,
            PaymentMethod::Cash => payment_methods.cash += 1,
            PaymentMethod::Wallet => payment_methods.wallet += 1,
            PaymentMethod::Crypto => payment_methods.crypto += 1,
        }
    }

    let speed_score = if service_times.is_empty() {
        0.0
    } else {
        calculate_speed_score(avg_service_time, role)
    };
    let efficiency_score = calculate_efficiency_score(orders_handled, role);

    let complaints = handled.iter().filter(|o| o.has_complaints).count();
    let complaint_ratio = complaints as f64 / handled.len() as f64;

    StaffMetrics {
        orders_handled,
        avg_service_time,
        total_sales,
        payment_methods,
        speed_score,
        efficiency_score,
        rating: calculate_rating(speed_score, efficiency_score, complaint_ratio),
    }
}
