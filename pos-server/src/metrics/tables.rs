//! Table turnover efficiency

use shared::models::{DiningTable, Order, PaymentStatus, TableEfficiency, TableStatus};
use shared::util::minutes_between;

/// Turnover figures over all tables and orders
///
/// A turnover is a paid order; its duration runs from `created_at` to the
/// last update (the payment).
pub fn table_efficiency(tables: &[DiningTable], orders: &[Order]) -> TableEfficiency {
    let paid: Vec<&Order> = orders
        .iter()
        .filter(|o| o.payment_status == PaymentStatus::Paid)
        .collect();

    let turnover_times: Vec<f64> = paid
        .iter()
        .filter_map(|o| Some(minutes_between(o.created_at?, o.updated_at?)))
        .collect();

    let occupied = tables
        .iter()
        .filter(|t| t.status == TableStatus::Occupied)
        .count();
    let occupancy_rate = if tables.is_empty() {
        0.0
    } else {
        occupied as f64 / tables.len() as f64
    };

    TableEfficiency {
        average_turnover_time: super::mean(&turnover_times),
        occupancy_rate,
        total_turnovers: paid.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use shared::models::OrderStatus;

    fn table(n: i32, status: TableStatus) -> DiningTable {
        DiningTable {
            id: format!("t-{n}"),
            number: n,
            capacity: 4,
            qr_code: String::new(),
            status,
        }
    }

    fn order(payment_status: PaymentStatus, minutes: i64) -> Order {
        let created = Utc::now() - Duration::hours(3);
        Order {
            id: shared::util::new_id(),
            table_id: "t-1".into(),
            status: OrderStatus::Delivered,
            payment_status,
            total: 10.0,
            waiter_staff_id: None,
            kitchen_staff_id: None,
            cashier_id: None,
            has_complaints: false,
            created_at: Some(created),
            updated_at: Some(created + Duration::minutes(minutes)),
            completed_at: None,
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(table_efficiency(&[], &[]), TableEfficiency::default());
    }

    #[test]
    fn test_turnover_and_occupancy() {
        let tables = vec![
            table(1, TableStatus::Occupied),
            table(2, TableStatus::Available),
            table(3, TableStatus::Reserved),
            table(4, TableStatus::Occupied),
        ];
        let orders = vec![
            order(PaymentStatus::Paid, 30),
            order(PaymentStatus::Paid, 60),
            order(PaymentStatus::Partially, 500),
            order(PaymentStatus::Unpaid, 500),
        ];

        let eff = table_efficiency(&tables, &orders);
        assert!((eff.average_turnover_time - 45.0).abs() < 1e-9);
        assert_eq!(eff.occupancy_rate, 0.5);
        assert_eq!(eff.total_turnovers, 2);
    }
}
