//! Payment Service

use serde_json::Map;
use shared::error::ErrorCode;
use shared::models::{
    DiningTable, Order, Payment, PaymentCreate, PaymentMethod, PaymentStatus, TableStatus,
};
use shared::util::{new_id, now};

use crate::auth::CurrentUser;
use crate::db::{Db, RowQuery, SortOrder};
use crate::orders::money::{MAX_PAYMENT_AMOUNT, covers, require_finite, sum_amounts};
use crate::services::orders::timestamp;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct PaymentService {
    db: Db,
}

fn validate(data: &PaymentCreate) -> AppResult<(PaymentMethod, f64)> {
    require_finite(data.amount, "amount")?;
    if data.amount <= 0.0 || data.amount > MAX_PAYMENT_AMOUNT {
        return Err(AppError::with_message(
            ErrorCode::PaymentInvalidAmount,
            format!("amount must be greater than 0 and at most {MAX_PAYMENT_AMOUNT}"),
        ));
    }

    let tip = data.tip.unwrap_or(0.0);
    require_finite(tip, "tip")?;
    if tip < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::PaymentInvalidAmount,
            "tip must not be negative",
        ));
    }

    let method = PaymentMethod::parse(data.method.trim()).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::PaymentInvalidMethod,
            format!("Unsupported payment method: {}", data.method),
        )
    })?;
    Ok((method, tip))
}

impl PaymentService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// 收款
    ///
    /// 累计实收 (含本次) 达到订单总额则为 `paid`，否则 `partially`；
    /// 结清后释放桌台。
    pub async fn process(
        &self,
        order_id: &str,
        data: PaymentCreate,
        actor: &CurrentUser,
    ) -> AppResult<Payment> {
        let (method, tip) = validate(&data)?;

        let order: Order = self
            .db
            .get(order_id)
            .await?
            .ok_or_else(|| AppError::order_not_found(order_id))?;
        if order.payment_status == PaymentStatus::Paid {
            return Err(AppError::new(ErrorCode::OrderAlreadyPaid).with_detail("orderId", order_id));
        }

        let previous: Vec<Payment> = self.db.find(RowQuery::new().eq("orderId", order_id)).await?;
        let paid = sum_amounts(previous.iter().map(|p| p.amount).chain([data.amount]));
        let status = if covers(paid, order.total) {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partially
        };

        let created_at = now();
        let payment = Payment {
            id: new_id(),
            order_id: order.id.clone(),
            amount: data.amount,
            method,
            status,
            tip,
            splits: data.splits,
            created_at: Some(created_at),
        };
        let payment = self.db.put(&payment).await?;

        let mut fields = Map::new();
        fields.insert("paymentStatus".into(), status.as_str().into());
        fields.insert("updatedAt".into(), timestamp(created_at));
        fields.insert("cashierId".into(), actor.id.clone().into());
        self.db.patch::<Order>(&order.id, fields).await?;

        if status == PaymentStatus::Paid {
            let mut fields = Map::new();
            fields.insert("status".into(), TableStatus::Available.as_str().into());
            let table: Option<DiningTable> = self.db.patch(&order.table_id, fields).await?;
            if table.is_none() {
                tracing::warn!(order_id = %order.id, table_id = %order.table_id, "Paid order references a missing table");
            }
        }

        tracing::info!(
            order_id = %order.id,
            amount = payment.amount,
            tip = payment.tip,
            method = %method,
            status = %status,
            "Payment recorded"
        );
        Ok(payment)
    }

    /// 订单的全部收款记录，按时间升序
    pub async fn list_for_order(&self, order_id: &str) -> AppResult<Vec<Payment>> {
        let order: Option<Order> = self.db.get(order_id).await?;
        if order.is_none() {
            return Err(AppError::order_not_found(order_id));
        }
        Ok(self
            .db
            .find(
                RowQuery::new()
                    .eq("orderId", order_id)
                    .order_by("createdAt", SortOrder::Asc),
            )
            .await?)
    }
}
