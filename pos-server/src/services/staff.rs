//! Staff Service
//!
//! 员工绩效与首个管理员创建

use std::collections::HashSet;

use shared::client::BootstrapAdminRequest;
use shared::error::ErrorCode;
use shared::models::{Order, Payment, StaffMetrics, User, UserRole};
use shared::util::{new_id, now};

use crate::auth::{AuthError, AuthProvider};
use crate::db::{Db, RowQuery};
use crate::metrics::compute_staff_metrics;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct StaffService {
    db: Db,
}

impl StaffService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        self.db
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found("User").with_detail("id", id))
    }

    /// 员工绩效 (按需计算)
    pub async fn metrics(&self, user_id: &str) -> AppResult<StaffMetrics> {
        let user = self.get_user(user_id).await?;

        let mut seen = HashSet::new();
        let mut orders: Vec<Order> = Vec::new();
        for field in ["waiterStaffId", "kitchenStaffId", "cashierId"] {
            let found: Vec<Order> = self.db.find(RowQuery::new().eq(field, user_id)).await?;
            orders.extend(found.into_iter().filter(|o| seen.insert(o.id.clone())));
        }

        let payments: Vec<Payment> = if orders.is_empty() {
            Vec::new()
        } else {
            self.db
                .find(RowQuery::new().is_in("orderId", orders.iter().map(|o| o.id.as_str())))
                .await?
        };

        let metrics = compute_staff_metrics(user_id, Some(user.role), &orders, &payments);
        tracing::debug!(user_id, orders = metrics.orders_handled, rating = metrics.rating, "Staff metrics computed");
        Ok(metrics)
    }

    /// 是否已存在管理员
    pub async fn has_admin(&self) -> AppResult<bool> {
        let admins: Vec<User> = self
            .db
            .find(RowQuery::new().eq("role", UserRole::Admin.as_str()).limit(1))
            .await?;
        Ok(!admins.is_empty())
    }

    /// 创建首个管理员 (已存在管理员时拒绝)
    ///
    /// 托管认证服务自行管理密码；进程内认证需要 `password`。
    pub async fn create_initial_admin(
        &self,
        request: BootstrapAdminRequest,
        auth: &dyn AuthProvider,
    ) -> AppResult<User> {
        validate_email(&request.email)?;
        validate_required_text(&request.name, "name", MAX_NAME_LEN)?;
        if let Some(password) = &request.password {
            validate_required_text(password, "password", MAX_PASSWORD_LEN)?;
        }

        if self.has_admin().await? {
            return Err(AppError::new(ErrorCode::AdminAlreadyExists));
        }

        let user = User {
            id: new_id(),
            email: request.email.trim().to_lowercase(),
            name: request.name.trim().to_string(),
            role: UserRole::Admin,
            bio: None,
            phone_number: None,
            profile_image: None,
            joined_at: Some(now()),
            last_active: None,
        };
        let user = self.db.add(&user).await?;

        if let Some(password) = &request.password {
            match auth.register(&user.id, &user.email, password).await {
                Ok(()) | Err(AuthError::Unsupported) => {}
                Err(e) => return Err(AppError::internal(e.to_string())),
            }
        }

        tracing::info!(user_id = %user.id, email = %user.email, "Initial admin created");
        Ok(user)
    }
}
