//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` for storage/serialization.

use rust_decimal::prelude::*;
use shared::error::{AppError, AppResult, ErrorCode};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed quantity per order line
pub const MAX_QUANTITY: i32 = 999;
/// Maximum allowed price per menu item
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed payment amount
pub const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
pub fn require_finite(value: f64, field_name: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field_name} must be a finite number, got {value}"),
        ));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round(value).to_f64().unwrap_or_default()
}

#[inline]
fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Σ price × quantity
pub fn order_total<I>(lines: I) -> f64
where
    I: IntoIterator<Item = (f64, i32)>,
{
    let total: Decimal = lines
        .into_iter()
        .map(|(price, quantity)| to_decimal(price) * Decimal::from(quantity))
        .sum();
    to_f64(total)
}

/// Sum of recorded payment amounts
pub fn sum_amounts<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    to_f64(amounts.into_iter().map(to_decimal).sum())
}

/// Whether `paid` covers `total` (compared at cent precision)
pub fn covers(paid: f64, total: f64) -> bool {
    round(to_decimal(paid)) >= round(to_decimal(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_total_avoids_float_drift() {
        // 0.1 * 3 == 0.30000000000000004 in f64
        assert_eq!(order_total([(0.1, 3)]), 0.3);
        assert_eq!(order_total([(12.5, 2), (3.99, 3)]), 36.97);
        assert_eq!(order_total(Vec::<(f64, i32)>::new()), 0.0);
    }

    #[test]
    fn test_sum_amounts() {
        assert_eq!(sum_amounts([10.1, 20.2]), 30.3);
    }

    #[test]
    fn test_covers() {
        assert!(covers(30.3, 30.3));
        assert!(covers(0.1 + 0.2, 0.3));
        assert!(covers(50.0, 30.0));
        assert!(!covers(29.99, 30.0));
    }

    #[test]
    fn test_require_finite() {
        assert!(require_finite(1.0, "amount").is_ok());
        assert!(require_finite(f64::NAN, "amount").is_err());
        assert!(require_finite(f64::INFINITY, "amount").is_err());
    }
}
