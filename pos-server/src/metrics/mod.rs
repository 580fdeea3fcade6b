//! 统计指标 (按需计算，不落库)
//!
//! - [`staff`] - 员工绩效 (速度、效率、评分)
//! - [`tables`] - 桌台周转效率

pub mod staff;
pub mod tables;

pub use staff::{
    calculate_efficiency_score, calculate_rating, calculate_speed_score, compute_staff_metrics,
};
pub use tables::table_efficiency;

/// Arithmetic mean, 0 for an empty slice
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
