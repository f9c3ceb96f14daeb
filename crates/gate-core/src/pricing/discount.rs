//! Percentage discounts on a quoted total.

use serde::{Deserialize, Serialize};

/// Result of discounting a total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub percent: f64,
    pub discount_amount: f64,
    pub final_total: f64,
}

/// Take `percent` off `total`.
///
/// Non-finite percentages count as no discount. Percentages outside 0..=100
/// are applied as given.
pub fn apply_discount(total: f64, percent: f64) -> Discount {
    let percent = if percent.is_finite() { percent } else { 0.0 };
    let discount_amount = total * (percent / 100.0);
    Discount {
        percent,
        discount_amount,
        final_total: total - discount_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_discount() {
        let d = apply_discount(1320.0, 10.0);
        assert!((d.discount_amount - 132.0).abs() < 1e-9);
        assert!((d.final_total - 1188.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_and_invalid_percent() {
        assert_eq!(apply_discount(500.0, 0.0).final_total, 500.0);
        let d = apply_discount(500.0, f64::NAN);
        assert_eq!(d.percent, 0.0);
        assert_eq!(d.final_total, 500.0);
    }
}
