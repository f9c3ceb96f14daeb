//! Money type for presenting monetary values.
//!
//! Quotes are computed in `f64` and only rounded here, at display time, to
//! whole euro cents. Rendering follows German conventions: `.` groups
//! thousands, `,` separates the cents, and the symbol trails the amount.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A rounded euro amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in euro cents.
    pub amount_cents: i64,
}

impl Money {
    pub const SYMBOL: &'static str = "\u{20ac}";

    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Round a computed decimal amount to cents.
    ///
    /// ```
    /// use gate_core::money::Money;
    /// assert_eq!(Money::from_decimal(1320.0).amount_cents, 132000);
    /// assert_eq!(Money::from_decimal(151.499999999).amount_cents, 15150);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        if !amount.is_finite() {
            return Self::zero();
        }
        Self::new((amount * 100.0).round() as i64)
    }

    pub fn zero() -> Self {
        Self::new(0)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert back to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as `1.234,56 €`.
    pub fn display(&self) -> String {
        format!("{} {}", self.display_amount(), Self::SYMBOL)
    }

    /// Format as `1.234,56` without symbol.
    pub fn display_amount(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        let euros = group_thousands(abs / 100);
        format!("{}{},{:02}", sign, euros, abs % 100)
    }
}

fn group_thousands(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while value > 0 {
        groups.push(value % 1000);
        value /= 1000;
    }
    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(g) = groups.pop() {
        out.push_str(&format!(".{:03}", g));
    }
    out
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_cents + other.amount_cents)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount_cents - other.amount_cents)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Format a computed amount as a euro price, e.g. `1.320,00 €`.
pub fn format_price(amount: f64) -> String {
    Money::from_decimal(amount).display()
}
