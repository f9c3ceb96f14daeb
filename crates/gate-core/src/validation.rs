//! Input validation for customers and gates.
//!
//! Validators collect every problem instead of stopping at the first one.

use crate::customer::CustomerDetails;
use crate::error::QuoteError;
use crate::gate::Gate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s+\-()/]+$").expect("phone pattern is valid"));

const MIN_PHONE_LEN: usize = 5;

/// Messages collected by a validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn check(&mut self, ok: bool, message: &str) {
        if !ok {
            self.errors.push(message.to_string());
        }
    }

    /// Convert into a `Result`, failing with all collected messages.
    pub fn into_result(self) -> Result<(), QuoteError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(QuoteError::Validation(self.errors))
        }
    }
}

/// Email is optional; a given value must look like `local@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    email.is_empty() || EMAIL.is_match(email)
}

/// Phone is optional; a given value may only contain digits, spaces and
/// `+ - ( ) /`, and must be at least five characters long.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.is_empty() || (PHONE.is_match(phone) && phone.chars().count() >= MIN_PHONE_LEN)
}

pub fn validate_customer(details: &CustomerDetails) -> ValidationReport {
    let mut report = ValidationReport::default();
    report.check(!details.name.trim().is_empty(), "Name is required");
    report.check(is_valid_email(&details.email), "Invalid email address");
    report.check(is_valid_phone(&details.phone), "Invalid phone number");
    report
}

/// Validate raw dimensions in centimetres. A glass height of 0 means none.
pub fn validate_dimensions(width_cm: f64, height_cm: f64, glass_height_cm: f64) -> ValidationReport {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    let mut report = ValidationReport::default();
    report.check(positive(width_cm), "Width must be a positive number");
    report.check(positive(height_cm), "Height must be a positive number");
    if glass_height_cm != 0.0 {
        report.check(positive(glass_height_cm), "Glass height must be a positive number");
        report.check(
            glass_height_cm <= height_cm,
            "Glass height cannot exceed the total height",
        );
    }
    report
}

/// A gate can be saved once it has a size, glass no higher than the gate and
/// at least one product.
pub fn validate_gate_for_save(gate: &Gate) -> ValidationReport {
    let d = &gate.dimensions;
    let mut report = ValidationReport::default();
    report.check(
        d.width_cm > 0.0 && d.height_cm > 0.0,
        "Width and height are required",
    );
    report.check(
        d.glass_height_cm <= d.height_cm,
        "Glass height cannot exceed the total height",
    );
    report.check(!gate.selections.is_empty(), "Select at least one product");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GateType;
    use crate::gate::Sides;
    use crate::ids::ProductId;

    #[test]
    fn test_customer_rules() {
        let mut details = CustomerDetails::new("  ");
        assert_eq!(validate_customer(&details).errors, vec!["Name is required"]);

        details.name = "Hofer".into();
        details.email = "hofer@example".into();
        details.phone = "12a45".into();
        let report = validate_customer(&details);
        assert_eq!(report.errors.len(), 2);

        details.email = "hofer@example.at".into();
        details.phone = "+43 (732) 12/34-5".into();
        assert!(validate_customer(&details).is_valid());
    }

    #[test]
    fn test_phone_length() {
        assert!(is_valid_phone(""));
        assert!(!is_valid_phone("1234"));
        assert!(is_valid_phone("12345"));
    }

    #[test]
    fn test_dimension_rules() {
        assert!(validate_dimensions(400.0, 250.0, 0.0).is_valid());
        assert!(validate_dimensions(400.0, 250.0, 250.0).is_valid());
        assert_eq!(validate_dimensions(0.0, -1.0, 0.0).errors.len(), 2);
        assert_eq!(
            validate_dimensions(400.0, 250.0, 300.0).errors,
            vec!["Glass height cannot exceed the total height"]
        );
        assert!(!validate_dimensions(400.0, 250.0, -10.0).is_valid());
        assert!(!validate_dimensions(f64::NAN, 250.0, 0.0).is_valid());
    }

    #[test]
    fn test_gate_save_rules() {
        let mut gate = Gate::new(GateType::Doors);
        let err = validate_gate_for_save(&gate).into_result().unwrap_err();
        assert!(matches!(err, QuoteError::Validation(ref msgs) if msgs.len() == 2));

        gate.set_dimensions(100.0, 200.0, 0.0);
        gate.toggle_product(ProductId(1), 1.0, Sides::Single).unwrap();
        assert!(validate_gate_for_save(&gate).into_result().is_ok());

        gate.set_dimensions(100.0, 200.0, 200.0);
        assert!(validate_gate_for_save(&gate).is_valid());

        gate.set_dimensions(100.0, 200.0, 300.0);
        assert_eq!(
            validate_gate_for_save(&gate).errors,
            vec!["Glass height cannot exceed the total height"]
        );
    }
}
