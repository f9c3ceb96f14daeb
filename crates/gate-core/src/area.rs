//! Area derivation from gate dimensions.
//!
//! Dimensions are entered in centimetres and areas are reported in square
//! metres. Nothing is rounded here.

use serde::{Deserialize, Serialize};

/// cm² per m².
const CM2_PER_M2: f64 = 10_000.0;

/// Gate dimensions in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default, alias = "breite")]
    pub width_cm: f64,
    #[serde(default, alias = "hoehe")]
    pub height_cm: f64,
    /// Height of the glazed band; 0 when the gate has no glass.
    #[serde(default, alias = "glashoehe")]
    pub glass_height_cm: f64,
}

impl Dimensions {
    /// Build dimensions, treating negative or non-finite values as 0.
    pub fn new(width_cm: f64, height_cm: f64, glass_height_cm: f64) -> Self {
        Self {
            width_cm: sanitize(width_cm),
            height_cm: sanitize(height_cm),
            glass_height_cm: sanitize(glass_height_cm),
        }
    }

    /// Parse dimensions from raw input fields.
    pub fn parse(width: &str, height: &str, glass_height: &str) -> Self {
        Self::new(
            parse_dimension(width),
            parse_dimension(height),
            parse_dimension(glass_height),
        )
    }

    pub fn areas(&self) -> Areas {
        Areas::from_dimensions(self.width_cm, self.height_cm, self.glass_height_cm)
    }

    pub fn has_glass(&self) -> bool {
        self.glass_height_cm > 0.0
    }
}

/// Areas derived from a gate's dimensions, in m².
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Areas {
    /// Full gate area.
    pub total: f64,
    /// Glazed band area.
    pub glass: f64,
    /// Door area without glass.
    pub net: f64,
}

impl Areas {
    /// Derive areas from width, height and glass height in centimetres.
    ///
    /// ```
    /// use gate_core::area::Areas;
    /// let a = Areas::from_dimensions(400.0, 250.0, 50.0);
    /// assert_eq!(a.total, 10.0);
    /// assert_eq!(a.glass, 2.0);
    /// assert_eq!(a.net, 8.0);
    /// ```
    pub fn from_dimensions(width_cm: f64, height_cm: f64, glass_height_cm: f64) -> Self {
        let width = sanitize(width_cm);
        let height = sanitize(height_cm);
        let glass_height = sanitize(glass_height_cm);

        let total = (width * height) / CM2_PER_M2;
        let glass = if glass_height > 0.0 {
            (width * glass_height) / CM2_PER_M2
        } else {
            0.0
        };
        let net = total - glass;

        Self {
            total: total.max(0.0),
            glass: glass.max(0.0),
            net: net.max(0.0),
        }
    }
}

/// Parse a user-entered centimetre value.
///
/// Accepts a decimal comma. Anything that is not a finite, non-negative
/// number is treated as 0.
pub fn parse_dimension(input: &str) -> f64 {
    input
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map(sanitize)
        .unwrap_or(0.0)
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_without_glass() {
        let a = Areas::from_dimensions(400.0, 250.0, 0.0);
        assert_eq!(a.total, 10.0);
        assert_eq!(a.net, 10.0);
        assert_eq!(a.glass, 0.0);
    }

    #[test]
    fn test_areas_with_glass() {
        let a = Areas::from_dimensions(300.0, 200.0, 60.0);
        assert!((a.total - 6.0).abs() < 1e-12);
        assert!((a.glass - 1.8).abs() < 1e-12);
        assert!((a.net - 4.2).abs() < 1e-12);
    }

    #[test]
    fn test_area_identities_hold_over_grid() {
        for w in [0.0, 1.0, 99.5, 250.0, 1234.0] {
            for h in [0.0, 10.0, 180.0, 333.3] {
                for g in [0.0, h / 3.0, h] {
                    let a = Areas::from_dimensions(w, h, g);
                    assert_eq!(a.total, w * h / 10_000.0);
                    let expected_glass = if g > 0.0 { w * g / 10_000.0 } else { 0.0 };
                    assert_eq!(a.glass, expected_glass);
                    assert!(a.net >= 0.0);
                    assert!((a.net - (a.total - a.glass)).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_glass_higher_than_gate_clamps_net() {
        let a = Areas::from_dimensions(100.0, 100.0, 150.0);
        assert_eq!(a.net, 0.0);
    }

    #[test]
    fn test_invalid_input_is_zero() {
        assert_eq!(parse_dimension("abc"), 0.0);
        assert_eq!(parse_dimension("-20"), 0.0);
        assert_eq!(parse_dimension(""), 0.0);
        assert_eq!(parse_dimension("NaN"), 0.0);
        assert_eq!(parse_dimension(" 250,5 "), 250.5);

        let a = Dimensions::parse("x", "200", "").areas();
        assert_eq!(a, Areas::default());
    }

    #[test]
    fn test_negative_dimensions_are_zeroed() {
        let d = Dimensions::new(-400.0, 250.0, -5.0);
        assert_eq!(d.width_cm, 0.0);
        assert!(!d.has_glass());
        assert_eq!(d.areas().total, 0.0);
    }
}
