//! Product, unit and kind types.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// How a product's price is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductUnit {
    /// Priced per square metre.
    #[serde(rename = "m\u{b2}", alias = "m2", alias = "sqm")]
    SquareMetre,
    /// Priced per piece.
    #[serde(rename = "St\u{fc}ck", alias = "piece")]
    Piece,
    /// Priced per linear metre.
    #[serde(rename = "lm", alias = "linear_metre")]
    LinearMetre,
}

impl ProductUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductUnit::SquareMetre => "m\u{b2}",
            ProductUnit::Piece => "St\u{fc}ck",
            ProductUnit::LinearMetre => "lm",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "m\u{b2}" | "m2" | "sqm" => Some(ProductUnit::SquareMetre),
            "st\u{fc}ck" | "stk" | "piece" => Some(ProductUnit::Piece),
            "lm" | "linear_metre" => Some(ProductUnit::LinearMetre),
            _ => None,
        }
    }

    pub fn is_area(&self) -> bool {
        matches!(self, ProductUnit::SquareMetre)
    }
}

/// Pricing sub-kind of a product.
///
/// Drives area-basis selection and the double-sided multiplier. Catalog
/// entries either state it or have it inferred from their name once, when the
/// catalog is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    #[default]
    Standard,
    /// Glazing: priced on glass area, never doubled for two sides.
    Glazing,
    /// Reduced-price single-wall filling: priced on net door area.
    ReducedSingleWall,
    /// Sold as whole plates; quantity is a plate count.
    WholePlate,
    /// Cut to size; quantity is the entered square metres.
    CutToSize,
}

impl ProductKind {
    /// Infer the kind from a product name (case-insensitive substring match).
    pub fn infer(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("in ganzen platten") {
            ProductKind::WholePlate
        } else if lower.contains("zugeschnitten") {
            ProductKind::CutToSize
        } else if lower.contains("verglasung") {
            ProductKind::Glazing
        } else if lower.contains("minderpreis") && lower.contains("einwandige") {
            ProductKind::ReducedSingleWall
        } else {
            ProductKind::Standard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Standard => "standard",
            ProductKind::Glazing => "glazing",
            ProductKind::ReducedSingleWall => "reduced_single_wall",
            ProductKind::WholePlate => "whole_plate",
            ProductKind::CutToSize => "cut_to_size",
        }
    }

    /// Whether the entered quantity is the billed amount itself rather than a
    /// multiplier on an area.
    pub fn is_counted(&self) -> bool {
        matches!(self, ProductKind::WholePlate | ProductKind::CutToSize)
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in euros; negative for deductions.
    pub price: f64,
    pub unit: ProductUnit,
    #[serde(default)]
    pub kind: ProductKind,
}

impl Product {
    /// Create a product, inferring its kind from the name.
    pub fn new(id: u32, name: impl Into<String>, price: f64, unit: ProductUnit) -> Self {
        let name = name.into();
        let kind = ProductKind::infer(&name);
        Self {
            id: ProductId(id),
            name,
            price,
            unit,
            kind,
        }
    }

    /// Override the inferred kind.
    pub fn with_kind(mut self, kind: ProductKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn is_glazing(&self) -> bool {
        self.kind == ProductKind::Glazing
    }

    /// Whether this is a deduction line.
    pub fn is_deduction(&self) -> bool {
        self.price < 0.0
    }
}
