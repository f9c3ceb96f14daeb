//! Quote calculation for a configured gate.

use crate::area::Areas;
use crate::catalog::{Catalog, Product, ProductKind};
use crate::gate::Gate;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// VAT applied on top of the surcharged subtotal.
pub const VAT_RATE: f64 = 0.20;

/// Which gate area an area-priced product is measured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaBasis {
    Total,
    Net,
    Glass,
}

impl AreaBasis {
    pub fn of(&self, areas: &Areas) -> f64 {
        match self {
            AreaBasis::Total => areas.total,
            AreaBasis::Net => areas.net,
            AreaBasis::Glass => areas.glass,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AreaBasis::Total => "total",
            AreaBasis::Net => "net",
            AreaBasis::Glass => "glass",
        }
    }
}

/// Pricing of one selected product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteLine {
    pub product: Product,
    /// Entered quantity times the sides multiplier.
    pub quantity: f64,
    /// Area basis for area-priced products; `None` when priced per unit.
    pub area_basis: Option<AreaBasis>,
    /// Line amount before surcharge and VAT.
    pub amount: f64,
}

/// Calculated totals cached on a gate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct QuoteTotals {
    #[serde(default, alias = "gesamtflaeche")]
    pub total_area: f64,
    #[serde(default, alias = "glasflaeche")]
    pub glass_area: f64,
    #[serde(default, alias = "torflaeche")]
    pub net_area: f64,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default, alias = "aufschlagBetrag")]
    pub surcharge_amount: f64,
    #[serde(default, alias = "exklusiveMwst")]
    pub pre_vat_total: f64,
    #[serde(default, alias = "inklMwst")]
    pub vat_inclusive_total: f64,
}

/// Complete pricing breakdown for a gate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteBreakdown {
    pub areas: Areas,
    /// Sum of line amounts.
    pub subtotal: f64,
    pub surcharge_amount: f64,
    /// Subtotal plus surcharge.
    pub pre_vat_total: f64,
    pub vat_inclusive_total: f64,
    /// One line per priced selection, in selection order.
    pub lines: Vec<QuoteLine>,
}

impl QuoteBreakdown {
    pub fn totals(&self) -> QuoteTotals {
        QuoteTotals {
            total_area: self.areas.total,
            glass_area: self.areas.glass,
            net_area: self.areas.net,
            subtotal: self.subtotal,
            surcharge_amount: self.surcharge_amount,
            pre_vat_total: self.pre_vat_total,
            vat_inclusive_total: self.vat_inclusive_total,
        }
    }

    pub fn vat_amount(&self) -> f64 {
        self.vat_inclusive_total - self.pre_vat_total
    }

    pub fn line(&self, product_id: ProductId) -> Option<&QuoteLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }
}

/// Calculate a gate's quote.
///
/// `catalog_products` resolves selections; selections whose product is not
/// found are left out of the quote. Members of `main_products` are always
/// priced on the full gate area unless they are glazing.
pub fn compute_total(
    gate: &Gate,
    catalog_products: &[Product],
    main_products: &[Product],
) -> QuoteBreakdown {
    let areas = gate.areas();
    let has_glass = gate.dimensions.has_glass();

    let mut subtotal = 0.0;
    let mut lines = Vec::with_capacity(gate.selections.len());

    for selection in &gate.selections {
        let Some(product) = catalog_products
            .iter()
            .find(|p| p.id == selection.product_id)
        else {
            debug!(product_id = %selection.product_id, "skipping selection for unknown product");
            continue;
        };

        let multiplier = if product.is_glazing() {
            1.0
        } else {
            selection.sides.multiplier()
        };
        let quantity = selection.quantity * multiplier;

        let (area_basis, amount) = if !product.unit.is_area() || product.kind.is_counted() {
            (None, product.price * quantity)
        } else {
            let is_main = main_products.iter().any(|p| p.id == product.id);
            let basis = area_basis(product, is_main, has_glass);
            (Some(basis), product.price * basis.of(&areas) * quantity)
        };

        subtotal += amount;
        lines.push(QuoteLine {
            product: product.clone(),
            quantity,
            area_basis,
            amount,
        });
    }

    let surcharge_amount = subtotal * (gate.surcharge_percent / 100.0);
    let pre_vat_total = subtotal + surcharge_amount;
    let vat_inclusive_total = pre_vat_total * (1.0 + VAT_RATE);

    QuoteBreakdown {
        areas,
        subtotal,
        surcharge_amount,
        pre_vat_total,
        vat_inclusive_total,
        lines,
    }
}

/// Area basis for an area-priced product, in precedence order: glazing,
/// main product, reduced single-wall filling, glass present.
fn area_basis(product: &Product, is_main: bool, has_glass: bool) -> AreaBasis {
    if product.kind == ProductKind::Glazing {
        AreaBasis::Glass
    } else if is_main {
        AreaBasis::Total
    } else if product.kind == ProductKind::ReducedSingleWall || has_glass {
        AreaBasis::Net
    } else {
        AreaBasis::Total
    }
}

impl Catalog {
    /// Quote a gate against this catalog's products for its gate type.
    pub fn quote(&self, gate: &Gate) -> QuoteBreakdown {
        let products = self.products_for(gate.gate_type);
        compute_total(gate, &products, self.main_products(gate.gate_type))
    }
}
