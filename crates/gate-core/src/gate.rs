//! Gate configuration and product selections.

use crate::area::{Areas, Dimensions};
use crate::catalog::{GateType, Product};
use crate::error::QuoteError;
use crate::ids::{GateId, ProductId};
use crate::pricing::{QuoteBreakdown, QuoteTotals};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a product is applied to one or both faces of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sides {
    #[default]
    #[serde(alias = "einseitig")]
    Single,
    #[serde(alias = "beidseitig")]
    Double,
}

impl Sides {
    /// Quantity multiplier before glazing is taken into account.
    pub fn multiplier(&self) -> f64 {
        match self {
            Sides::Single => 1.0,
            Sides::Double => 2.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sides::Single => "single",
            Sides::Double => "double",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" | "1" | "einseitig" => Some(Sides::Single),
            "double" | "2" | "beidseitig" => Some(Sides::Double),
            _ => None,
        }
    }
}

impl fmt::Display for Sides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A selected product on a gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(alias = "id")]
    pub product_id: ProductId,
    /// Pieces, metres, plates or m² depending on the product.
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub sides: Sides,
}

fn default_quantity() -> f64 {
    1.0
}

impl Selection {
    pub fn new(product_id: ProductId, quantity: f64, sides: Sides) -> Self {
        Self {
            product_id,
            quantity,
            sides,
        }
    }

    /// Parse `ID[:QUANTITY[:SIDES]]`, e.g. `14`, `220:3` or `201:1:double`.
    pub fn parse(spec: &str) -> Result<Self, QuoteError> {
        let invalid = || QuoteError::InvalidSelection(spec.to_string());
        let mut parts = spec.split(':');

        let id = parts
            .next()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let quantity = match parts.next() {
            Some(q) => q.trim().replace(',', ".").parse::<f64>().map_err(|_| invalid())?,
            None => 1.0,
        };
        let sides = match parts.next() {
            Some(s) => Sides::from_str(s).ok_or_else(invalid)?,
            None => Sides::Single,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        check_quantity(quantity)?;

        Ok(Self::new(ProductId(id), quantity, sides))
    }
}

fn check_quantity(quantity: f64) -> Result<(), QuoteError> {
    if quantity.is_finite() && quantity > 0.0 {
        Ok(())
    } else {
        Err(QuoteError::InvalidQuantity(quantity))
    }
}

/// A gate being quoted, or a saved snapshot of one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Gate {
    pub id: GateId,
    /// Label such as "Main entrance".
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "notizen")]
    pub notes: String,
    #[serde(alias = "gateType")]
    pub gate_type: GateType,
    #[serde(flatten)]
    pub dimensions: Dimensions,
    #[serde(default, alias = "aufschlag")]
    pub surcharge_percent: f64,
    #[serde(default, alias = "selectedProducts")]
    pub selections: Vec<Selection>,
    /// Result of the last calculation; always rederivable. Stored as
    /// top-level keys next to the dimensions.
    #[serde(flatten)]
    pub totals: QuoteTotals,
    #[serde(default = "Utc::now", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", alias = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Gate {
    /// Create an empty gate of the given type.
    pub fn new(gate_type: GateType) -> Self {
        let now = Utc::now();
        Self {
            id: GateId::generate(),
            name: String::new(),
            notes: String::new(),
            gate_type,
            dimensions: Dimensions::default(),
            surcharge_percent: 0.0,
            selections: Vec::new(),
            totals: QuoteTotals::default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Current areas, derived from the dimensions.
    pub fn areas(&self) -> Areas {
        self.dimensions.areas()
    }

    /// Replace the dimensions; invalid values become 0.
    pub fn set_dimensions(&mut self, width_cm: f64, height_cm: f64, glass_height_cm: f64) {
        self.dimensions = Dimensions::new(width_cm, height_cm, glass_height_cm);
        let areas = self.areas();
        self.totals.total_area = areas.total;
        self.totals.glass_area = areas.glass;
        self.totals.net_area = areas.net;
        self.touch();
    }

    pub fn set_surcharge(&mut self, percent: f64) {
        self.surcharge_percent = if percent.is_finite() { percent } else { 0.0 };
        self.touch();
    }

    /// Select the product if absent, deselect it if present.
    ///
    /// Returns whether the product is selected afterwards. The quantity must
    /// be positive when the product is added.
    pub fn toggle_product(
        &mut self,
        product_id: ProductId,
        quantity: f64,
        sides: Sides,
    ) -> Result<bool, QuoteError> {
        if self.deselect(product_id) {
            return Ok(false);
        }
        check_quantity(quantity)?;
        self.selections
            .push(Selection::new(product_id, quantity, sides));
        self.touch();
        Ok(true)
    }

    /// Select a product, or update quantity and sides if already selected.
    pub fn select(&mut self, selection: Selection) -> Result<(), QuoteError> {
        check_quantity(selection.quantity)?;
        match self
            .selections
            .iter_mut()
            .find(|s| s.product_id == selection.product_id)
        {
            Some(existing) => *existing = selection,
            None => self.selections.push(selection),
        }
        self.touch();
        Ok(())
    }

    /// Remove a selection. Returns whether it was present.
    pub fn deselect(&mut self, product_id: ProductId) -> bool {
        let before = self.selections.len();
        self.selections.retain(|s| s.product_id != product_id);
        let removed = self.selections.len() < before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Update the quantity of a selected product.
    ///
    /// Returns `Ok(false)` if the product is not selected.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: f64) -> Result<bool, QuoteError> {
        check_quantity(quantity)?;
        match self.selection_mut(product_id) {
            Some(selection) => {
                selection.quantity = quantity;
                self.touch();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Update the sides of a selected product.
    pub fn set_sides(&mut self, product_id: ProductId, sides: Sides) -> bool {
        match self.selection_mut(product_id) {
            Some(selection) => {
                selection.sides = sides;
                self.touch();
                true
            }
            None => false,
        }
    }

    fn selection_mut(&mut self, product_id: ProductId) -> Option<&mut Selection> {
        self.selections
            .iter_mut()
            .find(|s| s.product_id == product_id)
    }

    pub fn selection(&self, product_id: ProductId) -> Option<&Selection> {
        self.selections.iter().find(|s| s.product_id == product_id)
    }

    pub fn is_selected(&self, product_id: ProductId) -> bool {
        self.selection(product_id).is_some()
    }

    /// Quantity of a product, 0 when not selected.
    pub fn quantity_of(&self, product_id: ProductId) -> f64 {
        self.selection(product_id).map_or(0.0, |s| s.quantity)
    }

    /// Sides of a product, single when not selected.
    pub fn sides_of(&self, product_id: ProductId) -> Sides {
        self.selection(product_id).map_or(Sides::Single, |s| s.sides)
    }

    /// First selected product that belongs to `main_products`.
    pub fn selected_main_product(&self, main_products: &[Product]) -> Option<ProductId> {
        self.selections
            .iter()
            .map(|s| s.product_id)
            .find(|id| main_products.iter().any(|p| p.id == *id))
    }

    /// Make `new_main` the only selected main product.
    ///
    /// Every selected member of `main_products` is removed before `new_main`
    /// is added with quantity 1 on a single side. Returns whether the
    /// selection changed.
    pub fn swap_main_product(&mut self, new_main: ProductId, main_products: &[Product]) -> bool {
        let is_main = |id: ProductId| main_products.iter().any(|p| p.id == id);
        let selected_mains: Vec<ProductId> = self
            .selections
            .iter()
            .map(|s| s.product_id)
            .filter(|id| is_main(*id))
            .collect();

        if selected_mains == [new_main] {
            return false;
        }

        self.selections.retain(|s| !is_main(s.product_id));
        self.selections
            .push(Selection::new(new_main, 1.0, Sides::Single));
        self.touch();
        true
    }

    /// Write a calculation result back into the cached totals.
    pub fn apply_quote(&mut self, quote: &QuoteBreakdown) {
        self.totals = quote.totals();
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_toggle_product() {
        let mut gate = Gate::new(GateType::Doors);
        assert!(gate.toggle_product(ProductId(7), 2.0, Sides::Single).unwrap());
        assert!(gate.is_selected(ProductId(7)));
        assert_eq!(gate.quantity_of(ProductId(7)), 2.0);
        assert!(!gate.toggle_product(ProductId(7), 1.0, Sides::Single).unwrap());
        assert!(!gate.is_selected(ProductId(7)));
        assert_eq!(gate.quantity_of(ProductId(7)), 0.0);
    }

    #[test]
    fn test_selection_is_unique_per_product() {
        let mut gate = Gate::new(GateType::Doors);
        gate.select(Selection::new(ProductId(7), 1.0, Sides::Single)).unwrap();
        gate.select(Selection::new(ProductId(7), 3.0, Sides::Double)).unwrap();
        assert_eq!(gate.selections.len(), 1);
        assert_eq!(gate.quantity_of(ProductId(7)), 3.0);
        assert_eq!(gate.sides_of(ProductId(7)), Sides::Double);
    }

    #[test]
    fn test_set_quantity_and_sides() {
        let mut gate = Gate::new(GateType::Doors);
        gate.toggle_product(ProductId(1), 1.0, Sides::Single).unwrap();
        assert!(gate.set_quantity(ProductId(1), 2.5).unwrap());
        assert!(!gate.set_quantity(ProductId(99), 2.5).unwrap());
        assert!(gate.set_quantity(ProductId(1), 0.0).is_err());
        assert!(gate.set_sides(ProductId(1), Sides::Double));
        assert!(!gate.set_sides(ProductId(99), Sides::Double));
        assert_eq!(gate.sides_of(ProductId(99)), Sides::Single);
    }

    #[test]
    fn test_set_dimensions_caches_areas() {
        let mut gate = Gate::new(GateType::WingGates);
        gate.set_dimensions(400.0, 250.0, 50.0);
        assert_eq!(gate.totals.total_area, 10.0);
        assert_eq!(gate.totals.glass_area, 2.0);
        assert_eq!(gate.totals.net_area, 8.0);
    }

    #[test]
    fn test_swap_main_product() {
        let catalog = Catalog::builtin();
        let mains = catalog.main_products(GateType::WingGates);
        let mut gate = Gate::new(GateType::WingGates);
        gate.toggle_product(ProductId(13), 1.0, Sides::Single).unwrap();
        gate.toggle_product(ProductId(25), 1.0, Sides::Single).unwrap();
        gate.toggle_product(ProductId(20), 1.0, Sides::Single).unwrap();

        assert!(gate.swap_main_product(ProductId(14), mains));
        let ids: Vec<u32> = gate.selections.iter().map(|s| s.product_id.get()).collect();
        assert_eq!(ids, vec![20, 14]);

        assert!(!gate.swap_main_product(ProductId(14), mains));
        assert_eq!(gate.selected_main_product(mains), Some(ProductId(14)));
    }

    #[test]
    fn test_selection_parse() {
        let s = Selection::parse("201:1,5:double").unwrap();
        assert_eq!(s.product_id, ProductId(201));
        assert_eq!(s.quantity, 1.5);
        assert_eq!(s.sides, Sides::Double);

        assert_eq!(Selection::parse("14").unwrap().quantity, 1.0);
        assert!(Selection::parse("x").is_err());
        assert!(Selection::parse("14:0").is_err());
        assert!(Selection::parse("14:1:triple").is_err());
        assert!(Selection::parse("14:1:double:extra").is_err());
    }

    #[test]
    fn test_reads_legacy_gate_record() {
        let json = r#"{
            "id": "gate_1700000000000_abc123def",
            "name": "Garage",
            "gateType": "Flügeltore und Falttore",
            "notizen": "",
            "breite": 400,
            "hoehe": 250,
            "glashoehe": 0,
            "selectedProducts": [
                {"id": 14, "quantity": 1, "sides": "einseitig"},
                {"id": 201, "quantity": 1, "sides": "beidseitig"}
            ],
            "gesamtflaeche": 10,
            "glasflaeche": 0,
            "torflaeche": 10,
            "aufschlag": 10,
            "subtotal": 2150,
            "aufschlagBetrag": 215,
            "exklusiveMwst": 2365,
            "inklMwst": 2838,
            "createdAt": "2024-05-01T08:00:00.000Z",
            "updatedAt": "2024-05-01T08:00:00.000Z"
        }"#;
        let gate: Gate = serde_json::from_str(json).unwrap();
        assert_eq!(gate.gate_type, GateType::WingGates);
        assert_eq!(gate.dimensions.width_cm, 400.0);
        assert_eq!(gate.surcharge_percent, 10.0);
        assert_eq!(gate.sides_of(ProductId(201)), Sides::Double);

        assert_eq!(gate.totals.total_area, 10.0);
        assert_eq!(gate.totals.net_area, 10.0);
        assert_eq!(gate.totals.subtotal, 2150.0);
        assert_eq!(gate.totals.surcharge_amount, 215.0);
        assert_eq!(gate.totals.pre_vat_total, 2365.0);
        assert_eq!(gate.totals.vat_inclusive_total, 2838.0);
    }

    #[test]
    fn test_cached_totals_survive_serialization() {
        let mut gate = Gate::new(GateType::Doors);
        gate.set_dimensions(100.0, 200.0, 0.0);
        gate.totals.vat_inclusive_total = 540.0;

        let value = serde_json::to_value(&gate).unwrap();
        assert_eq!(value["vat_inclusive_total"], 540.0);
        assert_eq!(value["total_area"], 2.0);

        let back: Gate = serde_json::from_value(value).unwrap();
        assert_eq!(back.totals, gate.totals);
    }

    #[test]
    fn test_toggle_rejects_non_positive_quantity() {
        let mut gate = Gate::new(GateType::Doors);
        for quantity in [0.0, -3.0, f64::NAN] {
            assert!(matches!(
                gate.toggle_product(ProductId(7), quantity, Sides::Single),
                Err(QuoteError::InvalidQuantity(_))
            ));
        }
        assert!(gate.selections.is_empty());

        gate.toggle_product(ProductId(7), 1.0, Sides::Single).unwrap();
        assert!(!gate.toggle_product(ProductId(7), -3.0, Sides::Single).unwrap());
        assert!(!gate.is_selected(ProductId(7)));
    }
}
