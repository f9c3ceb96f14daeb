//! Automatic selection of the main product tier.
//!
//! Wing/folding gates and push gates are priced in area bands; each band is a
//! separate main product whose name carries the band marker ("bis 11",
//! "über 20", ...). Doors have a single price, sliding doors default to
//! Betoplan.

use crate::catalog::{Catalog, GateType, Product};
use crate::gate::Gate;
use crate::ids::ProductId;
use serde::Serialize;
use tracing::{debug, info};

/// Marker of the open-ended top band.
pub const OVER_TOP_BAND_MARKER: &str = "\u{fc}ber 20";

/// Main product name selected for sliding doors.
pub const SLIDING_DOOR_DEFAULT: &str = "Betoplan";

/// An area band with an inclusive upper bound in m².
#[derive(Debug, Clone, Copy)]
struct Band {
    upper: f64,
    marker: &'static str,
}

const fn band(upper: f64, marker: &'static str) -> Band {
    Band { upper, marker }
}

const WING_GATE_BANDS: &[Band] = &[
    band(4.0, "bis 4"),
    band(7.0, "bis 7"),
    band(11.0, "bis 11"),
    band(15.0, "bis 15"),
    band(20.0, "bis 20"),
];

/// Push gates also carry the small sliding door up to 3 m².
const PUSH_GATE_BANDS: &[Band] = &[
    band(3.0, "bis 3"),
    band(4.0, "bis 4"),
    band(7.0, "bis 7"),
    band(11.0, "bis 11"),
    band(15.0, "bis 15"),
    band(20.0, "bis 20"),
];

/// Band marker for an area, or `None` for gate types without bands.
pub fn band_marker(gate_type: GateType, area: f64) -> Option<&'static str> {
    let bands = match gate_type {
        GateType::WingGates => WING_GATE_BANDS,
        GateType::PushGates => PUSH_GATE_BANDS,
        GateType::Doors | GateType::SlidingDoors => return None,
    };
    Some(
        bands
            .iter()
            .find(|b| area <= b.upper)
            .map_or(OVER_TOP_BAND_MARKER, |b| b.marker),
    )
}

/// Pick the main product for a gate type and total area.
///
/// Returns `None` when no main product, or no single main product, matches.
pub fn auto_select_main_product(
    gate_type: GateType,
    area: f64,
    main_products: &[Product],
) -> Option<ProductId> {
    select_main_tier(gate_type, area, main_products, None)
}

/// Like [`auto_select_main_product`], keeping the product family of
/// `current` when several families share a band.
///
/// Wing gates list both a "Flügeltor" and a "Falttor" series. A band marker
/// matching more than one product is narrowed to the family of the current
/// main product, or of the first main product when nothing is selected.
pub fn select_main_tier(
    gate_type: GateType,
    area: f64,
    main_products: &[Product],
    current: Option<ProductId>,
) -> Option<ProductId> {
    match gate_type {
        GateType::Doors => main_products.first().map(|p| p.id),
        GateType::SlidingDoors => unique(
            main_products
                .iter()
                .filter(|p| p.name.contains(SLIDING_DOOR_DEFAULT)),
        ),
        GateType::WingGates | GateType::PushGates => {
            let marker = band_marker(gate_type, area)?;
            let candidates: Vec<&Product> = main_products
                .iter()
                .filter(|p| p.name.contains(marker))
                .collect();
            if candidates.len() <= 1 {
                return candidates.first().map(|p| p.id);
            }

            let family = current
                .and_then(|id| main_products.iter().find(|p| p.id == id))
                .or_else(|| main_products.first())
                .map(|p| tier_family(&p.name))?;
            unique(
                candidates
                    .into_iter()
                    .filter(|p| tier_family(&p.name) == family),
            )
        }
    }
}

fn unique<'a>(mut matches: impl Iterator<Item = &'a Product>) -> Option<ProductId> {
    let first = matches.next()?;
    match matches.next() {
        Some(_) => None,
        None => Some(first.id),
    }
}

/// Product series name without its band, e.g. "Falttor" for "Falttor bis 7 m²".
fn tier_family(name: &str) -> &str {
    [" bis ", " \u{fc}ber "]
        .iter()
        .filter_map(|sep| name.find(sep))
        .min()
        .map_or(name, |idx| &name[..idx])
        .trim()
}

/// Outcome of re-evaluating a gate's main tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TierSwap {
    /// The correct tier was already the only selected main product.
    Unchanged { product_id: ProductId },
    /// Main products were replaced by `to`.
    Swapped {
        from: Option<ProductId>,
        to: ProductId,
    },
    /// No tier applies; the selection was left alone.
    NoMatch,
}

impl TierSwap {
    pub fn changed(&self) -> bool {
        matches!(self, TierSwap::Swapped { .. })
    }
}

impl Catalog {
    /// Tier the gate should have for its current area.
    pub fn auto_tier_for(&self, gate: &Gate) -> Option<ProductId> {
        let mains = self.main_products(gate.gate_type);
        select_main_tier(
            gate.gate_type,
            gate.areas().total,
            mains,
            gate.selected_main_product(mains),
        )
    }

    /// Swap the gate's main product to the tier for its current area.
    pub fn apply_auto_tier(&self, gate: &mut Gate) -> TierSwap {
        let mains = self.main_products(gate.gate_type);
        let Some(target) = self.auto_tier_for(gate) else {
            debug!(gate_type = %gate.gate_type, area = gate.areas().total, "no main tier matches");
            return TierSwap::NoMatch;
        };

        let from = gate.selected_main_product(mains);
        if gate.swap_main_product(target, mains) {
            info!(gate_id = %gate.id, ?from, to = %target, "main tier swapped");
            TierSwap::Swapped { from, to: target }
        } else {
            TierSwap::Unchanged { product_id: target }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductUnit;
    use crate::gate::Sides;

    fn name_of(catalog: &Catalog, id: Option<ProductId>) -> Option<String> {
        id.and_then(|id| catalog.find_product(id)).map(|p| p.name.clone())
    }

    #[test]
    fn test_wing_gate_picks_bis_11_for_10_5() {
        let catalog = Catalog::builtin();
        let mains = catalog.main_products(GateType::WingGates);
        let picked = auto_select_main_product(GateType::WingGates, 10.5, mains);
        assert_eq!(name_of(&catalog, picked).as_deref(), Some("Flügeltor bis 11 m²"));
    }

    #[test]
    fn test_wing_gate_band_edges() {
        let catalog = Catalog::builtin();
        let mains = catalog.main_products(GateType::WingGates);
        let pick = |area| name_of(&catalog, auto_select_main_product(GateType::WingGates, area, mains));
        assert_eq!(pick(4.0).as_deref(), Some("Flügeltor bis 4 m²"));
        assert_eq!(pick(4.01).as_deref(), Some("Flügeltor bis 7 m²"));
        assert_eq!(pick(20.0).as_deref(), Some("Flügeltor bis 20 m²"));
        assert_eq!(pick(20.5).as_deref(), Some("Flügeltor über 20 m²"));
        assert_eq!(pick(0.0).as_deref(), Some("Flügeltor bis 4 m²"));
    }

    #[test]
    fn test_wing_gate_keeps_folding_family() {
        let catalog = Catalog::builtin();
        let mains = catalog.main_products(GateType::WingGates);
        let picked = select_main_tier(GateType::WingGates, 12.0, mains, Some(ProductId(24)));
        assert_eq!(name_of(&catalog, picked).as_deref(), Some("Falttor bis 15 m²"));
    }

    #[test]
    fn test_push_gate_small_band() {
        let catalog = Catalog::builtin();
        let mains = catalog.main_products(GateType::PushGates);
        let pick = |area| name_of(&catalog, auto_select_main_product(GateType::PushGates, area, mains));
        assert_eq!(pick(2.5).as_deref(), Some("Schiebetür bis 3m²"));
        assert_eq!(pick(3.5).as_deref(), Some("Schubtor bis 4 m²"));
        assert_eq!(pick(25.0).as_deref(), Some("Schubtor über 20 m²"));
    }

    #[test]
    fn test_doors_and_sliding_doors() {
        let catalog = Catalog::builtin();
        let doors = catalog.main_products(GateType::Doors);
        assert_eq!(auto_select_main_product(GateType::Doors, 99.0, doors), Some(ProductId(1)));
        assert_eq!(auto_select_main_product(GateType::Doors, 1.0, &[]), None);

        let sliding = catalog.main_products(GateType::SlidingDoors);
        assert_eq!(
            auto_select_main_product(GateType::SlidingDoors, 7.0, sliding),
            Some(ProductId(55))
        );
    }

    #[test]
    fn test_ambiguous_or_missing_match_is_none() {
        let mains = vec![
            Product::new(1, "Tor bis 4 m²", 1.0, ProductUnit::SquareMetre),
            Product::new(2, "Tor bis 4 m² verstärkt", 1.0, ProductUnit::SquareMetre),
        ];
        assert_eq!(auto_select_main_product(GateType::WingGates, 3.0, &mains), None);
        assert_eq!(auto_select_main_product(GateType::WingGates, 9.0, &mains), None);
    }

    #[test]
    fn test_tier_family() {
        assert_eq!(tier_family("Flügeltor bis 11 m²"), "Flügeltor");
        assert_eq!(tier_family("Falttor über 20 m²"), "Falttor");
        assert_eq!(tier_family("Betoplan"), "Betoplan");
    }

    #[test]
    fn test_apply_auto_tier_swaps_once() {
        let catalog = Catalog::builtin();
        let mut gate = Gate::new(GateType::WingGates);
        gate.toggle_product(ProductId(12), 1.0, Sides::Single).unwrap();
        gate.toggle_product(ProductId(18), 1.0, Sides::Single).unwrap();
        gate.set_dimensions(420.0, 250.0, 0.0);

        let swap = catalog.apply_auto_tier(&mut gate);
        assert_eq!(
            swap,
            TierSwap::Swapped {
                from: Some(ProductId(12)),
                to: ProductId(14)
            }
        );
        assert!(gate.is_selected(ProductId(18)));
        assert!(!gate.is_selected(ProductId(12)));

        assert_eq!(
            catalog.apply_auto_tier(&mut gate),
            TierSwap::Unchanged {
                product_id: ProductId(14)
            }
        );
    }
}
