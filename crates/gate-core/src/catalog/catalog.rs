//! Catalog of products grouped by gate type.

use super::builtin::builtin_catalog;
use super::product::{Product, ProductKind, ProductUnit};
use super::GateType;
use crate::error::QuoteError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Products offered for one gate type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryProducts {
    /// Main (tier) products; at most one is selected on a gate.
    pub main: Vec<Product>,
    /// Type-specific accessories.
    #[serde(default)]
    pub accessories: Vec<Product>,
}

/// Immutable product catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    categories: BTreeMap<GateType, CategoryProducts>,
    general_accessories: Vec<Product>,
}

impl Catalog {
    /// Create a catalog with only general accessories.
    pub fn new(general_accessories: Vec<Product>) -> Self {
        Self {
            categories: BTreeMap::new(),
            general_accessories,
        }
    }

    /// The catalog shipped with the tool.
    pub fn builtin() -> Self {
        builtin_catalog()
    }

    /// Add or replace the products of a gate type.
    pub fn insert(&mut self, gate_type: GateType, products: CategoryProducts) {
        self.categories.insert(gate_type, products);
    }

    /// Remove a product everywhere it appears. Returns whether it was present.
    pub fn remove_product(&mut self, id: ProductId) -> bool {
        let mut removed = false;
        let mut drop_id = |list: &mut Vec<Product>| {
            let before = list.len();
            list.retain(|p| p.id != id);
            removed |= list.len() < before;
        };
        for category in self.categories.values_mut() {
            drop_id(&mut category.main);
            drop_id(&mut category.accessories);
        }
        drop_id(&mut self.general_accessories);
        removed
    }

    /// Parse a catalog from TOML.
    ///
    /// ```toml
    /// [[general_accessories]]
    /// id = 200
    /// name = "Betoplan"
    /// price = 23.0
    /// unit = "m²"
    ///
    /// [[categories.wing_gates.main]]
    /// id = 14
    /// name = "Flügeltor bis 11 m²"
    /// price = 185.0
    /// unit = "m²"
    /// ```
    ///
    /// Entries without a `kind` get one inferred from their name. Product ids
    /// must be unique across the whole catalog.
    pub fn from_toml_str(content: &str) -> Result<Self, QuoteError> {
        let file: CatalogFile = toml::from_str(content)?;
        let mut catalog = Catalog::new(file.general_accessories.into_iter().map(Into::into).collect());
        for (key, def) in file.categories {
            let gate_type = GateType::from_str(&key)
                .ok_or_else(|| QuoteError::InvalidCatalog(format!("unknown gate type '{}'", key)))?;
            catalog.insert(
                gate_type,
                CategoryProducts {
                    main: def.main.into_iter().map(Into::into).collect(),
                    accessories: def.accessories.into_iter().map(Into::into).collect(),
                },
            );
        }
        catalog.check_unique_ids()?;
        Ok(catalog)
    }

    fn check_unique_ids(&self) -> Result<(), QuoteError> {
        let mut seen = HashSet::new();
        for product in self.all_products() {
            if !seen.insert(product.id) {
                return Err(QuoteError::InvalidCatalog(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
        }
        Ok(())
    }

    /// Gate types that have products.
    pub fn gate_types(&self) -> impl Iterator<Item = GateType> + '_ {
        self.categories.keys().copied()
    }

    pub fn category(&self, gate_type: GateType) -> Option<&CategoryProducts> {
        self.categories.get(&gate_type)
    }

    /// Main products of a gate type, empty if the type has none.
    pub fn main_products(&self, gate_type: GateType) -> &[Product] {
        self.category(gate_type)
            .map(|c| c.main.as_slice())
            .unwrap_or(&[])
    }

    pub fn accessories(&self, gate_type: GateType) -> &[Product] {
        self.category(gate_type)
            .map(|c| c.accessories.as_slice())
            .unwrap_or(&[])
    }

    pub fn general_accessories(&self) -> &[Product] {
        &self.general_accessories
    }

    /// Everything selectable for a gate type: main products, its accessories
    /// and the general accessories, in that order. Empty for a type without
    /// a category.
    pub fn products_for(&self, gate_type: GateType) -> Vec<Product> {
        match self.category(gate_type) {
            Some(category) => category
                .main
                .iter()
                .chain(&category.accessories)
                .chain(&self.general_accessories)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether `id` is one of the gate type's main products.
    pub fn is_main_product(&self, gate_type: GateType, id: ProductId) -> bool {
        self.main_products(gate_type).iter().any(|p| p.id == id)
    }

    /// Find a product by id anywhere in the catalog.
    pub fn find_product(&self, id: ProductId) -> Option<&Product> {
        self.all_products().find(|p| p.id == id)
    }

    /// Iterate every product, categories first.
    pub fn all_products(&self) -> impl Iterator<Item = &Product> {
        self.categories
            .values()
            .flat_map(|c| c.main.iter().chain(&c.accessories))
            .chain(&self.general_accessories)
    }

    pub fn product_count(&self) -> usize {
        self.all_products().count()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    general_accessories: Vec<ProductDef>,
    #[serde(default)]
    categories: BTreeMap<String, CategoryDef>,
}

#[derive(Debug, Deserialize)]
struct CategoryDef {
    #[serde(default)]
    main: Vec<ProductDef>,
    #[serde(default)]
    accessories: Vec<ProductDef>,
}

#[derive(Debug, Deserialize)]
struct ProductDef {
    id: u32,
    name: String,
    price: f64,
    unit: ProductUnit,
    #[serde(default)]
    kind: Option<ProductKind>,
}

impl From<ProductDef> for Product {
    fn from(def: ProductDef) -> Self {
        let product = Product::new(def.id, def.name, def.price, def.unit);
        match def.kind {
            Some(kind) => product.with_kind(kind),
            None => product,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.gate_types().count(), 4);
        assert_eq!(catalog.main_products(GateType::WingGates).len(), 12);
        assert_eq!(catalog.main_products(GateType::PushGates).len(), 7);
        assert_eq!(catalog.general_accessories().len(), 39);
        assert!(catalog.check_unique_ids().is_ok());
    }

    #[test]
    fn test_products_for_order() {
        let catalog = Catalog::builtin();
        let products = catalog.products_for(GateType::Doors);
        assert_eq!(products.first().map(|p| p.id), Some(ProductId(1)));
        assert_eq!(products.last().map(|p| p.id), Some(ProductId(238)));
        assert_eq!(products.len(), 6 + 5 + 39);
    }

    #[test]
    fn test_builtin_kinds_are_tagged() {
        let catalog = Catalog::builtin();
        let kind = |id| catalog.find_product(ProductId(id)).map(|p| p.kind);
        assert_eq!(kind(216), Some(ProductKind::Glazing));
        assert_eq!(kind(40), Some(ProductKind::ReducedSingleWall));
        assert_eq!(kind(227), Some(ProductKind::WholePlate));
        assert_eq!(kind(230), Some(ProductKind::CutToSize));
        assert_eq!(kind(14), Some(ProductKind::Standard));
    }

    #[test]
    fn test_main_membership() {
        let catalog = Catalog::builtin();
        assert!(catalog.is_main_product(GateType::WingGates, ProductId(25)));
        assert!(!catalog.is_main_product(GateType::WingGates, ProductId(18)));
        assert!(!catalog.is_main_product(GateType::Doors, ProductId(25)));
    }

    #[test]
    fn test_remove_product() {
        let mut catalog = Catalog::builtin();
        assert!(catalog.remove_product(ProductId(14)));
        assert!(catalog.find_product(ProductId(14)).is_none());
        assert!(!catalog.remove_product(ProductId(14)));
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
[[general_accessories]]
id = 200
name = "Plexiglas 5mm"
price = 119.0
unit = "m²"
kind = "glazing"

[[categories.wing_gates.main]]
id = 14
name = "Flügeltor bis 11 m²"
price = 185.0
unit = "m²"

[[categories."Schubtore".accessories]]
id = 40
name = "Minderpreis einwandige Füllung"
price = -13.0
unit = "m²"
"#;
        let catalog = Catalog::from_toml_str(toml).unwrap();
        assert_eq!(catalog.main_products(GateType::WingGates).len(), 1);
        assert_eq!(
            catalog.find_product(ProductId(200)).map(|p| p.kind),
            Some(ProductKind::Glazing)
        );
        assert_eq!(
            catalog.find_product(ProductId(40)).map(|p| p.kind),
            Some(ProductKind::ReducedSingleWall)
        );
    }

    #[test]
    fn test_from_toml_rejects_duplicates() {
        let toml = r#"
[[general_accessories]]
id = 1
name = "A"
price = 1.0
unit = "lm"

[[general_accessories]]
id = 1
name = "B"
price = 2.0
unit = "lm"
"#;
        assert!(matches!(
            Catalog::from_toml_str(toml),
            Err(QuoteError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_from_toml_rejects_unknown_gate_type() {
        let toml = r#"
[[categories.garages.main]]
id = 1
name = "Garagentor"
price = 100.0
unit = "m²"
"#;
        let err = Catalog::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("garages"));
    }
}
