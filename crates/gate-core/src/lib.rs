//! Domain types and pricing for gate quotations.
//!
//! This crate holds everything needed to price a gate without touching disk:
//!
//! - **Catalog**: products per gate type, general accessories, TOML overrides
//! - **Area**: total, glass and net area from centimetre dimensions
//! - **Pricing**: the quote engine, main tier selection, discounts
//! - **Records**: gates, selections and customers, readable from legacy JSON
//! - **Validation** and German display formatting
//!
//! # Example
//!
//! ```rust
//! use gate_core::prelude::*;
//!
//! let catalog = Catalog::builtin();
//! let mut gate = Gate::new(GateType::WingGates);
//! gate.set_dimensions(420.0, 250.0, 0.0);
//! catalog.apply_auto_tier(&mut gate);
//!
//! let quote = catalog.quote(&gate);
//! assert_eq!(quote.lines.len(), 1);
//! println!("Total: {}", format_price(quote.vat_inclusive_total));
//! ```

pub mod area;
pub mod catalog;
pub mod customer;
pub mod error;
pub mod format;
pub mod gate;
pub mod ids;
pub mod money;
pub mod pricing;
pub mod validation;

pub use error::QuoteError;
pub use ids::*;
pub use money::{format_price, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::QuoteError;
    pub use crate::ids::*;
    pub use crate::money::{format_price, Money};

    pub use crate::area::{Areas, Dimensions};
    pub use crate::catalog::{Catalog, CategoryProducts, GateType, Product, ProductKind, ProductUnit};
    pub use crate::customer::{Customer, CustomerDetails};
    pub use crate::format::{format_area, format_date, format_datetime};
    pub use crate::gate::{Gate, Selection, Sides};
    pub use crate::pricing::{
        apply_discount, auto_select_main_product, compute_total, AreaBasis, QuoteBreakdown,
        QuoteLine, QuoteTotals, TierSwap, VAT_RATE,
    };
    pub use crate::validation::{validate_customer, validate_dimensions, validate_gate_for_save};
}
