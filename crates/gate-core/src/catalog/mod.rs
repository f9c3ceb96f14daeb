//! Product catalog module.
//!
//! Contains products, gate types and the catalog that groups them.

mod builtin;
mod catalog;
mod gate_type;
mod product;

pub use catalog::{Catalog, CategoryProducts};
pub use gate_type::GateType;
pub use product::{Product, ProductKind, ProductUnit};
