//! Catalog listing.

use anyhow::{Context as _, Result};
use gate_core::catalog::{GateType, Product};
use gate_core::format::truncate;
use gate_core::{format_price, QuoteError};
use serde_json::json;

use super::CatalogArgs;
use crate::context::Context;

const WIDTHS: [usize; 4] = [5, 52, 12, 6];

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let gate_types: Vec<GateType> = match &args.gate_type {
        Some(label) => vec![parse_gate_type(label)?],
        None => catalog.gate_types().collect(),
    };

    if ctx.output.is_json() {
        let categories: Vec<_> = gate_types
            .iter()
            .map(|t| {
                json!({
                    "gate_type": t.as_str(),
                    "label": t.label(),
                    "main": catalog.main_products(*t),
                    "accessories": catalog.accessories(*t),
                })
            })
            .collect();
        let mut out = json!({ "categories": categories });
        if args.general {
            out["general_accessories"] = json!(catalog.general_accessories());
        }
        ctx.output.json(&out);
        return Ok(());
    }

    for gate_type in gate_types {
        ctx.output.header(gate_type.label());
        print_products(ctx, "Main products", catalog.main_products(gate_type));
        print_products(ctx, "Accessories", catalog.accessories(gate_type));
    }
    if args.general {
        ctx.output.header("General accessories");
        print_products(ctx, "", catalog.general_accessories());
    }

    Ok(())
}

fn print_products(ctx: &Context, title: &str, products: &[Product]) {
    if products.is_empty() {
        return;
    }
    if !title.is_empty() {
        ctx.output.info(title);
    }
    ctx.output.table_header(&["ID", "Name", "Price", "Unit"], &WIDTHS);
    for p in products {
        let id = p.id.to_string();
        let name = truncate(&p.name, WIDTHS[1] - 3);
        let price = format_price(p.price);
        ctx.output
            .table_row(&[&id, &name, &price, p.unit.as_str()], &WIDTHS);
    }
}

/// Parse a gate type from a command-line label.
pub fn parse_gate_type(label: &str) -> Result<GateType> {
    let known: Vec<&str> = GateType::ALL.iter().map(|t| t.as_str()).collect();
    GateType::from_str(label)
        .ok_or_else(|| QuoteError::UnknownGateType(label.to_string()))
        .with_context(|| format!("expected one of {}", known.join(", ")))
}
