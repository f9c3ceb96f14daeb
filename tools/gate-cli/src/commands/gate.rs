//! Gate quoting and management commands.

use std::time::Instant;

use anyhow::{bail, Result};
use dialoguer::Confirm;
use gate_core::format::{format_area, format_datetime, truncate};
use gate_core::gate::{Gate, Selection};
use gate_core::ids::GateId;
use gate_core::pricing::{apply_discount, QuoteBreakdown, VAT_RATE};
use gate_core::validation::validate_dimensions;
use gate_core::{format_price, QuoteError};
use gate_store::{CustomerStore, MemoryStore, QuoteSession};
use serde_json::json;

use super::catalog::parse_gate_type;
use super::customer::find_customer;
use super::{GateArgs, GateCommand, GateSpecArgs};
use crate::context::Context;
use crate::output::price_cell;

/// Run the gate command.
pub async fn run(args: GateArgs, ctx: &Context) -> Result<()> {
    match args.command {
        GateCommand::Quote { spec, discount } => quote_gate(spec, discount, ctx).await,
        GateCommand::Save {
            customer,
            gate,
            name,
            notes,
            spec,
        } => save_gate(&customer, gate, name, notes, spec, ctx).await,
        GateCommand::List { customer } => list_gates(&customer, ctx).await,
        GateCommand::Show { customer, id } => show_gate(&customer, &id, ctx).await,
        GateCommand::Delete { customer, id, yes } => delete_gate(&customer, &id, yes, ctx).await,
    }
}

async fn quote_gate(spec: GateSpecArgs, discount: Option<f64>, ctx: &Context) -> Result<()> {
    let Some(label) = spec.gate_type.as_deref() else {
        bail!("--type is required to quote a gate");
    };
    let gate_type = parse_gate_type(label)?;

    let mut session = QuoteSession::open(MemoryStore::new(), ctx.catalog()?)
        .with_default_surcharge(ctx.config.pricing.default_surcharge_percent);
    session.start_new_gate(gate_type);
    configure_gate(&mut session, &spec, ctx)?;
    if session.flush_tier_swap().is_some_and(|s| s.changed()) {
        ctx.output.debug("Main product tier updated for the gate area");
    }

    let Some(gate) = session.current_gate() else {
        bail!("No gate being edited");
    };
    let quote = session.catalog().quote(gate);
    let discount = discount.map(|percent| apply_discount(quote.vat_inclusive_total, percent));

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "gate": gate,
            "quote": quote,
            "discount": discount,
        }));
        return Ok(());
    }

    print_quote(ctx, gate, &quote);
    if let Some(d) = discount {
        ctx.output
            .kv(&format!("Discount {}%", d.percent), &price_cell(-d.discount_amount));
        ctx.output.kv("Final total", &format_price(d.final_total));
    }
    Ok(())
}

async fn save_gate(
    customer: &str,
    gate_id: Option<String>,
    name: Option<String>,
    notes: Option<String>,
    spec: GateSpecArgs,
    ctx: &Context,
) -> Result<()> {
    let mut session = ctx.open_session()?;
    let customer_id = find_customer(session.customers(), customer)?.id.clone();
    session.select_customer(&customer_id)?;

    match &gate_id {
        Some(id) => {
            session.edit_gate(&GateId::from(id.as_str()))?;
            if let (Some(label), Some(gate)) = (spec.gate_type.as_deref(), session.current_gate()) {
                if parse_gate_type(label)? != gate.gate_type {
                    bail!("The gate type of a saved gate cannot be changed");
                }
            }
        }
        None => {
            let Some(label) = spec.gate_type.as_deref() else {
                bail!("--type is required for a new gate");
            };
            session.start_new_gate(parse_gate_type(label)?);
        }
    }

    session.modify_gate(|gate| {
        if let Some(name) = name {
            gate.name = name;
        }
        if let Some(notes) = notes {
            gate.notes = notes;
        }
        Ok(())
    })?;
    configure_gate(&mut session, &spec, ctx)?;

    let saved_id = session.save_current_gate()?;
    let saved = session
        .current_customer()
        .and_then(|c| c.get_gate(&saved_id));

    if ctx.output.is_json() {
        ctx.output.json(&saved);
        return Ok(());
    }
    ctx.output.success(&format!("Gate saved: {}", saved_id));
    if let Some(gate) = saved {
        ctx.output
            .kv("Total incl. VAT", &format_price(gate.totals.vat_inclusive_total));
    }
    Ok(())
}

/// Apply command-line settings to the session's current gate.
fn configure_gate<S: CustomerStore>(
    session: &mut QuoteSession<S>,
    spec: &GateSpecArgs,
    ctx: &Context,
) -> Result<()> {
    let selections = spec
        .products
        .iter()
        .map(|p| Selection::parse(p))
        .collect::<Result<Vec<_>, QuoteError>>()?;

    session.modify_gate(|gate| {
        if let Some(percent) = spec.surcharge {
            gate.set_surcharge(percent);
        }
        for selection in selections {
            gate.select(selection)?;
        }
        Ok(())
    })?;

    if spec.width.is_some() || spec.height.is_some() || spec.glass_height.is_some() {
        let Some(current) = session.current_gate().map(|g| g.dimensions) else {
            bail!("No gate being edited");
        };
        let width = spec.width.unwrap_or(current.width_cm);
        let height = spec.height.unwrap_or(current.height_cm);
        let glass_height = spec.glass_height.unwrap_or(current.glass_height_cm);

        let report = validate_dimensions(width, height, glass_height);
        if !report.is_valid() {
            return Err(QuoteError::Validation(report.errors).into());
        }
        session.update_dimensions(width, height, glass_height, Instant::now())?;
    }

    if spec.auto_tier {
        let swap = session.apply_auto_tier()?;
        ctx.output.debug(&format!("Auto tier: {:?}", swap));
    }

    if let Some(gate) = session.current_gate() {
        let offered = session.catalog().products_for(gate.gate_type);
        for selection in &gate.selections {
            if !offered.iter().any(|p| p.id == selection.product_id) {
                ctx.output.warn(&format!(
                    "Product {} is not offered for {} and is not priced",
                    selection.product_id,
                    gate.gate_type.label()
                ));
            }
        }
    }
    Ok(())
}

async fn list_gates(customer: &str, ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let customer = find_customer(session.customers(), customer)?;

    if ctx.output.is_json() {
        ctx.output.json(&customer.gates);
        return Ok(());
    }

    ctx.output.header(&format!("Gates of {}", customer.display_name()));
    if customer.gates.is_empty() {
        ctx.output.info("No saved gates");
        return Ok(());
    }

    let widths = [30, 24, 24, 12, 14];
    ctx.output
        .table_header(&["ID", "Name", "Type", "Area", "Total"], &widths);
    for gate in &customer.gates {
        let name = truncate(&gate.name, widths[1] - 3);
        let area = format_area(gate.areas().total);
        let total = format_price(gate.totals.vat_inclusive_total);
        ctx.output.table_row(
            &[gate.id.as_str(), &name, gate.gate_type.label(), &area, &total],
            &widths,
        );
    }
    Ok(())
}

async fn show_gate(customer: &str, id: &str, ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let customer = find_customer(session.customers(), customer)?;
    let gate_id = GateId::from(id);
    let Some(gate) = customer.get_gate(&gate_id) else {
        return Err(QuoteError::GateNotFound(gate_id.to_string()).into());
    };
    let quote = session.catalog().quote(gate);

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "gate": gate, "quote": quote }));
        return Ok(());
    }

    print_quote(ctx, gate, &quote);
    if quote.totals() != gate.totals {
        ctx.output
            .warn("Saved totals differ from current catalog prices; showing current prices");
    }
    Ok(())
}

async fn delete_gate(customer: &str, id: &str, yes: bool, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    let customer_id = find_customer(session.customers(), customer)?.id.clone();
    session.select_customer(&customer_id)?;
    let gate_id = GateId::from(id);

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete gate {}?", gate_id))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Deletion cancelled");
            return Ok(());
        }
    }

    session.delete_gate(&gate_id)?;
    ctx.output.success(&format!("Gate deleted: {}", gate_id));
    Ok(())
}

fn print_quote(ctx: &Context, gate: &Gate, quote: &QuoteBreakdown) {
    let title = if gate.name.is_empty() {
        gate.gate_type.label().to_string()
    } else {
        format!("{} ({})", gate.name, gate.gate_type.label())
    };
    ctx.output.header(&title);

    let d = &gate.dimensions;
    ctx.output.kv(
        "Dimensions",
        &format!("{} × {} cm, glass {} cm", d.width_cm, d.height_cm, d.glass_height_cm),
    );
    ctx.output.kv("Total area", &format_area(quote.areas.total));
    if d.has_glass() {
        ctx.output.kv("Glass area", &format_area(quote.areas.glass));
        ctx.output.kv("Door area", &format_area(quote.areas.net));
    }
    if !gate.notes.is_empty() {
        ctx.output.kv("Notes", &gate.notes);
    }
    ctx.output.kv("Updated", &format_datetime(&gate.updated_at));

    ctx.output.header("Products");
    if quote.lines.is_empty() {
        ctx.output.info("No products selected");
    } else {
        let widths = [5, 46, 8, 6, 14];
        ctx.output
            .table_header(&["ID", "Product", "Qty", "Basis", "Amount"], &widths);
        for line in &quote.lines {
            let id = line.product.id.to_string();
            let name = truncate(&line.product.name, widths[1] - 3);
            let qty = format!("{:.2}", line.quantity);
            let basis = line.area_basis.map_or(line.product.unit.as_str(), |b| b.as_str());
            let amount = format_price(line.amount);
            ctx.output
                .table_row(&[&id, &name, &qty, basis, &amount], &widths);
        }
    }

    ctx.output.header("Summary");
    ctx.output.kv("Subtotal", &price_cell(quote.subtotal));
    ctx.output.kv(
        &format!("Surcharge {}%", gate.surcharge_percent),
        &price_cell(quote.surcharge_amount),
    );
    ctx.output.kv("Total excl. VAT", &price_cell(quote.pre_vat_total));
    ctx.output.kv(
        &format!("VAT {}%", VAT_RATE * 100.0),
        &price_cell(quote.vat_amount()),
    );
    ctx.output
        .kv("Total incl. VAT", &price_cell(quote.vat_inclusive_total));
}
