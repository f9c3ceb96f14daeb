//! Customer management commands.

use anyhow::{anyhow, Result};
use dialoguer::Confirm;
use gate_core::customer::{Customer, CustomerDetails};
use gate_core::format::{format_date, truncate};
use gate_core::format_price;
use gate_core::ids::CustomerId;

use super::{ContactArgs, CustomerArgs, CustomerCommand};
use crate::context::Context;

/// Run the customer command.
pub async fn run(args: CustomerArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CustomerCommand::Add { name, contact } => add_customer(name, contact, ctx).await,
        CustomerCommand::List => list_customers(ctx).await,
        CustomerCommand::Show { id } => show_customer(&id, ctx).await,
        CustomerCommand::Update { id, name, contact } => {
            update_customer(&id, name, contact, ctx).await
        }
        CustomerCommand::Delete { id, yes } => delete_customer(&id, yes, ctx).await,
    }
}

impl ContactArgs {
    /// Overwrite the fields that were given.
    fn apply(self, details: &mut CustomerDetails) {
        let fields = [
            (self.company, &mut details.company),
            (self.address, &mut details.address),
            (self.city, &mut details.city),
            (self.phone, &mut details.phone),
            (self.email, &mut details.email),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value.trim().to_string();
            }
        }
    }
}

async fn add_customer(name: String, contact: ContactArgs, ctx: &Context) -> Result<()> {
    let mut details = CustomerDetails::new(name.trim());
    contact.apply(&mut details);

    let mut session = ctx.open_session()?;
    let id = session.add_customer(details)?;

    if ctx.output.is_json() {
        ctx.output.json(&session.customer(&id));
    } else {
        ctx.output.success(&format!("Customer added: {}", id));
    }
    Ok(())
}

async fn list_customers(ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let customers = session.customers();

    if ctx.output.is_json() {
        ctx.output.json(&customers);
        return Ok(());
    }

    ctx.output.header("Customers");
    if customers.is_empty() {
        ctx.output.info("No customers yet. Add one with `gatequote customer add NAME`.");
        return Ok(());
    }

    let widths = [34, 32, 20, 6, 14];
    ctx.output
        .table_header(&["ID", "Name", "City", "Gates", "Total"], &widths);
    for c in customers {
        let name = truncate(&c.display_name(), widths[1] - 3);
        let city = truncate(&c.details.city, widths[2] - 3);
        let gates = c.gate_count().to_string();
        let total = format_price(c.quoted_total());
        ctx.output
            .table_row(&[c.id.as_str(), &name, &city, &gates, &total], &widths);
    }
    Ok(())
}

async fn show_customer(id: &str, ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let customer = find_customer(session.customers(), id)?;

    if ctx.output.is_json() {
        ctx.output.json(customer);
        return Ok(());
    }

    ctx.output.header(&customer.display_name());
    let d = &customer.details;
    ctx.output.kv("id", customer.id.as_str());
    for (key, value) in [
        ("address", &d.address),
        ("city", &d.city),
        ("phone", &d.phone),
        ("email", &d.email),
    ] {
        if !value.is_empty() {
            ctx.output.kv(key, value);
        }
    }
    ctx.output.kv("created", &format_date(&customer.created_at));

    ctx.output.header("Gates");
    if customer.gates.is_empty() {
        ctx.output.info("No saved gates");
    }
    for gate in &customer.gates {
        let label = if gate.name.is_empty() {
            gate.gate_type.label().to_string()
        } else {
            format!("{} ({})", gate.name, gate.gate_type.label())
        };
        ctx.output.list_item(&format!(
            "{}  {}  {}",
            gate.id,
            label,
            format_price(gate.totals.vat_inclusive_total)
        ));
    }
    Ok(())
}

async fn update_customer(
    id: &str,
    name: Option<String>,
    contact: ContactArgs,
    ctx: &Context,
) -> Result<()> {
    let mut session = ctx.open_session()?;
    let customer = find_customer(session.customers(), id)?;
    let customer_id = customer.id.clone();

    let mut details = customer.details.clone();
    if let Some(name) = name {
        details.name = name.trim().to_string();
    }
    contact.apply(&mut details);

    session.update_customer(&customer_id, details)?;
    ctx.output.success(&format!("Customer updated: {}", customer_id));
    Ok(())
}

async fn delete_customer(id: &str, yes: bool, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;
    let customer = find_customer(session.customers(), id)?;
    let customer_id = customer.id.clone();

    if !yes {
        ctx.output.warn(&format!(
            "This deletes {} and {} saved gate(s)",
            customer.display_name(),
            customer.gate_count()
        ));
        let confirmed = Confirm::new()
            .with_prompt("Delete customer?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Deletion cancelled");
            return Ok(());
        }
    }

    session.delete_customer(&customer_id)?;
    ctx.output.success(&format!("Customer deleted: {}", customer_id));
    Ok(())
}

/// Look up a customer by exact id.
pub fn find_customer<'a>(customers: &'a [Customer], id: &str) -> Result<&'a Customer> {
    let id = CustomerId::from(id);
    customers
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| anyhow!("Customer not found: {}", id))
}
