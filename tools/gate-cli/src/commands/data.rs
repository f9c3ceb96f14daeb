//! Backup, restore and storage commands.

use anyhow::{Context as _, Result};
use chrono::Local;
use dialoguer::Confirm;
use gate_store::{backup_file_name, CustomerStore};
use serde_json::json;

use super::{DataArgs, DataCommand};
use crate::context::Context;
use crate::output::format_bytes;

/// Run the data command.
pub async fn run(args: DataArgs, ctx: &Context) -> Result<()> {
    match args.command {
        DataCommand::Export { output } => export_data(output, ctx).await,
        DataCommand::Import { file, yes } => import_data(&file, yes, ctx).await,
        DataCommand::Clear { yes } => clear_data(yes, ctx).await,
        DataCommand::Info => show_info(ctx).await,
    }
}

async fn export_data(output: Option<String>, ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let content = session.export()?;

    let path = match output {
        Some(path) => ctx.resolve_path(&path),
        None => ctx.cwd.join(backup_file_name(Local::now().date_naive())),
    };
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("Failed to write backup: {}", path.display()))?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "path": path,
            "customers": session.customers().len(),
        }));
    } else {
        ctx.output.success(&format!(
            "Exported {} customer(s) to {}",
            session.customers().len(),
            path.display()
        ));
    }
    Ok(())
}

async fn import_data(file: &str, yes: bool, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(file);
    let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read backup: {}", path.display()))?;

    let mut session = ctx.open_session()?;
    if !yes && !session.customers().is_empty() {
        ctx.output.warn(&format!(
            "This replaces {} existing customer(s)",
            session.customers().len()
        ));
        let confirmed = Confirm::new()
            .with_prompt("Import backup?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Import cancelled");
            return Ok(());
        }
    }

    let count = session
        .import(&content)
        .with_context(|| format!("Failed to import {}", path.display()))?;
    ctx.output
        .success(&format!("Imported {} customer(s)", count));
    Ok(())
}

async fn clear_data(yes: bool, ctx: &Context) -> Result<()> {
    let mut session = ctx.open_session()?;

    if !yes {
        ctx.output.warn(&format!(
            "This deletes {} customer(s) and all their gates",
            session.customers().len()
        ));
        let confirmed = Confirm::new()
            .with_prompt("Delete all data?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    session.clear_all()?;
    ctx.output.success("All data deleted");
    Ok(())
}

async fn show_info(ctx: &Context) -> Result<()> {
    let session = ctx.open_session()?;
    let store = session.store();
    let gates: usize = session.customers().iter().map(|c| c.gate_count()).sum();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "location": store.location(),
            "available": store.is_available(),
            "size_bytes": store.size_bytes(),
            "customers": session.customers().len(),
            "gates": gates,
        }));
        return Ok(());
    }

    ctx.output.header("Storage");
    ctx.output.kv("location", &store.location());
    ctx.output.kv(
        "available",
        if store.is_available() { "yes" } else { "no" },
    );
    ctx.output.kv("size", &format_bytes(store.size_bytes()));
    ctx.output
        .kv("customers", &session.customers().len().to_string());
    ctx.output.kv("gates", &gates.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::Output;
    use gate_core::customer::CustomerDetails;

    fn context_in(dir: &std::path::Path) -> Context {
        Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn test_export_then_import_restores_customers() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());
        ctx.open_session()
            .unwrap()
            .add_customer(CustomerDetails::new("Hofer"))
            .unwrap();

        export_data(Some("backup.json".to_string()), &ctx).await.unwrap();
        assert!(dir.path().join("backup.json").exists());

        clear_data(true, &ctx).await.unwrap();
        assert!(ctx.open_session().unwrap().customers().is_empty());

        import_data("backup.json", true, &ctx).await.unwrap();
        let session = ctx.open_session().unwrap();
        assert_eq!(session.customers().len(), 1);
        assert_eq!(session.customers()[0].name(), "Hofer");
    }

    #[tokio::test]
    async fn test_import_of_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());
        let err = import_data("missing.json", true, &ctx).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read backup"));
    }
}
