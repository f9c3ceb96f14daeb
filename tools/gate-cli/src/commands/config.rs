//! Configuration management commands.

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.config.storage.path);
    ctx.output.kv("resolved", &ctx.data_path().display().to_string());

    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv(
        "default_surcharge_percent",
        &ctx.config.pricing.default_surcharge_percent.to_string(),
    );
    ctx.output.kv(
        "tier_swap_debounce_ms",
        &ctx.config.pricing.tier_swap_debounce_ms.to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[catalog]");
    match &ctx.config.catalog.path {
        Some(path) => ctx.output.kv("path", path),
        None => ctx.output.kv("path", "(built-in)"),
    }

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("gatequote.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    tokio::fs::write(&config_path, generate_default_config())
        .await
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if ctx.config.storage.path.trim().is_empty() {
        errors.push("storage.path is required".to_string());
    }

    let surcharge = ctx.config.pricing.default_surcharge_percent;
    if !surcharge.is_finite() || surcharge < 0.0 {
        errors.push("pricing.default_surcharge_percent must be 0 or more".to_string());
    } else if surcharge > 100.0 {
        warnings.push(format!(
            "pricing.default_surcharge_percent {} is above 100%",
            surcharge
        ));
    }

    if ctx.config.pricing.tier_swap_debounce_ms > 10_000 {
        warnings.push("pricing.tier_swap_debounce_ms above 10 seconds".to_string());
    }

    match ctx.catalog() {
        Ok(catalog) => ctx.output.debug(&format!(
            "Catalog loaded: {} products",
            catalog.product_count()
        )),
        Err(e) => errors.push(format!("{:#}", e)),
    }

    if !ctx.data_path().exists() {
        warnings.push(format!(
            "data file {} does not exist yet",
            ctx.data_path().display()
        ));
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::Output;

    #[tokio::test]
    async fn test_init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.path().to_path_buf(),
        };

        init_config(false, &ctx).await.unwrap();
        let written = std::fs::read_to_string(dir.path().join("gatequote.toml")).unwrap();
        assert_eq!(written, generate_default_config());

        assert!(init_config(false, &ctx).await.is_err());
        assert!(init_config(true, &ctx).await.is_ok());
    }
}
