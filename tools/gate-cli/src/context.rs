//! CLI execution context.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use gate_core::catalog::Catalog;
use gate_store::{JsonFileStore, QuoteSession};
use tracing::debug;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };
        debug!(config = ?config_path, "configuration loaded");

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory relative paths in the config are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_ref()
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a config path relative to the config file's directory.
    pub fn resolve_config_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir().join(path)
        }
    }

    /// Resolve a command-line path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Path of the customer data file.
    pub fn data_path(&self) -> PathBuf {
        self.resolve_config_path(&self.config.storage.path)
    }

    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.config.catalog.path {
            Some(path) => {
                let path = self.resolve_config_path(path);
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
                Catalog::from_toml_str(&content)
                    .with_context(|| format!("Failed to parse catalog: {}", path.display()))
            }
            None => Ok(Catalog::builtin()),
        }
    }

    /// Open an editing session on the configured data file.
    pub fn open_session(&self) -> Result<QuoteSession<JsonFileStore>> {
        let store = JsonFileStore::new(self.data_path());
        let pricing = &self.config.pricing;
        Ok(QuoteSession::open(store, self.catalog()?)
            .with_default_surcharge(pricing.default_surcharge_percent)
            .with_tier_swap_delay(Duration::from_millis(pricing.tier_swap_debounce_ms)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn context_in(cwd: &Path) -> Context {
        let (config, config_path) = match Context::find_config(cwd) {
            Some((config, path)) => (config, Some(path)),
            None => (CliConfig::default(), None),
        };
        Context {
            config,
            config_path,
            output: Output::new(false, true),
            cwd: cwd.to_path_buf(),
        }
    }

    #[test]
    fn test_config_found_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("gatequote.toml"),
            "[storage]\npath = \"data/customers.json\"\n",
        )
        .unwrap();
        let nested = dir.path().join("quotes/2024");
        fs::create_dir_all(&nested).unwrap();

        let ctx = context_in(&nested);
        assert_eq!(ctx.config_path.as_deref(), Some(dir.path().join("gatequote.toml").as_path()));
        assert_eq!(ctx.data_path(), dir.path().join("data/customers.json"));
        assert_eq!(ctx.resolve_path("out.json"), nested.join("out.json"));
    }

    #[test]
    fn test_defaults_without_config() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());
        assert!(ctx.config_path.is_none());
        assert_eq!(ctx.data_path(), dir.path().join(gate_store::DEFAULT_DATA_FILE));
        assert!(ctx.catalog().unwrap().product_count() > 0);
    }

    #[test]
    fn test_missing_catalog_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("gatequote.toml"),
            "[catalog]\npath = \"prices.toml\"\n",
        )
        .unwrap();
        let ctx = context_in(dir.path());
        let err = ctx.catalog().unwrap_err();
        assert!(format!("{:#}", err).contains("prices.toml"));
    }
}
