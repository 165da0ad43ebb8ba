//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use qeirex_commerce::catalog::Catalog;
use qeirex_commerce::persist::FileSnapshotStore;
use qeirex_commerce::snapshot_key;
use tracing::debug;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
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

        let config_path = match config_path {
            Some(path) => Some(resolve_in(&cwd, path)),
            None => find_config(&cwd),
        };
        let config = match &config_path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve_in(&self.cwd, path)
    }

    /// Snapshot storage rooted at the configured directory.
    pub fn snapshot_store(&self) -> FileSnapshotStore {
        FileSnapshotStore::new(self.resolve_path(&self.config.store.snapshot_dir))
    }

    /// Snapshot key for a session, falling back to the configured default.
    pub fn session_key(&self, session: Option<&str>) -> String {
        let session = session.unwrap_or(&self.config.store.default_session);
        snapshot_key!("cart", session)
    }

    /// The catalog: the configured JSON file, or the featured products.
    pub async fn catalog(&self) -> Result<Catalog> {
        let Some(path) = &self.config.store.catalog_path else {
            return Ok(Catalog::featured());
        };

        let path = self.resolve_path(path);
        let json = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let catalog = Catalog::from_json(&json)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;
        debug!(path = %path.display(), products = catalog.len(), "loaded catalog");
        Ok(catalog)
    }
}

fn resolve_in(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Find a config file in the directory tree, starting at `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
