//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { path, force } => init_config(path.as_deref(), force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let store = &ctx.config.store;
    ctx.output.info("[store]");
    ctx.output.kv("snapshot_dir", &store.snapshot_dir);
    ctx.output.kv(
        "free_shipping_threshold",
        &store.free_shipping_threshold.display(),
    );
    ctx.output.kv("default_session", &store.default_session);
    if let Some(ref path) = store.catalog_path {
        ctx.output.kv("catalog_path", path);
    }

    ctx.output.info("[validation]");
    ctx.output.kv("max_quantity", &ctx.config.validation.max_quantity.to_string());
    ctx.output.kv(
        "allow_negative_prices",
        &ctx.config.validation.allow_negative_prices.to_string(),
    );

    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output.kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    Ok(())
}

/// Write a default config to `path`, or `qeirex.toml` in the cwd.
async fn init_config(path: Option<&str>, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.resolve_path(path.unwrap_or(CONFIG_FILE_NAMES[0]));

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if config_path.extension().is_some_and(|ext| ext == "json") {
        CliConfig::default().save(&config_path)?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Output;

    fn context(cwd: &std::path::Path) -> Context {
        Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: cwd.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn test_init_config_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        init_config(None, false, &ctx).await.unwrap();
        let written = CliConfig::load(&dir.path().join("qeirex.toml")).unwrap();
        assert_eq!(written, CliConfig::default());

        assert!(init_config(None, false, &ctx).await.is_err());
        assert!(init_config(None, true, &ctx).await.is_ok());
    }

    #[tokio::test]
    async fn test_init_config_json() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path());

        init_config(Some("shop.json"), false, &ctx).await.unwrap();
        let written = CliConfig::load(&dir.path().join("shop.json")).unwrap();
        assert_eq!(written, CliConfig::default());
    }
}
