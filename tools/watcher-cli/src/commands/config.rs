//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, WatcherConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { path, force } => init_config(&path, force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let config = &ctx.config;
    ctx.output.header("Current Configuration");

    ctx.output.info("[server]");
    ctx.output.kv("host", &config.server.host);
    ctx.output.kv("port", &config.server.port.to_string());

    ctx.output.info("[storage]");
    ctx.output.kv("data_file", &config.storage.data_file);
    ctx.output.kv(
        "resolved",
        &ctx.resolve_path(&config.storage.data_file).display().to_string(),
    );

    ctx.output.info("[cors]");
    ctx.output.kv("allowed_origins", &config.cors.allowed_origins.join(", "));
    ctx.output.kv(
        "allow_browser_extensions",
        &config.cors.allow_browser_extensions.to_string(),
    );

    ctx.output.info("[logging]");
    ctx.output.kv("format", config.logging.format.as_str());
    ctx.output.kv("level", &config.logging.level);

    Ok(())
}

fn init_config(path: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.resolve_path(path);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if path.ends_with(".json") {
        WatcherConfig::default().save(&config_path.to_string_lossy())?;
    } else {
        fs::write(&config_path, generate_default_config())?;
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
