//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand, ConfigFormat};
use crate::config::{generate_default_config, BrmsConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force, format } => init_config(force, format, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let pricing = &ctx.config.pricing;
    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv("currency", pricing.currency.code());
    ctx.output.kv(
        "tax_rate_bps",
        &format!(
            "{} ({}%)",
            pricing.tax_rate_bps,
            pricing.tax_rate_bps as f64 / 100.0
        ),
    );
    ctx.output.kv("delivery_1hour", &pricing.delivery_fees.delivery_1hour.to_string());
    ctx.output.kv("dine_in", &pricing.delivery_fees.dine_in.to_string());
    ctx.output.kv("take_away", &pricing.delivery_fees.take_away.to_string());

    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output.kv(
        "placement_delay_ms",
        &ctx.config.checkout.placement_delay_ms.to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[session]");
    ctx.output.kv("duration_hours", &ctx.config.session.duration_hours.to_string());
    ctx.output.kv("storage_path", &ctx.session_path().display().to_string());

    Ok(())
}

fn init_config(force: bool, format: ConfigFormat, ctx: &Context) -> Result<()> {
    let config_path = match format {
        ConfigFormat::Toml => ctx.cwd.join("brms.toml"),
        ConfigFormat::Json => ctx.cwd.join("brms.json"),
    };

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    match format {
        ConfigFormat::Toml => fs::write(&config_path, generate_default_config())
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?,
        ConfigFormat::Json => BrmsConfig::default().save(&config_path)?,
    }

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
