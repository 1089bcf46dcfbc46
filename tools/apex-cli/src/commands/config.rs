//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, StorageBackend, CONFIG_FILE_NAMES};
use crate::context::{find_config_file, Context};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match find_config_file(&ctx.cwd) {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;
    ctx.output.info("[storage]");
    ctx.output.kv("dir", &config.storage.dir);
    ctx.output.kv("backend", config.storage.backend.as_str());

    ctx.output.info("[latency]");
    ctx.output.kv("vrm_lookup_ms", &config.latency.vrm_lookup_ms.to_string());
    ctx.output.kv("parts_lookup_ms", &config.latency.parts_lookup_ms.to_string());
    ctx.output.kv("login_ms", &config.latency.login_ms.to_string());
    ctx.output.kv("checkout_ms", &config.latency.checkout_ms.to_string());

    ctx.output.info("[logging]");
    ctx.output.kv("level", &config.logging.level);
    ctx.output.kv("format", &config.logging.format);

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(path) = find_config_file(&ctx.cwd) else {
        bail!("No config file found. Run `apex config init` to create one.");
    };
    let path = path.to_string_lossy().to_string();

    let mut config = CliConfig::load(&path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["storage", "dir"] => config.storage.dir = value.to_string(),
        ["storage", "backend"] => {
            config.storage.backend = match value {
                "file" => StorageBackend::File,
                "memory" => StorageBackend::Memory,
                _ => bail!("storage.backend must be \"file\" or \"memory\""),
            }
        }
        ["latency", "vrm_lookup_ms"] => config.latency.vrm_lookup_ms = value.parse()?,
        ["latency", "parts_lookup_ms"] => config.latency.parts_lookup_ms = value.parse()?,
        ["latency", "login_ms"] => config.latency.login_ms = value.parse()?,
        ["latency", "checkout_ms"] => config.latency.checkout_ms = value.parse()?,
        ["logging", "level"] => config.logging.level = value.to_string(),
        ["logging", "format"] => {
            if value != "plain" && value != "json" {
                bail!("logging.format must be \"plain\" or \"json\"");
            }
            config.logging.format = value.to_string();
        }
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_config_value() {
        let mut config = CliConfig::default();
        set_config_value(&mut config, "latency.checkout_ms", "0").unwrap();
        set_config_value(&mut config, "storage.backend", "memory").unwrap();
        set_config_value(&mut config, "logging.format", "json").unwrap();

        assert_eq!(config.latency.checkout_ms, 0);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_set_config_value_rejects_bad_input() {
        let mut config = CliConfig::default();
        assert!(set_config_value(&mut config, "latency.login_ms", "soon").is_err());
        assert!(set_config_value(&mut config, "storage.backend", "redis").is_err());
        assert!(set_config_value(&mut config, "cart.items", "[]").is_err());
        assert_eq!(config, CliConfig::default());
    }
}
