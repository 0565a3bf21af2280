//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigInitArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use std::path::PathBuf;

/// Handle the config command
pub async fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show => handle_config_show(config, output),
        ConfigAction::Validate => handle_config_validate(config, output),
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from(".gallery.yaml"));

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    Config::default().save(&path)?;
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Edit it to add bounds profiles or change logging settings.")?;

    Ok(())
}

/// Handle config show subcommand
fn handle_config_show(config: &Config, output: &mut OutputWriter) -> Result<()> {
    if output.format() == OutputFormat::Human {
        output.writeln(serde_yaml::to_string(config)?.trim_end())
    } else {
        output.data(config)
    }
}

/// Handle config validate subcommand
fn handle_config_validate(config: &Config, output: &mut OutputWriter) -> Result<()> {
    output.info("Validating configuration...")?;

    if let Err(e) = config.validate() {
        output.error(&format!("✗ Configuration validation failed: {}", e))?;
        return Err(e);
    }
    output.success("✓ Configuration is valid")?;

    output.section("Profiles")?;
    for (name, bounds) in &config.profiles {
        let marker = if *name == config.default_profile { " (default)" } else { "" };
        output.info(&format!("• {}: {}{}", name, bounds, marker))?;
    }

    output.section("Configuration Sources")?;
    for path in Config::default_config_paths() {
        let exists = if path.exists() { "✓" } else { "✗" };
        output.info(&format!("{} {}", exists, path.display()))?;
    }

    let active_env_vars: Vec<(&str, String)> = ["GALLERY_CONFIG", "GALLERY_LOG_FORMAT", "GALLERY_LOG_FILE", "RUST_LOG"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok().map(|value| (var, value)))
        .collect();

    if !active_env_vars.is_empty() {
        output.section("Active Environment Variables")?;
        for (var, value) in active_env_vars {
            output.info(&format!("• {} = {}", var, value))?;
        }
    }

    Ok(())
}
