//! Init and Config commands.

use crate::cli::{emit, fail};
use crate::config::Settings;
use crate::io::{EntityType, Envelope, ExitCode};
use anyhow::Context;
use serde_json::json;

/// Run init command - create configuration and ignore files.
pub fn run_init(force: bool, json: bool) -> anyhow::Result<ExitCode> {
    let root = std::env::current_dir().context("cannot determine the current directory")?;

    match Settings::init_config_file(&root, force) {
        Ok(path) => {
            if json {
                let envelope = Envelope::success(json!({ "config": path }))
                    .with_message(format!("Created configuration file at {}", path.display()));
                return emit(envelope, ExitCode::Success);
            }
            println!("Created configuration file at: {}", path.display());
            println!("Edit this file to customize your settings.");
            Ok(ExitCode::Success)
        }
        Err(e) => fail(json, ExitCode::ConfigError, e, None),
    }
}

/// Run config command - display the effective configuration.
pub fn run_config(config: &Settings, json: bool) -> anyhow::Result<ExitCode> {
    if json {
        let envelope = Envelope::success(config).with_entity_type(EntityType::Settings);
        return emit(envelope, ExitCode::Success);
    }

    let toml_str = toml::to_string_pretty(config).context("failed to render settings")?;
    println!("{}", crate::display::heading("Current Configuration:"));
    println!("{}", "=".repeat(50));
    println!("{toml_str}");
    Ok(ExitCode::Success)
}
