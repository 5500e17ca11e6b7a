//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigShowArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Paths => handle_config_paths(output),
        ConfigAction::Validate => handle_config_validate(config, output),
    }
}

/// Handle config show subcommand
fn handle_config_show(
    args: ConfigShowArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let rendered = render_config(config, args.format)?;
    output.write(&rendered)
}

fn render_config(config: &Config, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)
            .map_err(|e| Error::config(format!("Failed to serialize config as TOML: {}", e))),
        ConfigFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(config)?)),
        ConfigFormat::Yaml => Ok(serde_yaml::to_string(config)?),
    }
}

/// Handle config paths subcommand
fn handle_config_paths(output: &mut OutputWriter) -> Result<()> {
    output.section("Configuration search order")?;
    let paths = Config::default_config_paths();
    for path in &paths {
        let marker = if path.exists() { "✓" } else { " " };
        output.writeln(&format!("{} {}", marker, path.display()))?;
    }
    if !paths.iter().any(|path| path.exists()) {
        output.warning("No configuration file found, defaults are in effect")?;
    }
    Ok(())
}

/// Handle config validate subcommand
fn handle_config_validate(config: &Config, output: &mut OutputWriter) -> Result<()> {
    config
        .engine
        .validate()
        .map_err(|e| Error::config(e.to_string()))?;
    output.success("✓ Configuration is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_formats() {
        let config = Config::default();

        let toml = render_config(&config, ConfigFormat::Toml).unwrap();
        assert!(toml.contains("[engine]"));
        assert!(toml.contains("json_indent = 2"));

        let json = render_config(&config, ConfigFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["engine"]["csv_delimiter"], ",");

        let yaml = render_config(&config, ConfigFormat::Yaml).unwrap();
        assert!(yaml.contains("trailing_newline: true"));
    }
}
