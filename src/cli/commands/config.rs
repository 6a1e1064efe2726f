//! Config command handler
//!
//! Reads and edits the persistent configuration file. Like the diagram
//! handlers, each subcommand resolves to a `Result<String, String>` message;
//! only `set` and `unset` write the file back.

use std::io::{self, Write};

use er_modeler::config::Config;

use crate::args::ConfigSubcommand;

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let result = match subcommand {
        None => run_get(config, None),
        Some(ConfigSubcommand::Get { key }) => run_get(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => run_set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => run_unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => run_reset(),
    };

    match result {
        Ok(message) => println!("{message}"),
        Err(message) => eprintln!("{message}"),
    }
}

fn run_get(config: &Config, key: Option<&str>) -> Result<String, String> {
    key.map_or_else(
        || {
            Ok(format!(
                "Configuration ({}):\n{config}",
                Config::get_config_file_path().display()
            ))
        },
        |key| {
            config
                .get(key)
                .ok_or_else(|| format!("✗ Unknown configuration key '{key}'"))
        },
    )
}

fn run_set(config: &mut Config, key: &str, value: &str) -> Result<String, String> {
    config.set(key, value).map_err(|err| format!("✗ {err}"))?;
    persist(config)?;
    Ok(format!("✓ Set {key} = {value}"))
}

fn run_unset(config: &mut Config, defaults: &Config, key: &str) -> Result<String, String> {
    config.unset(key, defaults).map_err(|err| format!("✗ {err}"))?;
    persist(config)?;
    Ok(format!("✓ Reset {key} to its default"))
}

fn persist(config: &Config) -> Result<(), String> {
    config
        .save()
        .map_err(|err| format!("✗ Failed to save config: {err}"))
}

fn run_reset() -> Result<String, String> {
    if !Config::get_config_file_path().exists() {
        return Ok("✓ Config is already at defaults".to_string());
    }

    // Destructive, so ask first.
    print!("Reset all configuration to defaults? (y/n): ");
    io::stdout().flush().ok();
    let mut answer = String::new();
    io::stdin().read_line(&mut answer).ok();

    if matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        Config::reset().map_err(|err| format!("✗ Failed to remove config file: {err}"))?;
        Ok("✓ Config reset to defaults".to_string())
    } else {
        Ok("✗ Reset cancelled".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_key_returns_value() {
        let config = Config::from_defaults();
        let value = run_get(&config, Some("level")).expect("known key");
        assert_eq!(value, config.logging.level);
    }

    #[test]
    fn test_get_unknown_key_is_an_error() {
        let config = Config::from_defaults();
        let message = run_get(&config, Some("endpoint")).expect_err("unknown key");
        assert!(message.contains("endpoint"));
    }

    #[test]
    fn test_get_without_key_lists_everything() {
        let config = Config::from_defaults();
        let listing = run_get(&config, None).expect("listing");
        assert!(listing.contains("level ="));
        assert!(listing.contains("diagrams_dir ="));
    }

    #[test]
    fn test_set_invalid_value_leaves_config_untouched() {
        // Rejected before any file write happens.
        let mut config = Config::from_defaults();
        let level_before = config.logging.level.clone();
        assert!(run_set(&mut config, "level", "chatty").is_err());
        assert_eq!(config.logging.level, level_before);
    }
}
