//! Configuration module for `er-modeler`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for saved diagram slots
    #[serde(default)]
    pub diagrams_dir: String,
    /// Directory for exported schema reports
    #[serde(default)]
    pub export_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override saved-diagram directory
    pub diagrams_dir: Option<String>,
    /// Override export directory
    pub export_dir: Option<String>,
}

impl Config {
    /// Get the `$ER_MODELER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/ermodeler`
    /// - macOS: `~/Library/Application Support/ermodeler`
    /// - Windows: `%APPDATA%\ermodeler`
    #[must_use]
    pub fn get_ermodeler_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ermodeler")
    }

    /// Get the user config file path (`config.toml` for release builds,
    /// `dconfig.toml` for debug builds)
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_ermodeler_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$ER_MODELER` in a config value to the actual directory path
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains("$ER_MODELER") {
            let dir = Self::get_ermodeler_dir();
            value.replace("$ER_MODELER", dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$ER_MODELER` references in
    /// path values are expanded.
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or doesn't match the
    /// expected schema.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        // Expand variables in config values
        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.diagrams_dir = Self::expand_variables(&config.paths.diagrams_dir);
        config.paths.export_dir = Self::expand_variables(&config.paths.export_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the compiled-in default configuration is invalid TOML. This
    /// should never happen in practice since the defaults ship with the
    /// binary.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Used when loading so that newly added configuration fields are
    /// populated with their default values. Only fields that are empty in the
    /// current config and non-empty in defaults are updated.
    ///
    /// # Returns
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        // Merge logging fields - only if they're empty (use defaults for empty values)
        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        // Merge paths fields
        if self.paths.diagrams_dir.is_empty() && !defaults.paths.diagrams_dir.is_empty() {
            self.paths
                .diagrams_dir
                .clone_from(&defaults.paths.diagrams_dir);
            changed = true;
        }
        if self.paths.export_dir.is_empty() && !defaults.paths.export_dir.is_empty() {
            self.paths.export_dir.clone_from(&defaults.paths.export_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Command-line arguments override configuration file values for this run
    /// only; the persistent file is untouched. Only non-`None` values replace
    /// config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(diagrams_dir) = &overrides.diagrams_dir {
            self.paths.diagrams_dir.clone_from(diagrams_dir);
        }
        if let Some(export_dir) = &overrides.export_dir {
            self.paths.export_dir.clone_from(export_dir);
        }
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: loads it, merges missing fields from
    ///   defaults, and saves the updated config.
    /// - On first run: creates the config directory and writes the defaults.
    ///
    /// Falls back to defaults if any error occurs during loading.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    // Merge any missing fields from defaults
                    if config.merge_defaults(&defaults) {
                        // Save the updated config with new fields
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            // First run: create directory and config file from defaults
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the platform-specific config file, creating the
    /// directory as needed
    ///
    /// # Errors
    /// Returns an error if serialization fails, the config directory cannot
    /// be created, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `diagrams_dir`,
    /// `export_dir` (dashed forms accepted).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "diagrams_dir" | "diagrams-dir" => Some(self.paths.diagrams_dir.clone()),
            "export_dir" | "export-dir" => Some(self.paths.export_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// `level` is validated against the known level names; `verbose` accepts
    /// `true`/`false`. Path values are stored as given.
    ///
    /// # Errors
    /// Returns a message naming the rejected key or value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                let lowered = value.to_lowercase();
                match lowered.as_str() {
                    "error" | "warn" | "info" | "debug" => {
                        self.logging.level = lowered;
                        Ok(())
                    }
                    _ => Err(format!(
                        "Invalid level '{value}' (expected error, warn, info, or debug)"
                    )),
                }
            }
            "file" => {
                self.logging.file = Self::expand_variables(value);
                Ok(())
            }
            "verbose" => match value.to_lowercase().as_str() {
                "true" | "1" | "yes" => {
                    self.logging.verbose = true;
                    Ok(())
                }
                "false" | "0" | "no" => {
                    self.logging.verbose = false;
                    Ok(())
                }
                _ => Err(format!("Invalid verbose value '{value}' (expected true or false)")),
            },
            "diagrams_dir" | "diagrams-dir" => {
                self.paths.diagrams_dir = Self::expand_variables(value);
                Ok(())
            }
            "export_dir" | "export-dir" => {
                self.paths.export_dir = Self::expand_variables(value);
                Ok(())
            }
            _ => Err(format!("Unknown configuration key '{key}'")),
        }
    }

    /// Reset a configuration value to its default
    ///
    /// # Errors
    /// Returns a message when the key is unknown.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => {
                self.logging.level.clone_from(&defaults.logging.level);
                Ok(())
            }
            "file" => {
                self.logging.file.clone_from(&defaults.logging.file);
                Ok(())
            }
            "verbose" => {
                self.logging.verbose = defaults.logging.verbose;
                Ok(())
            }
            "diagrams_dir" | "diagrams-dir" => {
                self.paths
                    .diagrams_dir
                    .clone_from(&defaults.paths.diagrams_dir);
                Ok(())
            }
            "export_dir" | "export-dir" => {
                self.paths.export_dir.clone_from(&defaults.paths.export_dir);
                Ok(())
            }
            _ => Err(format!("Unknown configuration key '{key}'")),
        }
    }

    /// Delete the config file so the next load recreates it from defaults
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "level = {}", self.logging.level)?;
        writeln!(f, "file = {}", self.logging.file)?;
        writeln!(f, "verbose = {}", self.logging.verbose)?;
        writeln!(f, "diagrams_dir = {}", self.paths.diagrams_dir)?;
        write!(f, "export_dir = {}", self.paths.export_dir)
    }
}
