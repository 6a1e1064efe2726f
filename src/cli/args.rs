//! CLI argument definitions for `er-modeler`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use er_modeler::config::ConfigOverrides;
use er_modeler::core::validate::InheritanceRole;
use er_modeler::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to
/// lowercase strings for config storage and to `logger::Level` for runtime
/// use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

/// Role an entity plays in an inheritance connection
///
/// The interactive editor asked this via a prompt; the CLI takes it as an
/// explicit flag and converts it to the core's `InheritanceRole`.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum RoleArg {
    /// The entity is the parent of the hierarchy
    Parent,
    /// The entity is a child in the hierarchy
    Child,
}

impl From<RoleArg> for InheritanceRole {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Parent => Self::Parent,
            RoleArg::Child => Self::Child,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `diagrams_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum AddSubcommand {
    /// Add an entity.
    Entity {
        /// Display name (defaults to "Entity", or "Weak Entity" with --weak)
        #[arg(value_name = "NAME")]
        name: Option<String>,

        /// Mark the entity as weak (no independent primary key)
        #[arg(long)]
        weak: bool,
    },
    /// Add a relationship.
    Relationship {
        /// Display name (defaults to "R")
        #[arg(value_name = "NAME")]
        name: Option<String>,

        /// Mark the relationship as identifying for a weak entity
        #[arg(long)]
        identifying: bool,
    },
    /// Add an inheritance ("is-a") marker.
    Inheritance {
        /// Display name (defaults to "is-a")
        #[arg(value_name = "NAME")]
        name: Option<String>,
    },
    /// Add an attribute to an entity.
    Attribute {
        /// Display name of the attribute
        #[arg(value_name = "NAME")]
        name: String,

        /// Id of the owning entity
        #[arg(long, value_name = "ID")]
        owner: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Add a node to the diagram.
    Add {
        #[command(subcommand)]
        kind: AddSubcommand,
    },
    /// Connect two nodes, validating the pair and computing cardinalities.
    Connect {
        /// First node id
        #[arg(value_name = "ID1")]
        a: String,

        /// Second node id
        #[arg(value_name = "ID2")]
        b: String,

        /// Role of the entity when connecting to an inheritance marker
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
    },
    /// Remove a node and everything attached to it.
    Remove {
        /// Node id to remove
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Rename a node.
    Rename {
        /// Node id to rename
        #[arg(value_name = "ID")]
        id: String,

        /// New display name
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Move a node; the move is skipped when it would overlap another node.
    Move {
        /// Node id to move
        #[arg(value_name = "ID")]
        id: String,

        /// New x position
        #[arg(value_name = "X")]
        x: f64,

        /// New y position
        #[arg(value_name = "Y")]
        y: f64,
    },
    /// List the diagram's nodes and edges.
    Show,
    /// Translate the diagram to a relational schema sketch.
    Translate {
        /// Report format: text or markdown (md)
        #[arg(short, long, value_name = "FORMAT", default_value = "text")]
        format: String,

        /// Output file path (prints to stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "ermodeler",
    about = "ER diagram editor and relational-schema translator",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Diagram slot to operate on
    #[arg(long = "diagram", value_name = "SLOT", default_value = "diagram")]
    pub slot: String,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config saved-diagram directory
    #[arg(long = "config-diagrams-dir", value_name = "DIR")]
    pub config_diagrams_dir: Option<PathBuf>,

    /// Override config saved-diagram directory (short form)
    #[arg(long = "diagrams-dir", value_name = "DIR")]
    pub diagrams_dir: Option<PathBuf>,

    /// Override config export directory
    #[arg(long = "config-export-dir", value_name = "DIR")]
    pub config_export_dir: Option<PathBuf>,

    /// Override config export directory (short form)
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--diagrams-dir`) take precedence over
    /// long-form flags (e.g., `--config-diagrams-dir`) when both are
    /// provided.
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            diagrams_dir: self
                .diagrams_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .or_else(|| {
                    self.config_diagrams_dir
                        .as_ref()
                        .map(|p| p.to_string_lossy().to_string())
                }),
            export_dir: self
                .export_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .or_else(|| {
                    self.config_export_dir
                        .as_ref()
                        .map(|p| p.to_string_lossy().to_string())
                }),
        }
    }
}
