//! Command-line interface entry point for `er-modeler`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use er_modeler::config::Config;
use er_modeler::core::persist::DiagramStorage;
use er_modeler::info;
use er_modeler::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // Determine effective runtime log level: CLI flag overrides config; otherwise use config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| parse_level(&config.logging.level))
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    // Verbose: enable if CLI flag OR config has verbose=true
    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // Initialize file logging: CLI flag wins, otherwise use config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    // Diagram slots live in the configured directory, or the platform data
    // directory when unset
    let storage = if config.paths.diagrams_dir.is_empty() {
        DiagramStorage::default_location()
    } else {
        DiagramStorage::new(&config.paths.diagrams_dir)
    };
    let slot = args.slot.as_str();

    // Handle subcommands
    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Add { kind } => commands::diagram::add(&kind, &storage, slot),
        Command::Connect { a, b, role } => {
            commands::diagram::connect(&a, &b, role, &storage, slot);
        }
        Command::Remove { id } => commands::diagram::remove(&id, &storage, slot),
        Command::Rename { id, name } => commands::diagram::rename(&id, &name, &storage, slot),
        Command::Move { id, x, y } => commands::diagram::move_node(&id, x, y, &storage, slot),
        Command::Show => commands::diagram::show(&storage, slot),
        Command::Translate { format, output } => {
            commands::translate::run(&format, output.as_deref(), &storage, slot, &config);
        }
    }
}

fn parse_level(val: &str) -> Option<Level> {
    match val.to_ascii_lowercase().as_str() {
        "error" => Some(Level::Error),
        "warn" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        _ => None,
    }
}
