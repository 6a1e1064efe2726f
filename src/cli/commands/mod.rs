//! CLI command handlers for `er-modeler`.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod config;
pub mod diagram;
pub mod translate;
