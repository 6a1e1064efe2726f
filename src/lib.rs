//! Shared library for `er-modeler`
//! Contains the diagram core used by the CLI.

pub mod core;
pub mod logger;

pub use crate::core::config;
