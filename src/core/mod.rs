//! Core module: diagram store, validation, translation, persistence

pub mod config;
pub mod models;
pub mod persist;
pub mod report;
pub mod schema;
pub mod store;
pub mod validate;

/// Returns the current version of the `er-modeler` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
