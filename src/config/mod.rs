// src/config/mod.rs

//! Command-file configuration (`Runcap.toml`).
//!
//! - [`model`] holds the raw (as-written) and validated data types.
//! - [`loader`] reads and validates files from disk.
//! - [`validate`] holds the semantic checks run during conversion.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{CommandSpec, ConfigFile, RawCommandConfig, RawConfigFile, RawDefaults};
