// src/config/validate.rs

//! Semantic validation of a parsed config file.
//!
//! TOML-level errors (syntax, unknown fields, bad timeout strings) are
//! caught by serde during parsing; this module checks what serde cannot:
//! empty values and env keys the OS would reject.

use crate::config::model::RawConfigFile;
use crate::errors::{Result, RuncapError};

pub fn validate(raw: &RawConfigFile) -> Result<()> {
    if raw.command.is_empty() {
        return Err(RuncapError::ConfigError(
            "no [command.<name>] tables defined".to_string(),
        ));
    }

    validate_env_keys("defaults", raw.defaults.env.keys())?;

    for (name, cmd) in &raw.command {
        if name.trim().is_empty() {
            return Err(RuncapError::ConfigError(
                "command name must not be empty".to_string(),
            ));
        }
        if cmd.program.trim().is_empty() {
            return Err(RuncapError::ConfigError(format!(
                "command \"{name}\": program must not be empty"
            )));
        }
        validate_env_keys(name, cmd.env.keys())?;
    }

    Ok(())
}

fn validate_env_keys<'a>(
    owner: &str,
    keys: impl Iterator<Item = &'a String>,
) -> Result<()> {
    for key in keys {
        if key.is_empty() || key.contains('=') {
            return Err(RuncapError::ConfigError(format!(
                "{owner}: invalid env key {key:?}"
            )));
        }
    }
    Ok(())
}
