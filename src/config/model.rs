// src/config/model.rs

//! Config file data model.
//!
//! Two layers, converted with `TryFrom`:
//! - `Raw*` structs mirror the TOML file exactly as written.
//! - [`ConfigFile`] / [`CommandSpec`] are the validated, resolved form
//!   the rest of the application consumes (defaults applied, env maps
//!   merged).

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::config::validate;
use crate::errors::{Result, RuncapError};
use crate::exec::ExecParams;
use crate::types::Timeout;

/// `[defaults]` section: values applied to every command that does not
/// override them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDefaults {
    pub timeout: Option<Timeout>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// One `[command.<name>]` table as written in the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawCommandConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    pub timeout: Option<Timeout>,
}

/// The whole file as parsed from TOML, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub defaults: RawDefaults,
    #[serde(default)]
    pub command: BTreeMap<String, RawCommandConfig>,
}

/// A validated command with defaults already folded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
    pub timeout: Timeout,
}

impl CommandSpec {
    pub fn to_params(&self) -> ExecParams {
        let mut params = ExecParams::new(&self.program)
            .args(self.args.iter().cloned())
            .timeout(self.timeout);
        if let Some(ref dir) = self.cwd {
            params = params.cwd(dir.clone());
        }
        for (key, value) in &self.env {
            params = params.env(key, value);
        }
        params
    }
}

/// Validated configuration: named commands ready to execute.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub commands: BTreeMap<String, CommandSpec>,
}

impl ConfigFile {
    /// Look up a command by name.
    pub fn command(&self, name: &str) -> Result<&CommandSpec> {
        self.commands
            .get(name)
            .ok_or_else(|| RuncapError::CommandNotFound(name.to_string()))
    }
}

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = RuncapError;

    fn try_from(raw: RawConfigFile) -> Result<Self> {
        validate::validate(&raw)?;

        let defaults = raw.defaults;
        let commands = raw
            .command
            .into_iter()
            .map(|(name, cmd)| {
                // Default env first, command env second: the command's
                // entries win when keys collide.
                let mut env = defaults.env.clone();
                env.extend(cmd.env);

                let spec = CommandSpec {
                    program: cmd.program,
                    args: cmd.args,
                    cwd: cmd.cwd,
                    env: env.into_iter().collect(),
                    timeout: cmd.timeout.or(defaults.timeout).unwrap_or_default(),
                };
                (name, spec)
            })
            .collect();

        Ok(ConfigFile { commands })
    }
}
