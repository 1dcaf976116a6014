#![allow(dead_code)]

use std::collections::BTreeMap;
use runcap::config::{ConfigFile, RawCommandConfig, RawConfigFile, RawDefaults};
use runcap::types::Timeout;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                defaults: RawDefaults::default(),
                command: BTreeMap::new(),
            },
        }
    }

    pub fn with_command(mut self, name: &str, command: RawCommandConfig) -> Self {
        self.config.command.insert(name.to_string(), command);
        self
    }

    pub fn with_default_timeout(mut self, timeout: Timeout) -> Self {
        self.config.defaults.timeout = Some(timeout);
        self
    }

    pub fn with_default_env(mut self, key: &str, value: &str) -> Self {
        self.config
            .defaults
            .env
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `RawCommandConfig`.
pub struct CommandConfigBuilder {
    command: RawCommandConfig,
}

impl CommandConfigBuilder {
    pub fn new(program: &str) -> Self {
        Self {
            command: RawCommandConfig {
                program: program.to_string(),
                args: vec![],
                cwd: None,
                env: BTreeMap::new(),
                timeout: None,
            },
        }
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.command.args.push(arg.to_string());
        self
    }

    pub fn cwd(mut self, dir: &str) -> Self {
        self.command.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.command.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn timeout(mut self, timeout: Timeout) -> Self {
        self.command.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> RawCommandConfig {
        self.command
    }
}
