// src/cli.rs

//! Command-line interface for `runcap`.
//!
//! Two ways to run something:
//! - `runcap <name>` — look up a named `[command.<name>]` entry in the
//!   config file (default `Runcap.toml`).
//! - `runcap -- <program> [args...]` — run an ad-hoc command; `--timeout`,
//!   `--cwd` and `--env` apply to this form.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::types::Timeout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Parser)]
#[command(
    name = "runcap",
    about = "Run an external command, capture its full output, and enforce a timeout"
)]
pub struct CliArgs {
    /// Named command from the config file to run.
    #[arg(conflicts_with = "command")]
    pub name: Option<String>,

    /// Ad-hoc command to run, given after `--`.
    #[arg(last = true)]
    pub command: Vec<String>,

    /// Path to the command file.
    #[arg(short, long, default_value = "Runcap.toml")]
    pub config: String,

    /// Timeout for ad-hoc commands (e.g. "500ms", "30s", "5m", "none").
    #[arg(short, long)]
    pub timeout: Option<Timeout>,

    /// Working directory for ad-hoc commands.
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Environment override for ad-hoc commands (repeatable).
    #[arg(short, long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Log verbosity; overrides the `RUNCAP_LOG` environment variable.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

/// Split a `KEY=VALUE` override on the first `=`.
pub fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some(("", _)) => Err(format!("invalid env override {s:?}: empty key")),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("invalid env override {s:?}: expected KEY=VALUE")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_pair_splits_on_first_equals() {
        assert_eq!(
            parse_env_pair("KEY=a=b").unwrap(),
            ("KEY".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_env_pair("EMPTY=").unwrap(),
            ("EMPTY".to_string(), String::new())
        );
    }

    #[test]
    fn env_pair_rejects_missing_or_empty_key() {
        assert!(parse_env_pair("NOVALUE").is_err());
        assert!(parse_env_pair("=value").is_err());
    }

    #[test]
    fn ad_hoc_command_is_collected_after_double_dash() {
        let args = CliArgs::try_parse_from([
            "runcap", "--timeout", "5s", "--", "sh", "-c", "echo hi",
        ])
        .unwrap();

        assert_eq!(args.command, vec!["sh", "-c", "echo hi"]);
        assert_eq!(args.timeout, Some("5s".parse().unwrap()));
        assert!(args.name.is_none());
    }

    #[test]
    fn named_command_and_ad_hoc_conflict() {
        let result = CliArgs::try_parse_from(["runcap", "build", "--", "echo", "hi"]);
        assert!(result.is_err());
    }
}
