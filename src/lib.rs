// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use std::io::{self, Write};

use tracing::debug;

use crate::cli::CliArgs;
use crate::errors::{Result, RuncapError};
use crate::exec::{ExecParams, ExecResult};
use crate::types::Timeout;

/// Exit code reported by the CLI when the child outran its timeout,
/// matching the convention of timeout wrappers.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// High-level entry point used by `main.rs`.
///
/// Resolves launch parameters (named command from the config file, or an
/// ad-hoc command from the CLI), executes the child to completion, relays
/// the captured output, and returns the exit code the process should
/// terminate with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let params = resolve_params(&args)?;
    debug!(command = %params.command_line(), timeout = %params.timeout, "resolved launch parameters");

    let result = exec::execute(params).await?;
    relay_output(&result)?;

    Ok(exit_code_for(&result))
}

/// Build [`ExecParams`] from the CLI invocation.
fn resolve_params(args: &CliArgs) -> Result<ExecParams> {
    if let Some((program, rest)) = args.command.split_first() {
        let mut params = ExecParams::new(program)
            .args(rest.iter().cloned())
            .timeout(args.timeout.unwrap_or(Timeout::None));
        if let Some(ref dir) = args.cwd {
            params = params.cwd(dir.clone());
        }
        for (key, value) in &args.env {
            params = params.env(key, value);
        }
        return Ok(params);
    }

    if let Some(ref name) = args.name {
        let cfg = config::load_and_validate(&args.config)?;
        return Ok(cfg.command(name)?.to_params());
    }

    Err(RuncapError::ConfigError(
        "nothing to run: pass a command name or `-- <program> [args...]`".to_string(),
    ))
}

/// Print the captured streams once execution has finished.
///
/// stdout capture goes to stdout, stderr capture to stderr, in that
/// order. Output is only ever relayed complete, never streamed.
fn relay_output(result: &ExecResult) -> Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(result.stdout.as_bytes())?;
    stdout.flush()?;

    let mut stderr = io::stderr();
    stderr.write_all(result.stderr.as_bytes())?;
    stderr.flush()?;

    Ok(())
}

fn exit_code_for(result: &ExecResult) -> i32 {
    if result.timed_out {
        TIMEOUT_EXIT_CODE
    } else {
        result.exit_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn ad_hoc_invocation_resolves_to_params() {
        let args = CliArgs::try_parse_from([
            "runcap",
            "--timeout",
            "5s",
            "--env",
            "MODE=test",
            "--",
            "sh",
            "-c",
            "echo hi",
        ])
        .unwrap();

        let params = resolve_params(&args).unwrap();
        assert_eq!(params.program, "sh");
        assert_eq!(params.args, vec!["-c", "echo hi"]);
        assert_eq!(params.timeout, "5s".parse().unwrap());
        assert_eq!(params.env, vec![("MODE".to_string(), "test".to_string())]);
    }

    #[test]
    fn empty_invocation_is_a_config_error() {
        let args = CliArgs::try_parse_from(["runcap"]).unwrap();
        match resolve_params(&args) {
            Err(RuncapError::ConfigError(_)) => {}
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn timed_out_result_maps_to_timeout_exit_code() {
        let result = ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: -1,
            timed_out: true,
        };
        assert_eq!(exit_code_for(&result), TIMEOUT_EXIT_CODE);

        let natural = ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 3,
            timed_out: false,
        };
        assert_eq!(exit_code_for(&natural), 3);
    }
}
