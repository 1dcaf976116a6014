// src/exec/params.rs

//! Launch parameters for one execution attempt.

use std::path::PathBuf;

use crate::types::Timeout;

/// Everything needed to launch one child process.
///
/// Built by the caller (CLI, config file, or library user), then handed to
/// [`execute`](crate::exec::execute) by value. One `ExecParams` describes
/// exactly one execution attempt; it is not mutated after being passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecParams {
    /// Program to run. Resolved through `PATH` by the OS, like
    /// `std::process::Command` does.
    pub program: String,
    /// Arguments passed to the program, not shell-interpreted.
    pub args: Vec<String>,
    /// Working directory for the child. `None` inherits the parent's.
    pub cwd: Option<PathBuf>,
    /// Environment overrides applied on top of the inherited environment.
    pub env: Vec<(String, String)>,
    /// How long the child may run before being killed.
    pub timeout: Timeout,
}

impl ExecParams {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
            timeout: Timeout::None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Timeout) -> Self {
        self.timeout = timeout;
        self
    }

    /// Single-line rendering of program + args for log messages.
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_fields() {
        let params = ExecParams::new("cargo")
            .arg("build")
            .args(["--release", "--quiet"])
            .cwd("/tmp")
            .env("RUST_LOG", "debug");

        assert_eq!(params.program, "cargo");
        assert_eq!(params.args, vec!["build", "--release", "--quiet"]);
        assert_eq!(params.cwd, Some(PathBuf::from("/tmp")));
        assert_eq!(
            params.env,
            vec![("RUST_LOG".to_string(), "debug".to_string())]
        );
        assert_eq!(params.timeout, Timeout::None);
    }

    #[test]
    fn command_line_joins_program_and_args() {
        let params = ExecParams::new("echo").arg("hello").arg("world");
        assert_eq!(params.command_line(), "echo hello world");

        let bare = ExecParams::new("true");
        assert_eq!(bare.command_line(), "true");
    }
}
