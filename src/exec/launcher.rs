// src/exec/launcher.rs

//! Child process launch seam.
//!
//! Everything that turns [`ExecParams`] into a running OS process lives
//! here: argument and environment plumbing, stdio wiring, and the one
//! place a [`RuncapError::Launch`] can originate. The rest of the exec
//! layer only ever sees a spawned `tokio::process::Child`.

use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::info;

use crate::errors::{Result, RuncapError};
use crate::exec::ExecParams;

/// Spawn the child described by `params` with stdout/stderr piped back
/// to us and stdin closed.
///
/// `kill_on_drop` guarantees the OS process is reaped even if the
/// executing future is dropped mid-flight.
pub fn spawn(params: &ExecParams) -> Result<Child> {
    let mut cmd = Command::new(&params.program);
    cmd.args(&params.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(ref dir) = params.cwd {
        cmd.current_dir(dir);
    }
    for (key, value) in &params.env {
        cmd.env(key, value);
    }

    let child = cmd.spawn().map_err(|source| RuncapError::Launch {
        program: params.program.clone(),
        source,
    })?;

    info!(
        program = %params.program,
        args = ?params.args,
        pid = child.id(),
        "child process started"
    );

    Ok(child)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spawn_missing_program_is_a_launch_error() {
        let params = ExecParams::new("runcap-no-such-program-here");
        let err = spawn(&params).expect_err("spawn should fail");

        match err {
            RuncapError::Launch { program, .. } => {
                assert_eq!(program, "runcap-no-such-program-here");
            }
            other => panic!("expected Launch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn spawn_wires_up_both_pipes() {
        let params = ExecParams::new("true");
        let mut child = spawn(&params).expect("true should spawn");

        assert!(child.stdout.is_some());
        assert!(child.stderr.is_some());

        let status = child.wait().await.expect("wait should succeed");
        assert!(status.success());
    }
}
