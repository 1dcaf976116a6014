// src/exec/executor.rs

//! One execution attempt end-to-end: spawn, drain, wait, kill on
//! overrun, assemble the result.

use std::process::ExitStatus;

use tokio::process::Child;
use tokio::time;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::exec::drainer::StreamDrainer;
use crate::exec::{ExecParams, launcher};

/// Outcome of one execution attempt.
///
/// Only ever constructed after both stream drainers have reached
/// end-of-stream, so `stdout`/`stderr` are always the complete output of
/// the child, even when it was killed for overrunning its timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Everything the child wrote to stdout (lossy UTF-8).
    pub stdout: String,
    /// Everything the child wrote to stderr (lossy UTF-8).
    pub stderr: String,
    /// The child's exit code. `-1` when no code is available, which is
    /// the norm for a timed-out (killed) child: a process terminated by
    /// a signal reports no exit code, so the value is implementation-
    /// defined and should not be interpreted when `timed_out` is true.
    pub exit_code: i32,
    /// True when the child outran its timeout and was killed.
    pub timed_out: bool,
}

impl ExecResult {
    /// Natural exit with code 0.
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == 0
    }
}

/// Run one child process to completion and capture its output.
///
/// The sequence is fixed:
///
/// 1. Spawn via [`launcher::spawn`]; a launch failure is the only `Err`
///    this function returns.
/// 2. Start both [`StreamDrainer`]s before blocking on exit, so the
///    child can never stall on a full pipe.
/// 3. Wait for exit, bounded by `params.timeout` if one is set.
/// 4. On overrun, kill the child. A kill that races a natural exit is
///    a no-op.
/// 5. Join both drainers unconditionally; killing (or natural exit)
///    closes the pipes, so both joins terminate.
/// 6. Assemble the [`ExecResult`].
pub async fn execute(params: ExecParams) -> Result<ExecResult> {
    let mut child = launcher::spawn(&params)?;
    let pid = child.id();

    let stdout = StreamDrainer::spawn("stdout", child.stdout.take());
    let stderr = StreamDrainer::spawn("stderr", child.stderr.take());

    let (status, timed_out) = wait_or_kill(&mut child, &params, pid).await;

    // Must happen on every path, including timeout: the result may not
    // be assembled while either drain is still in flight.
    let stdout = stdout.wait().await;
    let stderr = stderr.wait().await;

    let exit_code = status.and_then(|s| s.code()).unwrap_or(-1);

    if timed_out {
        debug!(pid, exit_code, "assembling result for timed-out child");
    } else {
        info!(pid, exit_code, "child process exited");
    }

    Ok(ExecResult {
        stdout,
        stderr,
        exit_code,
        timed_out,
    })
}

/// Wait for the child to exit, enforcing the configured timeout.
///
/// Returns the final exit status (when one could be collected) and
/// whether the attempt timed out.
async fn wait_or_kill(
    child: &mut Child,
    params: &ExecParams,
    pid: Option<u32>,
) -> (Option<ExitStatus>, bool) {
    let Some(limit) = params.timeout.as_duration() else {
        return (reap(child, pid).await, false);
    };

    match time::timeout(limit, child.wait()).await {
        Ok(Ok(status)) => (Some(status), false),
        Ok(Err(err)) => {
            warn!(pid, error = %err, "failed waiting for child exit");
            (None, false)
        }
        Err(_elapsed) => {
            warn!(
                command = %params.command_line(),
                pid,
                timeout = %params.timeout,
                "process timed out; killing it"
            );
            let status = kill_and_reap(child, pid).await;
            warn!(pid, "timed out process killed");
            (status, true)
        }
    }
}

/// Kill the child and collect its final status.
///
/// The child may exit naturally between the deadline firing and the
/// kill signal; that race makes the kill fail, which is tolerated
/// because the intended postcondition (child no longer running) already
/// holds. Reaping afterwards is what actually confirms termination.
async fn kill_and_reap(child: &mut Child, pid: Option<u32>) -> Option<ExitStatus> {
    if let Err(err) = child.start_kill() {
        debug!(pid, error = %err, "kill was a no-op; child already exited");
    }
    reap(child, pid).await
}

/// Wait for exit without a deadline.
async fn reap(child: &mut Child, pid: Option<u32>) -> Option<ExitStatus> {
    match child.wait().await {
        Ok(status) => Some(status),
        Err(err) => {
            warn!(pid, error = %err, "failed waiting for child exit");
            None
        }
    }
}
