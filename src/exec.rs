//! Blocking subprocess helpers. Every external tool invocation goes through
//! here so its exit status is always inspected.

use anyhow::{Context, Result};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::BootstrapError;

/// Run a command to completion, inheriting stdio, and return its status.
pub fn run(command: &mut Command) -> Result<ExitStatus> {
    tracing::debug!("running command: {command:?}");
    let status = command
        .status()
        .with_context(|| format!("spawn {:?}", command.get_program()))?;
    tracing::debug!(code = ?status.code(), "command finished");
    Ok(status)
}

/// Run a command and convert a non-zero exit into `InstallationFailure`.
pub fn run_checked(command: &mut Command, what: &str) -> Result<()> {
    let status = run(command)?;
    if !status.success() {
        return Err(BootstrapError::InstallationFailure(format!(
            "{what} exited with {status}"
        ))
        .into());
    }
    Ok(())
}

/// Run a probe command with its output discarded; only the status matters.
pub fn probe(command: &mut Command) -> Result<ExitStatus> {
    command.stdout(Stdio::null()).stderr(Stdio::null());
    run(command)
}
